//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the sorted query surface, so the JSON is as deterministic as
//! the HTML output.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct EntityView<'a> {
    kind: EntityKind,
    label: &'a str,
    anchor: String,
    description: &'a str,
    extends: Vec<&'a str>,
    constructor: Option<MethodView<'a>>,
    methods: Vec<MethodView<'a>>,
}

#[derive(Serialize)]
struct MethodView<'a> {
    name: &'a str,
    owner: &'a str,
    label: String,
    description: &'a str,
    params: Vec<ParamView<'a>>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    ret: Option<ParamView<'a>>,
}

#[derive(Serialize)]
struct ParamView<'a> {
    label: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct IndexEntry<'a> {
    kind: EntityKind,
    label: &'a str,
    anchor: String,
}

impl<'a> From<&'a Param> for ParamView<'a> {
    fn from(p: &'a Param) -> Self {
        Self {
            label: p.label(),
            description: p.description(),
        }
    }
}

impl<'a> From<&'a Method> for MethodView<'a> {
    fn from(m: &'a Method) -> Self {
        Self {
            name: m.name(),
            owner: &m.owner.name,
            label: m.label(),
            description: m.description(),
            params: m.params().iter().map(ParamView::from).collect(),
            ret: m.ret().map(ParamView::from),
        }
    }
}

impl<'a> From<&'a Entity> for EntityView<'a> {
    fn from(e: &'a Entity) -> Self {
        Self {
            kind: e.kind(),
            label: e.label(),
            anchor: toc::anchor(e),
            description: e.description(),
            extends: e.extends().collect(),
            constructor: e.constructor().map(MethodView::from),
            methods: e.methods().into_iter().map(MethodView::from).collect(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, ns: &Namespace) -> String {
        let entities: Vec<EntityView> = ns.entities().into_iter().map(EntityView::from).collect();
        to_json(&serde_json::json!({ "entities": entities }))
    }

    fn render_index(&self, ns: &Namespace) -> String {
        let index: Vec<IndexEntry> = ns
            .entities()
            .into_iter()
            .map(|e| IndexEntry {
                kind: e.kind(),
                label: e.label(),
                anchor: toc::anchor(e),
            })
            .collect();
        to_json(&index)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut out = serde_json::to_string_pretty(value)
        .expect("views hold only strings, sequences and string-keyed structs");
    out.push('\n');
    out
}
