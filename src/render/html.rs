//! HTML renderer — template-table visitor over the documentation tree.
//!
//! Each node kind has a template with `%(name)` placeholders. Labels and
//! descriptions are escaped before substitution, children are rendered
//! recursively into `%(contained)`, and a final pass rewrites the markup
//! shorthands listed in [`SYMBOLS`].

use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\(([a-z]+)\)").unwrap());

/// Node templates, keyed by [`Node::kind`].
const TEMPLATES: &[(&str, &str)] = &[
    (
        "everything",
        "<div class=\"everything\">\n%(contained)\n</div>\n",
    ),
    (
        "object",
        "<article id=\"%(anchor)\" class=\"%(kind)\"> <h1> %(label) </h1> %(extends) <p> %(description) </p> <p> %(contained) </p> </article>",
    ),
    (
        "constructor",
        "<section> <h2> Constructor </h2> %(contained) <div class=\"method_desc\"> %(description) </div> </section>",
    ),
    (
        "method",
        "<section> <h2> %(label) </h2> %(contained) <div class=\"method_desc\"> %(description) </div> </section>",
    ),
    (
        "param",
        "<div class=\"param\"> <div class=\"param_type\"> &larr; %(label) </div> <div class=\"param_desc\"> %(description) </div> </div>",
    ),
    (
        "return",
        "<div class=\"return\"> <div class=\"return_type\"> &rarr; %(label) </div> <div class=\"return_desc\"> %(description) </div> </div>",
    ),
];

/// Literal rewrites applied after substitution.
pub const SYMBOLS: &[(&str, &str)] = &[
    ("--&#62;", "&rarr;"),
    ("[code]", "<code>"),
    ("[/code]", "</code>"),
    ("[p]", "<p>"),
    ("[/p]", "</p>"),
    ("[url]", "<a href=\"\">"),
    ("[/url]", "</a>"),
];

const PAGE: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<link rel=\"stylesheet\" href=\"style.css\" type=\"text/css\" />
</head>
<body>
<nav>
%(index)
</nav>
%(contents)
</body>
</html>
";

pub struct HtmlRenderer {
    templates: HashMap<&'static str, &'static str>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            templates: TEMPLATES.iter().copied().collect(),
        }
    }

    /// Render one node and, recursively, its children.
    pub fn visit(&self, node: Node<'_>) -> String {
        let Some(template) = self.templates.get(node.kind()) else {
            return String::new();
        };

        let contained: Vec<String> = node
            .children()
            .into_iter()
            .map(|child| self.visit(child))
            .collect();
        let contained = contained.join(" ");

        let rendered = RE_PLACEHOLDER.replace_all(template, |caps: &Captures| match &caps[1] {
            "label" => escape(&node.label()),
            "description" => escape(node.description()),
            "contained" => contained.clone(),
            "anchor" => match node {
                Node::Entity(e) => toc::anchor(e),
                _ => String::new(),
            },
            "kind" => match node {
                Node::Entity(e) => e.kind().as_str().to_string(),
                _ => String::new(),
            },
            "extends" => match node {
                Node::Entity(e) => render_extends(e),
                _ => String::new(),
            },
            _ => caps[0].to_string(),
        });

        substitute_symbols(&rendered)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, ns: &Namespace) -> String {
        self.visit(Node::Everything(ns))
    }

    fn render_index(&self, ns: &Namespace) -> String {
        let entities = ns.entities();
        if entities.is_empty() {
            return String::new();
        }
        let mut out = String::from("<ul class=\"index\">\n");
        for entity in entities {
            out.push_str(&format!(
                "  <li><a href=\"#{}\">{}</a></li>\n",
                toc::anchor(entity),
                escape(entity.label())
            ));
        }
        out.push_str("</ul>");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }

    fn default_page(&self) -> &str {
        PAGE
    }

    fn finish_page(&self, page: String) -> String {
        substitute_symbols(&page)
    }
}

fn render_extends(entity: &Entity) -> String {
    let targets: Vec<String> = entity.extends().map(escape).collect();
    if targets.is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"extends\"> extends {} </div>",
        targets.join(", ")
    )
}

/// Escape text for inclusion in markup. `>` becomes `&#62;` so that the
/// `-->` arrow in method labels is picked up by [`SYMBOLS`].
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&#60;")
        .replace('>', "&#62;")
}

pub fn substitute_symbols(s: &str) -> String {
    SYMBOLS
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn render(input: &str) -> String {
        HtmlRenderer::new().render(&parser::parse(input))
    }

    #[test]
    fn empty_namespace() {
        let out = render("");
        assert!(out.contains("<div class=\"everything\">"));
        assert!(!out.contains("<article"));
    }

    #[test]
    fn class_with_method() {
        let out = render(
            "/**
 * @class Foo desc
 * @method bar does a thing
 * @param x the input
 * @return y the output
 */",
        );
        assert!(out.contains("<article id=\"class-foo\" class=\"class\"> <h1> Foo </h1>"));
        assert!(out.contains("<p> desc </p>"));
        assert!(out.contains("<h2> bar(x) &rarr; y </h2>"));
        assert!(out.contains("&larr; x </div> <div class=\"param_desc\"> the input </div>"));
        assert!(out.contains("<div class=\"return_type\"> &rarr; y </div>"));
    }

    #[test]
    fn escapes_angle_brackets() {
        let out = render(
            "/**
 * @class Mask a <b>mask</b>
 * @extends Modifiable<<MaskType>>
 */",
        );
        assert!(out.contains("a &#60;b&#62;mask&#60;/b&#62;"));
        assert!(out.contains("extends Modifiable&#60;&#60;MaskType&#62;&#62;"));
        assert!(!out.contains("<b>"));
    }

    #[test]
    fn markup_shorthands() {
        let out = render("/** * @class Foo use [code]draw()[/code] */");
        assert!(out.contains("use <code>draw()</code>"));
    }

    #[test]
    fn constructor_before_methods() {
        let out = render(
            "/**
 * @class Foo
 * @method alpha
 * @constructor
 * Builds it.
 */",
        );
        let ctor = out.find("<h2> Constructor </h2>").unwrap();
        let alpha = out.find("<h2> alpha() </h2>").unwrap();
        assert!(ctor < alpha);
        assert!(out.contains("Builds it."));
    }

    #[test]
    fn placeholder_text_in_descriptions_is_not_expanded() {
        let out = render("/** * @class Foo mentions %(contained) */");
        assert!(out.contains("mentions %(contained)"));
    }

    #[test]
    fn index_links_entities_in_order() {
        let ns = parser::parse("/** * @class beta */ /** * @mixin Alpha */");
        let index = HtmlRenderer::new().render_index(&ns);
        let alpha = index.find("#mixin-alpha").unwrap();
        let beta = index.find("#class-beta").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn index_is_empty_without_entities() {
        assert_eq!(HtmlRenderer::new().render_index(&Namespace::new()), "");
    }
}
