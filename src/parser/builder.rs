//! Incremental builder — folds the annotation stream into a [`Namespace`].
//!
//! Focus is tracked with two cursors: the entity that object-scoped tags
//! (`method`, `constructor`, `extends`) attach to, and, nested inside it, the
//! method or constructor that `param`/`return` attach to. Both cursors
//! persist across comment blocks and input files.
//!
//! The builder never fails. Orphaned and unknown annotations are dropped and
//! reported at debug level.

use super::annotation::Annotation;
use crate::model::*;

/// Method-level cursor within the focused entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFocus {
    Method(String),
    Constructor,
}

#[derive(Debug, Default)]
pub struct Builder {
    namespace: Namespace,
    entity: Option<EntityKey>,
    method: Option<MethodFocus>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one annotation and return the updated builder.
    pub fn fold(mut self, annotation: &Annotation) -> Self {
        self.apply(annotation);
        self
    }

    /// Apply one annotation in place.
    pub fn apply(&mut self, a: &Annotation) {
        if a.is_preamble() {
            return;
        }
        match a.tag.as_str() {
            "class" | "mixin" => self.open_entity(a),
            "method" | "constructor" | "extends" => self.apply_to_entity(a),
            "param" | "return" => self.apply_to_method(a),
            tag => tracing::debug!(tag, label = %a.label, "ignoring unknown annotation"),
        }
    }

    pub fn finish(self) -> Namespace {
        self.namespace
    }

    fn open_entity(&mut self, a: &Annotation) {
        let Some(kind) = EntityKind::from_tag(&a.tag) else {
            return;
        };
        let key = EntityKey::new(kind, a.label.clone());
        if self.namespace.get(&key).is_some() {
            tracing::debug!(kind = kind.as_str(), name = %a.label, "merging repeated declaration");
        }

        let entity = self.namespace.entry(key.clone());
        entity.label = a.label.clone();
        entity.description = a.text.clone();

        self.entity = Some(key);
        self.method = None;
    }

    fn apply_to_entity(&mut self, a: &Annotation) {
        let Some(entity) = self
            .entity
            .as_ref()
            .and_then(|key| self.namespace.get_mut(key))
        else {
            tracing::debug!(tag = %a.tag, label = %a.label, "dropping annotation outside of any class or mixin");
            return;
        };

        match a.tag.as_str() {
            "method" => {
                let owner = entity.key();
                let method = entity
                    .methods
                    .entry(a.label.clone())
                    .or_insert_with(|| Method::new(owner, a.label.clone()));
                method.description = a.text.clone();
                self.method = Some(MethodFocus::Method(a.label.clone()));
            }
            "constructor" => {
                let mut constructor = Method::constructor(entity.key());
                constructor.description = format!("{}{}", a.label, a.text);
                entity.constructor = Some(constructor);
                self.method = Some(MethodFocus::Constructor);
            }
            "extends" => entity.extends.push(a.label.clone()),
            _ => {}
        }
    }

    fn apply_to_method(&mut self, a: &Annotation) {
        let Some(method) = self.focused_method() else {
            tracing::debug!(tag = %a.tag, label = %a.label, "dropping annotation outside of any method");
            return;
        };

        match a.tag.as_str() {
            "param" => method.params.push(Param::new(a.label.clone(), a.text.clone())),
            "return" if method.is_constructor => {
                tracing::debug!(label = %a.label, "dropping return on constructor");
            }
            "return" => method.ret = Some(Param::new(a.label.clone(), a.text.clone())),
            _ => {}
        }
    }

    fn focused_method(&mut self) -> Option<&mut Method> {
        let entity = self.namespace.get_mut(self.entity.as_ref()?)?;
        match self.method.as_ref()? {
            MethodFocus::Method(name) => entity.methods.get_mut(name),
            MethodFocus::Constructor => entity.constructor.as_mut(),
        }
    }
}
