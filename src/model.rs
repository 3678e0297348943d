//! Documentation model — entities, members, and the read-only query surface
//! consumed by the renderers.
//!
//! Every text field is a plain `String` that defaults to empty, so renderers
//! never have to check for missing values.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Declared kind of a documented entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Mixin,
}

impl EntityKind {
    /// Map an annotation tag to an entity kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "class" => Some(EntityKind::Class),
            "mixin" => Some(EntityKind::Mixin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Mixin => "mixin",
        }
    }
}

/// Namespace key of an entity. Also used as the owner back-reference of a
/// method, so members never hold pointers to their entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub name: String,
}

impl EntityKey {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// A `@param` or `@return` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub label: String,
    pub description: String,
}

impl Param {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A documented method, or the constructor of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Empty for constructors.
    pub name: String,
    pub description: String,
    pub params: Vec<Param>,
    pub ret: Option<Param>,
    pub owner: EntityKey,
    pub is_constructor: bool,
}

impl Method {
    pub fn new(owner: EntityKey, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            ret: None,
            owner,
            is_constructor: false,
        }
    }

    pub fn constructor(owner: EntityKey) -> Self {
        Self {
            is_constructor: true,
            ..Self::new(owner, "")
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Display label composed from the current state: `name(a, b) --> T`.
    ///
    /// The arrow is only present when a return is documented; an empty
    /// return label reads as `void`.
    pub fn label(&self) -> String {
        let name = if self.is_constructor {
            "constructor"
        } else {
            self.name.as_str()
        };
        let params: Vec<&str> = self.params.iter().map(Param::label).collect();
        let mut label = format!("{}({})", name, params.join(", "));
        if let Some(ref ret) = self.ret {
            let ty = if ret.label.is_empty() {
                "void"
            } else {
                ret.label.as_str()
            };
            label.push_str(" --> ");
            label.push_str(ty);
        }
        label
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn ret(&self) -> Option<&Param> {
        self.ret.as_ref()
    }
}

/// A documented class or mixin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Namespace key; `label` may differ only by later re-declaration.
    pub name: String,
    pub label: String,
    pub description: String,
    pub methods: HashMap<String, Method>,
    pub constructor: Option<Method>,
    /// `@extends` targets in declaration order, unresolved.
    pub extends: Vec<String>,
}

impl Entity {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            label: name.clone(),
            name,
            description: String::new(),
            methods: HashMap::new(),
            constructor: None,
            extends: Vec::new(),
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind, self.name.clone())
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name part of a `Name:supertype` label.
    pub fn display_name(&self) -> &str {
        self.label
            .split_once(':')
            .map(|(name, _)| name)
            .unwrap_or(&self.label)
    }

    /// Type suffix of a `Name:supertype` label, if any.
    pub fn type_suffix(&self) -> Option<&str> {
        self.label
            .split_once(':')
            .map(|(_, suffix)| suffix)
            .filter(|s| !s.is_empty())
    }

    pub fn extends(&self) -> impl Iterator<Item = &str> {
        self.extends.iter().map(String::as_str)
    }

    pub fn constructor(&self) -> Option<&Method> {
        self.constructor.as_ref()
    }

    /// Methods sorted case-insensitively by name.
    pub fn methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.methods.values().collect();
        methods.sort_by(|a, b| case_insensitive(&a.name, &b.name));
        methods
    }

    /// Method lookup by exact name.
    #[cfg(test)]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }
}

/// Registry of every documented entity, keyed by `(kind, name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    entities: HashMap<EntityKey, Entity>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn get_mut(&mut self, key: &EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Look up an entity, creating an empty one on first reference.
    pub fn entry(&mut self, key: EntityKey) -> &mut Entity {
        self.entities.entry(key).or_insert_with_key(|key| {
            tracing::trace!(kind = key.kind.as_str(), name = %key.name, "new entity");
            Entity::new(key.kind, key.name.clone())
        })
    }

    /// All entities across both kinds, sorted case-insensitively by label.
    pub fn entities(&self) -> Vec<&Entity> {
        let mut all: Vec<&Entity> = self.entities.values().collect();
        all.sort_by(|a, b| {
            case_insensitive(&a.label, &b.label)
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.name.cmp(&b.name))
        });
        all
    }
}

/// Compare by lowercased text, falling back to the exact text so the order
/// is total.
fn case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// A node of the documentation tree, as seen by a visiting renderer.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Everything(&'a Namespace),
    Entity(&'a Entity),
    Constructor(&'a Method),
    Method(&'a Method),
    Param(&'a Param),
    Return(&'a Param),
}

impl<'a> Node<'a> {
    /// Template key of this node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Everything(_) => "everything",
            Node::Entity(_) => "object",
            Node::Constructor(_) => "constructor",
            Node::Method(_) => "method",
            Node::Param(_) => "param",
            Node::Return(_) => "return",
        }
    }

    pub fn label(&self) -> String {
        match *self {
            Node::Everything(_) => String::new(),
            Node::Entity(e) => e.label.clone(),
            Node::Constructor(m) | Node::Method(m) => m.label(),
            Node::Param(p) | Node::Return(p) => p.label.clone(),
        }
    }

    pub fn description(&self) -> &'a str {
        match *self {
            Node::Everything(_) => "",
            Node::Entity(e) => &e.description,
            Node::Constructor(m) | Node::Method(m) => &m.description,
            Node::Param(p) | Node::Return(p) => &p.description,
        }
    }

    /// Child nodes in render order.
    ///
    /// Entities list their constructor first, then sorted methods; methods
    /// list params in declaration order, then the return.
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Everything(ns) => ns.entities().into_iter().map(Node::Entity).collect(),
            Node::Entity(e) => e
                .constructor()
                .map(Node::Constructor)
                .into_iter()
                .chain(e.methods().into_iter().map(Node::Method))
                .collect(),
            Node::Constructor(m) | Node::Method(m) => m
                .params()
                .iter()
                .map(Node::Param)
                .chain(m.ret().map(Node::Return))
                .collect(),
            Node::Param(_) | Node::Return(_) => Vec::new(),
        }
    }
}
