//! Output pages — named templates filled with fragments, the entity index,
//! and the rendered documentation.
//!
//! Placeholders:
//!
//! - `%(include NAME)` — contents of fragment `NAME`
//! - `%(index)` — the renderer's entity index
//! - `%(contents)` — the renderer's full output
//!
//! Substitution is a single pass, so placeholder-like text inside inserted
//! content is left alone.

use crate::model::Namespace;
use crate::render::Renderer;
use anyhow::{bail, Context, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\(([a-z]+)(?:[[:blank:]]+([^)]*))?\)").unwrap());

/// Source of `%(include NAME)` fragments.
pub trait Fragments {
    fn fragment(&self, name: &str) -> Option<String>;
}

/// No fragments available; every include expands to nothing.
pub struct NoFragments;

impl Fragments for NoFragments {
    fn fragment(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Fragments read from files in a directory.
pub struct FragmentDir(pub PathBuf);

impl Fragments for FragmentDir {
    fn fragment(&self, name: &str) -> Option<String> {
        let path = self.0.join(name);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "fragment not readable");
                None
            }
        }
    }
}

/// A named output page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    pub template: String,
}

/// Ordered set of pages; names are unique.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single `index` page wrapping the renderer's default layout.
    pub fn default_for(renderer: &dyn Renderer) -> Self {
        let mut pages = Self::new();
        pages.insert("index", renderer.default_page());
        pages
    }

    /// Add a page, replacing any page with the same name.
    pub fn insert(&mut self, name: impl Into<String>, template: impl Into<String>) {
        let page = Page {
            name: name.into(),
            template: template.into(),
        };
        match self.pages.iter_mut().find(|p| p.name == page.name) {
            Some(existing) => *existing = page,
            None => self.pages.push(page),
        }
    }

    /// Build pages from `NAME=TEMPLATE_FILE` specs.
    pub fn from_specs(specs: &[String]) -> Result<Self> {
        let mut pages = Self::new();
        for spec in specs {
            let (name, path) = parse_spec(spec)?;
            let template = fs::read_to_string(&path)
                .with_context(|| format!("failed to read page template: {}", path.display()))?;
            pages.insert(name, template);
        }
        Ok(pages)
    }

    /// Render every page, returning `(name, text)` in insertion order.
    pub fn render(
        &self,
        renderer: &dyn Renderer,
        ns: &Namespace,
        fragments: &dyn Fragments,
    ) -> Vec<(String, String)> {
        let contents = renderer.render(ns);
        let index = renderer.render_index(ns);

        self.pages
            .iter()
            .map(|page| {
                let text = fill(&page.template, &contents, &index, fragments);
                (page.name.clone(), renderer.finish_page(text))
            })
            .collect()
    }
}

/// Split a `NAME=PATH` page spec.
pub fn parse_spec(spec: &str) -> Result<(String, PathBuf)> {
    let Some((name, path)) = spec.split_once('=') else {
        bail!("invalid page spec: {} (expected NAME=TEMPLATE)", spec);
    };
    let name = name.trim();
    if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') || path.trim().is_empty() {
        bail!("invalid page spec: {} (expected NAME=TEMPLATE)", spec);
    }
    Ok((name.to_string(), Path::new(path.trim()).to_path_buf()))
}

fn fill(template: &str, contents: &str, index: &str, fragments: &dyn Fragments) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let arg = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            match &caps[1] {
                "contents" => contents.to_string(),
                "index" => index.to_string(),
                "include" => fragments.fragment(arg).unwrap_or_else(|| {
                    tracing::warn!(fragment = arg, "missing fragment, including nothing");
                    String::new()
                }),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
