//! Renderer module — trait-based format dispatch.
//!
//! Renderers only read the finished [`Namespace`] through its query surface.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::Namespace;
use anyhow::{anyhow, Result};

/// Trait for rendering a Namespace into a specific output format.
pub trait Renderer {
    /// Render every documented entity.
    fn render(&self, ns: &Namespace) -> String;

    /// Render the entity index listing used by `%(index)` in pages.
    fn render_index(&self, ns: &Namespace) -> String;

    fn file_extension(&self) -> &str;

    /// Page template used when no `--page` is given.
    fn default_page(&self) -> &str {
        "%(contents)"
    }

    /// Final pass over a fully assembled page.
    fn finish_page(&self, page: String) -> String {
        page
    }
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer::new())),
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use html, json, or markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("html").unwrap().file_extension(), "html");
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
        assert_eq!(create_renderer("md").unwrap().file_extension(), "md");
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("xml").err().unwrap();
        assert!(err.to_string().contains("unknown format"));
    }
}
