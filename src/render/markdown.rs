//! Markdown renderer — one section per entity with an index on top.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, ns: &Namespace) -> String {
        let mut output = String::new();

        let index = self.render_index(ns);
        if !index.is_empty() {
            output.push_str("## Index\n\n");
            output.push_str(&index);
            output.push('\n');
        }

        for entity in ns.entities() {
            output.push_str(&render_entity(entity));
            output.push('\n');
        }

        output
    }

    fn render_index(&self, ns: &Namespace) -> String {
        let mut out = String::new();
        for entity in ns.entities() {
            out.push_str(&toc::render_toc_item(entity));
            out.push('\n');
        }
        out
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_entity(entity: &Entity) -> String {
    let mut lines: Vec<String> = Vec::new();

    let heading = match entity.type_suffix() {
        Some(ty) => format!("`{}`: `{}`", entity.display_name(), ty),
        None => format!("`{}`", entity.label()),
    };
    lines.push(format!(
        "<a id=\"{}\"></a>\n\n## {} {}\n",
        toc::anchor(entity),
        entity.kind().as_str(),
        heading
    ));

    let extends: Vec<String> = entity.extends().map(|t| format!("`{}`", t)).collect();
    if !extends.is_empty() {
        lines.push(format!("Extends {}\n", extends.join(", ")));
    }

    push_text(&mut lines, entity.description());

    if let Some(ctor) = entity.constructor() {
        lines.push(format!("### Constructor\n\n`{}`\n", ctor.label()));
        push_method_body(&mut lines, ctor);
    }

    for method in entity.methods() {
        lines.push(format!("### `{}`\n", method.label()));
        push_method_body(&mut lines, method);
    }

    lines.join("\n")
}

fn push_method_body(lines: &mut Vec<String>, method: &Method) {
    push_text(lines, method.description());

    if !method.params().is_empty() {
        lines.push("#### Parameters\n".to_string());
        for param in method.params() {
            lines.push(render_item(param));
        }
        lines.push(String::new());
    }

    if let Some(ret) = method.ret() {
        lines.push("#### Returns\n".to_string());
        lines.push(render_item(ret));
        lines.push(String::new());
    }
}

fn push_text(lines: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(escape(text));
        lines.push(String::new());
    }
}

fn render_item(item: &Param) -> String {
    let description = item.description().trim();
    if description.is_empty() {
        format!("* `{}`", item.label())
    } else {
        format!("* `{}`: {}", item.label(), escape(description))
    }
}

/// Keep angle brackets from being read as inline HTML.
fn escape(text: &str) -> String {
    text.replace('<', "\\<").replace('>', "\\>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn render(input: &str) -> String {
        MarkdownRenderer.render(&parser::parse(input))
    }

    #[test]
    fn empty_namespace() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn entity_sections() {
        let out = render(
            "/**
 * @class Foo desc
 * @extends Base
 * @method bar does a thing
 * @param x the input
 * @return y the output
 */",
        );
        assert!(out.starts_with("## Index\n\n* [Foo](#class-foo)\n"));
        assert!(out.contains("## class `Foo`"));
        assert!(out.contains("Extends `Base`"));
        assert!(out.contains("### `bar(x) --> y`"));
        assert!(out.contains("* `x`: the input"));
        assert!(out.contains("#### Returns\n\n* `y`: the output"));
    }

    #[test]
    fn constructor_section() {
        let out = render("/**\n * @class Foo\n * @constructor\n * @param [String] src\n */");
        assert!(out.contains("### Constructor\n\n`constructor([String])`"));
        assert!(out.contains("* `[String]`: src"));
    }

    #[test]
    fn typed_label_heading() {
        let out = render("/** * @class Rect:Shape */");
        assert!(out.contains("## class `Rect`: `Shape`"));
        assert!(out.contains("(#class-rect)"));
    }

    #[test]
    fn descriptions_escape_angle_brackets() {
        let out = render("/** * @class Foo holds <T> */");
        assert!(out.contains("holds \\<T\\>"));
    }
}
