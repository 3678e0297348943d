//! Anchor slugs and index listings for documented entities.

use crate::model::Entity;

/// Anchor id for an entity heading.
///
/// The kind is part of the id so a class and a mixin sharing a name get
/// distinct anchors.
pub fn anchor(entity: &Entity) -> String {
    format!("{}-{}", entity.kind().as_str(), slug(entity.display_name()))
}

/// Markdown index line linking to an entity.
pub fn render_toc_item(entity: &Entity) -> String {
    format!("* [{}](#{})", entity.label(), anchor(entity))
}

/// Heading slug: lowercase, keep alphanumerics, spaces, and hyphens, then
/// turn spaces into hyphens.
fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;

    #[test]
    fn slug_simple() {
        assert_eq!(slug("hello world"), "hello-world");
    }

    #[test]
    fn slug_strips_punctuation() {
        assert_eq!(slug("meta::math::Rect"), "metamathrect");
        assert_eq!(slug("Modifiable<<MaskType>>"), "modifiablemasktype");
    }

    #[test]
    fn anchor_includes_kind() {
        let class = Entity::new(EntityKind::Class, "Layer");
        let mixin = Entity::new(EntityKind::Mixin, "Layer");
        assert_eq!(anchor(&class), "class-layer");
        assert_eq!(anchor(&mixin), "mixin-layer");
    }

    #[test]
    fn anchor_drops_type_suffix() {
        let e = Entity::new(EntityKind::Class, "Rect:Shape");
        assert_eq!(anchor(&e), "class-rect");
    }

    #[test]
    fn toc_item() {
        let e = Entity::new(EntityKind::Mixin, "Modifiable");
        assert_eq!(render_toc_item(&e), "* [Modifiable](#mixin-modifiable)");
    }
}
