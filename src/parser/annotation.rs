//! Annotation tokenizer — turn one comment body into `@tag` records.

const TAG_SENTINEL: char = '@';

/// One `@tag label free text` unit, or the leading preamble (empty tag).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub tag: String,
    pub label: String,
    pub text: String,
}

impl Annotation {
    pub fn new(tag: impl Into<String>, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
            text: text.into(),
        }
    }

    /// The synthetic record holding text before the first tag.
    pub fn preamble() -> Self {
        Self::default()
    }

    pub fn is_preamble(&self) -> bool {
        self.tag.is_empty()
    }

    /// Parse a tag line (without the leading `@`).
    ///
    /// A tag without a label yields empty label and text.
    fn from_tag_line(rest: &str) -> Self {
        let mut tokens = rest.split_whitespace();
        let tag = tokens.next().unwrap_or_default();
        let label = tokens.next().unwrap_or_default();
        let text = tokens.collect::<Vec<_>>().join(" ");
        Self::new(tag, label, text)
    }
}

/// Split a comment body into annotation records, preamble first.
///
/// Blank lines are skipped: they neither add text nor close the open record.
pub fn tokenize(body: &str) -> Vec<Annotation> {
    let mut annotations = vec![Annotation::preamble()];

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(TAG_SENTINEL) {
            annotations.push(Annotation::from_tag_line(rest));
            continue;
        }
        if let Some(open) = annotations.last_mut() {
            open.text.push_str(line);
            open.text.push('\n');
        }
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_starts_with_preamble() {
        let annots = tokenize("");
        assert_eq!(annots, vec![Annotation::preamble()]);
    }

    #[test]
    fn leading_text_goes_to_preamble() {
        let annots = tokenize("Some intro\nmore intro\n@class Foo\n");
        assert_eq!(annots[0].text, "Some intro\nmore intro\n");
        assert_eq!(annots[1], Annotation::new("class", "Foo", ""));
    }

    #[test]
    fn tag_line_splits_label_and_text() {
        let annots = tokenize("@param x   the  input\n");
        assert_eq!(annots[1], Annotation::new("param", "x", "the input"));
    }

    #[test]
    fn tag_without_label() {
        let annots = tokenize("@constructor\n");
        assert_eq!(annots[1], Annotation::new("constructor", "", ""));
    }

    #[test]
    fn continuation_lines_append_with_newline() {
        let annots = tokenize("@method draw Draws\n  the layer\n\n  twice\n@return void\n");
        assert_eq!(annots.len(), 3);
        assert_eq!(annots[1].text, "Drawsthe layer\ntwice\n");
        assert_eq!(annots[2], Annotation::new("return", "void", ""));
    }

    #[test]
    fn seeded_text_is_joined_without_separator() {
        let annots = tokenize("@param [Number] x
the x coordinate
");
        assert_eq!(annots[1].label, "[Number]");
        assert_eq!(annots[1].text, "xthe x coordinate\n");
    }

    #[test]
    fn unknown_tags_pass_through() {
        let annots = tokenize("@privileged\n@see Other\n");
        let tags: Vec<&str> = annots.iter().map(|a| a.tag.as_str()).collect();
        assert_eq!(tags, vec!["", "privileged", "see"]);
    }
}
