//! Comment extraction — split raw source text into `/** ... */` bodies.
//!
//! Purely textual: string literals and comment-like text inside code are not
//! recognized.

const OPEN: &str = "/**";
const CLOSE: &str = "*/";
const CONTINUATION: char = '*';

/// Lazily yield the body of every block comment in `input`.
///
/// Only interior lines whose first non-blank character is `*` survive; the
/// marker and one following space are stripped. A comment with no such lines
/// still yields an (empty) body.
pub fn comments(input: &str) -> impl Iterator<Item = String> + '_ {
    input.split(OPEN).skip(1).map(comment_body)
}

fn comment_body(chunk: &str) -> String {
    let inner = match chunk.find(CLOSE) {
        Some(end) => &chunk[..end],
        None => chunk,
    };

    let mut body = String::new();
    for line in inner.lines() {
        let Some(rest) = line.trim_start().strip_prefix(CONTINUATION) else {
            continue;
        };
        body.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        body.push('\n');
    }
    body
}
