//! Parser pipeline — comment extraction, tokenizing, and folding into the
//! documentation model.

pub mod annotation;
pub mod builder;
pub mod extract;

use crate::model::Namespace;
use builder::Builder;

/// Parse annotated source text into a fresh [`Namespace`].
pub fn parse(input: &str) -> Namespace {
    parse_into(Builder::new(), input).finish()
}

/// Continue parsing with an existing builder, so focus carries over from
/// previous input (as if the inputs were concatenated).
pub fn parse_into(builder: Builder, input: &str) -> Builder {
    extract::comments(input)
        .flat_map(|body| annotation::tokenize(&body))
        .fold(builder, |builder, a| builder.fold(&a))
}
