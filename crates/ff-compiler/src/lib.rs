//! FeedFilter Pattern Compiler
//!
//! This crate turns user-authored filter pattern text into a `Pattern` tree:
//! comments are stripped per line, lines are nested by indentation, and each
//! directive is compiled to a regex.

pub mod block;
pub mod comment;
pub mod flags;
pub mod literal;
pub mod parser;

pub use block::{parse_indented_lines_into_blocks, Block};
pub use comment::strip_comments;
pub use literal::regex_from_literal_word;
pub use parser::{
    compile_blocks, compile_blocks_with_report, compile_directive, compile_document, parse_document,
    CompileReport, DirectiveError, DroppedDirective, Pattern,
};
