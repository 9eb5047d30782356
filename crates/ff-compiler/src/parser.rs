use std::fmt;

use log::debug;
use regex::Regex;

use crate::block::{parse_indented_lines_into_blocks, Block};
use crate::comment::strip_comments;
use crate::flags::RegexFlags;
use crate::literal::regex_from_literal_word;

/// Leading marker of an allow directive.
pub const ALLOW_PREFIX: char = '!';
/// Leading keyword scoping a directive to the "reacted by" name.
/// Must be followed by whitespace.
pub const REACT_PREFIX: &str = "$react";

/// Why a directive produced no pattern.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    #[error("Invalid regex flags: {0}")]
    InvalidFlags(String),
    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("Empty directive")]
    Empty,
}

/// Compiled form of a pattern document.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches the entry's normalized text.
    Regex { matcher: Regex, source: String },
    /// Matches the name of whoever reacted to the entry.
    ReactedByName { matcher: Regex, source: String },
    /// Swaps match and unmatch of the inner pattern.
    Allow(Box<Pattern>),
    /// First decisive child wins.
    Block(Vec<Pattern>),
}

impl Pattern {
    /// Number of text / reacted-by directives in the tree.
    pub fn directive_count(&self) -> usize {
        match self {
            Pattern::Regex { .. } | Pattern::ReactedByName { .. } => 1,
            Pattern::Allow(inner) => inner.directive_count(),
            Pattern::Block(children) => children.iter().map(Pattern::directive_count).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.directive_count() == 0
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = depth * 2;
        match self {
            Pattern::Regex { source, .. } => writeln!(f, "{:pad$}text {source}", ""),
            Pattern::ReactedByName { source, .. } => writeln!(f, "{:pad$}reacted-by {source}", ""),
            Pattern::Allow(inner) => {
                writeln!(f, "{:pad$}allow", "")?;
                inner.fmt_indented(f, depth + 1)
            }
            Pattern::Block(children) => {
                writeln!(f, "{:pad$}block", "")?;
                for child in children {
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Block(Vec::new())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// A directive that was skipped during compilation.
#[derive(Debug)]
pub struct DroppedDirective {
    pub line: String,
    pub error: DirectiveError,
}

/// Compilation output with the directives that were skipped.
#[derive(Debug)]
pub struct CompileReport {
    pub pattern: Pattern,
    pub dropped: Vec<DroppedDirective>,
}

/// Split a pattern document into comment-stripped blocks.
pub fn parse_document(text: &str) -> Vec<Block> {
    let lines: Vec<String> = text
        .lines()
        .map(strip_comments)
        .filter(|line| !line.trim().is_empty())
        .collect();

    parse_indented_lines_into_blocks(&lines)
}

/// Compile a whole pattern document. Invalid directives are skipped.
pub fn compile_document(text: &str) -> Pattern {
    compile_blocks(&parse_document(text))
}

/// Compile a block forest into a root `Pattern::Block`.
pub fn compile_blocks(blocks: &[Block]) -> Pattern {
    compile_blocks_with_report(blocks).pattern
}

pub fn compile_blocks_with_report(blocks: &[Block]) -> CompileReport {
    let mut children = Vec::with_capacity(blocks.len());
    let mut dropped = Vec::new();
    compile_into(blocks, &mut children, &mut dropped);

    CompileReport {
        pattern: Pattern::Block(children),
        dropped,
    }
}

// A block's children follow it as a nested block, so evaluation order is
// still document order.
fn compile_into(blocks: &[Block], out: &mut Vec<Pattern>, dropped: &mut Vec<DroppedDirective>) {
    for block in blocks {
        match compile_directive(&block.line) {
            Ok(pattern) => out.push(pattern),
            Err(error) => {
                debug!("Dropping directive '{}': {}", block.line, error);
                dropped.push(DroppedDirective {
                    line: block.line.clone(),
                    error,
                });
            }
        }

        if !block.children.is_empty() {
            let mut nested = Vec::with_capacity(block.children.len());
            compile_into(&block.children, &mut nested, dropped);
            out.push(Pattern::Block(nested));
        }
    }
}

/// Compile the text of a single directive line.
pub fn compile_directive(line: &str) -> Result<Pattern, DirectiveError> {
    let mut text = line.trim();

    let allow = match text.strip_prefix(ALLOW_PREFIX) {
        Some(rest) => {
            text = rest;
            true
        }
        None => false,
    };

    let reacted_by = match strip_react_prefix(text) {
        Some(rest) => {
            text = rest;
            true
        }
        None => false,
    };

    if text.is_empty() {
        return Err(DirectiveError::Empty);
    }

    let matcher = match split_regex_literal(text) {
        Some((body, flags)) => RegexFlags::parse(flags)?.build(body)?,
        None => regex_from_literal_word(text)?,
    };

    let source = text.to_string();
    let pattern = if reacted_by {
        Pattern::ReactedByName { matcher, source }
    } else {
        Pattern::Regex { matcher, source }
    };

    Ok(if allow {
        Pattern::Allow(Box::new(pattern))
    } else {
        pattern
    })
}

fn strip_react_prefix(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(REACT_PREFIX)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// Split `/body/flags` into body and flags. Flags must be lowercase ASCII
/// letters and the body must be non-empty.
fn split_regex_literal(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    if close == 0 {
        return None;
    }

    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if !flags.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }

    Some((body, flags))
}
