//! Pattern Evaluation
//!
//! Walks a compiled `Pattern` tree against one entry. Evaluation is pure:
//! the only inputs are the tree and the entry's accessors.

use std::borrow::Cow;

use ff_compiler::Pattern;

use crate::types::{EvalResult, SocialMediaEntry};

/// Evaluate `pattern` against `entry`.
pub fn evaluate<E: SocialMediaEntry + ?Sized>(pattern: &Pattern, entry: &E) -> EvalResult {
    match pattern {
        Pattern::Regex { matcher, source } => {
            let text = entry.text();
            if matcher.is_match(&normalize_text(&text)) {
                EvalResult::Match(format!("Matches pattern: {source}"))
            } else {
                EvalResult::Inconclusive
            }
        }
        Pattern::ReactedByName { matcher, source } => match entry.reacted_by_name() {
            Some(name) if matcher.is_match(&name) => {
                EvalResult::Match(format!("Reacted by user: {source}"))
            }
            _ => EvalResult::Inconclusive,
        },
        Pattern::Allow(inner) => evaluate(inner, entry).negate(),
        Pattern::Block(children) => children
            .iter()
            .map(|child| evaluate(child, entry))
            .find(|result| !result.is_inconclusive())
            .unwrap_or(EvalResult::Inconclusive),
    }
}

/// Replace curly quotes with their ASCII counterparts.
pub fn normalize_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}']) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .map(|ch| match ch {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                other => other,
            })
            .collect(),
    )
}
