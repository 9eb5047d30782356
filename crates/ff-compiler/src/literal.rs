//! Literal word directives.

use regex::{Regex, RegexBuilder};

/// Build a case-insensitive regex matching `word` literally.
///
/// A `\b` is added at the front only when the word starts with a word
/// character, and at the back only when it ends with one, so `#tag` or
/// `hello!` still match next to other text.
pub fn regex_from_literal_word(word: &str) -> Result<Regex, regex::Error> {
    let mut expr = regex::escape(word);

    if word.chars().next().is_some_and(is_word_char) {
        expr.insert_str(0, r"\b");
    }
    if word.chars().next_back().is_some_and(is_word_char) {
        expr.push_str(r"\b");
    }

    RegexBuilder::new(&expr)
        .case_insensitive(true)
        .unicode(true)
        .build()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
