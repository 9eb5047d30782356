//! End-of-line comment stripping.
//!
//! A `;` starts a comment that runs to the end of the line, unless it is
//! escaped as `\;` or sits inside the `/.../` span of a regex directive.

use crate::parser::{ALLOW_PREFIX, REACT_PREFIX};

/// Strip the trailing comment from a single raw line of pattern text.
///
/// Escaped semicolons (`\;`) collapse to a literal `;`. Whitespace before
/// the comment is kept; callers trim.
pub fn strip_comments(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let regex_end = find_regex_end(&chars);

    let mut escapes: Vec<usize> = Vec::new();
    let mut end = chars.len();

    for (i, &ch) in chars.iter().enumerate() {
        if ch != ';' {
            continue;
        }
        if regex_end.is_some_and(|regex_end| i < regex_end) {
            continue;
        }
        if i > 0 && chars[i - 1] == '\\' {
            escapes.push(i - 1);
            continue;
        }
        end = i;
        break;
    }

    chars[..end]
        .iter()
        .enumerate()
        .filter(|(i, _)| !escapes.contains(i))
        .map(|(_, ch)| ch)
        .collect()
}

/// Index of the closing `/` when the directive on this line is a regex
/// literal. Leading indentation and the `!` / `$react ` prefixes are skipped
/// before looking for the opening `/`.
fn find_regex_end(chars: &[char]) -> Option<usize> {
    let start = directive_start(chars);
    if chars.get(start) != Some(&'/') {
        return None;
    }

    (start + 1..chars.len()).find(|&i| chars[i] == '/' && chars[i - 1] != '\\')
}

fn directive_start(chars: &[char]) -> usize {
    let mut pos = chars.iter().take_while(|ch| ch.is_whitespace()).count();

    if chars.get(pos) == Some(&ALLOW_PREFIX) {
        pos += 1;
    }

    let react: Vec<char> = REACT_PREFIX.chars().collect();
    if chars[pos..].starts_with(&react) {
        let gap = chars[pos + react.len()..]
            .iter()
            .take_while(|ch| ch.is_whitespace())
            .count();
        if gap > 0 {
            pos += react.len() + gap;
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_comment() {
        assert_eq!(strip_comments("pattern"), "pattern");
        assert_eq!(strip_comments(""), "");
    }

    #[test]
    fn test_only_semicolon() {
        assert_eq!(strip_comments(";"), "");
        assert_eq!(strip_comments("; whole line comment"), "");
    }

    #[test]
    fn test_keeps_whitespace_before_comment() {
        assert_eq!(strip_comments("pattern  ; comment"), "pattern  ");
    }

    #[test]
    fn test_truncates_at_first_semicolon() {
        assert_eq!(strip_comments("a; b; c"), "a");
    }

    #[test]
    fn test_semicolon_inside_regex() {
        assert_eq!(strip_comments("/;[0-9]+/; comment"), "/;[0-9]+/");
        assert_eq!(strip_comments("/a;b/i"), "/a;b/i");
    }

    #[test]
    fn test_escaped_semicolons() {
        assert_eq!(strip_comments("foo\\;bar\\;baz; comment"), "foo;bar;baz");
        assert_eq!(strip_comments("foo\\;bar"), "foo;bar");
    }

    #[test]
    fn test_unclosed_regex_falls_back() {
        assert_eq!(strip_comments("/abc; comment"), "/abc");
    }

    #[test]
    fn test_escaped_slash_does_not_close_regex() {
        assert_eq!(strip_comments("/a\\/;b/; comment"), "/a\\/;b/");
    }

    #[test]
    fn test_regex_after_prefixes() {
        assert_eq!(strip_comments("  /x;y/"), "  /x;y/");
        assert_eq!(strip_comments("!/x;y/ ; allow"), "!/x;y/ ");
        assert_eq!(strip_comments("$react /a;b/; who"), "$react /a;b/");
        assert_eq!(strip_comments("!$react /a;b/"), "!$react /a;b/");
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(strip_comments("😀 party; comment"), "😀 party");
        assert_eq!(strip_comments("/😀;🎉/; comment"), "/😀;🎉/");
        assert_eq!(strip_comments("caf\u{e9}\\;🎉"), "caf\u{e9};🎉");
    }
}
