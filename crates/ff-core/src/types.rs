//! Core type definitions for FeedFilter

use serde::Serialize;

// =============================================================================
// Entries
// =============================================================================

/// A candidate feed item, as seen by the engine.
///
/// Implementations may compute each value on demand; the engine calls them
/// as often as it needs to.
pub trait SocialMediaEntry {
    /// Display text of the entry.
    fn text(&self) -> String;
    /// Name of the user whose reaction surfaced this entry, if any.
    fn reacted_by_name(&self) -> Option<String>;
    /// Entry is a suggestion rather than from a followed source.
    fn is_suggested(&self) -> bool;
    /// Entry carries content credentials (e.g. AI-generated media).
    fn contains_content_credentials(&self) -> bool;
}

impl<T: SocialMediaEntry + ?Sized> SocialMediaEntry for &T {
    fn text(&self) -> String {
        (**self).text()
    }

    fn reacted_by_name(&self) -> Option<String> {
        (**self).reacted_by_name()
    }

    fn is_suggested(&self) -> bool {
        (**self).is_suggested()
    }

    fn contains_content_credentials(&self) -> bool {
        (**self).contains_content_credentials()
    }
}

// =============================================================================
// Evaluation Result
// =============================================================================

/// Ternary outcome of evaluating a pattern against an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalResult {
    /// A directive matched; the entry should be hidden.
    Match(String),
    /// An allow directive matched; the entry should be shown.
    Unmatch(String),
    /// No directive had an opinion.
    Inconclusive,
}

impl EvalResult {
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, EvalResult::Inconclusive)
    }

    /// Swap match and unmatch, keeping the reason.
    pub fn negate(self) -> Self {
        match self {
            EvalResult::Match(reason) => EvalResult::Unmatch(reason),
            EvalResult::Unmatch(reason) => EvalResult::Match(reason),
            EvalResult::Inconclusive => EvalResult::Inconclusive,
        }
    }
}

// =============================================================================
// Decision
// =============================================================================

/// Final decision for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decision {
    /// Explicitly allowed by a pattern
    Show { reason: String },
    /// Hidden by a pattern or a settings flag
    Hide { reason: String },
    /// No opinion; leave the entry untouched
    Nothing,
}

impl Decision {
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Show { .. } => "show",
            Decision::Hide { .. } => "hide",
            Decision::Nothing => "nothing",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Show { reason } | Decision::Hide { reason } => Some(reason.as_str()),
            Decision::Nothing => None,
        }
    }

    pub fn is_hide(&self) -> bool {
        matches!(self, Decision::Hide { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate() {
        assert_eq!(
            EvalResult::Match("a".into()).negate(),
            EvalResult::Unmatch("a".into())
        );
        assert_eq!(
            EvalResult::Unmatch("b".into()).negate(),
            EvalResult::Match("b".into())
        );
        assert_eq!(EvalResult::Inconclusive.negate(), EvalResult::Inconclusive);
    }

    #[test]
    fn test_decision_json() {
        let hide = Decision::Hide {
            reason: "Post is suggested".into(),
        };
        assert_eq!(
            serde_json::to_string(&hide).unwrap(),
            r#"{"kind":"hide","reason":"Post is suggested"}"#
        );
        assert_eq!(
            serde_json::to_string(&Decision::Nothing).unwrap(),
            r#"{"kind":"nothing"}"#
        );
    }

    #[test]
    fn test_decision_accessors() {
        let show = Decision::Show { reason: "r".into() };
        assert_eq!(show.kind(), "show");
        assert_eq!(show.reason(), Some("r"));
        assert!(!show.is_hide());
        assert_eq!(Decision::Nothing.reason(), None);
    }
}
