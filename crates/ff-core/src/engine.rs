//! Filter Engine
//!
//! Owns the active settings and the pattern tree compiled from them, and
//! turns each entry into a show / hide / nothing decision.

use ff_compiler::{compile_document, Pattern};
use log::{debug, trace};

use crate::matcher::evaluate;
use crate::settings::Settings;
use crate::types::{Decision, EvalResult, SocialMediaEntry};

pub const REASON_CONTENT_CREDENTIALS: &str = "Post contains content credentials";
pub const REASON_SUGGESTED: &str = "Post is suggested";

// =============================================================================
// Pattern Cache
// =============================================================================

/// A compiled pattern tree keyed by the document it was compiled from.
#[derive(Debug, Default)]
pub struct PatternCache {
    source: String,
    root: Pattern,
    compilations: usize,
}

impl PatternCache {
    pub fn new(source: &str) -> Self {
        let mut cache = Self::default();
        cache.compile(source);
        cache
    }

    /// Return the tree for `source`, recompiling only if it changed.
    pub fn get_or_compile(&mut self, source: &str) -> &Pattern {
        if self.compilations == 0 || self.source != source {
            self.compile(source);
        }
        &self.root
    }

    pub fn root(&self) -> &Pattern {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// How many times a document has been compiled.
    pub fn compilations(&self) -> usize {
        self.compilations
    }

    fn compile(&mut self, source: &str) {
        self.root = compile_document(source);
        self.source = source.to_string();
        self.compilations += 1;
        debug!(
            "Compiled filter patterns: {} directive(s)",
            self.root.directive_count()
        );
    }
}

// =============================================================================
// Filter Engine
// =============================================================================

/// Decides what to do with feed entries under a settings snapshot.
#[derive(Debug)]
pub struct FilterEngine {
    settings: Settings,
    cache: PatternCache,
}

impl FilterEngine {
    pub fn new(settings: Settings) -> Self {
        let cache = PatternCache::new(&settings.filter_patterns);
        Self { settings, cache }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings snapshot. The pattern tree is only rebuilt when
    /// the pattern text differs from the cached one.
    pub fn update_settings(&mut self, settings: Settings) {
        self.cache.get_or_compile(&settings.filter_patterns);
        self.settings = settings;
    }

    pub fn pattern(&self) -> &Pattern {
        self.cache.root()
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Decide whether to show, hide or leave `entry` alone.
    ///
    /// Pattern verdicts always win; the settings flags are only consulted
    /// when no directive had an opinion.
    pub fn decide<E: SocialMediaEntry + ?Sized>(&self, entry: &E) -> Decision {
        let decision = match evaluate(self.cache.root(), entry) {
            EvalResult::Match(reason) => Decision::Hide { reason },
            EvalResult::Unmatch(reason) => Decision::Show { reason },
            EvalResult::Inconclusive => self.decide_from_settings(entry),
        };
        trace!("Decision: {:?}", decision);
        decision
    }

    pub fn should_hide<E: SocialMediaEntry + ?Sized>(&self, entry: &E) -> bool {
        self.decide(entry).is_hide()
    }

    fn decide_from_settings<E: SocialMediaEntry + ?Sized>(&self, entry: &E) -> Decision {
        if self.settings.hide_content_credentials && entry.contains_content_credentials() {
            return Decision::Hide {
                reason: REASON_CONTENT_CREDENTIALS.to_string(),
            };
        }

        if self.settings.hide_suggested && entry.is_suggested() {
            return Decision::Hide {
                reason: REASON_SUGGESTED.to_string(),
            };
        }

        Decision::Nothing
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
