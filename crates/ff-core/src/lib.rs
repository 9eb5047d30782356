//! FeedFilter Core Library
//!
//! This crate provides the decision engine for the FeedFilter feed filter.
//! Hosts supply entries through the `SocialMediaEntry` trait and receive a
//! show / hide / nothing decision with a human-readable reason.
//!
//! # Modules
//!
//! - `matcher`: Pattern tree evaluation against a single entry
//! - `engine`: Settings-aware decisions with a cached pattern tree
//! - `settings`: Versioned settings records and their migrations
//! - `types`: Shared type definitions

pub mod engine;
pub mod matcher;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use engine::{FilterEngine, PatternCache};
pub use matcher::{evaluate, normalize_text};
pub use settings::{load_settings, save_settings, Settings, SettingsError};
pub use types::{Decision, EvalResult, SocialMediaEntry};
