use std::fs;
use std::path::Path;

use ff_core::{load_settings, Settings, SocialMediaEntry};
use serde::Deserialize;

/// A feed entry captured to a JSON line, e.g.
/// `{"text": "...", "reactedBy": "Jane", "suggested": true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordedEntry {
    pub text: String,
    pub reacted_by: Option<String>,
    pub suggested: bool,
    pub content_credentials: bool,
}

impl SocialMediaEntry for RecordedEntry {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn reacted_by_name(&self) -> Option<String> {
        self.reacted_by.clone()
    }

    fn is_suggested(&self) -> bool {
        self.suggested
    }

    fn contains_content_credentials(&self) -> bool {
        self.content_credentials
    }
}

pub fn parse_entries_jsonl(text: &str) -> Result<Vec<RecordedEntry>, String> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let entry: RecordedEntry = serde_json::from_str(trimmed)
            .map_err(|e| format!("Invalid entry on line {}: {}", idx + 1, e))?;
        out.push(entry);
    }
    Ok(out)
}

pub fn load_entries(path: &Path) -> Result<Vec<RecordedEntry>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read entries '{}': {}", path.display(), e))?;
    parse_entries_jsonl(&text)
}

pub fn read_patterns(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read patterns '{}': {}", path.display(), e))
}

/// Load a stored settings record, migrating older versions.
pub fn read_settings(path: &Path) -> Result<Settings, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read settings '{}': {}", path.display(), e))?;
    load_settings(Some(&raw)).map_err(|e| format!("Invalid settings '{}': {}", path.display(), e))
}
