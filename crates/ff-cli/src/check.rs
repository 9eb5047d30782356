use std::path::PathBuf;

use ff_core::{Decision, FilterEngine, Settings};
use serde::Serialize;

use crate::entries::{load_entries, read_patterns, read_settings};

const PREVIEW_CHARS: usize = 60;

pub struct CheckOptions {
    pub patterns: Option<PathBuf>,
    pub entries: PathBuf,
    pub settings: Option<PathBuf>,
    pub hide_suggested: bool,
    pub hide_content_credentials: bool,
    pub json: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub shown: usize,
    pub hidden: usize,
    pub untouched: usize,
}

impl CheckSummary {
    fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::Show { .. } => self.shown += 1,
            Decision::Hide { .. } => self.hidden += 1,
            Decision::Nothing => self.untouched += 1,
        }
    }
}

#[derive(Serialize)]
struct CheckLine<'a> {
    index: usize,
    #[serde(flatten)]
    decision: &'a Decision,
}

pub fn build_settings(opts: &CheckOptions) -> Result<Settings, String> {
    let mut settings = match &opts.settings {
        Some(path) => read_settings(path)?,
        None => Settings::default(),
    };

    match &opts.patterns {
        Some(path) => settings.filter_patterns = read_patterns(path)?,
        None if opts.settings.is_none() => {
            return Err("Either --patterns or --settings is required".to_string());
        }
        None => {}
    }

    settings.hide_suggested |= opts.hide_suggested;
    settings.hide_content_credentials |= opts.hide_content_credentials;
    Ok(settings)
}

pub fn run_check(opts: CheckOptions) -> Result<CheckSummary, String> {
    let settings = build_settings(&opts)?;
    let entries = load_entries(&opts.entries)?;
    let engine = FilterEngine::new(settings);

    tracing::debug!(
        directives = engine.pattern().directive_count(),
        entries = entries.len(),
        "Checking entries"
    );

    let mut summary = CheckSummary::default();
    for (index, entry) in entries.iter().enumerate() {
        let decision = engine.decide(entry);
        summary.record(&decision);

        if opts.json {
            let line = serde_json::to_string(&CheckLine {
                index,
                decision: &decision,
            })
            .map_err(|e| format!("Failed to encode decision: {}", e))?;
            println!("{}", line);
        } else {
            println!(
                "[{}] {:<7} {:<40} | {}",
                index,
                decision.kind(),
                decision.reason().unwrap_or("-"),
                preview(&entry.text)
            );
        }
    }

    if !opts.json {
        println!();
        println!("Entries:   {}", entries.len());
        println!("  Hidden:  {}", summary.hidden);
        println!("  Shown:   {}", summary.shown);
        println!("  Nothing: {}", summary.untouched);
    }

    Ok(summary)
}

fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut out: String = flat.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}
