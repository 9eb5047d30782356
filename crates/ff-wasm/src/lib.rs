//! WebAssembly bindings for FeedFilter

use std::sync::{PoisonError, RwLock};

use ff_compiler::strip_comments as strip_line_comments;
use ff_core::{
    load_settings as load_stored_settings, save_settings, Decision, FilterEngine, Settings,
    SettingsError, SocialMediaEntry,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

static ENGINE: RwLock<Option<FilterEngine>> = RwLock::new(None);

// =============================================================================
// Engine State
// =============================================================================

#[wasm_bindgen]
pub fn init(settings_json: Option<String>) -> Result<(), JsValue> {
    let settings = parse_settings(settings_json.as_deref())?;
    *ENGINE.write().unwrap_or_else(PoisonError::into_inner) = Some(FilterEngine::new(settings));
    Ok(())
}

/// Swap in a new settings snapshot. Patterns are recompiled only when the
/// pattern text changed.
#[wasm_bindgen]
pub fn update_settings(settings_json: Option<String>) -> Result<(), JsValue> {
    let settings = parse_settings(settings_json.as_deref())?;
    let mut guard = ENGINE.write().unwrap_or_else(PoisonError::into_inner);
    match guard.as_mut() {
        Some(engine) => engine.update_settings(settings),
        None => *guard = Some(FilterEngine::new(settings)),
    }
    Ok(())
}

#[wasm_bindgen]
pub fn is_initialized() -> bool {
    ENGINE.read().unwrap_or_else(PoisonError::into_inner).is_some()
}

#[wasm_bindgen]
pub fn get_engine_info() -> JsValue {
    let result = js_sys::Object::new();
    let guard = ENGINE.read().unwrap_or_else(PoisonError::into_inner);
    if let Some(engine) = guard.as_ref() {
        let _ = js_sys::Reflect::set(&result, &"initialized".into(), &JsValue::from(true));
        let _ = js_sys::Reflect::set(
            &result,
            &"directives".into(),
            &JsValue::from(engine.pattern().directive_count() as u32),
        );
        let _ = js_sys::Reflect::set(
            &result,
            &"compilations".into(),
            &JsValue::from(engine.cache().compilations() as u32),
        );
        let _ = js_sys::Reflect::set(
            &result,
            &"highlightMode".into(),
            &JsValue::from(engine.settings().highlight_mode),
        );
    } else {
        let _ = js_sys::Reflect::set(&result, &"initialized".into(), &JsValue::from(false));
    }
    result.into()
}

// =============================================================================
// Decisions
// =============================================================================

/// Decide what to do with a feed entry.
///
/// Returns `{ kind: "show" | "hide" | "nothing", reason? }`.
#[wasm_bindgen]
pub fn decide(entry: JsValue) -> Result<JsValue, JsValue> {
    let guard = ENGINE.read().unwrap_or_else(PoisonError::into_inner);
    let engine = guard
        .as_ref()
        .ok_or_else(|| error_object("notInitialized", "Engine not initialized. Call init() first."))?;

    let decision = engine.decide(&JsEntry(entry));
    Ok(decision_to_object(&decision))
}

#[wasm_bindgen]
pub fn should_hide(entry: JsValue) -> bool {
    let guard = ENGINE.read().unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        Some(engine) => engine.should_hide(&JsEntry(entry)),
        None => false,
    }
}

fn decision_to_object(decision: &Decision) -> JsValue {
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"kind".into(), &JsValue::from_str(decision.kind()));
    if let Some(reason) = decision.reason() {
        let _ = js_sys::Reflect::set(&result, &"reason".into(), &JsValue::from_str(reason));
    }
    result.into()
}

/// A host-page entry object exposing `getText`, `getReactedByName`,
/// `isSuggested` and `containsContentCredentials`.
struct JsEntry(JsValue);

impl JsEntry {
    fn call(&self, method: &str) -> Option<JsValue> {
        let func = js_sys::Reflect::get(&self.0, &method.into())
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        func.call0(&self.0).ok()
    }
}

impl SocialMediaEntry for JsEntry {
    fn text(&self) -> String {
        self.call("getText")
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }

    fn reacted_by_name(&self) -> Option<String> {
        self.call("getReactedByName").and_then(|value| value.as_string())
    }

    fn is_suggested(&self) -> bool {
        self.call("isSuggested")
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn contains_content_credentials(&self) -> bool {
        self.call("containsContentCredentials")
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Migrate a stored settings record to the current version and return it
/// as JSON. A missing record yields the defaults.
#[wasm_bindgen]
pub fn load_settings(raw: Option<String>) -> Result<String, JsValue> {
    let settings = parse_settings(raw.as_deref())?;
    save_settings(&settings).map_err(settings_error)
}

#[wasm_bindgen]
pub fn default_settings() -> Result<String, JsValue> {
    save_settings(&Settings::default()).map_err(settings_error)
}

fn parse_settings(raw: Option<&str>) -> Result<Settings, JsValue> {
    load_stored_settings(raw).map_err(settings_error)
}

fn settings_error(err: SettingsError) -> JsValue {
    let kind = match err {
        SettingsError::UnsupportedVersion(_) => "unsupportedVersion",
        SettingsError::MissingVersion => "missingVersion",
        SettingsError::Malformed(_) => "malformed",
    };
    error_object(kind, &err.to_string())
}

fn error_object(kind: &str, message: &str) -> JsValue {
    let error = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&error, &"kind".into(), &JsValue::from_str(kind));
    error.into()
}

// =============================================================================
// Pattern Text Helpers
// =============================================================================

#[wasm_bindgen]
pub fn strip_comments(line: &str) -> String {
    strip_line_comments(line)
}

/// Count the directives a pattern document compiles to, for the settings
/// editor's status line.
#[wasm_bindgen]
pub fn count_directives(filter_patterns: &str) -> u32 {
    ff_compiler::compile_document(filter_patterns).directive_count() as u32
}

// =============================================================================
// Console Logging
// =============================================================================

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[FeedFilter] {}", record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Route engine logs to the browser console at `level`
/// (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown log level: {level}")))?;

    // A logger can only be installed once; later calls just adjust the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
    Ok(())
}
