// crates/openclaw-config/src/normalize.rs
// ============================================================================
// Module: Gateway Auth Normalizer
// Description: Ensures gateway.auth carries a mode and a token reference.
// Purpose: Idempotent in-place repair of openclaw.json before gateway start.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The normalizer guarantees that `gateway.auth.mode` and
//! `gateway.auth.token` exist in an OpenClaw configuration document.
//!
//! ## Invariants
//! - `gateway` and `gateway.auth` are objects after normalization.
//! - `mode` is defaulted only when the key is absent; an existing value, even
//!   `""` or `null`, is kept.
//! - `token` is replaced when absent or falsy (`null`, `false`, `0`, `""`,
//!   `[]`, `{}`) and kept otherwise.
//! - Normalizing an already normalized document changes nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::document::DocumentError;
use crate::document::load_document;
use crate::document::save_document;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Top-level section holding gateway settings.
pub const GATEWAY_KEY: &str = "gateway";
/// Section under `gateway` holding auth settings.
pub const AUTH_KEY: &str = "auth";
/// Auth mode key.
pub const MODE_KEY: &str = "mode";
/// Auth token key.
pub const TOKEN_KEY: &str = "token";
/// Mode written when none is configured.
pub const DEFAULT_AUTH_MODE: &str = "token";
/// Token reference resolved from the gateway environment at startup.
pub const TOKEN_PLACEHOLDER: &str = "${OPENCLAW_GATEWAY_TOKEN}";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Record of the edits applied by one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(
    clippy::struct_excessive_bools,
    reason = "Each flag records one independent normalization step."
)]
pub struct NormalizeReport {
    /// `gateway` was absent and created empty.
    pub created_gateway: bool,
    /// `gateway.auth` was absent and created empty.
    pub created_auth: bool,
    /// `gateway.auth.mode` was absent and set to the default.
    pub defaulted_mode: bool,
    /// `gateway.auth.token` was absent or falsy and set to the placeholder.
    pub placeholder_token: bool,
}

impl NormalizeReport {
    /// Returns true when the pass modified the document.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.created_gateway || self.created_auth || self.defaulted_mode || self.placeholder_token
    }
}

/// Result of normalizing a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// Edits applied (or pending, in check mode).
    pub report: NormalizeReport,
    /// Whether the document was written back.
    pub written: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the gateway auth normalizer.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The document could not be loaded or saved.
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// A section that must be an object holds another JSON type.
    #[error("invalid config: {path} must be an object")]
    NotAMapping {
        /// Dotted path of the offending section (`$` for the root).
        path: String,
    },
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes `gateway.auth` in an in-memory document.
///
/// # Errors
///
/// Returns [`NormalizeError::NotAMapping`] when the root, `gateway`, or
/// `gateway.auth` is present but not an object. The document is not modified
/// in that case.
pub fn normalize_gateway_auth(document: &mut Value) -> Result<NormalizeReport, NormalizeError> {
    let mut report = NormalizeReport::default();
    let root = as_mapping(document, "$")?;
    check_mapping(root.get(GATEWAY_KEY), GATEWAY_KEY)?;
    if let Some(gateway) = root.get(GATEWAY_KEY).and_then(Value::as_object) {
        check_mapping(gateway.get(AUTH_KEY), "gateway.auth")?;
    }

    let gateway = ensure_mapping(root, GATEWAY_KEY, &mut report.created_gateway, "gateway")?;
    let auth = ensure_mapping(gateway, AUTH_KEY, &mut report.created_auth, "gateway.auth")?;

    if !auth.contains_key(MODE_KEY) {
        auth.insert(MODE_KEY.to_string(), Value::String(DEFAULT_AUTH_MODE.to_string()));
        report.defaulted_mode = true;
    }
    if !auth.get(TOKEN_KEY).is_some_and(is_truthy) {
        auth.insert(TOKEN_KEY.to_string(), Value::String(TOKEN_PLACEHOLDER.to_string()));
        report.placeholder_token = true;
    }
    Ok(report)
}

/// Loads, normalizes, and rewrites the document at `path`.
///
/// The whole document is rewritten pretty-printed even when no edit was
/// needed. With `check_only` set the document is normalized in memory and
/// never written; the returned report lists the edits a write would apply.
///
/// # Errors
///
/// Returns [`NormalizeError`] when loading, normalizing, or saving fails.
pub fn fix_gateway_auth(
    path: &Path,
    check_only: bool,
) -> Result<NormalizeOutcome, NormalizeError> {
    let mut document = load_document(path)?;
    let report = normalize_gateway_auth(&mut document)?;
    let written = !check_only;
    if written {
        save_document(path, &document)?;
    }
    Ok(NormalizeOutcome {
        report,
        written,
    })
}

/// Returns JSON truthiness: `null`, `false`, zero, and empty strings,
/// arrays, and objects are falsy. Numbers too large for an `f64` are nonzero.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_none_or(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Borrows `value` as an object or reports `path` as not a mapping.
fn as_mapping<'a>(
    value: &'a mut Value,
    path: &str,
) -> Result<&'a mut Map<String, Value>, NormalizeError> {
    value.as_object_mut().ok_or_else(|| NormalizeError::NotAMapping {
        path: path.to_string(),
    })
}

/// Fails when an existing section is not an object.
fn check_mapping(value: Option<&Value>, path: &str) -> Result<(), NormalizeError> {
    match value {
        Some(existing) if !existing.is_object() => Err(NormalizeError::NotAMapping {
            path: path.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Returns the object at `key`, inserting an empty one when absent.
fn ensure_mapping<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
    created: &mut bool,
    path: &str,
) -> Result<&'a mut Map<String, Value>, NormalizeError> {
    if !parent.contains_key(key) {
        parent.insert(key.to_string(), Value::Object(Map::new()));
        *created = true;
    }
    match parent.get_mut(key) {
        Some(child) => as_mapping(child, path),
        None => Err(NormalizeError::NotAMapping {
            path: path.to_string(),
        }),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn creates_sections_for_empty_document() {
        let mut document = json!({});
        let report = normalize_gateway_auth(&mut document).unwrap();
        assert_eq!(
            document,
            json!({"gateway": {"auth": {"mode": "token", "token": "${OPENCLAW_GATEWAY_TOKEN}"}}})
        );
        assert_eq!(
            report,
            NormalizeReport {
                created_gateway: true,
                created_auth: true,
                defaulted_mode: true,
                placeholder_token: true,
            }
        );
    }

    #[test]
    fn keeps_unrelated_sections_and_order() {
        let mut document = json!({"agents": {"defaults": {}}, "gateway": {"port": 18789}});
        normalize_gateway_auth(&mut document).unwrap();
        let keys: Vec<&String> = document.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["agents", "gateway"]);
        assert_eq!(document["gateway"]["port"], json!(18789));
        let gateway_keys: Vec<&String> = document["gateway"].as_object().unwrap().keys().collect();
        assert_eq!(gateway_keys, ["port", "auth"]);
    }

    #[test]
    fn empty_mode_is_kept_but_empty_token_is_replaced() {
        let mut document = json!({"gateway": {"auth": {"mode": "", "token": ""}}});
        let report = normalize_gateway_auth(&mut document).unwrap();
        assert_eq!(document["gateway"]["auth"]["mode"], json!(""));
        assert_eq!(document["gateway"]["auth"]["token"], json!(TOKEN_PLACEHOLDER));
        assert!(!report.defaulted_mode);
        assert!(report.placeholder_token);
    }

    #[test]
    fn null_mode_is_kept() {
        let mut document = json!({"gateway": {"auth": {"mode": null, "token": "t"}}});
        let report = normalize_gateway_auth(&mut document).unwrap();
        assert_eq!(document["gateway"]["auth"]["mode"], Value::Null);
        assert!(!report.changed());
    }

    #[test]
    fn falsy_tokens_are_replaced() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!([]), json!({})] {
            let mut document = json!({"gateway": {"auth": {"mode": "token", "token": falsy}}});
            let report = normalize_gateway_auth(&mut document).unwrap();
            assert!(report.placeholder_token, "token {falsy} should be replaced");
            assert_eq!(document["gateway"]["auth"]["token"], json!(TOKEN_PLACEHOLDER));
        }
    }

    #[test]
    fn truthy_tokens_are_kept() {
        for truthy in [json!("secretA"), json!(true), json!(7), json!(["a"]), json!({"k": 1})] {
            let mut document = json!({"gateway": {"auth": {"token": truthy.clone()}}});
            let report = normalize_gateway_auth(&mut document).unwrap();
            assert!(!report.placeholder_token);
            assert_eq!(document["gateway"]["auth"]["token"], truthy);
        }
    }

    #[test]
    fn rejects_non_object_sections() {
        let cases = [
            (json!([]), "$"),
            (json!({"gateway": "on"}), "gateway"),
            (json!({"gateway": {"auth": ["token"]}}), "gateway.auth"),
        ];
        for (mut document, expected) in cases {
            let before = document.clone();
            match normalize_gateway_auth(&mut document) {
                Err(NormalizeError::NotAMapping {
                    path,
                }) => assert_eq!(path, expected),
                other => panic!("expected NotAMapping for {before}, got {other:?}"),
            }
            assert_eq!(document, before, "document must be untouched on error");
        }
    }

    #[test]
    fn second_pass_reports_no_changes() {
        let mut document = json!({"gateway": {"auth": {"token": ""}}});
        assert!(normalize_gateway_auth(&mut document).unwrap().changed());
        let once = document.clone();
        assert!(!normalize_gateway_auth(&mut document).unwrap().changed());
        assert_eq!(document, once);
    }

    #[test]
    fn truthiness_matches_json_semantics() {
        assert!(!is_truthy(&json!(-0.0)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!(" ")));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn parsed_numbers_keep_zero_falsy() {
        for (text, expected) in [
            ("0", false),
            ("0.0", false),
            ("-0", false),
            ("0e10", false),
            ("1", true),
            ("0.5", true),
            ("123456789012345678901234567890", true),
            ("1e400", true),
        ] {
            let value: Value = serde_json::from_str(text).unwrap();
            assert_eq!(is_truthy(&value), expected, "truthiness of {text}");
        }
    }
}
