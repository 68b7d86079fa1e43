// crates/openclaw-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for localized admin output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The OpenClaw admin CLI stores user-facing strings in a small translation
//! catalog so messages stay consistent across commands and locales. All
//! runtime output should be routed through the [`t!`](crate::t) macro, except
//! the machine-readable `TOKEN_OK` / `TOKEN_EMPTY` / `updated` status lines.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("ca") => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "openclaw-admin {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("audit.open_failed", "Failed to open audit log {path}: {error}"),
    ("token.check.failed", "Failed to check gateway token: {error}"),
    ("gateway.fix_auth.failed", "Failed to normalize gateway auth: {error}"),
    ("gateway.fix_auth.check.clean", "gateway.auth is already normalized in {path}"),
    ("gateway.fix_auth.check.pending", "gateway.auth needs normalization in {path}: {changes}"),
    ("gateway.change.created_gateway", "create gateway"),
    ("gateway.change.created_auth", "create gateway.auth"),
    ("gateway.change.defaulted_mode", "set gateway.auth.mode to \"token\""),
    ("gateway.change.placeholder_token", "set gateway.auth.token placeholder"),
    ("templates.validate.failed", "Failed to validate templates: {error}"),
    ("templates.validate.ok", "OK {file}"),
    ("templates.validate.invalid", "FAIL {file}"),
    ("templates.violation.missing", "  - {path} is missing"),
    ("templates.violation.empty", "  - {path} is empty"),
    ("templates.validate.summary_failed", "{count} of {total} templates failed validation"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "openclaw-admin {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("audit.open_failed", "No s'ha pogut obrir el registre d'auditoria {path}: {error}"),
    ("token.check.failed", "No s'ha pogut comprovar el testimoni del gateway: {error}"),
    ("gateway.fix_auth.failed", "No s'ha pogut normalitzar l'autenticació del gateway: {error}"),
    ("gateway.fix_auth.check.clean", "gateway.auth ja està normalitzat a {path}"),
    ("gateway.fix_auth.check.pending", "gateway.auth s'ha de normalitzar a {path}: {changes}"),
    ("gateway.change.created_gateway", "crear gateway"),
    ("gateway.change.created_auth", "crear gateway.auth"),
    ("gateway.change.defaulted_mode", "establir gateway.auth.mode a \"token\""),
    ("gateway.change.placeholder_token", "establir el marcador de gateway.auth.token"),
    ("templates.validate.failed", "No s'han pogut validar les plantilles: {error}"),
    ("templates.validate.ok", "OK {file}"),
    ("templates.validate.invalid", "ERROR {file}"),
    ("templates.violation.missing", "  - falta {path}"),
    ("templates.violation.empty", "  - {path} és buit"),
    (
        "templates.validate.summary_failed",
        "{count} de {total} plantilles no han superat la validació",
    ),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
pub(crate) const fn catalog_entries_for(
    locale: Locale,
) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let cell = match locale {
        Locale::En => &CATALOG_EN_MAP,
        Locale::Ca => &CATALOG_CA_MAP,
    };
    cell.get_or_init(|| catalog_entries_for(locale).iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
