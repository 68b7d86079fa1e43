// crates/openclaw-config/src/token.rs
// ============================================================================
// Module: Gateway Token Status
// Description: Reports whether the gateway token is set in the env file.
// Purpose: Let operators confirm a token is provisioned without printing it.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The gateway reads `OPENCLAW_GATEWAY_TOKEN` from a `KEY=VALUE` environment
//! file. [`check_token_file`] reports whether that key carries a non-empty
//! value. The value is never returned to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the gateway token.
pub const TOKEN_ENV_KEY: &str = "OPENCLAW_GATEWAY_TOKEN";

/// Characters that terminate an env file line.
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Token provisioning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    /// The token key is present with a non-empty value.
    Ok,
    /// The file or key is missing, or the value is blank.
    Empty,
}

impl TokenStatus {
    /// Returns the status line printed for operators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "TOKEN_OK",
            Self::Empty => "TOKEN_EMPTY",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of inspecting an env file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCheck {
    /// Whether the env file exists.
    pub file_present: bool,
    /// Token status derived from the file.
    pub status: TokenStatus,
}

/// Errors raised while reading an existing env file.
#[derive(Debug, Error)]
pub enum TokenError {
    /// I/O failure other than a missing file.
    #[error("env file io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Inspects the env file at `path`.
///
/// A missing file is reported as [`TokenStatus::Empty`].
///
/// # Errors
///
/// Returns [`TokenError::Io`] when the file exists but cannot be read.
pub fn check_token_file(path: &Path) -> Result<TokenCheck, TokenError> {
    match fs::read(path) {
        Ok(bytes) => Ok(TokenCheck {
            file_present: true,
            status: token_status(&String::from_utf8_lossy(&bytes)),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(TokenCheck {
            file_present: false,
            status: TokenStatus::Empty,
        }),
        Err(err) => Err(TokenError::Io(format!("{}: {err}", path.display()))),
    }
}

/// Derives the token status from env file contents.
///
/// Lines end at any of [`LINE_BREAKS`], including a bare `\r`. The first line
/// starting with `OPENCLAW_GATEWAY_TOKEN=` decides; its value
/// is trimmed before the emptiness check.
#[must_use]
pub fn token_status(contents: &str) -> TokenStatus {
    let prefix = format!("{TOKEN_ENV_KEY}=");
    let value =
        contents.split(LINE_BREAKS).find_map(|line| line.strip_prefix(prefix.as_str()));
    match value {
        Some(value) if !value.trim().is_empty() => TokenStatus::Ok,
        _ => TokenStatus::Empty,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
