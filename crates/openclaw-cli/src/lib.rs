// crates/openclaw-cli/src/lib.rs
// ============================================================================
// Module: OpenClaw Admin CLI Library
// Description: Shared helpers for the openclaw-admin binary.
// Purpose: Expose the message catalog to the binary and integration tests.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! Support library for the `openclaw-admin` binary. It currently hosts the
//! localized message catalog and the [`t!`] macro.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;

#[cfg(test)]
#[path = "tests/i18n.rs"]
mod i18n_tests;
