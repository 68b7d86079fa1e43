// crates/openclaw-config/src/lib.rs
// ============================================================================
// Module: OpenClaw Config Library
// Description: Gateway config normalization, token status, template checks.
// Purpose: Single source of truth for openclaw.json gateway auth semantics.
// Dependencies: serde, serde_json, tempfile, thiserror
// ============================================================================

//! ## Overview
//! `openclaw-config` owns the small set of administrative operations around
//! an OpenClaw gateway deployment:
//! - [`normalize`] ensures `gateway.auth` carries a mode and a token reference.
//! - [`token`] reports whether the gateway token is set in the env file.
//! - [`templates`] checks configuration templates for required keys.
//!
//! Documents are loaded and saved through [`document`], which enforces size
//! and encoding limits and replaces files atomically.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod document;
pub mod normalize;
pub mod paths;
pub mod templates;
pub mod token;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::DocumentError;
pub use document::load_document;
pub use document::save_document;
pub use normalize::NormalizeError;
pub use normalize::NormalizeOutcome;
pub use normalize::NormalizeReport;
pub use normalize::fix_gateway_auth;
pub use normalize::normalize_gateway_auth;
pub use templates::TemplateError;
pub use templates::TemplateKind;
pub use templates::TemplateReport;
pub use token::TokenCheck;
pub use token::TokenError;
pub use token::TokenStatus;
pub use token::check_token_file;
