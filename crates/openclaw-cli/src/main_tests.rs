// crates/openclaw-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for locale resolution and report rendering.
// Purpose: Keep command output stable without spawning the binary.
// Dependencies: openclaw-cli main helpers, openclaw-config
// ============================================================================

//! ## Overview
//! Covers the pure helpers behind `openclaw-admin`: locale precedence,
//! normalization change lists, template report lines, and audit sink setup.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use openclaw_cli::i18n::Locale;
use openclaw_config::NormalizeReport;
use openclaw_config::TemplateKind;
use openclaw_config::TemplateReport;
use openclaw_config::templates::Violation;
use openclaw_config::templates::ViolationKind;

use super::LangArg;
use super::build_audit_sink;
use super::describe_changes;
use super::render_template_report;
use super::resolve_locale;

// ============================================================================
// SECTION: Locale
// ============================================================================

#[test]
fn lang_flag_wins_over_environment() {
    let locale = resolve_locale(Some(LangArg::En), Some("ca")).expect("flag locale");
    assert_eq!(locale, Locale::En);
}

#[test]
fn environment_locale_is_used_without_flag() {
    assert_eq!(resolve_locale(None, Some("ca-ES")).expect("env locale"), Locale::Ca);
    assert_eq!(resolve_locale(None, None).expect("default locale"), Locale::En);
}

#[test]
fn invalid_environment_locale_is_rejected() {
    let err = resolve_locale(None, Some("klingon")).expect_err("invalid locale");
    let message = err.to_string();
    assert!(message.contains("OPENCLAW_ADMIN_LANG"), "{message}");
    assert!(message.contains("klingon"), "{message}");
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn change_list_names_each_edit_in_order() {
    let report = NormalizeReport {
        created_gateway: true,
        created_auth: true,
        defaulted_mode: true,
        placeholder_token: true,
    };
    assert_eq!(
        describe_changes(&report),
        "create gateway, create gateway.auth, set gateway.auth.mode to \"token\", set \
         gateway.auth.token placeholder"
    );
    assert_eq!(describe_changes(&NormalizeReport::default()), "");
}

#[test]
fn valid_template_renders_single_ok_line() {
    let report = TemplateReport {
        kind: TemplateKind::ExecApprovalsGateway,
        violations: Vec::new(),
    };
    assert_eq!(render_template_report(&report), "OK exec-approvals.gateway.json");
}

#[test]
fn invalid_template_lists_violations() {
    let report = TemplateReport {
        kind: TemplateKind::Openclaw,
        violations: vec![
            Violation {
                path: "channels.telegram",
                kind: ViolationKind::Missing,
            },
            Violation {
                path: "agents.defaults.workspace",
                kind: ViolationKind::Empty,
            },
        ],
    };
    assert_eq!(
        render_template_report(&report),
        "FAIL openclaw.json.template\n  - channels.telegram is missing\n  - \
         agents.defaults.workspace is empty"
    );
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

#[test]
fn audit_log_path_must_be_openable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing_parent = dir.path().join("absent").join("audit.jsonl");
    let Err(err) = build_audit_sink(Some(&missing_parent), false) else {
        panic!("audit sink should fail for a missing parent directory");
    };
    assert!(err.to_string().contains("audit log"), "{err}");
    assert!(build_audit_sink(Some(&missing_parent), true).is_ok());
    assert!(build_audit_sink(Some(&dir.path().join("audit.jsonl")), false).is_ok());
}
