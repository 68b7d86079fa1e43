//! Template validation tests for openclaw-config.
// crates/openclaw-config/tests/templates.rs
// =============================================================================
// Module: Template Validation Tests
// Description: Required-key checks against inline and shipped templates.
// Purpose: Prevent drift between templates and the keys the gateway reads.
// =============================================================================

use std::fs;
use std::path::PathBuf;

use openclaw_config::TemplateError;
use openclaw_config::TemplateKind;
use openclaw_config::templates::ViolationKind;
use openclaw_config::templates::check_template;
use openclaw_config::templates::check_template_dir;
use openclaw_config::templates::validate_template;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

type TestResult = Result<(), String>;

fn shipped_templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config-templates")
}

fn complete_template() -> Value {
    json!({
        "agents": {"defaults": {"workspace": "~/.openclaw/workspace"}},
        "logging": {"level": "info"},
        "tools": {},
        "channels": {"googlechat": {"enabled": false}, "telegram": {"enabled": true}},
        "plugins": {"entries": {"voice-call": {"enabled": true}}}
    })
}

#[test]
fn complete_template_passes() -> TestResult {
    validate_template(TemplateKind::Openclaw, &complete_template()).map_err(|err| err.to_string())
}

#[test]
fn missing_telegram_channel_fails() -> TestResult {
    let mut template = complete_template();
    if let Some(channels) = template["channels"].as_object_mut() {
        channels.remove("telegram");
    }
    match validate_template(TemplateKind::Openclaw, &template) {
        Err(TemplateError::Violations(report)) => {
            let paths: Vec<&str> = report.violations.iter().map(|v| v.path).collect();
            if paths == ["channels.telegram"] {
                Ok(())
            } else {
                Err(format!("unexpected violations: {paths:?}"))
            }
        }
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(()) => Err("template without telegram should fail".to_string()),
    }
}

#[test]
fn every_violation_is_reported() -> TestResult {
    let report = check_template(TemplateKind::Openclaw, &json!({"agents": {}}));
    let missing = report.violations.iter().filter(|v| v.kind == ViolationKind::Missing).count();
    if report.violations.len() != 9 || missing != 9 {
        return Err(format!("unexpected report: {report}"));
    }
    Ok(())
}

#[test]
fn shipped_templates_pass() -> TestResult {
    let reports = check_template_dir(&shipped_templates_dir()).map_err(|err| err.to_string())?;
    if reports.len() != 3 {
        return Err(format!("expected 3 reports, got {}", reports.len()));
    }
    for report in reports {
        if !report.is_valid() {
            return Err(format!("shipped template failed: {report}"));
        }
    }
    Ok(())
}

#[test]
fn missing_template_file_names_the_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    fs::write(dir.path().join("openclaw.json.template"), complete_template().to_string())
        .map_err(|err| err.to_string())?;
    match check_template_dir(dir.path()) {
        Err(err) if err.to_string().contains("exec-approvals.gateway.json") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("missing exec approvals should fail".to_string()),
    }
}
