//! Token status tests for openclaw-config.
// crates/openclaw-config/tests/token_status.rs
// =============================================================================
// Module: Token Status Tests
// Description: Env file scenarios for the gateway token check.
// Purpose: Ensure TOKEN_OK / TOKEN_EMPTY reporting matches operator intent.
// =============================================================================

use std::fs;

use openclaw_config::TokenStatus;
use openclaw_config::check_token_file;
use tempfile::TempDir;

type TestResult = Result<(), String>;

fn status_for(contents: Option<&str>) -> Result<(bool, TokenStatus), String> {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("openclaw.env");
    if let Some(contents) = contents {
        fs::write(&path, contents).map_err(|err| err.to_string())?;
    }
    let check = check_token_file(&path).map_err(|err| err.to_string())?;
    Ok((check.file_present, check.status))
}

#[test]
fn populated_token_reports_ok() -> TestResult {
    let (present, status) = status_for(Some("OPENCLAW_GATEWAY_TOKEN=abc123\n"))?;
    if !present || status.as_str() != "TOKEN_OK" {
        return Err(format!("unexpected status {status} (present: {present})"));
    }
    Ok(())
}

#[test]
fn blank_token_reports_empty() -> TestResult {
    let (present, status) = status_for(Some("OPENCLAW_GATEWAY_TOKEN=\n"))?;
    if !present || status.as_str() != "TOKEN_EMPTY" {
        return Err(format!("unexpected status {status} (present: {present})"));
    }
    Ok(())
}

#[test]
fn missing_file_reports_empty() -> TestResult {
    let (present, status) = status_for(None)?;
    if present || status != TokenStatus::Empty {
        return Err(format!("unexpected status {status} (present: {present})"));
    }
    Ok(())
}

#[test]
fn token_among_other_keys_reports_ok() -> TestResult {
    let contents = "# gateway env\nOPENCLAW_PORT=18789\nOPENCLAW_GATEWAY_TOKEN= padded \n";
    let (_, status) = status_for(Some(contents))?;
    if status != TokenStatus::Ok {
        return Err(format!("unexpected status {status}"));
    }
    Ok(())
}

#[test]
fn directory_path_is_an_io_error() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    match check_token_file(dir.path()) {
        Err(err) if err.to_string().contains("env file io error") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(check) => Err(format!("expected error, got {}", check.status)),
    }
}
