// crates/openclaw-config/src/templates.rs
// ============================================================================
// Module: Template Key Validation
// Description: Required-key checks for OpenClaw configuration templates.
// Purpose: Catch template drift before templates are rendered into configs.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Templates are reference configuration documents. Only their key structure
//! is checked: each [`TemplateKind`] carries a fixed list of dotted key paths
//! that must be present, and some of them must also be truthy. Validation is
//! read-only and reports every violation rather than stopping at the first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::document::DocumentError;
use crate::document::load_document;
use crate::normalize::is_truthy;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Requirement applied to a key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// The key must exist.
    Present,
    /// The key must exist and hold a truthy value.
    Truthy,
}

/// One required key of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRule {
    /// Dotted key path from the document root.
    pub path: &'static str,
    /// What the key must satisfy.
    pub requirement: Requirement,
}

impl TemplateRule {
    /// Rule requiring `path` to exist.
    const fn present(path: &'static str) -> Self {
        Self {
            path,
            requirement: Requirement::Present,
        }
    }

    /// Rule requiring `path` to exist with a truthy value.
    const fn truthy(path: &'static str) -> Self {
        Self {
            path,
            requirement: Requirement::Truthy,
        }
    }
}

/// Rules for the primary `openclaw.json` template.
const OPENCLAW_RULES: &[TemplateRule] = &[
    TemplateRule::present("agents"),
    TemplateRule::truthy("agents.defaults.workspace"),
    TemplateRule::present("logging"),
    TemplateRule::present("tools"),
    TemplateRule::present("channels"),
    TemplateRule::present("channels.googlechat"),
    TemplateRule::present("channels.telegram"),
    TemplateRule::present("plugins"),
    TemplateRule::present("plugins.entries"),
    TemplateRule::present("plugins.entries.voice-call"),
];

/// Rules shared by both exec-approval templates.
const EXEC_APPROVAL_RULES: &[TemplateRule] = &[TemplateRule::truthy("allow")];

/// Known template kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Primary gateway configuration template.
    Openclaw,
    /// Gateway-scoped exec approvals.
    ExecApprovalsGateway,
    /// Node-scoped exec approvals.
    ExecApprovalsNode,
}

/// All template kinds in validation order.
pub const TEMPLATE_KINDS: &[TemplateKind] =
    &[TemplateKind::Openclaw, TemplateKind::ExecApprovalsGateway, TemplateKind::ExecApprovalsNode];

impl TemplateKind {
    /// File name of the template inside a templates directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Openclaw => "openclaw.json.template",
            Self::ExecApprovalsGateway => "exec-approvals.gateway.json",
            Self::ExecApprovalsNode => "exec-approvals.node.json",
        }
    }

    /// Required keys for this template.
    #[must_use]
    pub const fn rules(self) -> &'static [TemplateRule] {
        match self {
            Self::Openclaw => OPENCLAW_RULES,
            Self::ExecApprovalsGateway | Self::ExecApprovalsNode => EXEC_APPROVAL_RULES,
        }
    }
}

/// How a rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The key does not exist.
    Missing,
    /// The key exists but is falsy.
    Empty,
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted key path.
    pub path: &'static str,
    /// Failure kind.
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Missing => write!(f, "{} is missing", self.path),
            ViolationKind::Empty => write!(f, "{} is empty", self.path),
        }
    }
}

/// Validation result for one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateReport {
    /// Template that was checked.
    pub kind: TemplateKind,
    /// Failed rules, in rule order.
    pub violations: Vec<Violation>,
}

impl TemplateReport {
    /// Returns true when every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for TemplateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}: {}", self.kind.file_name(), details.join(", "))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by template validation.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template could not be loaded.
    #[error("{}: {source}", file.display())]
    Document {
        /// Template file that failed to load.
        file: PathBuf,
        /// Underlying load error.
        source: DocumentError,
    },
    /// The template is missing required keys.
    #[error("template check failed: {0}")]
    Violations(TemplateReport),
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks an in-memory template against the rules for `kind`.
#[must_use]
pub fn check_template(kind: TemplateKind, document: &Value) -> TemplateReport {
    let violations = kind
        .rules()
        .iter()
        .filter_map(|rule| {
            let failure = match (lookup(document, rule.path), rule.requirement) {
                (None, _) => ViolationKind::Missing,
                (Some(value), Requirement::Truthy) if !is_truthy(value) => ViolationKind::Empty,
                (Some(_), _) => return None,
            };
            Some(Violation {
                path: rule.path,
                kind: failure,
            })
        })
        .collect();
    TemplateReport {
        kind,
        violations,
    }
}

/// Validates an in-memory template.
///
/// # Errors
///
/// Returns [`TemplateError::Violations`] when any rule fails.
pub fn validate_template(kind: TemplateKind, document: &Value) -> Result<(), TemplateError> {
    let report = check_template(kind, document);
    if report.is_valid() { Ok(()) } else { Err(TemplateError::Violations(report)) }
}

/// Loads `kind` from `dir` and checks it.
///
/// # Errors
///
/// Returns [`TemplateError::Document`] when the template cannot be loaded.
pub fn check_template_file(
    dir: &Path,
    kind: TemplateKind,
) -> Result<TemplateReport, TemplateError> {
    let file = dir.join(kind.file_name());
    let document = load_document(&file).map_err(|source| TemplateError::Document {
        file,
        source,
    })?;
    Ok(check_template(kind, &document))
}

/// Loads and checks every known template in `dir`.
///
/// # Errors
///
/// Returns [`TemplateError::Document`] for the first template that cannot be
/// loaded.
pub fn check_template_dir(dir: &Path) -> Result<Vec<TemplateReport>, TemplateError> {
    TEMPLATE_KINDS.iter().map(|kind| check_template_file(dir, *kind)).collect()
}

/// Resolves a dotted path through nested objects.
fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(document, |value, key| value.as_object()?.get(key))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
