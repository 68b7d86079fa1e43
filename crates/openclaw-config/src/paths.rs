// crates/openclaw-config/src/paths.rs
// ============================================================================
// Module: Default Path Resolution
// Description: Resolves config, env file, and template locations.
// Purpose: Apply CLI override > environment override > built-in default.
// Dependencies: Standard library paths.
// ============================================================================

//! ## Overview
//! Every operation targets a file at a well-known location. Callers may pass
//! an explicit path; otherwise an environment variable override is honored,
//! and finally a built-in default applies. Resolution is pure: environment
//! values are passed in so the rules stay testable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::path::Path;
use std::path::PathBuf;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable overriding the gateway config path.
pub const CONFIG_PATH_ENV: &str = "OPENCLAW_CONFIG_PATH";
/// Environment variable overriding the token env file path.
pub const ENV_FILE_ENV: &str = "OPENCLAW_ENV_FILE";
/// Environment variable overriding the templates directory.
pub const TEMPLATES_DIR_ENV: &str = "OPENCLAW_TEMPLATES_DIR";
/// Config path relative to the user's home directory.
const CONFIG_HOME_RELATIVE: &str = ".openclaw/openclaw.json";
/// Default token env file.
pub const DEFAULT_ENV_FILE: &str = "/etc/openclaw/openclaw.env";
/// Default templates directory, relative to the working directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "config-templates";

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Picks the explicit path, then a non-blank override, then the fallback.
fn resolve(explicit: Option<&Path>, env_value: Option<&str>, fallback: PathBuf) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => fallback,
    }
}

/// Resolves the gateway config path.
///
/// Without a `HOME` the default is relative to the working directory.
#[must_use]
pub fn config_path(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    home: Option<&str>,
) -> PathBuf {
    let base =
        home.filter(|value| !value.trim().is_empty()).map_or_else(PathBuf::new, PathBuf::from);
    resolve(explicit, env_value, base.join(CONFIG_HOME_RELATIVE))
}

/// Resolves the token env file path.
#[must_use]
pub fn env_file_path(explicit: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    resolve(explicit, env_value, PathBuf::from(DEFAULT_ENV_FILE))
}

/// Resolves the templates directory.
#[must_use]
pub fn templates_dir(explicit: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    resolve(explicit, env_value, PathBuf::from(DEFAULT_TEMPLATES_DIR))
}

/// Resolved locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Gateway config document.
    pub config: PathBuf,
    /// Token env file.
    pub env_file: PathBuf,
    /// Templates directory.
    pub templates_dir: PathBuf,
}

/// Explicit path overrides supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOverrides<'a> {
    /// Gateway config document override.
    pub config: Option<&'a Path>,
    /// Token env file override.
    pub env_file: Option<&'a Path>,
    /// Templates directory override.
    pub templates_dir: Option<&'a Path>,
}

impl ToolPaths {
    /// Resolves all locations against the process environment.
    #[must_use]
    pub fn from_env(overrides: PathOverrides<'_>) -> Self {
        let config_env = env::var(CONFIG_PATH_ENV).ok();
        let env_file_env = env::var(ENV_FILE_ENV).ok();
        let templates_env = env::var(TEMPLATES_DIR_ENV).ok();
        let home = env::var("HOME").ok();
        Self {
            config: config_path(overrides.config, config_env.as_deref(), home.as_deref()),
            env_file: env_file_path(overrides.env_file, env_file_env.as_deref()),
            templates_dir: templates_dir(overrides.templates_dir, templates_env.as_deref()),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
