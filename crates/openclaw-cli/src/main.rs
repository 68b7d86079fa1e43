// crates/openclaw-cli/src/main.rs
// ============================================================================
// Module: OpenClaw Admin CLI Entry Point
// Description: Command dispatcher for gateway config administration.
// Purpose: Provide token, gateway auth, and template checks from one binary.
// Dependencies: clap, openclaw-config, thiserror.
// ============================================================================

//! ## Overview
//! `openclaw-admin` wraps the `openclaw-config` operations for operators:
//! token status checks, gateway auth normalization, and template validation.
//! User-facing strings are routed through the i18n catalog; audit events are
//! written as JSON lines to stderr unless redirected or disabled.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use openclaw_cli::i18n::Locale;
use openclaw_cli::i18n::set_locale;
use openclaw_cli::t;
use openclaw_config::NormalizeReport;
use openclaw_config::TemplateReport;
use openclaw_config::audit::AuditSink;
use openclaw_config::audit::FileAuditSink;
use openclaw_config::audit::GatewayAuthAuditEvent;
use openclaw_config::audit::NoopAuditSink;
use openclaw_config::audit::StderrAuditSink;
use openclaw_config::audit::TemplateAuditEvent;
use openclaw_config::audit::TokenStatusAuditEvent;
use openclaw_config::check_token_file;
use openclaw_config::fix_gateway_auth;
use openclaw_config::paths::PathOverrides;
use openclaw_config::paths::ToolPaths;
use openclaw_config::templates::ViolationKind;
use openclaw_config::templates::check_template_dir;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "OPENCLAW_ADMIN_LANG";
/// Status line printed after a rewrite; never localized.
const UPDATED_LINE: &str = "updated";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "openclaw-admin", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `OPENCLAW_ADMIN_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Append audit events to this file instead of stderr.
    #[arg(long, value_name = "PATH", global = true, conflicts_with = "no_audit")]
    audit_log: Option<PathBuf>,
    /// Disable audit events.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    no_audit: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Gateway token utilities.
    Token {
        /// Selected token subcommand.
        #[command(subcommand)]
        command: TokenCommand,
    },
    /// Gateway configuration utilities.
    Gateway {
        /// Selected gateway subcommand.
        #[command(subcommand)]
        command: GatewayCommand,
    },
    /// Configuration template utilities.
    Templates {
        /// Selected templates subcommand.
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

/// Token subcommands.
#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Report whether OPENCLAW_GATEWAY_TOKEN is set (prints TOKEN_OK or TOKEN_EMPTY).
    Check(TokenCheckCommand),
}

/// Gateway subcommands.
#[derive(Subcommand, Debug)]
enum GatewayCommand {
    /// Ensure gateway.auth has a mode and a token placeholder.
    FixAuth(GatewayFixAuthCommand),
}

/// Templates subcommands.
#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    /// Check configuration templates for required keys.
    Validate(TemplatesValidateCommand),
}

/// Arguments for the token check.
#[derive(Args, Debug)]
struct TokenCheckCommand {
    /// Env file path (defaults to /etc/openclaw/openclaw.env or `OPENCLAW_ENV_FILE`).
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

/// Arguments for gateway auth normalization.
#[derive(Args, Debug)]
struct GatewayFixAuthCommand {
    /// Config path (defaults to ~/.openclaw/openclaw.json or `OPENCLAW_CONFIG_PATH`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report pending changes without writing; exits non-zero when changes are needed.
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,
}

/// Arguments for template validation.
#[derive(Args, Debug)]
struct TemplatesValidateCommand {
    /// Templates directory (defaults to config-templates or `OPENCLAW_TEMPLATES_DIR`).
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let audit = build_audit_sink(cli.audit_log.as_deref(), cli.no_audit)?;
    match command {
        Commands::Token {
            command: TokenCommand::Check(command),
        } => command_token_check(&command, audit.as_ref()),
        Commands::Gateway {
            command: GatewayCommand::FixAuth(command),
        } => command_gateway_fix_auth(&command, audit.as_ref()),
        Commands::Templates {
            command: TemplatesCommand::Validate(command),
        } => command_templates_validate(&command, audit.as_ref()),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Selects the audit sink from global flags.
fn build_audit_sink(audit_log: Option<&Path>, disabled: bool) -> CliResult<Box<dyn AuditSink>> {
    if disabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match audit_log {
        Some(path) => {
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Token Commands
// ============================================================================

/// Executes the token status check.
fn command_token_check(command: &TokenCheckCommand, audit: &dyn AuditSink) -> CliResult<ExitCode> {
    let path = ToolPaths::from_env(PathOverrides {
        env_file: command.env_file.as_deref(),
        ..PathOverrides::default()
    })
    .env_file;
    let check = check_token_file(&path)
        .map_err(|err| CliError::new(t!("token.check.failed", error = err)))?;
    audit.record_token_status(&TokenStatusAuditEvent::new(&path, check.file_present, check.status));
    write_stdout_line(check.status.as_str())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Gateway Commands
// ============================================================================

/// Executes gateway auth normalization.
fn command_gateway_fix_auth(
    command: &GatewayFixAuthCommand,
    audit: &dyn AuditSink,
) -> CliResult<ExitCode> {
    let path = ToolPaths::from_env(PathOverrides {
        config: command.config.as_deref(),
        ..PathOverrides::default()
    })
    .config;
    let outcome = fix_gateway_auth(&path, command.check)
        .map_err(|err| CliError::new(t!("gateway.fix_auth.failed", error = err)))?;
    audit.record_gateway_auth(&GatewayAuthAuditEvent::new(&path, outcome.report, outcome.written));

    let (message, code) = match (command.check, outcome.report.changed()) {
        (false, _) => (UPDATED_LINE.to_string(), ExitCode::SUCCESS),
        (true, true) => {
            let changes = describe_changes(&outcome.report);
            (
                t!("gateway.fix_auth.check.pending", path = path.display(), changes = changes),
                ExitCode::FAILURE,
            )
        }
        (true, false) => {
            (t!("gateway.fix_auth.check.clean", path = path.display()), ExitCode::SUCCESS)
        }
    };
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(code)
}

/// Lists the edits recorded in a normalization report.
fn describe_changes(report: &NormalizeReport) -> String {
    let mut changes = Vec::new();
    if report.created_gateway {
        changes.push(t!("gateway.change.created_gateway"));
    }
    if report.created_auth {
        changes.push(t!("gateway.change.created_auth"));
    }
    if report.defaulted_mode {
        changes.push(t!("gateway.change.defaulted_mode"));
    }
    if report.placeholder_token {
        changes.push(t!("gateway.change.placeholder_token"));
    }
    changes.join(", ")
}

// ============================================================================
// SECTION: Template Commands
// ============================================================================

/// Executes template validation for every known template.
fn command_templates_validate(
    command: &TemplatesValidateCommand,
    audit: &dyn AuditSink,
) -> CliResult<ExitCode> {
    let dir = ToolPaths::from_env(PathOverrides {
        templates_dir: command.dir.as_deref(),
        ..PathOverrides::default()
    })
    .templates_dir;
    let reports = check_template_dir(&dir)
        .map_err(|err| CliError::new(t!("templates.validate.failed", error = err)))?;
    for report in &reports {
        audit.record_template(&TemplateAuditEvent::new(report.kind, report.violations.len()));
        write_stdout_line(&render_template_report(report))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    let failed = reports.iter().filter(|report| !report.is_valid()).count();
    if failed > 0 {
        return Err(CliError::new(t!(
            "templates.validate.summary_failed",
            count = failed,
            total = reports.len()
        )));
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders one template report as status line plus violations.
fn render_template_report(report: &TemplateReport) -> String {
    let file = report.kind.file_name();
    if report.is_valid() {
        return t!("templates.validate.ok", file = file);
    }
    let mut lines = vec![t!("templates.validate.invalid", file = file)];
    for violation in &report.violations {
        lines.push(match violation.kind {
            ViolationKind::Missing => t!("templates.violation.missing", path = violation.path),
            ViolationKind::Empty => t!("templates.violation.empty", path = violation.path),
        });
    }
    lines.join("\n")
}

// ============================================================================
// SECTION: Locale Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
