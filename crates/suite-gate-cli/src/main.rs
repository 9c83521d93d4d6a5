// crates/suite-gate-cli/src/main.rs
// ============================================================================
// Module: Suite Gate CLI Entry Point
// Description: Command dispatcher for suite evaluation and audits.
// Purpose: Evaluate manifests against configuration before any test runs.
// Dependencies: clap, suite-gate-config, suite-gate-core, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! The Suite Gate CLI loads a configuration snapshot and a suite manifest,
//! then reports the pre-execution verdict of every test. Diagnostics go to
//! stderr through `tracing`; reports go to stdout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use suite_gate_cli::render;
use suite_gate_cli::render::IdAudit;
use suite_gate_config::SuiteGateConfig;
use suite_gate_config::SuiteManifest;
use suite_gate_core::DecisionComposer;
use suite_gate_core::ServiceCatalog;
use suite_gate_core::TagFilter;
use suite_gate_core::TestCatalog;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "SUITE_GATE_LOG";
/// Filter used when `SUITE_GATE_LOG` is unset or malformed.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "suite-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every test in a manifest.
    Evaluate(EvaluateCommand),
    /// List catalogued services and their availability.
    Services(ServicesCommand),
    /// Audit idempotent ids in a manifest.
    Ids(IdsCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Output format for reports.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the `evaluate` command.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Config file path (defaults to suite-gate.toml or `SUITE_GATE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Suite manifest path.
    #[arg(long, value_name = "PATH")]
    manifest: PathBuf,
    /// Only evaluate tests carrying this tag (repeatable).
    #[arg(long = "tag", value_name = "TAG", action = ArgAction::Append)]
    tags: Vec<String>,
    /// Skip tests carrying this tag (repeatable).
    #[arg(long = "exclude-tag", value_name = "TAG", action = ArgAction::Append)]
    exclude_tags: Vec<String>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for the `services` command.
#[derive(Args, Debug)]
struct ServicesCommand {
    /// Config file path (defaults to suite-gate.toml or `SUITE_GATE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for the `ids` command.
#[derive(Args, Debug)]
struct IdsCommand {
    /// Suite manifest path.
    #[arg(long, value_name = "PATH")]
    manifest: PathBuf,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Suite Gate configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path (defaults to suite-gate.toml or `SUITE_GATE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
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
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Evaluate(command) => command_evaluate(&command),
        Commands::Services(command) => command_services(&command),
        Commands::Ids(command) => command_ids(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `evaluate` command.
fn command_evaluate(command: &EvaluateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let catalog = load_catalog(&command.manifest, config.catalog())?;
    let services = config.service_registry();
    let extensions = config.extension_registry();
    let composer = DecisionComposer::new(&services, &extensions, config.snapshot());
    let filter = command
        .tags
        .iter()
        .fold(TagFilter::new(), |filter, tag| filter.require(tag.clone()));
    let filter = command
        .exclude_tags
        .iter()
        .fold(filter, |filter, tag| filter.exclude(tag.clone()));
    let report = catalog.evaluate(&composer, &filter);
    tracing::info!(
        run = report.totals.run,
        skip = report.totals.skip,
        invalid = report.totals.invalid,
        "suite evaluated"
    );
    emit(command.format, &report, render::suite_report_text)?;
    Ok(if report.has_invalid() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Executes the `services` command.
fn command_services(command: &ServicesCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let rows = render::service_rows(&config.service_registry());
    emit(command.format, &rows, |rows| render::services_text(rows))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `ids` command.
fn command_ids(command: &IdsCommand) -> CliResult<ExitCode> {
    let catalog = load_catalog(&command.manifest, &ServiceCatalog::standard())?;
    let audit = IdAudit::from_catalog(&catalog);
    emit(command.format, &audit, render::id_audit_text)?;
    Ok(if audit.has_conflicts() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Executes config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            let config = load_config(command.config.as_deref())?;
            let source =
                config.source().map_or_else(String::new, |path| path.display().to_string());
            write_stdout_line(&format!("config valid: {source}"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Loading Helpers
// ============================================================================

/// Loads configuration, mapping failures to CLI errors.
fn load_config(path: Option<&Path>) -> CliResult<SuiteGateConfig> {
    SuiteGateConfig::load(path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Loads a manifest and applies its decorators.
fn load_catalog(path: &Path, services: &ServiceCatalog) -> CliResult<TestCatalog> {
    let manifest = SuiteManifest::load(path)
        .map_err(|err| CliError::new(format!("failed to load manifest: {err}")))?;
    manifest
        .build_catalog(services)
        .map_err(|err| CliError::new(format!("failed to load manifest: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a report in the requested format.
fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> CliResult<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let output = match format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => render::json(value)
            .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?,
    };
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))
}

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

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
