// lti-launch-http/src/main.rs
// ============================================================================
// Module: Launch Server Entry Point
// Description: Command dispatcher for the LTI launch server.
// Purpose: Provide a localized CLI for serving and config validation.
// Dependencies: clap, lti-launch-core, lti-launch-expander, lti-launch-http, tokio
// ============================================================================

//! ## Overview
//! The launch server CLI starts the HTTP tier or validates configuration.
//! All user-facing strings are routed through the i18n catalog. The default
//! wiring uses in-memory repositories and the unsigned reference adapter;
//! production deployments replace both behind the same interfaces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use lti_launch_core::InMemoryAssetProcessorStore;
use lti_launch_core::InMemoryContextStore;
use lti_launch_core::InMemoryPermissionChecker;
use lti_launch_core::InMemoryResubmissionNotifier;
use lti_launch_core::InMemorySubmissionStore;
use lti_launch_core::InMemoryToolStore;
use lti_launch_core::InMemoryUserStore;
use lti_launch_core::LaunchOrchestrator;
use lti_launch_core::RootAccount;
use lti_launch_core::VariableExpander;
use lti_launch_expander::ExpanderRegistry;
use lti_launch_http::AppState;
use lti_launch_http::LaunchServer;
use lti_launch_http::ReferenceAdapterFactory;
use lti_launch_http::ServerConfig;
use lti_launch_http::server::build_audit_sink;
use lti_launch_http::t;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default configuration file path.
const DEFAULT_CONFIG_PATH: &str = "lti-launch.toml";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "lti-launch-server", disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the launch server.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to lti-launch.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a launch server configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to lti-launch.toml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
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
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "{err}");
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
        },
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let audit = build_audit_sink(&config.audit)
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;

    let expander: Arc<dyn VariableExpander> = Arc::new(ExpanderRegistry::with_builtin_resolvers());
    let orchestrator = Arc::new(LaunchOrchestrator::new(
        Arc::new(ReferenceAdapterFactory),
        Arc::clone(&expander),
        audit,
    ));

    let state = Arc::new(AppState {
        tools: Arc::new(InMemoryToolStore::new()),
        users: Arc::new(InMemoryUserStore::new()),
        asset_processors: Arc::new(InMemoryAssetProcessorStore::new()),
        contexts: Arc::new(InMemoryContextStore::new()),
        submissions: Arc::new(InMemorySubmissionStore::new()),
        permissions: Arc::new(InMemoryPermissionChecker::new()),
        notifier: Arc::new(InMemoryResubmissionNotifier::new()),
        orchestrator,
        root_account: RootAccount {
            domain: config.root_account_domain.clone(),
        },
    });

    let server = LaunchServer::new(config, state)
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    server.serve().await.map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", t!("config.validate.ok"))
        .map_err(|err| CliError::new(t!("config.validate.write_failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates configuration from disk.
///
/// Without an explicit path, the default file is used when present and the
/// built-in defaults otherwise.
fn load_config(path: Option<&Path>) -> CliResult<ServerConfig> {
    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?,
        ),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Some(
                    fs::read_to_string(default)
                        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?,
                )
            } else {
                None
            }
        }
    };
    match raw {
        Some(raw) => ServerConfig::from_toml_str(&raw)
            .map_err(|err| CliError::new(t!("config.load_failed", error = err))),
        None => {
            let config = ServerConfig::default();
            config
                .validate()
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            Ok(config)
        }
    }
}
