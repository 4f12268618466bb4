//! Flowguard CLI -- Wazuh active-response handler that blocks IPs on an OpenFlow switch
//!
//! # Architecture
//!
//! - `cli`: clap derive definitions (pure parsing, no I/O)
//! - `commands/`: one handler per subcommand
//! - `output`: text vs JSON rendering
//! - `logging`: tracing subscriber setup
//! - `error`: CLI error type and exit code mapping
//!
//! # Exit Codes
//!
//! See `CliError::exit_code()` for the mapping.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use flowguard_core::config::{FlowguardConfig, GeneralConfig};
use flowguard_core::diagnostic::{DiagnosticSink, TracingSink};

use crate::cli::{Cli, Commands};
use crate::commands::flow::FlowAction;
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        // config 명령은 설정 파일 자체를 검사하므로 로깅은 기본값으로 시작
        Commands::Config(args) => {
            let mut config = FlowguardConfig::default();
            config.general.log_level = "warn".to_owned();
            config.general.log_format = "pretty".to_owned();
            override_log_level(&mut config, cli.log_level)?;
            init_logging(&config.general)?;
            commands::config::execute(args, &cli.config, &writer)
        }
        command => run_command(command, &cli.config, cli.log_level, &writer),
    }
}

fn run_command(
    command: Commands,
    config_path: &Path,
    log_level: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let loaded = commands::load_config(config_path)?;
    let mut config = loaded.config;
    override_log_level(&mut config, log_level)?;
    init_logging(&config.general)?;

    let span = info_span!(
        "invocation",
        invocation_id = %Uuid::new_v4(),
        command = command.name()
    );
    let _guard = span.enter();

    if loaded.from_file {
        info!(path = %config_path.display(), "configuration loaded");
    } else {
        warn!(
            path = %config_path.display(),
            "configuration file not found, using defaults and environment"
        );
    }

    let sink: Arc<dyn DiagnosticSink> = Arc::new(TracingSink);

    match command {
        Commands::Respond => commands::respond::execute(&config, writer, sink),
        Commands::Extract => commands::extract::execute(&config, writer, sink.as_ref()),
        Commands::Block(args) => {
            commands::flow::execute(FlowAction::Block, args, &config, writer, sink)
        }
        Commands::Unblock(args) => {
            commands::flow::execute(FlowAction::Unblock, args, &config, writer, sink)
        }
        Commands::Config(args) => commands::config::execute(args, config_path, writer),
    }
}

/// `--log-level` 값을 적용하고 설정을 다시 검증합니다.
fn override_log_level(config: &mut FlowguardConfig, level: Option<String>) -> Result<(), CliError> {
    if let Some(level) = level {
        config.general.log_level = level;
        config.validate()?;
    }
    Ok(())
}

fn init_logging(general: &GeneralConfig) -> Result<(), CliError> {
    logging::init_tracing(general).map_err(|e| CliError::Config(format!("{e:#}")))
}
