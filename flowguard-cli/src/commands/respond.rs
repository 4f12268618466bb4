//! `flowguard respond` command handler
//!
//! Active-response mode: one alert on stdin, at most one flow request.

use std::io::{Read, Write};
use std::sync::Arc;

use tracing::info;

use flowguard_alert::{AlertReader, Responder, ResponseOutcome, TargetExtractor};
use flowguard_core::config::FlowguardConfig;
use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::pipeline::FlowEnforcer;

use crate::commands::build_enforcer;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `respond` command against stdin.
///
/// # Errors
///
/// Returns `CliError::Config` if the controller section is incomplete and
/// `CliError::Enforcement` if the controller did not accept the block.
pub fn execute(
    config: &FlowguardConfig,
    writer: &OutputWriter,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<(), CliError> {
    let enforcer = build_enforcer(config, Arc::clone(&sink))?;
    let stdin = std::io::stdin();
    run(config, &enforcer, stdin.lock(), writer, sink.as_ref())
}

fn run<E: FlowEnforcer, R: Read>(
    config: &FlowguardConfig,
    enforcer: E,
    input: R,
    writer: &OutputWriter,
    sink: &dyn DiagnosticSink,
) -> Result<(), CliError> {
    let responder = Responder::new(enforcer)
        .with_reader(AlertReader::from_config(&config.alert))
        .with_extractor(TargetExtractor::new().with_node_id(&config.controller.default_node_id));

    let outcome = responder.respond(input, sink);
    info!(outcome = %outcome, "active response finished");

    writer.render(&outcome)?;

    if outcome.is_failure() {
        return Err(CliError::Enforcement(outcome.target().to_string()));
    }
    Ok(())
}

impl Render for ResponseOutcome {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match self {
            ResponseOutcome::NoAction { target } => {
                writeln!(w, "Response: {} ({})", "NO ACTION".yellow().bold(), target)
            }
            ResponseOutcome::Applied { target } => {
                writeln!(w, "Response: {} {}", "BLOCKED".green().bold(), target)
            }
            ResponseOutcome::Failed { target } => {
                writeln!(w, "Response: {} {}", "FAILED".red().bold(), target)
            }
        }
    }
}
