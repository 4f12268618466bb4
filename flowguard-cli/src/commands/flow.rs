//! `flowguard block` / `flowguard unblock` command handlers

use std::io::Write;
use std::net::Ipv4Addr;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use flowguard_core::config::FlowguardConfig;
use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::pipeline::FlowEnforcer;
use flowguard_core::types::Direction;
use flowguard_odl::flow_id;

use crate::cli::FlowArgs;
use crate::commands::build_enforcer;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Which way the flow request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowAction {
    Block,
    Unblock,
}

impl FlowAction {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Unblock => "unblock",
        }
    }
}

/// Execute `block` or `unblock`.
///
/// # Errors
///
/// - `CliError::Command` if `--ip` is not an IPv4 address
/// - `CliError::Config` if the controller section is incomplete
/// - `CliError::Enforcement` if the controller did not accept the request
pub fn execute(
    action: FlowAction,
    args: FlowArgs,
    config: &FlowguardConfig,
    writer: &OutputWriter,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<(), CliError> {
    validate_ip(&args.ip)?;
    let enforcer = build_enforcer(config, sink)?;
    run(action, args, config, &enforcer, writer)
}

fn validate_ip(ip: &str) -> Result<(), CliError> {
    ip.parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| CliError::Command(format!("invalid IPv4 address: '{ip}'")))
}

fn run<E: FlowEnforcer>(
    action: FlowAction,
    args: FlowArgs,
    config: &FlowguardConfig,
    enforcer: E,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let node_id = args
        .node
        .unwrap_or_else(|| config.controller.default_node_id.clone());
    let flow_type = args.direction.as_str();

    info!(
        action = action.as_str(),
        ip = args.ip.as_str(),
        direction = flow_type,
        node_id = node_id.as_str(),
        "manual flow request"
    );

    let success = match action {
        FlowAction::Block => enforcer.apply_flow(&args.ip, flow_type, &node_id),
        FlowAction::Unblock => enforcer.remove_flow(&args.ip, flow_type, &node_id),
    };

    let report = FlowReport {
        action,
        flow_id: flow_id(args.direction, &args.ip),
        ip: args.ip,
        direction: args.direction,
        node_id,
        success,
    };
    writer.render(&report)?;

    if !report.success {
        return Err(CliError::Enforcement(format!(
            "{} {} ({}) on {}",
            action.as_str(),
            report.ip,
            report.direction,
            report.node_id
        )));
    }
    Ok(())
}

/// Result of a manual flow request.
#[derive(Debug, Serialize)]
pub struct FlowReport {
    pub action: FlowAction,
    pub flow_id: String,
    pub ip: String,
    pub direction: Direction,
    pub node_id: String,
    pub success: bool,
}

impl Render for FlowReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let status = if self.success {
            "OK".green().bold()
        } else {
            "FAILED".red().bold()
        };
        writeln!(
            w,
            "{} {} ({}) on {}: {}",
            self.action.as_str(),
            self.ip.bold(),
            self.direction,
            self.node_id,
            status
        )?;
        writeln!(w, "  Flow ID: {}", self.flow_id)?;
        Ok(())
    }
}
