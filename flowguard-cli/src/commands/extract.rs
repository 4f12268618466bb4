//! `flowguard extract` command handler
//!
//! Dry run of the active-response path: reads the alert and prints the
//! enforcement target. The controller is never contacted.

use std::io::{Read, Write};

use serde::Serialize;

use flowguard_alert::{AlertReader, RuleClass, TargetExtractor};
use flowguard_core::config::FlowguardConfig;
use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::types::EnforcementTarget;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `extract` command against stdin.
pub fn execute(
    config: &FlowguardConfig,
    writer: &OutputWriter,
    sink: &dyn DiagnosticSink,
) -> Result<(), CliError> {
    let stdin = std::io::stdin();
    let report = build_report(config, stdin.lock(), sink);
    writer.render(&report)
}

fn build_report<R: Read>(
    config: &FlowguardConfig,
    input: R,
    sink: &dyn DiagnosticSink,
) -> ExtractReport {
    let alert = AlertReader::from_config(&config.alert).read(input, sink);
    let rule_id = alert.rule_id();
    let rule_class = RuleClass::classify(&rule_id);

    let target = TargetExtractor::new()
        .with_node_id(&config.controller.default_node_id)
        .extract(alert, sink);

    ExtractReport {
        rule_id,
        rule_class: rule_class.describe(),
        target,
    }
}

/// Extraction result.
#[derive(Debug, Serialize)]
pub struct ExtractReport {
    /// Rule ID as reported by the alert (`N/A` when missing)
    pub rule_id: String,
    /// Which extraction rule applied
    pub rule_class: &'static str,
    /// Selected target (ip/direction null when no action)
    pub target: EnforcementTarget,
}

impl Render for ExtractReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Rule: {} ({})", self.rule_id.bold(), self.rule_class)?;
        match self.target.actionable() {
            Some((ip, direction)) => {
                writeln!(w, "  Target:    {}", ip.red().bold())?;
                writeln!(w, "  Direction: {direction}")?;
            }
            None => {
                writeln!(w, "  Target:    {}", "none (no action)".yellow())?;
            }
        }
        writeln!(w, "  Node:      {}", self.target.node_id)?;
        Ok(())
    }
}
