//! Command handlers -- one module per subcommand

pub mod config;
pub mod extract;
pub mod flow;
pub mod respond;

use std::path::Path;
use std::sync::Arc;

use flowguard_core::config::FlowguardConfig;
use flowguard_core::diagnostic::DiagnosticSink;
use flowguard_core::error::{ConfigError, FlowguardError};
use flowguard_odl::{OdlClientConfig, OdlFlowEnforcer};

use crate::error::CliError;

/// Effective configuration plus where it came from.
pub struct LoadedConfig {
    pub config: FlowguardConfig,
    /// `false` when the file was missing and defaults + environment were used.
    pub from_file: bool,
}

/// Loads the configuration used by the runtime commands.
///
/// A missing file is not an error: the defaults plus `FLOWGUARD_*` environment
/// overrides are used instead, so the binary can run from an active-response
/// hook that only sets environment variables. Parse and validation errors are
/// still reported.
pub fn load_config(path: &Path) -> Result<LoadedConfig, CliError> {
    match FlowguardConfig::load(path) {
        Ok(config) => Ok(LoadedConfig {
            config,
            from_file: true,
        }),
        Err(FlowguardError::Config(ConfigError::FileNotFound { .. })) => {
            let mut config = FlowguardConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(LoadedConfig {
                config,
                from_file: false,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Builds the controller-backed enforcer from `[controller]`.
///
/// # Errors
///
/// Returns `CliError::Config` when the controller URL or credentials are missing.
pub fn build_enforcer(
    config: &FlowguardConfig,
    sink: Arc<dyn DiagnosticSink>,
) -> Result<OdlFlowEnforcer, CliError> {
    let odl_config = OdlClientConfig::from_core(&config.controller);
    Ok(OdlFlowEnforcer::new(&odl_config, sink)?)
}
