//! CLI-specific error types and exit code mapping

use flowguard_core::error::FlowguardError;
use flowguard_odl::OdlError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The controller did not accept the flow request.
    #[error("enforcement failed: {0}")]
    Enforcement(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdin read, stdout write, log file, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from flowguard-core.
    #[error("{0}")]
    Core(#[from] FlowguardError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success (including "no action")          |
    /// | 1    | General / command error                  |
    /// | 2    | Configuration error                      |
    /// | 4    | Enforcement failed (controller rejected) |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Enforcement(_) => 4,
            Self::Io(_) => 10,
            Self::Core(inner) => match inner {
                FlowguardError::Config(_) => 2,
                FlowguardError::Enforcement(_) => 4,
                FlowguardError::Io(_) => 10,
                FlowguardError::Parse(_) => 1,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<OdlError> for CliError {
    fn from(e: OdlError) -> Self {
        match e {
            OdlError::Config { .. } => Self::Config(e.to_string()),
            other => Self::Core(other.into()),
        }
    }
}
