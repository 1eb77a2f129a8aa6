//! Error types for sockmatch.
//!
//! Uses thiserror for derive macros. Every variant maps to a process exit code
//! so the CLI can report failures to whatever host is driving the committee.

use crate::agent::FailureReport;
use crate::exit_codes;
use thiserror::Error;

/// Main error type for sockmatch operations.
#[derive(Error, Debug)]
pub enum SockError {
    /// User provided invalid arguments or unreadable input.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// A prompt template could not be rendered.
    #[error("prompt rendering failed: {0}")]
    PromptError(String),

    /// The hosted model could not be reached or answered with an error status.
    #[error("model invocation failed: {0}")]
    ModelError(String),

    /// The model answered, but without the structure every response must have.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The model kept requesting tools past the configured limit.
    #[error("model requested tools for more than {0} rounds")]
    ToolLoopExceeded(u32),

    /// A committee report the decision agent needs was not supplied.
    #[error("missing upstream report from {0}")]
    MissingUpstream(String),

    /// An event could not be delivered to the bus.
    #[error("event publish failed: {0}")]
    PublishError(String),

    /// Local file or stream IO failed.
    #[error("io error: {0}")]
    IoError(String),

    /// An agent failed after publishing its abstaining failure record.
    ///
    /// The record is kept so callers can forward it; the cause decides the
    /// exit code.
    #[error("{} failed: {source}", .report.agent_name)]
    AgentFailed {
        report: Box<FailureReport>,
        #[source]
        source: Box<SockError>,
    },
}

impl SockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SockError::UserError(_) | SockError::ConfigError(_) | SockError::PromptError(_) => {
                exit_codes::USER_ERROR
            }
            SockError::ModelError(_)
            | SockError::MalformedResponse(_)
            | SockError::ToolLoopExceeded(_) => exit_codes::MODEL_FAILURE,
            SockError::MissingUpstream(_) => exit_codes::UPSTREAM_FAILURE,
            SockError::PublishError(_) | SockError::IoError(_) => exit_codes::IO_FAILURE,
            SockError::AgentFailed { source, .. } => source.exit_code(),
        }
    }

    /// The failure record attached to an agent failure, if any.
    pub fn failure_report(&self) -> Option<&FailureReport> {
        match self {
            SockError::AgentFailed { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Result type alias for sockmatch operations.
pub type Result<T> = std::result::Result<T, SockError>;
