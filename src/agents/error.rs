//! Error types for the agent loop

use thiserror::Error;

use crate::agents::tools::ValidationError;

/// Errors returned to callers of the agent loop.
///
/// Tool failures never show up here; they are folded into the transcript.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A turn is already in flight on this executor
    #[error("Agent is already running a turn")]
    AlreadyRunning,

    /// Agent not found
    #[error("Agent not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The decision oracle failed
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by decision oracles
#[derive(Debug, Error)]
pub enum OracleError {
    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Response could not be turned into a decision
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Timeout
    #[error("Request timed out")]
    Timeout,

    /// A scripted oracle ran out of decisions
    #[error("No scripted decisions left")]
    Exhausted,
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OracleError::Timeout
        } else if err.is_connect() {
            OracleError::Network(format!("Connection error: {}", err))
        } else {
            OracleError::Network(err.to_string())
        }
    }
}

/// Errors raised by tool bodies. The display text is what lands in the transcript.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Parameters did not fit the tool's schema
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Parameters were well-typed but unusable
    #[error("{0}")]
    Invalid(String),

    /// The tool ran and failed
    #[error("{0}")]
    Execution(String),
}

impl ToolError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ToolError::Invalid(reason.into())
    }

    pub fn execution(reason: impl Into<String>) -> Self {
        ToolError::Execution(reason.into())
    }
}

impl From<anyhow::Error> for ToolError {
    fn from(err: anyhow::Error) -> Self {
        ToolError::Execution(err.to_string())
    }
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type alias for oracle operations
pub type OracleResult<T> = Result<T, OracleError>;

/// Result type alias for tool bodies
pub type ToolOutput = Result<String, ToolError>;
