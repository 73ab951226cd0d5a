//! Error types for E2E testing

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Config parse error in {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Config file {} is missing required field `{field}`", path.display())]
    ConfigMissingField { path: PathBuf, field: &'static str },

    #[error("Automation endpoint unreachable at {endpoint}: {reason}")]
    EndpointUnreachable { endpoint: String, reason: String },

    #[error("Could not start browser session: {0}")]
    SessionStart(String),

    #[error("Remote command failed: {command} - {message}")]
    RemoteCommand { command: String, message: String },

    #[error("Unexpected response to {command}: {response}")]
    Protocol { command: String, response: String },

    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Suite plan error: {0}")]
    SuitePlan(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl E2eError {
    /// Errors that keep a test body from ever starting.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            E2eError::ConfigNotFound { .. }
                | E2eError::ConfigParse { .. }
                | E2eError::ConfigMissingField { .. }
                | E2eError::EndpointUnreachable { .. }
                | E2eError::SessionStart(_)
        )
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
