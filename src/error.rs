//! Error types for the inventory pipeline.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Error, Debug)]
pub enum InventoryError {
    /// An external command was requested with an empty command string.
    #[error("invalid command: {0:?}")]
    InvalidInvocation(String),

    /// The external process could not be spawned.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The external process exited with a non-zero status.
    #[error("`{command}` exited with {status}: {stderr}")]
    ExternalToolFailure {
        command: String,
        status:  String,
        stderr:  String,
    },

    /// Captured output did not match the expected JSON shape.
    #[error("malformed {what} output: {source}")]
    MalformedInput {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An `lv_size` token could not be decoded.
    #[error("invalid size {0:?}")]
    InvalidSize(String),

    #[error("config {path}: {reason}")]
    Config { path: String, reason: String },
}

impl InventoryError {
    pub fn malformed(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| InventoryError::MalformedInput { what, source }
    }

    /// True for both spawn failures and non-zero exits.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, InventoryError::Spawn { .. } | InventoryError::ExternalToolFailure { .. })
    }
}
