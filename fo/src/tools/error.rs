//! Tool error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating or running a tool call
///
/// The executor never propagates these; they are rendered into the text of a
/// `ToolResult` so the model can see and react to them.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("invalid input for {tool}: {message}")]
    Validation { tool: String, message: String },

    #[error("Failed to {op} {}: {source}", path.display())]
    Fs {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// Build a filesystem error for `op` on `path`
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::Fs {
            op,
            path: path.into(),
            source,
        }
    }
}
