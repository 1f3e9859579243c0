//! Typed tool arguments
//!
//! A model's tool call arrives as a name plus an untyped JSON object.
//! `ToolInput::parse` turns that pair into one variant per tool, so a handler
//! only ever sees arguments that match its declared schema.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ToolError;

pub const LIST_DIRECTORY: &str = "list_directory";
pub const MOVE_FILE: &str = "move_file";
pub const CREATE_FOLDER: &str = "create_folder";

/// Arguments for `list_directory`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListDirectoryArgs {
    pub path: String,
}

/// Arguments for `move_file`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoveFileArgs {
    pub source: String,
    pub destination: String,
}

/// Arguments for `create_folder`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateFolderArgs {
    pub path: String,
}

/// A validated tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    ListDirectory(ListDirectoryArgs),
    MoveFile(MoveFileArgs),
    CreateFolder(CreateFolderArgs),
}

impl ToolInput {
    /// Validate a raw tool call against the declared tool set
    pub fn parse(name: &str, input: &Value) -> Result<Self, ToolError> {
        debug!(%name, "ToolInput::parse: called");
        match name {
            LIST_DIRECTORY => decode(name, input).map(ToolInput::ListDirectory),
            MOVE_FILE => decode(name, input).map(ToolInput::MoveFile),
            CREATE_FOLDER => decode(name, input).map(ToolInput::CreateFolder),
            other => Err(ToolError::UnknownTool { name: other.to_string() }),
        }
    }

}

fn decode<T: for<'de> Deserialize<'de>>(tool: &str, input: &Value) -> Result<T, ToolError> {
    T::deserialize(input).map_err(|e| {
        debug!(%tool, error = %e, "decode: validation failed");
        ToolError::Validation {
            tool: tool.to_string(),
            message: e.to_string(),
        }
    })
}
