//! list_directory tool - report the immediate children of a directory

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::tools::input::{LIST_DIRECTORY, ListDirectoryArgs};
use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Marker reported for files without an extension
pub const NO_EXTENSION: &str = "(no extension)";

/// Reported when a directory has no entries
pub const EMPTY_DIRECTORY: &str = "Directory is empty";

/// List files and folders with their types and sizes
pub struct ListDirectoryTool;

#[async_trait]
impl Tool for ListDirectoryTool {
    type Args = ListDirectoryArgs;

    fn name(&self) -> &'static str {
        LIST_DIRECTORY
    }

    fn description(&self) -> &'static str {
        "List all files and folders in a directory with their types and sizes"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The directory path to list"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: ListDirectoryArgs, _ctx: &ToolContext<'_>) -> ToolResult {
        debug!(path = %args.path, "ListDirectoryTool::execute: called");
        match list(Path::new(&args.path)).await {
            Ok(lines) if lines.is_empty() => ToolResult::success(EMPTY_DIRECTORY),
            Ok(lines) => {
                debug!(entries_count = %lines.len(), "ListDirectoryTool::execute: entries collected");
                ToolResult::success(lines.join("\n"))
            }
            Err(e) => {
                debug!(%e, "ListDirectoryTool::execute: failed");
                ToolResult::error(format!("Error: {}", e))
            }
        }
    }
}

async fn list(path: &Path) -> Result<Vec<String>, ToolError> {
    let mut dir = tokio::fs::read_dir(path)
        .await
        .map_err(|e| ToolError::fs("read directory", path, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = dir
        .next_entry()
        .await
        .map_err(|e| ToolError::fs("read directory", path, e))?
    {
        let name = entry.file_name().to_string_lossy().to_string();
        // Follows symlinks, so a link to a file is reported as a file;
        // a dangling link falls back to the link itself
        let metadata = match tokio::fs::metadata(entry.path()).await {
            Ok(m) => m,
            Err(e) => {
                debug!(%name, %e, "list: target metadata failed, using entry metadata");
                entry
                    .metadata()
                    .await
                    .map_err(|e| ToolError::fs("read metadata of", entry.path(), e))?
            }
        };
        entries.push((name, metadata));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries
        .into_iter()
        .map(|(name, metadata)| {
            if metadata.is_file() {
                let ext = extension_of(&name).unwrap_or(NO_EXTENSION);
                format!("FILE: {} | Extension: {} | Size: {} bytes", name, ext, metadata.len())
            } else {
                format!("DIR:  {}/", name)
            }
        })
        .collect())
}

/// Extension including its dot; leading dots of hidden files don't count
fn extension_of(name: &str) -> Option<&str> {
    let start = name.len() - name.trim_start_matches('.').len();
    name[start..].rfind('.').map(|i| &name[start + i..])
}
