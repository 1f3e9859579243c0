//! move_file tool - relocate a file, creating the destination's parent

use async_trait::async_trait;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::tools::input::{MOVE_FILE, MoveFileArgs};
use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Move a file from one location to another
pub struct MoveFileTool;

#[async_trait]
impl Tool for MoveFileTool {
    type Args = MoveFileArgs;

    fn name(&self) -> &'static str {
        MOVE_FILE
    }

    fn description(&self) -> &'static str {
        "Move a file from one location to another"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "The current file path"
                },
                "destination": {
                    "type": "string",
                    "description": "The new file path"
                }
            },
            "required": ["source", "destination"]
        })
    }

    async fn execute(&self, args: MoveFileArgs, ctx: &ToolContext<'_>) -> ToolResult {
        debug!(source = %args.source, destination = %args.destination, "MoveFileTool::execute: called");
        if ctx.dry_run() {
            debug!("MoveFileTool::execute: dry-run, skipping");
            return ToolResult::success(format!(
                "[DRY-RUN] Would move {} to {}",
                args.source, args.destination
            ));
        }

        match move_path(Path::new(&args.source), Path::new(&args.destination)).await {
            Ok(final_path) => {
                debug!(?final_path, "MoveFileTool::execute: moved");
                ToolResult::success(format!("Moved {} to {}", args.source, args.destination))
            }
            Err(e) => {
                debug!(%e, "MoveFileTool::execute: failed");
                ToolResult::error(format!("Error: {}", e))
            }
        }
    }
}

async fn move_path(source: &Path, destination: &Path) -> Result<PathBuf, ToolError> {
    // Moving onto an existing directory places the file inside it, but never
    // over an entry already there
    let target = if tokio::fs::metadata(destination).await.is_ok_and(|m| m.is_dir()) {
        let target = match source.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        };
        if tokio::fs::symlink_metadata(&target).await.is_ok() {
            debug!(?target, "move_path: destination entry already exists");
            return Err(ToolError::fs(
                "move",
                source,
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Destination path {} already exists", target.display()),
                ),
            ));
        }
        target
    } else {
        destination.to_path_buf()
    };

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        debug!(?parent, "move_path: creating destination directory");
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ToolError::fs("create directory", parent, e))?;
    }

    match tokio::fs::rename(source, &target).await {
        Ok(()) => Ok(target),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("move_path: cross-device rename, copying instead");
            tokio::fs::copy(source, &target)
                .await
                .map_err(|e| ToolError::fs("copy", source, e))?;
            tokio::fs::remove_file(source)
                .await
                .map_err(|e| ToolError::fs("remove", source, e))?;
            Ok(target)
        }
        Err(e) => Err(ToolError::fs("move", source, e)),
    }
}
