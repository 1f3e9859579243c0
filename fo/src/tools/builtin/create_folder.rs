//! create_folder tool - create a directory (and its parents)

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::tools::input::{CREATE_FOLDER, CreateFolderArgs};
use crate::tools::{Tool, ToolContext, ToolError, ToolResult};

/// Create a new folder; existing folders are left alone
pub struct CreateFolderTool;

#[async_trait]
impl Tool for CreateFolderTool {
    type Args = CreateFolderArgs;

    fn name(&self) -> &'static str {
        CREATE_FOLDER
    }

    fn description(&self) -> &'static str {
        "Create a new folder"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The folder path to create"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: CreateFolderArgs, ctx: &ToolContext<'_>) -> ToolResult {
        debug!(path = %args.path, "CreateFolderTool::execute: called");
        if ctx.dry_run() {
            debug!("CreateFolderTool::execute: dry-run, skipping");
            return ToolResult::success(format!("[DRY-RUN] Would create folder: {}", args.path));
        }

        let path = Path::new(&args.path);
        match tokio::fs::create_dir_all(path).await {
            Ok(()) => ToolResult::success(format!("Created folder: {}", args.path)),
            Err(e) => {
                debug!(%e, "CreateFolderTool::execute: failed");
                ToolResult::error(format!("Error: {}", ToolError::fs("create directory", path, e)))
            }
        }
    }
}
