//! Tool system
//!
//! Tools give the model three filesystem operations: listing a directory,
//! moving a file and creating a folder. Each call is validated into a typed
//! `ToolInput` before dispatch, and every outcome, including failures, comes
//! back as text for the model to read. Mutating tools honor the run's
//! dry-run flag through `ToolContext`.

mod context;
mod error;
mod executor;
pub mod input;
mod traits;

pub mod builtin;

pub use context::ToolContext;
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use input::{CreateFolderArgs, ListDirectoryArgs, MoveFileArgs, ToolInput};
pub use traits::{Tool, ToolResult};
