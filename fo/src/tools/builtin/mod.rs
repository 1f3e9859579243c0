//! Built-in file organization tools

mod create_folder;
mod list_directory;
mod move_file;

pub use create_folder::CreateFolderTool;
pub use list_directory::ListDirectoryTool;
pub use move_file::MoveFileTool;
