//! ToolContext - execution context for tools

use crate::config::RunConfig;

/// Execution context for tools - borrowed from the run's configuration
///
/// The dry-run flag is read here by every mutating tool. Paths supplied by
/// the model are used as given; relative paths resolve against the process
/// working directory.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    run: &'a RunConfig,
}

impl<'a> ToolContext<'a> {
    /// Create a new tool context
    pub fn new(run: &'a RunConfig) -> Self {
        Self { run }
    }

    /// Whether mutating tools must only simulate
    pub fn dry_run(&self) -> bool {
        self.run.dry_run
    }
}
