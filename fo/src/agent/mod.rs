//! Agent loop
//!
//! Alternates model calls with tool execution until the model signals it is
//! done. The transcript is the only conversation state; every model call sees
//! all of it.

mod engine;
mod prompts;
mod reporter;
mod transcript;

pub use engine::{AgentLoop, AgentState, RunOutcome};
pub use prompts::{INTERACTIVE_SYSTEM, PREVIEW_SYSTEM, system_prompt};
pub use reporter::{AgentEvent, ConsoleReporter, Reporter};
pub use transcript::{Transcript, TranscriptError};
