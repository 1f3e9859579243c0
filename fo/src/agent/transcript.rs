//! Conversation transcript for one run

use thiserror::Error;
use tracing::debug;

use crate::llm::{ContentBlock, Message, Role};
use crate::tools::ToolResult;

/// Violations of the turn ordering the model service accepts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Tool results must follow an assistant turn that requested tools")]
    NoPendingToolUse,

    #[error("Expected {expected} tool results, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Tool result {position} answers {actual}, expected {expected}")]
    IdMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}

/// Ordered turn history exchanged with the model
///
/// Grows by appends only. Starts with the user's request; every assistant
/// turn that requests tools must be answered by one user turn holding one
/// result per request, in request order.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Start a transcript with the initial user request
    pub fn new(initial_request: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(initial_request)],
        }
    }

    /// Append a model response as an assistant turn
    pub fn push_assistant(&mut self, blocks: Vec<ContentBlock>) {
        debug!(block_count = %blocks.len(), "Transcript::push_assistant: called");
        self.messages.push(Message::assistant_blocks(blocks));
    }

    /// Append the results answering the last assistant turn's tool calls
    pub fn push_tool_results(&mut self, results: &[(String, ToolResult)]) -> Result<(), TranscriptError> {
        debug!(result_count = %results.len(), "Transcript::push_tool_results: called");
        let pending = match self.messages.last() {
            Some(msg) if msg.role == Role::Assistant => msg.tool_use_ids(),
            _ => Vec::new(),
        };

        if pending.is_empty() {
            return Err(TranscriptError::NoPendingToolUse);
        }
        if pending.len() != results.len() {
            return Err(TranscriptError::CountMismatch {
                expected: pending.len(),
                actual: results.len(),
            });
        }
        for (position, ((actual, _), expected)) in results.iter().zip(&pending).enumerate() {
            if actual.as_str() != *expected {
                return Err(TranscriptError::IdMismatch {
                    position,
                    expected: expected.to_string(),
                    actual: actual.clone(),
                });
            }
        }

        let blocks = results
            .iter()
            .map(|(id, result)| ContentBlock::tool_result(id, &result.content, result.is_error))
            .collect();
        self.messages.push(Message::user_blocks(blocks));
        Ok(())
    }

    /// All turns, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: a transcript starts with the user's request
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
