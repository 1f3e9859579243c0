//! AgentLoop - drives model calls and tool execution until the model finishes

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::{AgentConfig, RunConfig};
use crate::llm::{CompletionRequest, LlmClient, StopReason, ToolCall};
use crate::tools::ToolExecutor;

use super::prompts::system_prompt;
use super::reporter::{AgentEvent, Reporter};
use super::transcript::Transcript;

/// Default response token budget
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Where the loop is between model calls
#[derive(Debug, Clone, PartialEq)]
pub enum AgentState {
    /// Next step is a model call with the full transcript
    AwaitingModel,
    /// Next step is running these calls, then answering them
    ExecutingTools(Vec<ToolCall>),
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model signalled it was done
    Finished { turns: u32 },
    /// The model stopped with a signal the loop does not act on
    Halted { stop_reason: StopReason, turns: u32 },
    /// The configured turn cap was reached
    TurnLimit { turns: u32 },
}

/// What a model turn asked for next
enum TurnEnd {
    Tools(Vec<ToolCall>),
    Stop(StopReason),
}

/// Agent loop for one run
pub struct AgentLoop<'a> {
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor<'a>,
    reporter: &'a dyn Reporter,
    run: &'a RunConfig,
    transcript: Transcript,
    max_tokens: u32,
    max_turns: Option<u32>,
}

impl<'a> AgentLoop<'a> {
    /// Create a loop whose transcript starts with the run's request
    pub fn new(llm: Arc<dyn LlmClient>, run: &'a RunConfig, reporter: &'a dyn Reporter) -> Self {
        debug!(?run, "AgentLoop::new: called");
        Self {
            llm,
            executor: ToolExecutor::new(run),
            reporter,
            run,
            transcript: Transcript::new(run.initial_request()),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_turns: None,
        }
    }

    /// Set the response token budget per model call
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Apply agent settings from the file config
    pub fn with_agent_config(mut self, config: &AgentConfig) -> Self {
        self.max_turns = config.max_turns;
        self
    }

    /// The conversation so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run until the model finishes, halts, or the turn cap is hit
    ///
    /// Only a failed model call is an error; tool failures are reported to
    /// the model as ordinary results.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        let request = self.run.initial_request();
        info!(target_dir = %self.run.target_dir.display(), dry_run = %self.run.dry_run, "Starting agent run");
        self.reporter.report(&AgentEvent::Started {
            request,
            mode: self.run.mode(),
        });

        let mut turns = 0u32;
        let mut state = AgentState::AwaitingModel;

        let outcome = loop {
            state = match state {
                AgentState::AwaitingModel => {
                    if let Some(max) = self.max_turns
                        && turns >= max
                    {
                        warn!(turns, "Turn limit reached, stopping");
                        self.reporter.report(&AgentEvent::Warning(format!(
                            "Turn limit ({}) reached before the agent finished",
                            max
                        )));
                        break RunOutcome::TurnLimit { turns };
                    }
                    turns += 1;

                    match self.call_model(turns).await? {
                        TurnEnd::Tools(calls) => AgentState::ExecutingTools(calls),
                        TurnEnd::Stop(StopReason::EndTurn) => break RunOutcome::Finished { turns },
                        TurnEnd::Stop(stop_reason) => break RunOutcome::Halted { stop_reason, turns },
                    }
                }
                AgentState::ExecutingTools(calls) => {
                    self.execute_tools(&calls).await?;
                    AgentState::AwaitingModel
                }
            };
        };

        info!(?outcome, "Agent run complete");
        self.reporter.report(&AgentEvent::Finished);
        Ok(outcome)
    }

    /// One model round trip; the response is appended before it is acted on
    async fn call_model(&mut self, turn: u32) -> Result<TurnEnd> {
        debug!(turn, messages = %self.transcript.len(), "call_model: called");
        let request = CompletionRequest {
            system_prompt: system_prompt(self.run.mode()).to_string(),
            messages: self.transcript.messages().to_vec(),
            tools: self.executor.definitions(),
            max_tokens: self.max_tokens,
        };

        let response = self
            .llm
            .complete(request)
            .await
            .context(format!("Model call failed on turn {}", turn))?;
        debug!(
            turn,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "call_model: response received"
        );

        for text in response.text_segments() {
            self.reporter.report(&AgentEvent::AgentText(text.to_string()));
        }

        let calls = response.tool_calls();
        let stop_reason = response.stop_reason;
        self.transcript.push_assistant(response.content);

        match stop_reason {
            StopReason::EndTurn => Ok(TurnEnd::Stop(StopReason::EndTurn)),
            StopReason::ToolUse if !calls.is_empty() => Ok(TurnEnd::Tools(calls)),
            StopReason::ToolUse => {
                warn!(turn, "Model asked for tools but sent no tool calls");
                self.reporter.report(&AgentEvent::Warning(
                    "Model requested tools but sent no tool calls; stopping".to_string(),
                ));
                Ok(TurnEnd::Stop(StopReason::ToolUse))
            }
            other => {
                warn!(turn, stop_reason = %other, "Unrecognized stop reason, stopping");
                self.reporter.report(&AgentEvent::Warning(format!(
                    "Unrecognized stop reason '{}'; stopping",
                    other
                )));
                Ok(TurnEnd::Stop(other))
            }
        }
    }

    /// Run tool calls in request order and answer them in one user turn
    async fn execute_tools(&mut self, calls: &[ToolCall]) -> Result<()> {
        debug!(count = %calls.len(), "execute_tools: called");
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            self.reporter.report(&AgentEvent::ToolCall(call.clone()));
            let result = self.executor.execute(call).await;
            info!(tool = %call.name, id = %call.id, is_error = %result.is_error, "Tool executed");
            self.reporter.report(&AgentEvent::ToolResult(result.clone()));
            results.push((call.id.clone(), result));
        }

        self.transcript
            .push_tool_results(&results)
            .context("Tool results do not answer the pending tool calls")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::reporter::recording::RecordingReporter;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, ContentBlock, MessageContent, Role, TokenUsage};
    use crate::tools::ToolResult;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn response(content: Vec<ContentBlock>, stop_reason: StopReason) -> CompletionResponse {
        CompletionResponse {
            content,
            stop_reason,
            usage: TokenUsage::default(),
        }
    }

    fn tool_use(id: &str, name: &str, input: serde_json::Value) -> ContentBlock {
        ContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }
    }

    fn result_ids(content: &MessageContent) -> Vec<String> {
        match content {
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::ToolResult { tool_use_id, .. } => Some(tool_use_id.clone()),
                    _ => None,
                })
                .collect(),
            MessageContent::Text(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_finished_on_first_turn() {
        let temp = tempdir().unwrap();
        let run = RunConfig::new(temp.path(), false);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![response(
            vec![ContentBlock::text("Nothing to organize here.")],
            StopReason::EndTurn,
        )]));

        let mut agent = AgentLoop::new(llm.clone(), &run, &reporter);
        let outcome = agent.run().await.unwrap();

        assert_eq!(outcome, RunOutcome::Finished { turns: 1 });
        assert_eq!(agent.transcript().len(), 2);
        assert_eq!(agent.transcript().messages()[0].role, Role::User);
        assert_eq!(agent.transcript().messages()[1].role, Role::Assistant);
        assert_eq!(llm.call_count(), 1);

        let events = reporter.events();
        assert!(matches!(events[0], AgentEvent::Started { .. }));
        assert_eq!(events[1], AgentEvent::AgentText("Nothing to organize here.".to_string()));
        assert_eq!(events[2], AgentEvent::Finished);
    }

    #[tokio::test]
    async fn test_tool_results_match_request_ids_and_order() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "0123456789").unwrap();
        let dir = temp.path().display().to_string();
        let run = RunConfig::new(temp.path(), true);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![
            response(
                vec![
                    ContentBlock::text("Let me look."),
                    tool_use("toolu_b", "list_directory", json!({"path": dir})),
                    tool_use("toolu_a", "create_folder", json!({"path": format!("{dir}/docs")})),
                    tool_use("toolu_c", "rename_everything", json!({})),
                ],
                StopReason::ToolUse,
            ),
            response(vec![ContentBlock::text("Done.")], StopReason::EndTurn),
        ]));

        let mut agent = AgentLoop::new(llm.clone(), &run, &reporter);
        let outcome = agent.run().await.unwrap();

        assert_eq!(outcome, RunOutcome::Finished { turns: 2 });
        let messages = agent.transcript().messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(result_ids(&messages[2].content), vec!["toolu_b", "toolu_a", "toolu_c"]);

        // Second model call saw the tool results
        let requests = llm.requests();
        assert_eq!(requests[1].messages.len(), 3);
        assert!(!temp.path().join("docs").exists());
    }

    #[tokio::test]
    async fn test_trace_order() {
        let temp = tempdir().unwrap();
        let dir = temp.path().display().to_string();
        let run = RunConfig::new(temp.path(), true);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![
            response(
                vec![
                    ContentBlock::text("Checking."),
                    tool_use("t1", "list_directory", json!({"path": dir})),
                ],
                StopReason::ToolUse,
            ),
            response(vec![ContentBlock::text("Empty folder.")], StopReason::EndTurn),
        ]));

        AgentLoop::new(llm, &run, &reporter).run().await.unwrap();

        let events = reporter.events();
        assert_eq!(events.len(), 6);
        assert!(matches!(events[0], AgentEvent::Started { .. }));
        assert_eq!(events[1], AgentEvent::AgentText("Checking.".to_string()));
        assert!(matches!(events[2], AgentEvent::ToolCall(ref c) if c.id == "t1"));
        assert_eq!(events[3], AgentEvent::ToolResult(ToolResult::success("Directory is empty")));
        assert_eq!(events[4], AgentEvent::AgentText("Empty folder.".to_string()));
        assert_eq!(events[5], AgentEvent::Finished);
    }

    #[tokio::test]
    async fn test_request_uses_mode_prompt_and_tools() {
        let run = RunConfig::new("/tmp/inbox", true);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![response(vec![], StopReason::EndTurn)]));

        AgentLoop::new(llm.clone(), &run, &reporter)
            .with_max_tokens(1234)
            .run()
            .await
            .unwrap();

        let request = &llm.requests()[0];
        assert!(request.system_prompt.contains("PREVIEW MODE"));
        assert_eq!(request.max_tokens, 1234);
        assert_eq!(request.tools.len(), 3);
        assert_eq!(
            request.messages[0].content.as_text(),
            Some("Please look at the files in /tmp/inbox and suggest how to organize them.")
        );
    }

    #[tokio::test]
    async fn test_unrecognized_stop_reason_halts_with_warning() {
        let run = RunConfig::new("/tmp/inbox", false);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![response(
            vec![ContentBlock::text("I was cut o")],
            StopReason::MaxTokens,
        )]));

        let outcome = AgentLoop::new(llm.clone(), &run, &reporter).run().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Halted {
                stop_reason: StopReason::MaxTokens,
                turns: 1
            }
        );
        assert_eq!(llm.call_count(), 1);
        let events = reporter.events();
        assert!(events.iter().any(|e| matches!(e, AgentEvent::Warning(m) if m.contains("max_tokens"))));
        assert_eq!(events.last(), Some(&AgentEvent::Finished));
    }

    #[tokio::test]
    async fn test_tool_use_without_calls_halts() {
        let run = RunConfig::new("/tmp/inbox", false);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![response(vec![], StopReason::ToolUse)]));

        let outcome = AgentLoop::new(llm, &run, &reporter).run().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Halted {
                stop_reason: StopReason::ToolUse,
                turns: 1
            }
        );
    }

    #[tokio::test]
    async fn test_turn_limit() {
        let temp = tempdir().unwrap();
        let dir = temp.path().display().to_string();
        let run = RunConfig::new(temp.path(), false);
        let reporter = RecordingReporter::default();
        let looping = response(
            vec![tool_use("t", "list_directory", json!({"path": dir}))],
            StopReason::ToolUse,
        );
        let llm = Arc::new(MockLlmClient::new(vec![looping.clone(), looping.clone(), looping]));

        let outcome = AgentLoop::new(llm.clone(), &run, &reporter)
            .with_agent_config(&AgentConfig { max_turns: Some(2) })
            .run()
            .await
            .unwrap();

        assert_eq!(outcome, RunOutcome::TurnLimit { turns: 2 });
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_model_failure_is_fatal() {
        let run = RunConfig::new("/tmp/inbox", false);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![]));

        let err = AgentLoop::new(llm, &run, &reporter).run().await.unwrap_err();

        assert!(err.to_string().contains("Model call failed"));
        assert!(!reporter.events().contains(&AgentEvent::Finished));
    }

    #[tokio::test]
    async fn test_real_move_without_dry_run() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("report.pdf");
        let destination = temp.path().join("documents").join("report.pdf");
        fs::write(&source, "%PDF").unwrap();
        let run = RunConfig::new(temp.path(), false);
        let reporter = RecordingReporter::default();
        let llm = Arc::new(MockLlmClient::new(vec![
            response(
                vec![tool_use(
                    "m1",
                    "move_file",
                    json!({"source": source.display().to_string(), "destination": destination.display().to_string()}),
                )],
                StopReason::ToolUse,
            ),
            response(vec![ContentBlock::text("Moved.")], StopReason::EndTurn),
        ]));

        AgentLoop::new(llm, &run, &reporter).run().await.unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "%PDF");
    }
}
