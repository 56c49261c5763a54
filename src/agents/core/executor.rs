//! Agent execution loop: decide, act, summarize

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::Instrument;

use crate::agents::domain::{Agent, Decision, Message, ToolCall, ToolResult};
use crate::agents::error::{AgentError, AgentResult};
use crate::agents::oracle::DecisionOracle;
use crate::agents::tools::{validate, ToolRegistry};

/// Executor state as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorState {
    Idle,
    Running,
}

/// Holds the running flag for the lifetime of one turn
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> AgentResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AgentError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs conversation turns for one agent.
///
/// Owns the transcript and the single-flight flag. A second `run` while a
/// turn is in flight fails with `AgentError::AlreadyRunning`; it never waits.
/// Messages are appended as each phase completes, so `messages()` observes a
/// turn in progress.
pub struct AgentExecutor {
    agent: Agent,
    oracle: Arc<dyn DecisionOracle>,
    transcript: RwLock<Vec<Message>>,
    running: AtomicBool,
}

impl AgentExecutor {
    /// Create an executor whose transcript holds only the agent's prompt
    pub fn new(agent: Agent, oracle: Arc<dyn DecisionOracle>) -> Self {
        let transcript = RwLock::new(vec![Message::system(&agent.prompt)]);
        Self {
            agent,
            oracle,
            transcript,
            running: AtomicBool::new(false),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Tools bound to the agent
    pub fn tools(&self) -> &ToolRegistry {
        &self.agent.tools
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn state(&self) -> ExecutorState {
        if self.is_running() {
            ExecutorState::Running
        } else {
            ExecutorState::Idle
        }
    }

    /// Snapshot of the transcript
    pub async fn messages(&self) -> Vec<Message> {
        self.transcript.read().await.clone()
    }

    /// Clear the transcript back to the system prompt.
    ///
    /// Rejected with `AlreadyRunning` while a turn is in flight.
    pub async fn reset(&self) -> AgentResult<()> {
        let _guard = RunGuard::acquire(&self.running)?;
        let mut transcript = self.transcript.write().await;
        transcript.clear();
        transcript.push(Message::system(&self.agent.prompt));
        tracing::debug!(agent = %self.agent.name, "Transcript reset");
        Ok(())
    }

    /// Run one user turn and return the full transcript.
    ///
    /// Tool failures end up in the transcript. Only `AlreadyRunning` and
    /// oracle failures are returned as errors; on an oracle failure the
    /// messages appended so far stay in place.
    pub async fn run(&self, user_text: impl Into<String>) -> AgentResult<Vec<Message>> {
        let _guard = RunGuard::acquire(&self.running)?;
        let span = tracing::info_span!("agent_turn", agent = %self.agent.name);
        self.turn(user_text.into()).instrument(span).await
    }

    async fn turn(&self, user_text: String) -> AgentResult<Vec<Message>> {
        let start_time = Instant::now();
        self.append(Message::user(user_text)).await;

        // Decide
        let decision = self.decide().await?;

        match decision {
            Decision::Text(text) => {
                self.append(Message::assistant(text)).await;
            }
            Decision::ToolCall(call) => {
                // Act
                let result = self.dispatch(call).await;
                self.append(Message::tool(&result)).await;

                // Summarize; a single hop, so a second tool request is dropped
                match self.decide().await? {
                    Decision::Text(text) if !text.is_empty() => {
                        self.append(Message::assistant(text)).await;
                    }
                    // Empty summary text is silence, not a message
                    Decision::Text(_) => {
                        tracing::debug!("Oracle returned no summary text");
                    }
                    Decision::ToolCall(call) => {
                        tracing::warn!(
                            tool = %call.tool_name,
                            "Ignoring tool call in summarize phase"
                        );
                    }
                }
            }
        }

        tracing::info!(
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Turn completed"
        );
        Ok(self.messages().await)
    }

    async fn decide(&self) -> AgentResult<Decision> {
        let transcript = self.messages().await;
        let decision = self
            .oracle
            .decide(&self.agent.prompt, &transcript, self.agent.tools.as_slice())
            .await
            .map_err(|e| {
                tracing::error!(oracle = %self.oracle.name(), error = %e, "Oracle failed");
                AgentError::from(e)
            })?;
        Ok(decision)
    }

    /// Resolve, validate and invoke one tool call
    async fn dispatch(&self, call: ToolCall) -> ToolResult {
        let ToolCall {
            tool_name,
            parameters,
        } = call;

        let Some(tool) = self.agent.tools.find(&tool_name) else {
            tracing::warn!(tool = %tool_name, "Tool not found");
            return ToolResult::failure(&tool_name, format!("Tool \"{}\" not found", tool_name));
        };

        if let Err(e) = validate(tool.parameters(), &parameters) {
            tracing::warn!(tool = %tool_name, error = %e, "Tool parameters rejected");
            return ToolResult::failure(&tool_name, e.to_string());
        }

        tracing::debug!(tool = %tool_name, ?parameters, "Executing tool");
        let start_time = Instant::now();
        let outcome = AssertUnwindSafe(tool.execute(parameters))
            .catch_unwind()
            .await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(output)) => {
                tracing::info!(tool = %tool_name, duration_ms, "Tool succeeded");
                ToolResult::success(tool_name, output)
            }
            Ok(Err(e)) => {
                tracing::warn!(tool = %tool_name, duration_ms, error = %e, "Tool failed");
                ToolResult::failure(tool_name, e.to_string())
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!(tool = %tool_name, reason = %reason, "Tool panicked");
                ToolResult::failure(tool_name, reason)
            }
        }
    }

    async fn append(&self, message: Message) {
        tracing::debug!(role = %message.role, content = %message.preview(80), "Append message");
        self.transcript.write().await.push(message);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

impl std::fmt::Debug for AgentExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentExecutor")
            .field("agent", &self.agent.name)
            .field("oracle", &self.oracle.name())
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::oracle::ScriptedOracle;

    #[test]
    fn test_run_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = RunGuard::acquire(&flag).unwrap();
            assert!(flag.load(Ordering::Acquire));
            assert!(matches!(
                RunGuard::acquire(&flag),
                Err(AgentError::AlreadyRunning)
            ));
        }
        assert!(!flag.load(Ordering::Acquire));
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "tool panicked");
    }

    #[tokio::test]
    async fn test_new_executor_is_idle_with_system_prompt() {
        let executor = AgentExecutor::new(
            Agent::new("a", "Be brief"),
            Arc::new(ScriptedOracle::default()),
        );
        assert_eq!(executor.state(), ExecutorState::Idle);
        let messages = executor.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, crate::agents::domain::Role::System);
        assert_eq!(messages[0].content, "Be brief");
    }
}
