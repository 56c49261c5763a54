//! Scripted oracle replaying a fixed queue of decisions

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::DecisionOracle;
use crate::agents::domain::{Decision, Message};
use crate::agents::error::{OracleError, OracleResult};
use crate::agents::tools::ToolSpec;

/// Returns queued decisions in order, then fails with `OracleError::Exhausted`
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    decisions: Mutex<VecDeque<Decision>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue another decision
    pub async fn push(&self, decision: Decision) {
        self.decisions.lock().await.push_back(decision);
    }

    /// Decisions not yet consumed
    pub async fn remaining(&self) -> usize {
        self.decisions.lock().await.len()
    }

    /// Number of `decide` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn decide(
        &self,
        _prompt: &str,
        _transcript: &[Message],
        _tools: &[ToolSpec],
    ) -> OracleResult<Decision> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.decisions
            .lock()
            .await
            .pop_front()
            .ok_or(OracleError::Exhausted)
    }
}
