//! Decision oracles
//!
//! An oracle looks at the goal prompt, the transcript so far and the tool
//! catalog and decides whether to answer directly or to call one tool:
//! - `KeywordOracle`: placeholder heuristic matching tool names in the user text
//! - `ScriptedOracle`: replays a fixed queue of decisions
//! - `OpenAiOracle`: OpenAI-compatible chat completions with function calling

mod keyword;
mod openai;
mod scripted;

pub use keyword::KeywordOracle;
pub use openai::OpenAiOracle;
pub use scripted::ScriptedOracle;

use std::sync::Arc;

use async_trait::async_trait;

use crate::agents::config::{OracleKind, OracleSettings};
use crate::agents::domain::{Decision, Message};
use crate::agents::error::OracleResult;
use crate::agents::tools::ToolSpec;

/// Boundary to the decision-maker
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    /// Get the oracle name
    fn name(&self) -> &str;

    /// Decide the next step. May take arbitrarily long; the executor waits.
    async fn decide(
        &self,
        prompt: &str,
        transcript: &[Message],
        tools: &[ToolSpec],
    ) -> OracleResult<Decision>;
}

/// Create an oracle from configuration
pub fn create_oracle(settings: &OracleSettings) -> OracleResult<Arc<dyn DecisionOracle>> {
    match settings.kind {
        OracleKind::Keyword => Ok(Arc::new(KeywordOracle::new())),
        OracleKind::OpenAI => {
            let oracle = OpenAiOracle::new(settings)?;
            Ok(Arc::new(oracle))
        }
    }
}
