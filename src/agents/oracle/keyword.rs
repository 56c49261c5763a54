//! Keyword oracle: a stand-in that needs no model

use async_trait::async_trait;

use super::DecisionOracle;
use crate::agents::domain::{Decision, Message, ParamKind, ParamValue, Parameters, Role, ToolCall};
use crate::agents::error::OracleResult;
use crate::agents::tools::ToolSpec;

/// Picks the first tool whose name appears in the user's text.
///
/// Parameters come from declared defaults, and the user's text fills the
/// first required string parameter that has no default. After a tool has
/// run it reports the result back verbatim.
#[derive(Debug, Default, Clone)]
pub struct KeywordOracle;

impl KeywordOracle {
    pub fn new() -> Self {
        Self
    }

    fn pick_tool<'a>(text: &str, tools: &'a [ToolSpec]) -> Option<&'a ToolSpec> {
        let text = text.to_lowercase();
        tools.iter().find(|tool| {
            let name = tool.name().to_lowercase();
            text.contains(&name) || text.contains(&name.replace('_', " "))
        })
    }

    fn build_call(tool: &ToolSpec, text: &str) -> ToolCall {
        let mut parameters = Parameters::new();
        let mut text_used = false;
        for (name, spec) in tool.parameters() {
            if let Some(default) = spec.default_value() {
                parameters.insert(name.clone(), default);
            } else if spec.required && spec.kind() == ParamKind::String && !text_used {
                parameters.insert(name.clone(), ParamValue::String(text.to_string()));
                text_used = true;
            }
        }
        ToolCall {
            tool_name: tool.name().to_string(),
            parameters,
        }
    }

    fn summarize(message: &Message) -> String {
        let tool = message.tool_name.as_deref().unwrap_or("tool");
        match &message.tool_result {
            Some(result) => format!("The `{}` tool returned: {}", tool, result),
            None => {
                let reason = message
                    .content
                    .strip_prefix("Error: ")
                    .unwrap_or(&message.content);
                format!("The `{}` tool failed: {}", tool, reason)
            }
        }
    }

    fn fallback(tools: &[ToolSpec]) -> String {
        if tools.is_empty() {
            "I don't have any tools for that.".to_string()
        } else {
            let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
            format!(
                "I can help with: {}. Mention one of them by name.",
                names.join(", ")
            )
        }
    }
}

#[async_trait]
impl DecisionOracle for KeywordOracle {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn decide(
        &self,
        _prompt: &str,
        transcript: &[Message],
        tools: &[ToolSpec],
    ) -> OracleResult<Decision> {
        let decision = match transcript.last() {
            Some(message) if message.role == Role::Tool => {
                Decision::Text(Self::summarize(message))
            }
            Some(message) if message.role == Role::User => {
                match Self::pick_tool(&message.content, tools) {
                    Some(tool) => Decision::ToolCall(Self::build_call(tool, &message.content)),
                    None => Decision::Text(Self::fallback(tools)),
                }
            }
            _ => Decision::Text(Self::fallback(tools)),
        };
        Ok(decision)
    }
}
