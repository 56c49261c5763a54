//! Tool call, tool result and oracle decision types

use serde::{Deserialize, Serialize};

use super::{ParamValue, Parameters};

/// A request to invoke one named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool being called
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub parameters: Parameters,
}

impl ToolCall {
    /// Create a tool call without parameters
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: Parameters::new(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Outcome of dispatching a tool call. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Whether the tool execution succeeded
    pub success: bool,
    /// Output text on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Failure reason otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(tool_name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            result: Some(result.into()),
            error: None,
        }
    }

    /// Create a failed tool result
    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Transcript text for this result
    pub fn content(&self) -> String {
        match (&self.result, &self.error) {
            (Some(result), _) if self.success => result.clone(),
            (_, Some(error)) => format!("Error: {}", error),
            _ => String::new(),
        }
    }
}

/// What the oracle wants to happen next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Reply to the user directly
    Text(String),
    /// Invoke one tool
    ToolCall(ToolCall),
}

impl Decision {
    pub fn text(text: impl Into<String>) -> Self {
        Decision::Text(text.into())
    }

    pub fn tool_call(call: ToolCall) -> Self {
        Decision::ToolCall(call)
    }

    /// The requested call, if this is a tool decision
    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            Decision::ToolCall(call) => Some(call),
            Decision::Text(_) => None,
        }
    }
}
