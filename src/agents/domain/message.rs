//! Message and transcript types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ToolResult;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message (the agent's goal prompt)
    System,
    /// User message
    User,
    /// Assistant (oracle) message
    Assistant,
    /// Tool result message
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// One transcript entry. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Message text; for tool messages the result text or `Error: <reason>`
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Tool that produced this message (tool messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Tool output, present only when the tool succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<String>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            tool_name: None,
            tool_result: None,
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a tool message from a tool result
    pub fn tool(result: &ToolResult) -> Self {
        let mut message = Self::new(Role::Tool, result.content());
        message.tool_name = Some(result.tool_name.clone());
        if result.success {
            message.tool_result = result.result.clone();
        }
        message
    }

    /// Whether this is a tool message for a failed call
    pub fn is_tool_failure(&self) -> bool {
        self.role == Role::Tool && self.tool_result.is_none()
    }

    /// Get a preview of the content
    pub fn preview(&self, max_len: usize) -> String {
        if self.content.chars().count() > max_len {
            let truncated: String = self.content.chars().take(max_len).collect();
            format!("{}...", truncated)
        } else {
            self.content.clone()
        }
    }
}
