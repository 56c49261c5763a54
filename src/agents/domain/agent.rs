//! Agent domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::tools::{ToolDescriptor, ToolRegistry, ToolSpec};

/// A goal prompt plus the tools bound to it
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    /// Goal/system instruction; becomes the first transcript message
    pub prompt: String,
    pub tools: ToolRegistry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create an agent without tools
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            prompt: prompt.into(),
            tools: ToolRegistry::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bind one more tool
    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.register(tool);
        self.updated_at = Utc::now();
        self
    }

    /// Bind several tools, keeping their order
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = ToolSpec>) -> Self {
        for tool in tools {
            self.tools.register(tool);
        }
        self.updated_at = Utc::now();
        self
    }

    /// Serializable summary of the agent
    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            id: self.id,
            name: self.name.clone(),
            prompt: self.prompt.clone(),
            tools: self.tools.descriptors(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Agent information without the executable tool bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: Uuid,
    pub name: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDescriptor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
