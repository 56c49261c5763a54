//! Configuration types for agents, oracles and declarative tools

use serde::{Deserialize, Serialize};

use super::domain::ParameterSchema;

/// Prompt used when no agent is configured
pub const DEFAULT_PROMPT: &str =
    "You are a helpful assistant. Use a tool when one fits the request, then answer briefly.";

/// Configuration for an agent
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Unique agent name
    pub name: String,
    /// Goal/system prompt
    pub prompt: String,
    /// Tool names bound to this agent; empty binds every available tool
    #[serde(default)]
    pub tools: Vec<String>,
}

impl AgentConfig {
    /// Agent used when the configuration declares none
    pub fn default_assistant() -> Self {
        Self {
            name: "assistant".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            tools: Vec::new(),
        }
    }
}

/// A tool declared in configuration; its output is a Tera template
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: ParameterSchema,
    /// Response template rendered with the call's parameters
    pub response: String,
}

/// Decision oracle configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OracleSettings {
    /// Oracle implementation
    #[serde(default)]
    pub kind: OracleKind,
    /// Model name/identifier (remote oracles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Custom base URL (for self-hosted or proxied endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable containing the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens per completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Supported oracles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Keyword matching against tool names; no model involved
    #[default]
    Keyword,
    /// OpenAI-compatible chat completions API
    #[serde(alias = "openai-compatible")]
    #[value(name = "openai")]
    OpenAI,
}

impl std::fmt::Display for OracleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleKind::Keyword => write!(f, "keyword"),
            OracleKind::OpenAI => write!(f, "openai"),
        }
    }
}
