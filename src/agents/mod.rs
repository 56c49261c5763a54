//! Agent loop for Agentry
//!
//! ## Architecture
//!
//! - `domain/` - Core types (Message, ToolCall, Decision, ParameterSpec)
//! - `tools/` - Tool specs, registry, validation and built-in tools
//! - `oracle/` - Decision oracles (keyword, scripted, OpenAI-compatible)
//! - `core/` - The executor: decide, act, summarize
//! - `handler` - Builds executors from settings

pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod handler;
pub mod oracle;
pub mod tools;

// Re-export commonly used types
pub use self::config::*;
pub use self::domain::*;
pub use self::error::*;
pub use self::handler::AgentHandler;
