//! Domain types for the agent loop
//!
//! Transcript messages, agents, tool calls and the parameter model shared by
//! the validator, the tools and the oracles.

mod agent;
mod message;
mod params;
mod tool_call;

pub use agent::*;
pub use message::*;
pub use params::*;
pub use tool_call::*;
