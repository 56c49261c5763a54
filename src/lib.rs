//! # Agentry - turn-based agent loop
//!
//! Agentry drives a conversation between a user, a decision oracle and a
//! registry of schema-validated tools. Each user turn runs through three
//! phases: the oracle decides, at most one tool is validated and executed,
//! and the oracle summarizes the result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use agentry::agents::core::AgentExecutor;
//! use agentry::agents::domain::Agent;
//! use agentry::agents::oracle::KeywordOracle;
//! use agentry::agents::tools::builtin::builtin_tools;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let agent = Agent::new("assistant", "Answer briefly.").with_tools(builtin_tools());
//!     let executor = AgentExecutor::new(agent, Arc::new(KeywordOracle::new()));
//!
//!     let transcript = executor.run("please echo hello").await?;
//!     for message in transcript {
//!         println!("{}: {}", message.role, message.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - **agents**: domain types, tools, oracles and the executor
//! - **config**: settings loading and validation
//! - **console**: the line-oriented front end used by the binary

pub mod agents;
pub mod cli;
pub mod config;
pub mod console;
