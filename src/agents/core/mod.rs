//! Core agent loop
//!
//! `AgentExecutor` owns one agent's transcript and drives each turn through
//! the decide, act and summarize phases.

mod executor;

pub use executor::{AgentExecutor, ExecutorState};
