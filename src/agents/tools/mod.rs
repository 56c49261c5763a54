//! Tools, tool registry and parameter validation
//!
//! - `ToolSpec` pairs a parameter schema with an async handler
//! - `ToolRegistry` is the ordered tool list bound to one agent
//! - `validate` checks a parameter bag against a schema before dispatch

pub mod builtin;
mod params;
pub mod template;
mod validation;

pub use params::Params;
pub use validation::{validate, ValidationError};

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agents::domain::{schema_to_json, ParameterSchema, ParameterSpec, Parameters};
use crate::agents::error::ToolOutput;

/// Body of a tool
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool. Parameters have already passed schema validation.
    async fn call(&self, params: Params) -> ToolOutput;
}

/// Adapter turning an async closure into a `ToolHandler`
struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Params) -> Fut + Send + Sync,
    Fut: Future<Output = ToolOutput> + Send,
{
    async fn call(&self, params: Params) -> ToolOutput {
        (self.0)(params).await
    }
}

/// A named, schema-described tool
#[derive(Clone)]
pub struct ToolSpec {
    name: String,
    description: String,
    parameters: Arc<ParameterSchema>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolSpec {
    /// Start declaring a tool
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            name: name.into(),
            description: description.into(),
            parameters: ParameterSchema::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &ParameterSchema {
        &self.parameters
    }

    /// JSON Schema for the tool's parameters
    pub fn input_schema(&self) -> Value {
        schema_to_json(&self.parameters)
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: (*self.parameters).clone(),
        }
    }

    /// Invoke the tool body. Does not validate; the executor does that first.
    pub async fn execute(&self, parameters: Parameters) -> ToolOutput {
        let params = Params::new(parameters, self.parameters.clone());
        self.handler.call(params).await
    }
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Builder pairing a parameter schema with a handler
pub struct ToolSpecBuilder {
    name: String,
    description: String,
    parameters: ParameterSchema,
}

impl ToolSpecBuilder {
    /// Declare a parameter
    pub fn param(mut self, name: impl Into<String>, spec: ParameterSpec) -> Self {
        self.parameters.insert(name.into(), spec);
        self
    }

    /// Declare a required string parameter
    pub fn string(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.param(name, ParameterSpec::string(description).required())
    }

    /// Declare a required number parameter
    pub fn number(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.param(name, ParameterSpec::number(description).required())
    }

    /// Declare a required boolean parameter
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.param(name, ParameterSpec::boolean(description).required())
    }

    /// Finish with a handler object
    pub fn handler(self, handler: impl ToolHandler + 'static) -> ToolSpec {
        ToolSpec {
            name: self.name,
            description: self.description,
            parameters: Arc::new(self.parameters),
            handler: Arc::new(handler),
        }
    }

    /// Finish with an async closure
    pub fn handler_fn<F, Fut>(self, f: F) -> ToolSpec
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolOutput> + Send + 'static,
    {
        self.handler(FnHandler(f))
    }
}

/// Serializable description of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: ParameterSchema,
}

/// Ordered set of tools bound to one agent
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Append a tool. Duplicate names are kept but only the first is reachable by `find`.
    pub fn register(&mut self, tool: ToolSpec) {
        if self.find(tool.name()).is_some() {
            tracing::warn!("Tool '{}' registered twice; lookups return the first", tool.name());
        }
        self.tools.push(tool);
    }

    /// Exact, case-sensitive lookup; first match wins
    pub fn find(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolSpec> {
        self.tools.iter()
    }

    pub fn as_slice(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(ToolSpec::descriptor).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl FromIterator<ToolSpec> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = ToolSpec>>(iter: I) -> Self {
        let mut registry = ToolRegistry::new();
        for tool in iter {
            registry.register(tool);
        }
        registry
    }
}

impl<'a> IntoIterator for &'a ToolRegistry {
    type Item = &'a ToolSpec;
    type IntoIter = std::slice::Iter<'a, ToolSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}
