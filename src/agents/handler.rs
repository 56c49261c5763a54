//! Agent handler: builds one executor per configured agent

use std::collections::HashMap;
use std::sync::Arc;

use crate::agents::config::AgentConfig;
use crate::agents::core::AgentExecutor;
use crate::agents::domain::Agent;
use crate::agents::error::{AgentError, AgentResult};
use crate::agents::oracle::{create_oracle, DecisionOracle};
use crate::agents::tools::builtin::builtin_tools;
use crate::agents::tools::template::template_tool;
use crate::agents::tools::{ToolRegistry, ToolSpec};
use crate::config::Settings;

/// Owns the executors for every configured agent.
///
/// Executors share one oracle but nothing else; each has its own transcript
/// and running flag.
pub struct AgentHandler {
    executors: HashMap<String, Arc<AgentExecutor>>,
    /// Agent names in configuration order
    order: Vec<String>,
    oracle: Arc<dyn DecisionOracle>,
}

impl AgentHandler {
    /// Build executors using the oracle described by the settings
    pub fn from_settings(settings: &Settings) -> AgentResult<Self> {
        let oracle = create_oracle(&settings.oracle)?;
        Self::with_oracle(settings, oracle)
    }

    /// Build executors around an existing oracle
    pub fn with_oracle(settings: &Settings, oracle: Arc<dyn DecisionOracle>) -> AgentResult<Self> {
        let catalog = Self::tool_catalog(settings);

        let configs = if settings.agents.is_empty() {
            vec![AgentConfig::default_assistant()]
        } else {
            settings.agents.clone()
        };

        let mut executors = HashMap::new();
        let mut order = Vec::new();
        for config in &configs {
            if executors.contains_key(&config.name) {
                return Err(AgentError::Configuration(format!(
                    "Agent '{}' is defined more than once",
                    config.name
                )));
            }

            let agent = Self::build_agent(config, &catalog)?;
            tracing::info!(
                agent = %agent.name,
                tools = ?agent.tools.names(),
                oracle = %oracle.name(),
                "Agent ready"
            );
            executors.insert(
                config.name.clone(),
                Arc::new(AgentExecutor::new(agent, oracle.clone())),
            );
            order.push(config.name.clone());
        }

        Ok(Self {
            executors,
            order,
            oracle,
        })
    }

    /// Built-in tools followed by the declared template tools
    fn tool_catalog(settings: &Settings) -> ToolRegistry {
        builtin_tools()
            .into_iter()
            .chain(settings.tools.iter().map(template_tool))
            .collect()
    }

    fn build_agent(config: &AgentConfig, catalog: &ToolRegistry) -> AgentResult<Agent> {
        let tools: Vec<ToolSpec> = if config.tools.is_empty() {
            catalog.iter().cloned().collect()
        } else {
            config
                .tools
                .iter()
                .map(|name| {
                    catalog.find(name).cloned().ok_or_else(|| {
                        AgentError::Configuration(format!(
                            "Agent '{}' references unknown tool '{}'",
                            config.name, name
                        ))
                    })
                })
                .collect::<AgentResult<_>>()?
        };

        Ok(Agent::new(&config.name, &config.prompt).with_tools(tools))
    }

    /// Get the executor for an agent
    pub fn get(&self, name: &str) -> AgentResult<Arc<AgentExecutor>> {
        self.executors
            .get(name)
            .cloned()
            .ok_or_else(|| AgentError::NotFound(name.to_string()))
    }

    /// The first configured agent
    pub fn default_agent(&self) -> AgentResult<Arc<AgentExecutor>> {
        let name = self
            .order
            .first()
            .ok_or_else(|| AgentError::Internal("No agents configured".to_string()))?;
        self.get(name)
    }

    /// Agent names in configuration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn oracle(&self) -> &Arc<dyn DecisionOracle> {
        &self.oracle
    }
}
