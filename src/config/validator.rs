use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::agents::config::{AgentConfig, OracleKind, OracleSettings, ToolConfig};
use crate::agents::domain::ParameterType;
use crate::agents::tools::builtin::builtin_names;
use crate::config::Settings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Check the whole configuration, collecting every problem found
    pub fn validate(settings: &Settings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_oracle(&settings.oracle) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_tools(&settings.tools) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_agents(&settings.agents) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_cross_references(settings) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_oracle(oracle: &OracleSettings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if oracle.kind == OracleKind::OpenAI
            && oracle.model.as_deref().map_or(true, |m| m.trim().is_empty())
        {
            errors.push(ConfigError::MissingField("oracle.model".to_string()));
        }

        if let Some(temperature) = oracle.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                errors.push(ConfigError::InvalidValue {
                    field: "oracle.temperature".to_string(),
                    reason: "Temperature must be between 0 and 2".to_string(),
                });
            }
        }

        if oracle.max_tokens == Some(0) {
            errors.push(ConfigError::InvalidValue {
                field: "oracle.max_tokens".to_string(),
                reason: "max_tokens must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_tools(tools: &[ToolConfig]) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();
        let builtins: HashSet<String> = builtin_names().into_iter().collect();

        for (idx, tool) in tools.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&tool.name, idx) {
                errors.push(ConfigError::Duplicate(format!(
                    "Tool name '{}' appears at indices {} and {}",
                    tool.name, prev_idx, idx
                )));
            }

            if builtins.contains(&tool.name) {
                errors.push(ConfigError::Duplicate(format!(
                    "Tool name '{}' is already used by a built-in tool",
                    tool.name
                )));
            }

            if tool.name.is_empty() {
                errors.push(ConfigError::MissingField(format!("tools[{}].name", idx)));
            }

            if tool.description.is_empty() {
                errors.push(ConfigError::MissingField(format!(
                    "tools[{}].description",
                    idx
                )));
            }

            if tool.response.trim().is_empty() {
                errors.push(ConfigError::MissingField(format!("tools[{}].response", idx)));
            }

            for (name, spec) in &tool.parameters {
                let field = format!("tools[{}].parameters.{}", idx, name);
                if let ParameterType::Number { default, min, max } = &spec.ty {
                    if let (Some(min), Some(max)) = (min, max) {
                        if min > max {
                            errors.push(ConfigError::InvalidValue {
                                field: field.clone(),
                                reason: format!("min {} is greater than max {}", min, max),
                            });
                        }
                    }
                    if let Some(default) = default {
                        let below = min.map_or(false, |min| *default < min);
                        let above = max.map_or(false, |max| *default > max);
                        if below || above {
                            errors.push(ConfigError::InvalidValue {
                                field,
                                reason: format!("default {} is outside the declared bounds", default),
                            });
                        }
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_agents(agents: &[AgentConfig]) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, agent) in agents.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&agent.name, idx) {
                errors.push(ConfigError::Duplicate(format!(
                    "Agent name '{}' appears at indices {} and {}",
                    agent.name, prev_idx, idx
                )));
            }

            if agent.name.is_empty() {
                errors.push(ConfigError::MissingField(format!("agents[{}].name", idx)));
            }

            if agent.prompt.trim().is_empty() {
                errors.push(ConfigError::MissingField(format!("agents[{}].prompt", idx)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Every tool an agent names must be a built-in or a declared tool
    fn validate_cross_references(settings: &Settings) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        let mut known: HashSet<String> = builtin_names().into_iter().collect();
        known.extend(settings.tools.iter().map(|t| t.name.clone()));

        for agent in &settings.agents {
            for tool in &agent.tools {
                if !known.contains(tool) {
                    errors.push(ConfigError::CrossReference(format!(
                        "Agent '{}' references unknown tool '{}'",
                        agent.name, tool
                    )));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
