use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::agents::config::{AgentConfig, OracleSettings, ToolConfig};
use crate::cli::Cli;

/// Base name of the configuration file looked up under a root directory
const CONFIG_NAME: &str = "agentry";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
    /// Declarative tools answered from a response template
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::read_file(cli.config.clone())?;
        settings.apply_cli_overrides(cli);
        settings.load_external_configs(&Self::root_of(&cli.config))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `<root>/agentry.{toml,yaml,json}` plus `<root>/config/{agents,tools}`
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let root = root.as_ref();
        let mut settings = Self::read_file(root.join(CONFIG_NAME))?;
        settings.load_external_configs(root)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load an explicit configuration file; its directory is the root
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let mut settings = Self::read_file(path.to_path_buf())?;
        settings.load_external_configs(&Self::root_of(path))?;
        settings.validate()?;
        Ok(settings)
    }

    fn root_of(path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn read_file(path: PathBuf) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.clone()).required(false))
            .set_default("oracle.kind", "keyword")?
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let settings: Settings = s
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(kind) = cli.oracle {
            self.oracle.kind = kind;
        }
        if let Some(model) = &cli.model {
            self.oracle.model = Some(model.clone());
        }
    }

    fn load_external_configs(&mut self, root: &Path) -> Result<(), anyhow::Error> {
        let agents: Vec<AgentConfig> = load_dir(&root.join("config/agents"))?;
        let tools: Vec<ToolConfig> = load_dir(&root.join("config/tools"))?;
        self.agents.extend(agents);
        self.tools.extend(tools);
        Ok(())
    }

    /// Run the validator, folding every problem into one error
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}

/// Read every `*.json`, `*.yaml` and `*.yml` file in a directory, sorted by path
fn load_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, anyhow::Error> {
    let pattern = format!("{}/*", dir.display());
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
        }
    }
    paths.sort();

    let mut items = Vec::new();
    for path in paths {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !matches!(ext, "json" | "yaml" | "yml") {
            tracing::debug!("Skipping {}", path.display());
            continue;
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let item: T = match ext {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?,
            _ => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        };
        tracing::debug!("Loaded {}", path.display());
        items.push(item);
    }
    Ok(items)
}
