use clap::Parser;
use std::path::PathBuf;

use crate::agents::config::OracleKind;

/// Agentry - turn-based agent loop with schema-validated tools
#[derive(Parser, Debug, Clone)]
#[command(name = "agentry", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "AGENTRY_CONFIG", default_value = "agentry.toml")]
    pub config: PathBuf,

    /// Agent to talk to (defaults to the first configured agent)
    #[arg(short, long, env = "AGENTRY_AGENT")]
    pub agent: Option<String>,

    /// Decision oracle, overriding the configuration file
    #[arg(long, env = "AGENTRY_ORACLE", value_enum)]
    pub oracle: Option<OracleKind>,

    /// Model name for remote oracles
    #[arg(long, env = "AGENTRY_MODEL")]
    pub model: Option<String>,

    /// Run a single turn with this message and exit
    #[arg(short, long)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["agentry"]);
        assert_eq!(cli.config, PathBuf::from("agentry.toml"));
        assert!(cli.agent.is_none());
        assert!(cli.oracle.is_none());
        assert!(cli.message.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "agentry",
            "--config",
            "custom.toml",
            "--agent",
            "math",
            "--oracle",
            "keyword",
            "-m",
            "add 2 and 3",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.agent.as_deref(), Some("math"));
        assert_eq!(cli.oracle, Some(OracleKind::Keyword));
        assert_eq!(cli.message.as_deref(), Some("add 2 and 3"));
    }

    #[test]
    fn test_unknown_oracle_rejected() {
        assert!(Cli::try_parse_from(["agentry", "--oracle", "magic"]).is_err());
    }
}
