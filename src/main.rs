use agentry::agents::AgentHandler;
use agentry::cli::Cli;
use agentry::config::Settings;
use agentry::console;
use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agentry=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    info!(
        "Loaded {} agents and {} declared tools ({} oracle)",
        settings.agents.len(),
        settings.tools.len(),
        settings.oracle.kind
    );

    let handler = AgentHandler::from_settings(&settings)?;
    let executor = match &cli.agent {
        Some(name) => handler.get(name)?,
        None => handler.default_agent()?,
    };

    let mut stdout = tokio::io::stdout();
    if let Some(message) = &cli.message {
        for message in console::run_once(&executor, message).await? {
            stdout
                .write_all(format!("{}\n", console::render_message(&message)).as_bytes())
                .await?;
        }
        stdout.flush().await?;
        return Ok(());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    console::run_repl(&executor, stdin, stdout).await
}
