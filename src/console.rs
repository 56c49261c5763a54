//! Line-oriented console over one executor

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::agents::core::AgentExecutor;
use crate::agents::domain::{Message, Role};
use crate::agents::error::AgentError;
use crate::agents::tools::ToolRegistry;

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset,
    Tools,
    History,
    Quit,
    Say(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Command::Empty,
            "/reset" => Command::Reset,
            "/tools" => Command::Tools,
            "/history" => Command::History,
            "/quit" | "/exit" => Command::Quit,
            text => Command::Say(text.to_string()),
        }
    }
}

pub fn render_message(message: &Message) -> String {
    match message.role {
        Role::Tool => {
            let tool = message.tool_name.as_deref().unwrap_or("tool");
            format!("[{}:{}] {}", message.role, tool, message.content)
        }
        role => format!("[{}] {}", role, message.content),
    }
}

pub fn render_tools(tools: &ToolRegistry) -> String {
    let mut out = String::new();
    for tool in tools {
        out.push_str(&format!("{} - {}\n", tool.name(), tool.description()));
        for (name, spec) in tool.parameters() {
            let required = if spec.required { ", required" } else { "" };
            out.push_str(&format!("    {} ({}{})", name, spec.kind(), required));
            if let Some(default) = spec.default_value() {
                out.push_str(&format!(" = {}", default));
            }
            if !spec.description.is_empty() {
                out.push_str(&format!(": {}", spec.description));
            }
            out.push('\n');
        }
    }
    out
}

/// Run one turn and return only the messages it added
pub async fn run_once(executor: &AgentExecutor, text: &str) -> Result<Vec<Message>, AgentError> {
    let before = executor.messages().await.len();
    let transcript = executor.run(text).await?;
    Ok(transcript.into_iter().skip(before).collect())
}

/// Read commands until EOF or `/quit`
pub async fn run_repl<R, W>(executor: &AgentExecutor, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output
        .write_all(
            format!(
                "Talking to '{}'. /tools, /history, /reset, /quit\n",
                executor.agent().name
            )
            .as_bytes(),
        )
        .await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Tools => render_tools(executor.tools()),
            Command::History => executor
                .messages()
                .await
                .iter()
                .map(|m| render_message(m) + "\n")
                .collect(),
            Command::Reset => match executor.reset().await {
                Ok(()) => "Conversation reset.\n".to_string(),
                Err(e) => format!("{}\n", e),
            },
            Command::Say(text) => match run_once(executor, &text).await {
                // The user's own line is already on screen
                Ok(added) => added
                    .iter()
                    .filter(|m| m.role != Role::User)
                    .map(|m| render_message(m) + "\n")
                    .collect(),
                Err(e) => {
                    tracing::error!("Turn failed: {}", e);
                    format!("error: {}\n", e)
                }
            },
        };
        output.write_all(reply.as_bytes()).await?;
        output.flush().await?;
    }

    Ok(())
}
