use std::sync::Arc;

use agentry::agents::config::{AgentConfig, ToolConfig};
use agentry::agents::domain::{Decision, ParameterSchema, ParameterSpec, Role, ToolCall};
use agentry::agents::error::AgentError;
use agentry::agents::oracle::{KeywordOracle, ScriptedOracle};
use agentry::agents::AgentHandler;
use agentry::config::Settings;

fn greet_tool() -> ToolConfig {
    let mut parameters = ParameterSchema::new();
    parameters.insert("name".to_string(), ParameterSpec::string("Who to greet").required());
    parameters.insert(
        "excited".to_string(),
        ParameterSpec::boolean("Add an exclamation mark").with_default(false),
    );
    ToolConfig {
        name: "greet".to_string(),
        description: "Greet someone by name".to_string(),
        parameters,
        response: "Hello, {{ name }}{% if excited %}!{% else %}.{% endif %}".to_string(),
    }
}

fn settings() -> Settings {
    Settings {
        agents: vec![
            AgentConfig {
                name: "greeter".to_string(),
                prompt: "Greet people.".to_string(),
                tools: vec!["greet".to_string()],
            },
            AgentConfig {
                name: "general".to_string(),
                prompt: "Do anything.".to_string(),
                tools: vec![],
            },
        ],
        tools: vec![greet_tool()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_keyword_turn_end_to_end() {
    let handler = AgentHandler::with_oracle(&settings(), Arc::new(KeywordOracle::new())).unwrap();
    let executor = handler.get("general").unwrap();

    let transcript = executor.run("echo hello world").await.unwrap();

    let roles: Vec<Role> = transcript.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Tool, Role::Assistant]
    );
    assert_eq!(transcript[0].content, "Do anything.");
    assert_eq!(transcript[2].tool_result.as_deref(), Some("echo hello world"));
    assert_eq!(
        transcript[3].content,
        "The `echo` tool returned: echo hello world"
    );
}

#[tokio::test]
async fn test_keyword_validation_failure_is_summarized() {
    let handler = AgentHandler::with_oracle(&settings(), Arc::new(KeywordOracle::new())).unwrap();
    let executor = handler.get("general").unwrap();

    // The keyword oracle cannot fill the calculator's numbers
    let transcript = executor.run("use the calculator").await.unwrap();

    assert_eq!(transcript[2].content, "Error: missing required parameter `a`");
    assert_eq!(
        transcript[3].content,
        "The `calculator` tool failed: missing required parameter `a`"
    );
}

#[tokio::test]
async fn test_template_tool_through_executor() {
    let oracle = Arc::new(ScriptedOracle::new([
        Decision::ToolCall(
            ToolCall::new("greet")
                .with_param("name", "Ada")
                .with_param("excited", true),
        ),
        Decision::text("Greeted."),
    ]));
    let handler = AgentHandler::with_oracle(&settings(), oracle).unwrap();
    let executor = handler.get("greeter").unwrap();
    assert_eq!(executor.tools().names(), vec!["greet"]);

    let transcript = executor.run("greet Ada").await.unwrap();
    assert_eq!(transcript[2].tool_result.as_deref(), Some("Hello, Ada!"));
}

#[tokio::test]
async fn test_agents_do_not_share_transcripts() {
    let handler = AgentHandler::with_oracle(&settings(), Arc::new(KeywordOracle::new())).unwrap();

    handler.get("general").unwrap().run("hello").await.unwrap();

    assert_eq!(handler.get("general").unwrap().messages().await.len(), 3);
    assert_eq!(handler.get("greeter").unwrap().messages().await.len(), 1);
}

#[test]
fn test_names_and_default_agent_follow_configuration_order() {
    let handler = AgentHandler::with_oracle(&settings(), Arc::new(KeywordOracle::new())).unwrap();
    assert_eq!(handler.names(), ["greeter".to_string(), "general".to_string()]);
    assert_eq!(handler.default_agent().unwrap().agent().name, "greeter");

    let general = handler.get("general").unwrap();
    assert_eq!(
        general.tools().names(),
        vec!["echo", "calculator", "clock", "text_stats", "greet"]
    );
    assert!(matches!(
        handler.get("missing"),
        Err(AgentError::NotFound(name)) if name == "missing"
    ));
}
