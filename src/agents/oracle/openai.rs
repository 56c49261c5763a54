//! OpenAI-compatible oracle using chat completions with function calling

use std::env;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::DecisionOracle;
use crate::agents::config::OracleSettings;
use crate::agents::domain::{Decision, Message, ParamValue, Parameters, Role, ToolCall};
use crate::agents::error::{OracleError, OracleResult};
use crate::agents::tools::ToolSpec;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Oracle backed by an OpenAI-compatible endpoint
pub struct OpenAiOracle {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiOracle {
    /// Create a new oracle from configuration
    pub fn new(settings: &OracleSettings) -> OracleResult<Self> {
        let env_var = settings
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV);
        let api_key = env::var(env_var).map_err(|_| {
            OracleError::Authentication(format!("Environment variable {} not set", env_var))
        })?;

        Self::with_api_key(settings, api_key)
    }

    /// Create a new oracle with an explicit API key
    pub fn with_api_key(settings: &OracleSettings, api_key: impl Into<String>) -> OracleResult<Self> {
        let model = settings
            .model
            .clone()
            .ok_or_else(|| OracleError::InvalidRequest("oracle.model is not set".to_string()))?;

        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for the chat completions API
    fn build_request_body(&self, prompt: &str, transcript: &[Message], tools: &[ToolSpec]) -> Value {
        let mut messages = vec![json!({ "role": "system", "content": prompt })];
        messages.extend(transcript.iter().filter_map(Self::convert_message));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temp) = self.temperature {
            body["temperature"] = json!(temp);
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if !tools.is_empty() {
            body["tools"] = json!(tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name(),
                            "description": t.description(),
                            "parameters": t.input_schema()
                        }
                    })
                })
                .collect::<Vec<_>>());
        }

        body
    }

    /// Convert a transcript message to the wire format.
    ///
    /// The transcript's own system message is replaced by the prompt. Tool
    /// messages carry no call id, so they go back as user-visible observations.
    fn convert_message(message: &Message) -> Option<Value> {
        match message.role {
            Role::System => None,
            Role::User => Some(json!({ "role": "user", "content": message.content })),
            Role::Assistant => Some(json!({ "role": "assistant", "content": message.content })),
            Role::Tool => Some(json!({
                "role": "user",
                "content": format!(
                    "[tool {} result]\n{}",
                    message.tool_name.as_deref().unwrap_or("unknown"),
                    message.content
                ),
            })),
        }
    }

    /// Turn a completion into a decision
    fn parse_response(response: &OpenAiResponse) -> OracleResult<Decision> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| OracleError::Parse("No choices in response".to_string()))?;

        if let Some(call) = choice.message.tool_calls.as_ref().and_then(|tcs| tcs.first()) {
            let parameters = Self::parse_arguments(&call.function.arguments)?;
            return Ok(Decision::ToolCall(ToolCall {
                tool_name: call.function.name.clone(),
                parameters,
            }));
        }

        Ok(Decision::Text(
            choice.message.content.clone().unwrap_or_default(),
        ))
    }

    fn parse_arguments(arguments: &str) -> OracleResult<Parameters> {
        if arguments.trim().is_empty() {
            return Ok(Parameters::new());
        }

        let value: Value = serde_json::from_str(arguments)
            .map_err(|e| OracleError::Parse(format!("Invalid tool arguments: {}", e)))?;
        let object = value
            .as_object()
            .ok_or_else(|| OracleError::Parse("Tool arguments must be a JSON object".to_string()))?;

        object
            .iter()
            .map(|(name, value)| {
                ParamValue::from_json(value)
                    .map(|v| (name.clone(), v))
                    .ok_or_else(|| {
                        OracleError::Parse(format!(
                            "Tool argument `{}` is not a string, number or boolean",
                            name
                        ))
                    })
            })
            .collect()
    }
}

#[async_trait]
impl DecisionOracle for OpenAiOracle {
    fn name(&self) -> &str {
        "openai"
    }

    async fn decide(
        &self,
        prompt: &str,
        transcript: &[Message],
        tools: &[ToolSpec],
    ) -> OracleResult<Decision> {
        let body = self.build_request_body(prompt, transcript, tools);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Parse(format!("Failed to parse response: {}", e)))?;

        let decision = Self::parse_response(&openai_response)?;
        tracing::debug!(model = %self.model, ?decision, "OpenAI oracle decided");
        Ok(decision)
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiToolCall {
    function: OpenAiFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAiFunction {
    name: String,
    arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::tools::builtin::echo_tool;
    use crate::agents::domain::ToolResult;

    fn oracle() -> OpenAiOracle {
        let settings = OracleSettings {
            model: Some("gpt-4o-mini".to_string()),
            base_url: Some("http://localhost:8080/v1/".to_string()),
            temperature: Some(0.2),
            ..Default::default()
        };
        OpenAiOracle::with_api_key(&settings, "test-key").unwrap()
    }

    #[test]
    fn test_requires_model() {
        let result = OpenAiOracle::with_api_key(&OracleSettings::default(), "k");
        assert!(matches!(result, Err(OracleError::InvalidRequest(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(oracle().base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let transcript = vec![
            Message::system("ignored in favour of the prompt"),
            Message::user("say hi"),
            Message::tool(&ToolResult::success("echo", "hi")),
        ];
        let body = oracle().build_request_body("Be nice", &transcript, &[echo_tool()]);

        assert_eq!(body["model"], "gpt-4o-mini");
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "Be nice");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["content"], "[tool echo result]\nhi");

        let tool = &body["tools"][0]["function"];
        assert_eq!(tool["name"], "echo");
        assert_eq!(tool["parameters"]["required"], json!(["text"]));
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_tool_call_response() {
        let response: OpenAiResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": "echo", "arguments": "{\"text\":\"hi\"}" }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let decision = OpenAiOracle::parse_response(&response).unwrap();
        assert_eq!(
            decision,
            Decision::ToolCall(ToolCall::new("echo").with_param("text", "hi"))
        );
    }

    #[test]
    fn test_parse_text_response() {
        let response: OpenAiResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "Hello!" }, "finish_reason": "stop" }]
        }))
        .unwrap();
        assert_eq!(
            OpenAiOracle::parse_response(&response).unwrap(),
            Decision::text("Hello!")
        );
    }

    #[test]
    fn test_parse_rejects_nested_arguments() {
        let err = OpenAiOracle::parse_arguments("{\"list\": [1, 2]}").unwrap_err();
        assert!(matches!(err, OracleError::Parse(_)));
        assert!(OpenAiOracle::parse_arguments("").unwrap().is_empty());
    }

    #[test]
    fn test_empty_choices_is_parse_error() {
        let response = OpenAiResponse { choices: vec![] };
        assert!(matches!(
            OpenAiOracle::parse_response(&response),
            Err(OracleError::Parse(_))
        ));
    }
}
