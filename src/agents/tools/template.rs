//! Declarative tools whose output is a rendered Tera template

use async_trait::async_trait;
use tera::{Context, Tera};

use super::{Params, ToolHandler, ToolSpec};
use crate::agents::config::ToolConfig;
use crate::agents::domain::ParamValue;
use crate::agents::error::{ToolError, ToolOutput};

/// Build a tool from its configuration entry
pub fn template_tool(config: &ToolConfig) -> ToolSpec {
    let mut builder = ToolSpec::builder(&config.name, &config.description);
    for (name, spec) in &config.parameters {
        builder = builder.param(name, spec.clone());
    }
    builder.handler(TemplateHandler {
        template: config.response.clone(),
    })
}

struct TemplateHandler {
    template: String,
}

#[async_trait]
impl ToolHandler for TemplateHandler {
    async fn call(&self, params: Params) -> ToolOutput {
        let context = build_context(&params);
        Tera::one_off(&self.template, &context, false)
            .map_err(|e| ToolError::execution(format!("Failed to render response template: {}", e)))
    }
}

/// Template variables: every declared parameter (with defaults) plus extra supplied values
fn build_context(params: &Params) -> Context {
    let mut context = Context::new();
    for (name, value) in params.resolved() {
        match value {
            ParamValue::String(s) => context.insert(name, &s),
            // Whole numbers render without a fractional part
            ParamValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                context.insert(name, &(n as i64))
            }
            ParamValue::Number(n) => context.insert(name, &n),
            ParamValue::Boolean(b) => context.insert(name, &b),
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::domain::{ParameterSchema, ParameterSpec, Parameters};

    fn config(response: &str) -> ToolConfig {
        let mut parameters = ParameterSchema::new();
        parameters.insert("city".to_string(), ParameterSpec::string("City").required());
        parameters.insert(
            "days".to_string(),
            ParameterSpec::number("Days").with_default(3.0),
        );
        ToolConfig {
            name: "forecast".to_string(),
            description: "Canned forecast".to_string(),
            parameters,
            response: response.to_string(),
        }
    }

    #[tokio::test]
    async fn test_renders_supplied_and_default_values() {
        let tool = template_tool(&config("{{ days }}-day forecast for {{ city }}: sunny"));
        assert_eq!(tool.name(), "forecast");
        assert!(tool.parameters()["city"].required);

        let mut args = Parameters::new();
        args.insert("city".to_string(), "Oslo".into());
        let output = tool.execute(args).await.unwrap();
        assert_eq!(output, "3-day forecast for Oslo: sunny");
    }

    #[tokio::test]
    async fn test_render_failure_is_a_tool_error() {
        let tool = template_tool(&config("{{ missing_variable }}"));
        let mut args = Parameters::new();
        args.insert("city".to_string(), "Oslo".into());
        let err = tool.execute(args).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to render response template"));
    }
}
