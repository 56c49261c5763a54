//! Built-in tools available to every agent configuration

use chrono::{FixedOffset, Utc};

use super::{Params, ToolSpec};
use crate::agents::domain::{ParamValue, ParameterSpec};
use crate::agents::error::{ToolError, ToolOutput};

/// All built-in tools, in catalog order
pub fn builtin_tools() -> Vec<ToolSpec> {
    vec![echo_tool(), calculator_tool(), clock_tool(), text_stats_tool()]
}

/// Names of the built-in tools
pub fn builtin_names() -> Vec<String> {
    builtin_tools()
        .iter()
        .map(|tool| tool.name().to_string())
        .collect()
}

/// Returns its `text` parameter unchanged
pub fn echo_tool() -> ToolSpec {
    ToolSpec::builder("echo", "Repeat the given text back verbatim")
        .string("text", "Text to repeat")
        .handler_fn(|params: Params| async move { params.string("text") })
}

/// Basic arithmetic on two numbers
pub fn calculator_tool() -> ToolSpec {
    ToolSpec::builder(
        "calculator",
        "Apply add, subtract, multiply or divide to two numbers",
    )
    .string("operation", "One of add, subtract, multiply, divide")
    .number("a", "Left operand")
    .number("b", "Right operand")
    .handler_fn(|params: Params| async move { calculate(&params) })
}

fn calculate(params: &Params) -> ToolOutput {
    let operation = params.string("operation")?;
    let a = params.number("a")?;
    let b = params.number("b")?;

    let value = match operation.trim().to_lowercase().as_str() {
        "add" | "+" => a + b,
        "subtract" | "-" => a - b,
        "multiply" | "*" => a * b,
        "divide" | "/" => {
            if b == 0.0 {
                return Err(ToolError::execution("division by zero"));
            }
            a / b
        }
        other => {
            return Err(ToolError::invalid(format!(
                "unsupported operation `{}`",
                other
            )))
        }
    };

    Ok(ParamValue::Number(value).to_string())
}

/// Current date and time at a fixed UTC offset
pub fn clock_tool() -> ToolSpec {
    ToolSpec::builder("clock", "Report the current date and time")
        .param(
            "utc_offset_hours",
            ParameterSpec::number("Offset from UTC in hours")
                .with_range(Some(-12.0), Some(14.0))
                .with_default(0.0),
        )
        .handler_fn(|params: Params| async move {
            let hours = params.number("utc_offset_hours")?;
            let offset = FixedOffset::east_opt((hours * 3600.0).round() as i32)
                .ok_or_else(|| ToolError::invalid(format!("invalid UTC offset {}", hours)))?;
            Ok(Utc::now()
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string())
        })
}

/// Character, word and line counts
pub fn text_stats_tool() -> ToolSpec {
    ToolSpec::builder("text_stats", "Count the characters, words and lines in a text")
        .string("text", "Text to measure")
        .handler_fn(|params: Params| async move {
            let text = params.string("text")?;
            Ok(format!(
                "{} characters, {} words, {} lines",
                text.chars().count(),
                text.split_whitespace().count(),
                text.lines().count()
            ))
        })
}
