//! Typed access to a validated parameter bag

use std::sync::Arc;

use super::ValidationError;
use crate::agents::domain::{ParamKind, ParamValue, ParameterSchema, Parameters};
use crate::agents::error::ToolError;

/// Parameter bag handed to a tool body, paired with the tool's own schema.
///
/// Absent parameters fall back to their declared default.
#[derive(Debug, Clone)]
pub struct Params {
    values: Parameters,
    schema: Arc<ParameterSchema>,
}

impl Params {
    pub fn new(values: Parameters, schema: Arc<ParameterSchema>) -> Self {
        Self { values, schema }
    }

    /// Supplied value, or the declared default
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).cloned().or_else(|| {
            self.schema
                .get(name)
                .and_then(|spec| spec.default_value())
        })
    }

    /// Values exactly as supplied by the caller
    pub fn raw(&self) -> &Parameters {
        &self.values
    }

    /// Declared parameters with defaults applied, followed by any extra supplied values
    pub fn resolved(&self) -> Parameters {
        let mut resolved = Parameters::new();
        for name in self.schema.keys() {
            if let Some(value) = self.get(name) {
                resolved.insert(name.clone(), value);
            }
        }
        for (name, value) in &self.values {
            if !resolved.contains_key(name) {
                resolved.insert(name.clone(), value.clone());
            }
        }
        resolved
    }

    pub fn string(&self, name: &str) -> Result<String, ToolError> {
        self.opt_string(name)?.ok_or_else(|| missing(name))
    }

    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        self.opt_number(name)?.ok_or_else(|| missing(name))
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ToolError> {
        self.opt_boolean(name)?.ok_or_else(|| missing(name))
    }

    pub fn opt_string(&self, name: &str) -> Result<Option<String>, ToolError> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::String(s)) => Ok(Some(s)),
            Some(_) => Err(mismatch(name, ParamKind::String)),
        }
    }

    pub fn opt_number(&self, name: &str) -> Result<Option<f64>, ToolError> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::Number(n)) => Ok(Some(n)),
            Some(_) => Err(mismatch(name, ParamKind::Number)),
        }
    }

    pub fn opt_boolean(&self, name: &str) -> Result<Option<bool>, ToolError> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::Boolean(b)) => Ok(Some(b)),
            Some(_) => Err(mismatch(name, ParamKind::Boolean)),
        }
    }
}

fn missing(name: &str) -> ToolError {
    ValidationError::MissingRequired(name.to_string()).into()
}

fn mismatch(name: &str, kind: ParamKind) -> ToolError {
    ValidationError::TypeMismatch {
        name: name.to_string(),
        kind,
    }
    .into()
}
