//! Tool parameter schemas and parameter values

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Parameter schema of a tool, in declaration order
pub type ParameterSchema = IndexMap<String, ParameterSpec>;

/// Parameter bag supplied with a tool call
pub type Parameters = IndexMap<String, ParamValue>;

/// Primitive kind of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Boolean,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Number => write!(f, "number"),
            ParamKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// A primitive parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl ParamValue {
    /// Kind of this value
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::String(_) => ParamKind::String,
            ParamValue::Number(_) => ParamKind::Number,
            ParamValue::Boolean(_) => ParamKind::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a JSON value, rejecting anything that is not a primitive
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ParamValue::String(s.clone())),
            Value::Number(n) => n.as_f64().map(ParamValue::Number),
            Value::Bool(b) => Some(ParamValue::Boolean(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::String(s) => json!(s),
            ParamValue::Number(n) => json!(n),
            ParamValue::Boolean(b) => json!(b),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{}", s),
            // Whole numbers print without a trailing ".0"
            ParamValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

/// Kind-specific part of a parameter declaration.
///
/// Each variant carries a default of its own type, so a default can never
/// disagree with the declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterType {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<bool>,
    },
}

/// Declaration of one named tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(flatten)]
    pub ty: ParameterType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ParameterSpec {
    pub fn new(ty: ParameterType, description: impl Into<String>) -> Self {
        Self {
            ty,
            description: description.into(),
            required: false,
        }
    }

    /// An optional string parameter
    pub fn string(description: impl Into<String>) -> Self {
        Self::new(ParameterType::String { default: None }, description)
    }

    /// An optional, unbounded number parameter
    pub fn number(description: impl Into<String>) -> Self {
        Self::new(
            ParameterType::Number {
                default: None,
                min: None,
                max: None,
            },
            description,
        )
    }

    /// An optional boolean parameter
    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(ParameterType::Boolean { default: None }, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value. A value of another kind is ignored.
    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        let value = value.into();
        match (&mut self.ty, value) {
            (ParameterType::String { default }, ParamValue::String(s)) => *default = Some(s),
            (ParameterType::Number { default, .. }, ParamValue::Number(n)) => *default = Some(n),
            (ParameterType::Boolean { default }, ParamValue::Boolean(b)) => *default = Some(b),
            (ty, value) => {
                tracing::warn!(
                    "Ignoring {} default for {} parameter",
                    value.kind(),
                    ParameterSpec::kind_of(ty)
                );
            }
        }
        self
    }

    /// Set numeric bounds. Has no effect on non-number parameters.
    pub fn with_range(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        if let ParameterType::Number { min, max, .. } = &mut self.ty {
            *min = lower;
            *max = upper;
        }
        self
    }

    pub fn kind(&self) -> ParamKind {
        Self::kind_of(&self.ty)
    }

    fn kind_of(ty: &ParameterType) -> ParamKind {
        match ty {
            ParameterType::String { .. } => ParamKind::String,
            ParameterType::Number { .. } => ParamKind::Number,
            ParameterType::Boolean { .. } => ParamKind::Boolean,
        }
    }

    /// The declared default, if any
    pub fn default_value(&self) -> Option<ParamValue> {
        match &self.ty {
            ParameterType::String { default } => default.clone().map(ParamValue::String),
            ParameterType::Number { default, .. } => default.map(ParamValue::Number),
            ParameterType::Boolean { default } => default.map(ParamValue::Boolean),
        }
    }

    /// JSON Schema fragment describing this parameter
    pub fn json_schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind().to_string(),
            "description": self.description,
        });
        if let Some(default) = self.default_value() {
            schema["default"] = default.to_json();
        }
        if let ParameterType::Number { min, max, .. } = &self.ty {
            if let Some(min) = min {
                schema["minimum"] = json!(min);
            }
            if let Some(max) = max {
                schema["maximum"] = json!(max);
            }
        }
        schema
    }
}

/// JSON Schema object for a whole parameter schema
pub fn schema_to_json(schema: &ParameterSchema) -> Value {
    let properties: serde_json::Map<String, Value> = schema
        .iter()
        .map(|(name, spec)| (name.clone(), spec.json_schema()))
        .collect();
    let required: Vec<&str> = schema
        .iter()
        .filter(|(_, spec)| spec.required)
        .map(|(name, _)| name.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_untagged_deserialize() {
        let values: Parameters =
            serde_json::from_value(json!({ "a": "x", "b": 2, "c": true, "d": 1.5 })).unwrap();
        assert_eq!(values["a"], ParamValue::String("x".to_string()));
        assert_eq!(values["b"], ParamValue::Number(2.0));
        assert_eq!(values["c"], ParamValue::Boolean(true));
        assert_eq!(values["d"], ParamValue::Number(1.5));
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::Number(3.0).to_string(), "3");
        assert_eq!(ParamValue::Number(0.25).to_string(), "0.25");
        assert_eq!(ParamValue::Boolean(false).to_string(), "false");
        assert_eq!(ParamValue::from("hi").to_string(), "hi");
    }

    #[test]
    fn test_parameter_spec_deserialize_tagged() {
        let spec: ParameterSpec = serde_json::from_value(json!({
            "type": "number",
            "description": "count",
            "required": true,
            "default": 2,
            "min": 1,
            "max": 5
        }))
        .unwrap();
        assert_eq!(spec.kind(), ParamKind::Number);
        assert!(spec.required);
        assert_eq!(spec.default_value(), Some(ParamValue::Number(2.0)));
        assert_eq!(
            spec.ty,
            ParameterType::Number {
                default: Some(2.0),
                min: Some(1.0),
                max: Some(5.0)
            }
        );
    }

    #[test]
    fn test_default_of_wrong_kind_is_rejected_by_serde() {
        let result: Result<ParameterSpec, _> = serde_json::from_value(json!({
            "type": "boolean",
            "default": "yes"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_with_default_ignores_mismatched_kind() {
        let spec = ParameterSpec::number("n").with_default("three");
        assert_eq!(spec.default_value(), None);

        let spec = ParameterSpec::number("n").with_default(3.0);
        assert_eq!(spec.default_value(), Some(ParamValue::Number(3.0)));
    }

    #[test]
    fn test_schema_to_json() {
        let mut schema = ParameterSchema::new();
        schema.insert("text".to_string(), ParameterSpec::string("Text").required());
        schema.insert(
            "n".to_string(),
            ParameterSpec::number("N").with_range(Some(0.0), Some(10.0)),
        );

        let json = schema_to_json(&schema);
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["text"]["type"], "string");
        assert_eq!(json["properties"]["n"]["minimum"], 0.0);
        assert_eq!(json["properties"]["n"]["maximum"], 10.0);
        assert_eq!(json["required"], json!(["text"]));
    }

    #[test]
    fn test_from_json_rejects_composites() {
        assert!(ParamValue::from_json(&json!([1, 2])).is_none());
        assert!(ParamValue::from_json(&json!(null)).is_none());
        assert_eq!(
            ParamValue::from_json(&json!(4)),
            Some(ParamValue::Number(4.0))
        );
    }
}
