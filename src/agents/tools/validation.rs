//! Parameter validation against a tool's declared schema

use thiserror::Error;

use crate::agents::domain::{ParamKind, ParamValue, ParameterSchema, ParameterType, Parameters};

/// First schema rule a parameter bag violated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required parameter `{0}`")]
    MissingRequired(String),

    #[error("parameter `{name}` must be a `{kind}`")]
    TypeMismatch { name: String, kind: ParamKind },

    #[error("parameter `{0}` must be a finite number")]
    NotFinite(String),

    #[error("parameter `{name}` must be >= {}", bound(.min))]
    BelowMinimum { name: String, min: f64 },

    #[error("parameter `{name}` must be <= {}", bound(.max))]
    AboveMaximum { name: String, max: f64 },
}

fn bound(value: &f64) -> ParamValue {
    ParamValue::Number(*value)
}

/// Check `supplied` against `schema`.
///
/// Parameters are checked in declaration order and the first violation is
/// returned. Supplied names the schema does not declare are ignored, and
/// defaults are neither applied nor bounds-checked.
pub fn validate(schema: &ParameterSchema, supplied: &Parameters) -> Result<(), ValidationError> {
    for (name, spec) in schema {
        let Some(value) = supplied.get(name) else {
            if spec.required {
                return Err(ValidationError::MissingRequired(name.clone()));
            }
            continue;
        };

        if value.kind() != spec.kind() {
            return Err(ValidationError::TypeMismatch {
                name: name.clone(),
                kind: spec.kind(),
            });
        }

        if let (ParameterType::Number { min, max, .. }, ParamValue::Number(n)) = (&spec.ty, value) {
            // NaN compares false against both bounds
            if (min.is_some() || max.is_some()) && !n.is_finite() {
                return Err(ValidationError::NotFinite(name.clone()));
            }
            if let Some(min) = min {
                if n < min {
                    return Err(ValidationError::BelowMinimum {
                        name: name.clone(),
                        min: *min,
                    });
                }
            }
            if let Some(max) = max {
                if n > max {
                    return Err(ValidationError::AboveMaximum {
                        name: name.clone(),
                        max: *max,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::domain::ParameterSpec;

    fn schema(entries: Vec<(&str, ParameterSpec)>) -> ParameterSchema {
        entries
            .into_iter()
            .map(|(name, spec)| (name.to_string(), spec))
            .collect()
    }

    fn params(entries: Vec<(&str, ParamValue)>) -> Parameters {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_missing_required() {
        let schema = schema(vec![("p", ParameterSpec::string("p").required())]);
        let err = validate(&schema, &Parameters::new()).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired("p".to_string()));
        assert_eq!(err.to_string(), "missing required parameter `p`");

        assert!(validate(&schema, &params(vec![("p", "x".into())])).is_ok());
    }

    #[test]
    fn test_optional_absent_is_fine() {
        let schema = schema(vec![("p", ParameterSpec::number("p"))]);
        assert!(validate(&schema, &Parameters::new()).is_ok());
    }

    #[test]
    fn test_type_mismatch_message() {
        let schema = schema(vec![("n", ParameterSpec::number("n"))]);
        let err = validate(&schema, &params(vec![("n", "7".into())])).unwrap_err();
        assert_eq!(err.to_string(), "parameter `n` must be a `number`");
    }

    #[test]
    fn test_bounds() {
        let schema = schema(vec![(
            "n",
            ParameterSpec::number("n").with_range(Some(1.0), Some(10.0)),
        )]);

        assert!(validate(&schema, &params(vec![("n", 1.0.into())])).is_ok());
        assert!(validate(&schema, &params(vec![("n", 10.0.into())])).is_ok());

        let low = validate(&schema, &params(vec![("n", 0.5.into())])).unwrap_err();
        assert_eq!(low.to_string(), "parameter `n` must be >= 1");

        let high = validate(&schema, &params(vec![("n", 11.0.into())])).unwrap_err();
        assert_eq!(high.to_string(), "parameter `n` must be <= 10");
    }

    #[test]
    fn test_default_not_bounds_checked() {
        let schema = schema(vec![(
            "n",
            ParameterSpec::number("n")
                .with_range(Some(1.0), Some(2.0))
                .with_default(99.0),
        )]);
        assert!(validate(&schema, &Parameters::new()).is_ok());
    }

    #[test]
    fn test_first_violation_in_declaration_order_wins() {
        let schema = schema(vec![
            ("b", ParameterSpec::boolean("b").required()),
            ("a", ParameterSpec::string("a").required()),
        ]);
        let err = validate(&schema, &Parameters::new()).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired("b".to_string()));
    }

    #[test]
    fn test_unknown_parameters_ignored() {
        let schema = schema(vec![("a", ParameterSpec::string("a"))]);
        assert!(validate(&schema, &params(vec![("zzz", true.into())])).is_ok());
    }
}
