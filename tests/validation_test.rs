use agentry::agents::domain::{ParamValue, ParameterSchema, ParameterSpec, Parameters};
use agentry::agents::tools::{validate, ValidationError};

fn schema(entries: Vec<(&str, ParameterSpec)>) -> ParameterSchema {
    entries
        .into_iter()
        .map(|(name, spec)| (name.to_string(), spec))
        .collect()
}

fn bag(entries: Vec<(&str, ParamValue)>) -> Parameters {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn percent_schema() -> ParameterSchema {
    schema(vec![(
        "p",
        ParameterSpec::number("percentage")
            .required()
            .with_range(Some(0.0), Some(100.0)),
    )])
}

#[test]
fn test_required_parameter_must_be_supplied() {
    let spec = schema(vec![("p", ParameterSpec::string("anything").required())]);

    let err = validate(&spec, &Parameters::new()).unwrap_err();
    assert_eq!(err, ValidationError::MissingRequired("p".to_string()));
    assert!(err.to_string().contains("`p`"));

    assert!(validate(&spec, &bag(vec![("p", "value".into())])).is_ok());
}

#[test]
fn test_number_type_and_bounds() {
    let spec = percent_schema();

    let err = validate(&spec, &bag(vec![("p", "fifty".into())])).unwrap_err();
    assert_eq!(err.to_string(), "parameter `p` must be a `number`");

    assert!(validate(&spec, &bag(vec![("p", 0.0.into())])).is_ok());
    assert!(validate(&spec, &bag(vec![("p", 42.5.into())])).is_ok());
    assert!(validate(&spec, &bag(vec![("p", 100.0.into())])).is_ok());

    let err = validate(&spec, &bag(vec![("p", (-1.0).into())])).unwrap_err();
    assert_eq!(err.to_string(), "parameter `p` must be >= 0");

    let err = validate(&spec, &bag(vec![("p", 100.5.into())])).unwrap_err();
    assert_eq!(err.to_string(), "parameter `p` must be <= 100");
}

#[test]
fn test_non_finite_number_rejected_when_bounded() {
    let spec = percent_schema();

    let err = validate(&spec, &bag(vec![("p", f64::NAN.into())])).unwrap_err();
    assert_eq!(err, ValidationError::NotFinite("p".to_string()));
    assert_eq!(err.to_string(), "parameter `p` must be a finite number");

    let err = validate(&spec, &bag(vec![("p", f64::INFINITY.into())])).unwrap_err();
    assert_eq!(err, ValidationError::NotFinite("p".to_string()));

    let open = schema(vec![("x", ParameterSpec::number("anything"))]);
    assert!(validate(&open, &bag(vec![("x", f64::NAN.into())])).is_ok());
}

#[test]
fn test_boolean_and_string_kinds_are_exact() {
    let spec = schema(vec![
        ("flag", ParameterSpec::boolean("switch")),
        ("name", ParameterSpec::string("label")),
    ]);

    let err = validate(&spec, &bag(vec![("flag", "true".into())])).unwrap_err();
    assert_eq!(err.to_string(), "parameter `flag` must be a `boolean`");

    let err = validate(&spec, &bag(vec![("name", 7.into())])).unwrap_err();
    assert_eq!(err.to_string(), "parameter `name` must be a `string`");

    assert!(validate(&spec, &bag(vec![("flag", false.into()), ("name", "x".into())])).is_ok());
}

#[test]
fn test_first_violation_in_declaration_order_wins() {
    let spec = schema(vec![
        ("first", ParameterSpec::string("a").required()),
        ("second", ParameterSpec::number("b").required()),
    ]);

    let err = validate(&spec, &bag(vec![("second", "wrong".into())])).unwrap_err();
    assert_eq!(err, ValidationError::MissingRequired("first".to_string()));
}

#[test]
fn test_unknown_parameters_are_ignored() {
    let spec = percent_schema();
    let supplied = bag(vec![("p", 5.into()), ("extra", "ignored".into())]);
    assert!(validate(&spec, &supplied).is_ok());
}

#[test]
fn test_optional_parameter_may_be_absent() {
    let spec = schema(vec![(
        "limit",
        ParameterSpec::number("max items")
            .with_range(Some(1.0), Some(10.0))
            .with_default(5),
    )]);
    assert!(validate(&spec, &Parameters::new()).is_ok());
}

#[test]
fn test_defaults_are_not_bounds_checked() {
    // The default sits outside the range; only supplied values are checked
    let spec = schema(vec![(
        "n",
        ParameterSpec::number("n")
            .with_range(Some(0.0), Some(1.0))
            .with_default(99),
    )]);
    assert!(validate(&spec, &Parameters::new()).is_ok());
}
