//! Converts a loosely typed JSON argument bag into the ordered argument list a handler expects.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::tools::{descriptor::ToolDescriptor, handler::ToolError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("missing required parameter: {param}")]
    MissingRequiredParam { param: String },
}

/// Arguments in the tool's declared parameter order. Absent optional values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    values: Vec<(String, Option<String>)>,
}

impl BoundArgs {
    pub fn from_pairs(values: Vec<(String, Option<String>)>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn get_named(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn require(&self, name: &str) -> Result<&str, ToolError> {
        self.get_named(name)
            .ok_or_else(|| ToolError::new(format!("argument {name} was not supplied")))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn into_values(self) -> Vec<Option<String>> {
        self.values.into_iter().map(|(_, value)| value).collect()
    }
}

/// Binds `arguments` against `descriptor`, stopping at the first missing required parameter.
pub fn bind_arguments(
    descriptor: &ToolDescriptor,
    arguments: &Map<String, Value>,
) -> Result<BoundArgs, BindError> {
    let mut values = Vec::with_capacity(descriptor.params.len());

    for spec in &descriptor.params {
        match arguments.get(&spec.name).and_then(coerce_to_string) {
            Some(value) => values.push((spec.name.clone(), Some(value))),
            None if spec.required => {
                return Err(BindError::MissingRequiredParam {
                    param: spec.name.clone(),
                })
            }
            None => values.push((spec.name.clone(), None)),
        }
    }

    Ok(BoundArgs { values })
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::{bind_arguments, BindError};
    use crate::tools::descriptor::{ParamSpec, ToolDescriptor};

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new("book", "Book a trip")
            .param(ParamSpec::new("from", "Origin").required())
            .param(ParamSpec::new("via", "Stopover"))
            .param(ParamSpec::new("to", "Destination").required())
    }

    #[test]
    fn binds_in_declared_order_with_optional_gaps() {
        let args = bind_arguments(&descriptor(), &bag(json!({"to": "Oslo", "from": "Rome"})))
            .expect("binding succeeds");

        assert_eq!(
            args.into_values(),
            vec![Some("Rome".to_string()), None, Some("Oslo".to_string())]
        );
    }

    #[test]
    fn fails_on_first_missing_required_parameter() {
        let err = bind_arguments(&descriptor(), &Map::new()).expect_err("binding fails");
        assert_eq!(
            err,
            BindError::MissingRequiredParam {
                param: "from".to_string()
            }
        );
        assert_eq!(err.to_string(), "missing required parameter: from");
    }

    #[test]
    fn reports_later_gap_when_earlier_params_present() {
        let err = bind_arguments(&descriptor(), &bag(json!({"from": "Rome", "via": "Bern"})))
            .expect_err("binding fails");
        assert_eq!(
            err,
            BindError::MissingRequiredParam {
                param: "to".to_string()
            }
        );
    }

    #[test]
    fn coerces_scalars_and_treats_null_as_absent() {
        let descriptor = ToolDescriptor::new("t", "d")
            .param(ParamSpec::new("count", ""))
            .param(ParamSpec::new("flag", ""))
            .param(ParamSpec::new("tags", ""))
            .param(ParamSpec::new("gone", ""));

        let args = bind_arguments(
            &descriptor,
            &bag(json!({"count": 3, "flag": true, "tags": ["a", "b"], "gone": null})),
        )
        .expect("binding succeeds");

        assert_eq!(args.get_named("count"), Some("3"));
        assert_eq!(args.get_named("flag"), Some("true"));
        assert_eq!(args.get_named("tags"), Some(r#"["a","b"]"#));
        assert_eq!(args.get_named("gone"), None);
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn null_for_required_parameter_counts_as_missing() {
        let err = bind_arguments(&descriptor(), &bag(json!({"from": null, "to": "Oslo"})))
            .expect_err("binding fails");
        assert!(matches!(err, BindError::MissingRequiredParam { param } if param == "from"));
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let args = bind_arguments(
            &descriptor(),
            &bag(json!({"from": "Rome", "to": "Oslo", "seat": "12A"})),
        )
        .expect("binding succeeds");

        let names = args.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["from", "via", "to"]);
        assert!(args.require("seat").is_err());
        assert_eq!(args.require("to").expect("bound"), "Oslo");
    }
}
