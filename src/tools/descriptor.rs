//! Static tool metadata
//!
//! A descriptor is built once at registration time and never mutated afterwards.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    /// Allowed values in declared order. Empty means unconstrained.
    pub allowed_values: Vec<String>,
    pub required: bool,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            allowed_values: Vec::new(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Name, description and ordered parameters of one tool.
///
/// Parameter order is significant: it is the positional order in which bound
/// arguments are handed to the tool's handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn required_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|param| param.required)
    }
}

#[cfg(test)]
mod tests {
    use super::{ParamSpec, ToolDescriptor};

    #[test]
    fn builder_keeps_declared_parameter_order() {
        let descriptor = ToolDescriptor::new("deploy", "Deploy a service")
            .param(ParamSpec::new("service", "Service name").required())
            .param(ParamSpec::new("env", "Target").with_enum(["staging", "prod"]))
            .param(ParamSpec::new("note", "Free text"));

        let names = descriptor
            .params
            .iter()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["service", "env", "note"]);
        assert_eq!(descriptor.params[1].allowed_values, vec!["staging", "prod"]);
    }

    #[test]
    fn params_default_to_optional() {
        let spec = ParamSpec::new("city", "City name");
        assert!(!spec.required);
        assert!(spec.required().optional().allowed_values.is_empty());
    }

    #[test]
    fn required_params_filters_in_order() {
        let descriptor = ToolDescriptor::new("t", "d")
            .param(ParamSpec::new("a", "").required())
            .param(ParamSpec::new("b", ""))
            .param(ParamSpec::new("c", "").required());

        let required = descriptor
            .required_params()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(required, vec!["a", "c"]);
    }
}
