//! Name-indexed tool registry
//!
//! Populated once while an endpoint is being assembled, then shared read-only.

use std::{collections::HashMap, sync::Arc, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

use crate::tools::{
    binder::BoundArgs,
    descriptor::ToolDescriptor,
    handler::{FnHandler, ToolError, ToolHandler, ToolOutput},
};

static TOOL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("tool name pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tool {name} is already registered")]
    DuplicateTool { name: String },
    #[error("tool {tool} declares parameter {param} more than once")]
    DuplicateParam { tool: String, param: String },
    #[error("tool name {name:?} must be 1-64 characters of A-Z, a-z, 0-9, '_' or '-'")]
    InvalidToolName { name: String },
}

#[derive(Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub handler: Arc<dyn ToolHandler>,
}

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), RegistryError> {
        if !TOOL_NAME_PATTERN.is_match(&descriptor.name) {
            return Err(RegistryError::InvalidToolName {
                name: descriptor.name,
            });
        }

        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool {
                name: descriptor.name,
            });
        }

        for (position, param) in descriptor.params.iter().enumerate() {
            if descriptor.params[..position]
                .iter()
                .any(|earlier| earlier.name == param.name)
            {
                return Err(RegistryError::DuplicateParam {
                    tool: descriptor.name.clone(),
                    param: param.name.clone(),
                });
            }
        }

        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    pub fn register_fn<F>(
        &mut self,
        descriptor: ToolDescriptor,
        func: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(BoundArgs) -> Result<ToolOutput, ToolError> + Send + Sync + 'static,
    {
        self.register(descriptor, Arc::new(FnHandler::new(func)))
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Descriptors in registration order.
    pub fn list_all(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|tool| &tool.descriptor)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistryError, ToolRegistry};
    use crate::tools::{
        descriptor::{ParamSpec, ToolDescriptor},
        handler::ToolOutput,
    };

    fn echo(registry: &mut ToolRegistry, name: &str) -> Result<(), RegistryError> {
        registry.register_fn(ToolDescriptor::new(name, "echo"), |_| Ok(ToolOutput::Empty))
    }

    #[test]
    fn lists_in_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zulu", "alpha", "mike"] {
            echo(&mut registry, name).expect("registers");
        }

        let names = registry
            .list_all()
            .map(|descriptor| descriptor.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn rejects_duplicate_tool_names() {
        let mut registry = ToolRegistry::new();
        echo(&mut registry, "getWeather").expect("first registration");

        let err = echo(&mut registry, "getWeather").expect_err("duplicate rejected");
        assert_eq!(
            err,
            RegistryError::DuplicateTool {
                name: "getWeather".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_duplicate_parameter_names() {
        let mut registry = ToolRegistry::new();
        let descriptor = ToolDescriptor::new("t", "d")
            .param(ParamSpec::new("city", ""))
            .param(ParamSpec::new("city", "again"));

        let err = registry
            .register_fn(descriptor, |_| Ok(ToolOutput::Empty))
            .expect_err("duplicate param rejected");
        assert!(matches!(err, RegistryError::DuplicateParam { param, .. } if param == "city"));
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_invalid_tool_names() {
        let mut registry = ToolRegistry::new();
        let too_long = "x".repeat(65);
        for name in ["", "has space", "slash/name", too_long.as_str()] {
            let err = echo(&mut registry, name).expect_err("invalid name rejected");
            assert!(matches!(err, RegistryError::InvalidToolName { .. }));
        }
        echo(&mut registry, "get_server-info2").expect("valid name");
    }

    #[test]
    fn lookup_finds_registered_tools_only() {
        let mut registry = ToolRegistry::new();
        echo(&mut registry, "known").expect("registers");

        assert_eq!(
            registry.lookup("known").map(|tool| tool.descriptor.name.as_str()),
            Some("known")
        );
        assert!(registry.lookup("unknown").is_none());
    }
}
