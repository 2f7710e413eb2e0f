//! Projection of tool descriptors into the MCP `tools/list` shape
//!
//! Every parameter is advertised as a string; `enum` appears only for constrained parameters
//! and `required` only when at least one parameter is required.

use serde::{Serialize, Serializer};

use crate::tools::descriptor::{ParamSpec, ToolDescriptor};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Serialized as a JSON object keyed by parameter name, in declared order.
    #[serde(serialize_with = "serialize_properties")]
    pub properties: Vec<(String, PropertySchema)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

pub fn project_tool(descriptor: &ToolDescriptor) -> ToolSchema {
    ToolSchema {
        name: descriptor.name.clone(),
        description: descriptor.description.clone(),
        input_schema: project_input_schema(descriptor),
    }
}

pub fn project_input_schema(descriptor: &ToolDescriptor) -> InputSchema {
    let properties = descriptor
        .params
        .iter()
        .map(|param| (param.name.clone(), project_param(param)))
        .collect();

    let required = descriptor
        .required_params()
        .map(|param| param.name.clone())
        .collect::<Vec<_>>();

    InputSchema {
        kind: "object",
        properties,
        required: (!required.is_empty()).then_some(required),
    }
}

fn project_param(param: &ParamSpec) -> PropertySchema {
    PropertySchema {
        kind: "string",
        description: param.description.clone(),
        allowed_values: (!param.allowed_values.is_empty()).then(|| param.allowed_values.clone()),
    }
}

fn serialize_properties<S>(
    properties: &[(String, PropertySchema)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(properties.iter().map(|(name, schema)| (name, schema)))
}
