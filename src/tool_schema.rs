use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// JSON type of a tool parameter, as declared in the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    /// Whether a JSON value is an instance of this type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema of a single parameter. A missing `type` accepts any JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ParameterSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ParameterSchema>>,
}

/// Input schema of a tool: an object with named properties and a required set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub schema_type: ParamType,
    #[serde(default)]
    pub properties: BTreeMap<String, ParameterSchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// Why a set of arguments does not satisfy a tool's input schema
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("missing required parameter '{0}'")]
    MissingRequired(String),
    #[error("parameter '{name}' must be of type {expected}, got {actual}")]
    WrongType {
        name: String,
        expected: ParamType,
        actual: &'static str,
    },
    #[error("parameter '{name}' must be one of {allowed}, got {actual}")]
    NotInEnum {
        name: String,
        allowed: String,
        actual: String,
    },
    #[error("parameter '{name}' must have between {min} and {max} items, got {actual}")]
    ItemCount {
        name: String,
        min: String,
        max: String,
        actual: usize,
    },
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl SchemaObject {
    /// Converts the schema into the JSON object form used on the wire
    pub fn to_json_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Checks arguments against the declared parameters.
    ///
    /// Parameters not declared in the schema are accepted as-is, and `null`
    /// is accepted for optional parameters.
    pub fn validate(&self, arguments: &Map<String, Value>) -> Result<(), SchemaViolation> {
        for name in &self.required {
            if !arguments.contains_key(name) {
                return Err(SchemaViolation::MissingRequired(name.clone()));
            }
        }

        for (name, value) in arguments {
            let Some(param) = self.properties.get(name) else {
                continue;
            };
            if value.is_null() && !self.required.contains(name) {
                continue;
            }
            param.validate_value(name, value)?;
        }

        Ok(())
    }
}

impl ParameterSchema {
    fn validate_value(&self, name: &str, value: &Value) -> Result<(), SchemaViolation> {
        if let Some(expected) = self.param_type {
            if !expected.matches(value) {
                return Err(SchemaViolation::WrongType {
                    name: name.to_string(),
                    expected,
                    actual: json_type_name(value),
                });
            }
        }

        if let Some(allowed) = &self.allowed_values {
            if !allowed.contains(value) {
                return Err(SchemaViolation::NotInEnum {
                    name: name.to_string(),
                    allowed: Value::Array(allowed.clone()).to_string(),
                    actual: value.to_string(),
                });
            }
        }

        if let Value::Array(elements) = value {
            let too_few = self.min_items.is_some_and(|min| elements.len() < min);
            let too_many = self.max_items.is_some_and(|max| elements.len() > max);
            if too_few || too_many {
                let bound = |b: Option<usize>| b.map_or_else(|| "any".to_string(), |n| n.to_string());
                return Err(SchemaViolation::ItemCount {
                    name: name.to_string(),
                    min: bound(self.min_items),
                    max: bound(self.max_items),
                    actual: elements.len(),
                });
            }

            if let Some(items) = &self.items {
                for (index, element) in elements.iter().enumerate() {
                    items.validate_value(&format!("{}[{}]", name, index), element)?;
                }
            }
        }

        Ok(())
    }
}
