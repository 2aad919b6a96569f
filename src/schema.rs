use indexmap::IndexMap;
use serde::{de, Deserialize};

use crate::Value;

pub const MANAGED_PATH_PREFIX: &str = "managed/";

/// The `type` of a schema node, either a single tag or a `[tag, "null"]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Union(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCollection {
    pub path: String,
}

impl ResourceCollection {
    /// Name of the managed object this collection points at, if it is one.
    pub fn managed_name(&self) -> Option<&str> {
        self.path.strip_prefix(MANAGED_PATH_PREFIX)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub type_: Option<SchemaType>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,
    #[serde(default, deserialize_with = "required_fields")]
    pub required: Vec<String>,
    pub items: Option<Box<PropertySchema>>,
    #[serde(default)]
    pub resource_collection: Vec<ResourceCollection>,
    pub return_by_default: Option<bool>,
}

// Property level `"required": true` flags show up in some configurations, only the object
// level list decides which properties are required.
fn required_fields<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let v: Value = de::Deserialize::deserialize(deserializer)?;
    match v {
        Value::Array(_) => serde_json::from_value(v).map_err(|e| de::Error::custom(e.to_string())),
        Value::Bool(_) | Value::Null => Ok(vec![]),
        v => Err(de::Error::custom(format!(
            "invalid `required`, expected a list of property names, got `{v}`"
        ))),
    }
}

impl PropertySchema {
    /// The tag the walker dispatches on, ignoring a `"null"` union member.
    pub fn type_(&self) -> Option<&str> {
        match self.type_.as_ref()? {
            SchemaType::Single(ty) => Some(ty.as_str()),
            SchemaType::Union(types) => types.first().map(String::as_str),
        }
    }

    pub fn is_of_type(&self, type_: impl AsRef<str>) -> bool {
        self.type_() == Some(type_.as_ref())
    }

    pub fn is_relationship(&self) -> bool {
        self.is_of_type("relationship")
    }

    pub fn is_relationship_array(&self) -> bool {
        self.is_of_type("array")
            && self
                .items
                .as_deref()
                .map(PropertySchema::is_relationship)
                .unwrap_or_default()
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}
