//! Typed schema model and shortcut constructors
//!
//! The addressing engine works on the generic `serde_json::Value` tree, but
//! callers building schemas in code can use [`Schema`] and hand it to
//! [`SchemaHelper::from_serializable`](crate::SchemaHelper::from_serializable).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::node::RAW_JSON_TREE;

/// JSON Schema dialect written into `$schema`
pub const JSON_SCHEMA_VERSION: &str = "https://json-schema.org/draft/2020-12/schema";

/// The `type` keyword of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl SchemaType {
    /// Keyword value as it appears in a document
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Null => "null",
        }
    }

    /// Objects and arrays can be descended into
    pub fn is_container(&self) -> bool {
        matches!(self, SchemaType::Object | SchemaType::Array)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(SchemaType::Object),
            "array" => Ok(SchemaType::Array),
            "string" => Ok(SchemaType::String),
            "number" => Ok(SchemaType::Number),
            "integer" => Ok(SchemaType::Integer),
            "boolean" => Ok(SchemaType::Boolean),
            "null" => Ok(SchemaType::Null),
            other => Err(format!("unknown schema type {:?}", other)),
        }
    }
}

/// Array element schemas: one shared schema, or one schema per position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaItems {
    Positional(Vec<Schema>),
    Single(Box<Schema>),
}

/// A single schema document or subschema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "$defs", default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(rename = "additionalProperties", default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Value>,

    /// UI widget hint; `RawJsonTree` marks an opaque leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta_data: Map<String, Value>,

    /// Keywords not modelled above
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Schema {
    /// Create a schema of the given type; objects start with empty properties
    pub fn new(schema_type: SchemaType) -> Self {
        let properties = (schema_type == SchemaType::Object).then(IndexMap::new);
        Self {
            schema_type: Some(schema_type),
            properties,
            ..Self::default()
        }
    }

    /// Create a root document of the given type, declaring [`JSON_SCHEMA_VERSION`]
    pub fn document(schema_type: SchemaType) -> Self {
        Self {
            version: Some(JSON_SCHEMA_VERSION.to_string()),
            ..Schema::new(schema_type)
        }
    }

    /// Create a homogeneous array whose elements are of `item_type`
    pub fn array_of(item_type: SchemaType) -> Self {
        Self {
            items: Some(SchemaItems::Single(Box::new(Schema::new(item_type)))),
            ..Schema::new(SchemaType::Array)
        }
    }

    /// Create a positional (tuple) array
    pub fn tuple(items: Vec<Schema>) -> Self {
        Self {
            items: Some(SchemaItems::Positional(items)),
            ..Schema::new(SchemaType::Array)
        }
    }

    /// Create a `$ref` node pointing at `target` (e.g. `#/$defs/Address`)
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            reference: Some(target.into()),
            ..Self::default()
        }
    }

    /// Create an object that is addressed as a single unit
    pub fn opaque() -> Self {
        Self {
            widget: Some(RAW_JSON_TREE.to_string()),
            ..Schema::new(SchemaType::Object)
        }
    }

    /// Add a property, turning a bare schema into an object if needed
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), schema);
        self
    }

    /// Add a `$defs` entry
    pub fn with_definition(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.definitions.insert(name.into(), schema);
        self
    }

    /// Set the array element schema
    pub fn with_items(mut self, items: Schema) -> Self {
        self.items = Some(SchemaItems::Single(Box::new(items)));
        self
    }

    pub fn is_object(&self) -> bool {
        self.schema_type == Some(SchemaType::Object)
    }

    pub fn is_array(&self) -> bool {
        self.schema_type == Some(SchemaType::Array)
    }

    pub fn is_null(&self) -> bool {
        self.schema_type == Some(SchemaType::Null)
    }

    /// Objects, arrays and null spread into more than one plain value
    pub fn is_spread(&self) -> bool {
        !self.is_normal()
    }

    /// A plain scalar schema
    pub fn is_normal(&self) -> bool {
        !self.is_object() && !self.is_array() && !self.is_null()
    }

    /// Whether the widget marks this node as an opaque leaf
    pub fn is_opaque(&self) -> bool {
        self.widget.as_deref() == Some(RAW_JSON_TREE)
    }

    /// Attach caller metadata under `meta_data`
    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta_data.insert(key.into(), value.into());
    }

    pub fn get_meta(&self, key: &str) -> Option<&Value> {
        self.meta_data.get(key)
    }
}
