//! Borrowed view over a schema node in a generic document tree

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::schema::SchemaType;

/// Widget value marking an object as an opaque leaf
pub const RAW_JSON_TREE: &str = "RawJsonTree";

/// Shape of an array node's `items` keyword
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Items<'a> {
    /// Every element shares one schema
    Homogeneous(&'a Value),
    /// Element `i` is described by `items[i]`
    Positional(&'a [Value]),
}

/// A mapping-valued schema node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemaNode<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> SchemaNode<'a> {
    /// Wrap a value, failing if it is not a mapping. `at` locates the node in errors.
    pub fn new(value: &'a Value, at: &str) -> Result<Self> {
        Self::view(value).ok_or_else(|| {
            SchemaError::malformed(
                at,
                format!("schema node must be a mapping, found {}", kind_of(value)),
            )
        })
    }

    /// Wrap a value if it is a mapping
    pub fn view(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// The `type` keyword; a node reached during traversal must carry one
    pub fn schema_type(&self, at: &str) -> Result<SchemaType> {
        let raw = self
            .map
            .get("type")
            .ok_or_else(|| SchemaError::malformed(at, "missing `type`"))?;
        let name = raw
            .as_str()
            .ok_or_else(|| SchemaError::malformed(at, format!("`type` must be a string, found {}", raw)))?;
        name.parse().map_err(|reason: String| SchemaError::malformed(at, reason))
    }

    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.map.get("properties").and_then(Value::as_object)
    }

    pub fn items(&self) -> Option<Items<'a>> {
        match self.map.get("items")? {
            Value::Array(items) => Some(Items::Positional(items.as_slice())),
            single @ Value::Object(_) => Some(Items::Homogeneous(single)),
            _ => None,
        }
    }

    /// Raw `$ref` value, if the keyword is present
    pub fn reference(&self) -> Option<&'a Value> {
        self.map.get("$ref")
    }

    pub fn widget(&self) -> Option<&'a str> {
        self.map.get("widget").and_then(Value::as_str)
    }

    /// Whether this node's widget is one of `opaque_widgets`
    pub fn is_opaque(&self, opaque_widgets: &[String]) -> bool {
        self.widget()
            .map(|w| opaque_widgets.iter().any(|o| o == w))
            .unwrap_or(false)
    }
}

/// Short name of a value's JSON kind, for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_mapping() {
        let value = json!(["not", "a", "node"]);
        let err = SchemaNode::new(&value, "/x").unwrap_err();
        assert!(matches!(err, SchemaError::SchemaMalformed { .. }));
    }

    #[test]
    fn test_schema_type() {
        let value = json!({"type": "integer"});
        let node = SchemaNode::new(&value, "").unwrap();
        assert_eq!(node.schema_type("").unwrap(), SchemaType::Integer);

        let untyped = json!({"title": "nothing"});
        let node = SchemaNode::new(&untyped, "/a").unwrap();
        match node.schema_type("/a") {
            Err(SchemaError::SchemaMalformed { at, .. }) => assert_eq!(at, "/a"),
            other => panic!("Expected SchemaMalformed, got {:?}", other),
        }
    }

    #[test]
    fn test_items_shapes() {
        let homogeneous = json!({"type": "array", "items": {"type": "string"}});
        let node = SchemaNode::new(&homogeneous, "").unwrap();
        assert_eq!(node.items(), Some(Items::Homogeneous(&json!({"type": "string"}))));

        let positional = json!({"type": "array", "items": [{"type": "number"}]});
        let node = SchemaNode::new(&positional, "").unwrap();
        assert!(matches!(node.items(), Some(Items::Positional(items)) if items.len() == 1));

        let missing = json!({"type": "array"});
        assert_eq!(SchemaNode::new(&missing, "").unwrap().items(), None);
    }

    #[test]
    fn test_reference_keyword() {
        let value = json!({"$ref": "#/$defs/Pet"});
        let node = SchemaNode::view(&value).unwrap();
        assert_eq!(node.reference(), Some(&json!("#/$defs/Pet")));
        assert!(SchemaNode::view(&json!("scalar")).is_none());
    }

    #[test]
    fn test_opaque_widget() {
        let value = json!({"type": "object", "widget": "RawJsonTree"});
        let node = SchemaNode::new(&value, "").unwrap();
        assert!(node.is_opaque(&[RAW_JSON_TREE.to_string()]));
        assert!(!node.is_opaque(&["CodeEditor".to_string()]));
    }
}
