//! Schema helper
//!
//! Owns one schema document and exposes every addressing operation against it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::access::{self, Extracted};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::pointer;
use crate::reference;

/// A schema document plus its memoized access keys.
///
/// Visited-reference state is allocated per call, so one helper can be shared
/// across threads.
#[derive(Debug)]
pub struct SchemaHelper {
    raw: Value,
    config: EngineConfig,
    access_keys: OnceLock<Vec<String>>,
}

impl SchemaHelper {
    /// Wrap an already-decoded schema document
    pub fn new(document: Value) -> Self {
        Self::with_config(document, EngineConfig::default())
    }

    pub fn with_config(document: Value, config: EngineConfig) -> Self {
        Self {
            raw: document,
            config,
            access_keys: OnceLock::new(),
        }
    }

    /// Build from any serializable schema, e.g. a typed [`Schema`](crate::Schema)
    pub fn from_serializable<T: Serialize>(input: &T) -> Result<Self> {
        Ok(Self::new(serde_json::to_value(input)?))
    }

    /// Parse a schema document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Read and parse a schema document from disk
    pub fn open(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::with_config(serde_json::from_str(&content)?, config))
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Convert the document back into a typed value
    pub fn to_struct<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.raw.clone())?)
    }

    /// Resolve a local `$ref` against this document
    pub fn resolve_ref(&self, reference: &str) -> Result<&Value> {
        reference::resolve_ref(&self.raw, reference)
    }

    /// Navigate a schema pointer from the document root
    pub fn resolve_pointer(&self, pointer: &str) -> Result<&Value> {
        pointer::resolve_pointer(&self.raw, pointer)
    }

    /// Access keys of the document, computed on first use
    pub fn access_keys(&self) -> Result<&[String]> {
        if let Some(keys) = self.access_keys.get() {
            return Ok(keys);
        }
        let keys = access::generate_access_keys_with(&self.raw, &self.config.opaque_widgets)?;
        Ok(self.access_keys.get_or_init(|| keys))
    }

    /// Evaluate an access key against a data instance
    pub fn evaluate<'a>(&self, data: &'a Value, access_key: &str) -> Extracted<'a> {
        access::evaluate(data, access_key)
    }

    /// Evaluate every access key against `data`, skipping absent results
    pub fn extract_all<'a>(&self, data: &'a Value) -> Result<Vec<(&str, Extracted<'a>)>> {
        Ok(self
            .access_keys()?
            .iter()
            .map(|key| (key.as_str(), access::evaluate(data, key)))
            .filter(|(_, extracted)| !extracted.is_absent())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, SchemaType};
    use crate::SchemaError;
    use serde_json::json;

    #[test]
    fn test_access_keys_are_memoized() {
        let helper = SchemaHelper::new(json!({
            "type": "object",
            "properties": {"a": {"type": "string"}}
        }));
        let first = helper.access_keys().unwrap().as_ptr();
        let second = helper.access_keys().unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_generation_is_not_cached() {
        let helper = SchemaHelper::new(json!({
            "type": "object",
            "properties": {"a": {"$ref": "#/$defs/Missing"}}
        }));
        assert!(matches!(
            helper.access_keys(),
            Err(SchemaError::UnresolvedReference { .. })
        ));
        assert!(helper.access_keys().is_err());
    }

    #[test]
    fn test_repeated_calls_do_not_leak_visited_state() {
        let helper = SchemaHelper::new(json!({
            "$defs": {"Name": {"type": "string"}},
            "type": "object",
            "properties": {"name": {"$ref": "#/$defs/Name"}}
        }));
        for _ in 0..3 {
            assert_eq!(helper.resolve_pointer("/name").unwrap(), &json!({"type": "string"}));
            assert_eq!(helper.resolve_ref("#/$defs/Name").unwrap(), &json!({"type": "string"}));
        }
    }

    #[test]
    fn test_typed_schema_round_trip() {
        let schema = Schema::new(SchemaType::Object)
            .with_property("title", Schema::new(SchemaType::String))
            .with_property("tags", Schema::array_of(SchemaType::String));
        let helper = SchemaHelper::from_serializable(&schema).unwrap();
        assert_eq!(helper.access_keys().unwrap(), ["title", "tags"]);
        let parsed = SchemaHelper::from_json_str(&helper.raw().to_string()).unwrap();
        assert_eq!(parsed.raw(), helper.raw());

        let back: Schema = helper.to_struct().unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_open_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"type": "object", "properties": {"id": {"type": "integer"}}}"#).unwrap();

        let helper = SchemaHelper::open(&path, EngineConfig::default()).unwrap();
        assert_eq!(helper.access_keys().unwrap(), ["id"]);

        let missing = SchemaHelper::open(dir.path().join("missing.json"), EngineConfig::default());
        assert!(matches!(missing, Err(SchemaError::Io(_))));
    }

    #[test]
    fn test_custom_opaque_widgets() {
        let config = EngineConfig {
            opaque_widgets: vec!["Editor".to_string()],
        };
        let helper = SchemaHelper::with_config(
            json!({
                "type": "object",
                "properties": {
                    "doc": {"type": "object", "widget": "Editor", "properties": {"x": {"type": "string"}}}
                }
            }),
            config,
        );
        assert_eq!(helper.access_keys().unwrap(), ["doc"]);
    }

    #[test]
    fn test_extract_all_skips_absent() {
        let helper = SchemaHelper::new(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "nick": {"type": "string"}
            }
        }));
        let data = json!({"name": "Ada"});
        let extracted = helper.extract_all(&data).unwrap();
        assert_eq!(extracted, vec![("name", Extracted::Value(&json!("Ada")))]);
    }
}
