//! Schema Access
//!
//! Addressing for JSON Schema documents and the data that conforms to them.
//!
//! ## Features
//!
//! - **Pointer Navigation**: `/pets/items/name` walks `properties` and `items`
//!   implicitly, following local `$ref`s as if they were inlined
//! - **Cycle Detection**: reference chains that reach themselves fail instead of looping
//! - **Access Keys**: every addressable leaf of a schema as a flat,
//!   wildcard-aware path (`pets.*.name`)
//! - **Evaluation**: pull single values or broadcast collections out of data
//!   with those keys
//!
//! ## Example
//!
//! ```
//! use schema_access::{evaluate, SchemaHelper};
//! use serde_json::json;
//!
//! let helper = SchemaHelper::new(json!({
//!     "type": "object",
//!     "properties": {
//!         "pets": {
//!             "type": "array",
//!             "items": {"type": "object", "properties": {"type": {"type": "string"}}}
//!         }
//!     }
//! }));
//! assert_eq!(helper.access_keys().unwrap(), ["pets.*.type"]);
//!
//! let data = json!({"pets": [{"type": "cat"}, {"type": "dog"}]});
//! assert_eq!(evaluate(&data, "pets.*.type").to_value(), Some(json!(["cat", "dog"])));
//! ```

pub mod access;
pub mod config;
pub mod error;
pub mod helper;
pub mod node;
pub mod pointer;
pub mod reference;
pub mod schema;

pub use access::{evaluate, generate_access_keys, generate_access_keys_with, Extracted};
pub use config::{EngineConfig, OutputFormat, SchemaAccessConfig};
pub use error::{Result, SchemaError};
pub use helper::SchemaHelper;
pub use node::{Items, SchemaNode, RAW_JSON_TREE};
pub use pointer::{resolve_pointer, resolve_pointer_from};
pub use reference::{deref_if_needed, resolve_ref, VisitedRefs};
pub use schema::{Schema, SchemaItems, SchemaType, JSON_SCHEMA_VERSION};
