//! Access-key derivation from a schema tree

use serde_json::Value;
use tracing::{debug, trace};

use super::{join_path, WILDCARD};
use crate::error::Result;
use crate::node::{Items, SchemaNode, RAW_JSON_TREE};
use crate::reference::{deref_if_needed, VisitedRefs};
use crate::schema::SchemaType;

/// Flatten `document` into one access key per addressable leaf, treating
/// `RawJsonTree` objects as opaque.
pub fn generate_access_keys(document: &Value) -> Result<Vec<String>> {
    generate_access_keys_with(document, &[RAW_JSON_TREE.to_string()])
}

/// Like [`generate_access_keys`], with a caller-chosen set of widget values
/// that mark opaque leaves.
///
/// Keys are emitted in `properties` enumeration order. A schema whose
/// definitions reach themselves (`Node.children: [Node]`) describes
/// infinitely many leaves and fails with
/// [`SchemaError::CircularReference`](crate::SchemaError::CircularReference).
pub fn generate_access_keys_with(document: &Value, opaque_widgets: &[String]) -> Result<Vec<String>> {
    let mut generator = Generator {
        document,
        opaque_widgets,
        visited: VisitedRefs::new(),
        keys: Vec::new(),
    };
    generator.visit(document, "")?;

    let mut keys = generator.keys;
    // A scalar or opaque root addresses nothing below itself
    if keys.first().map(String::is_empty).unwrap_or(false) {
        keys.remove(0);
    }
    debug!(count = keys.len(), "generated access keys");
    Ok(keys)
}

struct Generator<'a> {
    document: &'a Value,
    opaque_widgets: &'a [String],
    visited: VisitedRefs,
    keys: Vec<String>,
}

impl<'a> Generator<'a> {
    fn visit(&mut self, node: &'a Value, path: &str) -> Result<()> {
        let mark = self.visited.mark();
        let at = if path.is_empty() { "<root>" } else { path };

        let resolved = deref_if_needed(self.document, node, &mut self.visited, at)?;
        let schema = SchemaNode::new(resolved, at)?;

        match schema.schema_type(at)? {
            SchemaType::Object => {
                if schema.is_opaque(self.opaque_widgets) {
                    self.emit(path);
                } else if let Some(properties) = schema.properties() {
                    for (name, child) in properties {
                        self.visit(child, &join_path(path, name))?;
                    }
                } else {
                    debug!(at, "object without properties has no access keys");
                }
            }
            SchemaType::Array => match schema.items() {
                Some(Items::Positional(items)) => {
                    for (index, child) in items.iter().enumerate() {
                        self.visit(child, &join_path(path, &index.to_string()))?;
                    }
                }
                Some(Items::Homogeneous(item)) => {
                    let element = deref_if_needed(self.document, item, &mut self.visited, at)?;
                    let element_type = SchemaNode::new(element, at)?.schema_type(at)?;
                    if element_type.is_container() {
                        // At the root this yields `*.id`, not `.*.id`: a leading
                        // separator would produce keys `evaluate` cannot follow
                        self.visit(element, &join_path(path, WILDCARD))?;
                    } else {
                        // Arrays of scalars are one addressable unit
                        self.emit(path);
                    }
                }
                None => debug!(at, "array without items has no access keys"),
            },
            _ => self.emit(path),
        }

        self.visited.rewind(mark);
        Ok(())
    }

    fn emit(&mut self, path: &str) {
        trace!(key = path, "access key");
        self.keys.push(path.to_string());
    }
}
