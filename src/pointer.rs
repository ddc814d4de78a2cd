//! Schema-flavored JSON Pointer navigation
//!
//! A pointer walks the *schema* tree, not a data document: on an object the
//! segment names a key of `properties`, on a homogeneous array the segment is
//! consumed without inspection (every element shares the one `items`
//! schema), and on a positional array it must be an index into `items`.
//! `$ref` nodes are followed transparently after every step.
//!
//! `~0`/`~1` escapes and the `-` append token are not supported.

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::node::{Items, SchemaNode};
use crate::reference::{deref_if_needed, VisitedRefs};
use crate::schema::SchemaType;

/// Resolve `pointer` against the root of `document`.
///
/// `#` and `/` denote the root itself; an empty pointer is invalid.
pub fn resolve_pointer<'a>(document: &'a Value, pointer: &str) -> Result<&'a Value> {
    resolve_pointer_from(document, document, pointer)
}

/// Resolve `pointer` starting at `start`, a node inside `document`.
///
/// `document` stays the base for every `$ref` met on the way.
pub fn resolve_pointer_from<'a>(
    document: &'a Value,
    start: &'a Value,
    pointer: &str,
) -> Result<&'a Value> {
    if pointer.is_empty() {
        return Err(SchemaError::invalid_pointer(pointer, "empty pointer"));
    }
    if pointer == "#" || pointer == "/" {
        return Ok(start);
    }

    let path = pointer.strip_prefix('#').unwrap_or(pointer);
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Err(SchemaError::invalid_pointer(pointer, "no segments after prefix"));
    }

    let mut visited = VisitedRefs::new();
    let mut current = deref_if_needed(document, start, &mut visited, "#")?;
    let mut at = String::new();

    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(SchemaError::invalid_pointer(pointer, "empty segment"));
        }

        let here = location(&at);
        let node = SchemaNode::new(current, here)?;
        let next = match node.schema_type(here)? {
            SchemaType::Object => {
                let properties = node
                    .properties()
                    .ok_or_else(|| SchemaError::malformed(here, "object without `properties`"))?;
                properties
                    .get(segment)
                    .ok_or_else(|| SchemaError::PropertyNotFound {
                        property: segment.to_string(),
                        at: here.to_string(),
                    })?
            }
            SchemaType::Array => match node.items() {
                Some(Items::Homogeneous(item)) => {
                    if segment == "-" {
                        return Err(SchemaError::invalid_pointer(
                            pointer,
                            "the `-` append token is not supported",
                        ));
                    }
                    item
                }
                Some(Items::Positional(items)) => {
                    let index: usize = segment.parse().map_err(|_| {
                        SchemaError::invalid_pointer(
                            pointer,
                            format!("segment {:?} is not a tuple index", segment),
                        )
                    })?;
                    items.get(index).ok_or_else(|| SchemaError::IndexOutOfRange {
                        index,
                        len: items.len(),
                        at: here.to_string(),
                    })?
                }
                None => return Err(SchemaError::malformed(here, "array without `items`")),
            },
            other => {
                return Err(SchemaError::NotAContainer {
                    segment: segment.to_string(),
                    schema_type: other.to_string(),
                })
            }
        };

        at.push('/');
        at.push_str(segment);

        // Each step guards only its own $ref chain; reaching the same
        // definition again on a later step is ordinary recursion.
        visited.rewind(0);
        current = deref_if_needed(document, next, &mut visited, &at)?;
        SchemaNode::new(current, &at)?;
    }

    debug!(pointer, "resolved schema pointer");
    Ok(current)
}

fn location(at: &str) -> &str {
    if at.is_empty() {
        "#"
    } else {
        at
    }
}
