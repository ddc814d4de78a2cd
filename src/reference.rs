//! Local `$ref` resolution with cycle detection

use indexmap::IndexSet;
use serde_json::Value;
use tracing::trace;

use crate::error::{Result, SchemaError};
use crate::node::SchemaNode;

/// Chain of `$ref` targets currently being expanded.
///
/// Targets are keyed by their normalized path (`$defs/Node`), so two refs
/// spelled `#/$defs/Node` and `#$defs/Node` are the same target. A fresh
/// instance belongs to exactly one top-level call.
#[derive(Debug, Default, Clone)]
pub struct VisitedRefs {
    trail: IndexSet<String>,
}

impl VisitedRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current trail length, to be handed back to [`rewind`](Self::rewind)
    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Forget every target entered after `mark`
    pub fn rewind(&mut self, mark: usize) {
        self.trail.truncate(mark);
    }

    pub fn contains(&self, target: &str) -> bool {
        self.trail.contains(target)
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    fn enter(&mut self, target: &str) -> Result<()> {
        if self.trail.contains(target) {
            let chain: Vec<&str> = self
                .trail
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(target))
                .map(|t| if t.is_empty() { "#" } else { t })
                .collect();
            return Err(SchemaError::CircularReference(chain.join(" -> ")));
        }
        self.trail.insert(target.to_string());
        Ok(())
    }
}

/// Normalized target path of a local reference: `#/$defs/A` becomes `$defs/A`
pub fn ref_target(reference: &str) -> Result<&str> {
    let path = reference
        .strip_prefix('#')
        .ok_or_else(|| SchemaError::NonLocalReference(reference.to_string()))?;
    Ok(path.strip_prefix('/').unwrap_or(path))
}

/// Resolve a local reference by walking `root` one mapping key at a time.
///
/// `#` and `#/` resolve to the root itself.
pub fn resolve_ref<'a>(root: &'a Value, reference: &str) -> Result<&'a Value> {
    let path = ref_target(reference)?;
    if path.is_empty() {
        return Ok(root);
    }

    let mut target = root;
    for segment in path.split('/') {
        target = target
            .as_object()
            .and_then(|map| map.get(segment))
            .ok_or_else(|| SchemaError::UnresolvedReference {
                reference: reference.to_string(),
                segment: segment.to_string(),
            })?;
    }
    Ok(target)
}

/// Follow `$ref` indirection until reaching a node without one.
///
/// Every target passed through is entered into `visited`; meeting a target
/// already on the trail fails with [`SchemaError::CircularReference`].
/// A node without `$ref` is returned unchanged.
pub fn deref_if_needed<'a>(
    root: &'a Value,
    node: &'a Value,
    visited: &mut VisitedRefs,
    at: &str,
) -> Result<&'a Value> {
    let mut current = node;
    while let Some(raw) = SchemaNode::view(current).and_then(|node| node.reference()) {
        let reference = raw
            .as_str()
            .ok_or_else(|| SchemaError::malformed(at, format!("`$ref` must be a string, found {}", raw)))?;
        visited.enter(ref_target(reference)?)?;
        trace!(reference, at, "following $ref");
        current = resolve_ref(root, reference)?;
    }
    Ok(current)
}
