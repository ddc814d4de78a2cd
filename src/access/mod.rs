//! Access Keys
//!
//! An access key is a `.`-joined path describing one addressable leaf of a
//! schema: `indexes.*.field_name`, `bar.1.baz`, `title`. Segments are
//! property names, decimal tuple indices, or the `*` wildcard which
//! broadcasts over every element of an array (or every value of an object).
//!
//! Keys are derived once per schema by [`generate_access_keys`] and later
//! evaluated against any number of data instances by [`evaluate`], which
//! never looks at the schema again.

pub mod evaluate;
pub mod generate;

pub use evaluate::{evaluate, Extracted};
pub use generate::{generate_access_keys, generate_access_keys_with};

/// Segment separator inside an access key
pub const SEPARATOR: char = '.';

/// Broadcast segment
pub const WILDCARD: &str = "*";

/// Append `segment` to `path`, omitting the separator at the root
pub fn join_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", path, SEPARATOR, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "pets"), "pets");
        assert_eq!(join_path("pets", WILDCARD), "pets.*");
        assert_eq!(join_path("pets.*", "type"), "pets.*.type");
    }
}
