//! Access-key evaluation against data instances
//!
//! Evaluation has no error channel. Two distinct "nothing here" outcomes
//! are part of the contract and must stay distinguishable:
//!
//! - a missing (or null) mapping key yields [`Extracted::Absent`]
//! - an out-of-range (or null) array element yields an empty
//!   [`Extracted::Collection`]

use serde_json::Value;

use super::{SEPARATOR, WILDCARD};

/// Result of evaluating an access key
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<'a> {
    /// Nothing at this path
    Absent,
    /// A single addressed value, which may itself be a sequence or mapping
    Value(&'a Value),
    /// Values broadcast by a wildcard, flattened one level
    Collection(Vec<&'a Value>),
}

impl<'a> Extracted<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Extracted::Absent)
    }

    /// The single addressed value, if this is one
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Extracted::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// Owned JSON form: collections become arrays, absent becomes `None`
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Extracted::Absent => None,
            Extracted::Value(value) => Some((*value).clone()),
            Extracted::Collection(values) => {
                Some(Value::Array(values.iter().map(|v| (*v).clone()).collect()))
            }
        }
    }
}

/// Extract the value(s) `access_key` addresses in `data`.
pub fn evaluate<'a>(data: &'a Value, access_key: &str) -> Extracted<'a> {
    let segments: Vec<&str> = access_key.split(SEPARATOR).collect();
    evaluate_segments(data, &segments)
}

fn evaluate_segments<'a>(data: &'a Value, segments: &[&str]) -> Extracted<'a> {
    let mut current = data;

    for (i, segment) in segments.iter().copied().enumerate() {
        let rest = &segments[i + 1..];
        match current {
            Value::Array(elements) => {
                if segment == WILDCARD {
                    return broadcast(elements.iter(), rest);
                }
                let Ok(index) = segment.parse::<usize>() else {
                    return Extracted::Absent;
                };
                match elements.get(index) {
                    None | Some(Value::Null) => return Extracted::Collection(Vec::new()),
                    Some(element) => current = element,
                }
            }
            Value::Object(map) => {
                if segment == WILDCARD {
                    return broadcast(map.values(), rest);
                }
                match map.get(segment) {
                    None | Some(Value::Null) => return Extracted::Absent,
                    Some(value) => current = value,
                }
            }
            _ => return Extracted::Absent,
        }
    }

    Extracted::Value(current)
}

/// Evaluate `rest` under each value, splicing sequences and dropping nulls
fn broadcast<'a>(values: impl Iterator<Item = &'a Value>, rest: &[&str]) -> Extracted<'a> {
    let mut collected = Vec::new();
    for value in values {
        match evaluate_segments(value, rest) {
            Extracted::Absent | Extracted::Value(Value::Null) => {}
            Extracted::Value(Value::Array(items)) => collected.extend(items.iter()),
            Extracted::Value(single) => collected.push(single),
            Extracted::Collection(items) => collected.extend(items),
        }
    }
    Extracted::Collection(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Value {
        json!({
            "name": "John",
            "age": 30,
            "pets": [
                {"name": "Fluffy", "type": "cat"},
                {"name": "Fido", "type": "dog"}
            ],
            "favoriteFoods": {
                "breakfast": "pancakes",
                "lunch": "sandwich",
                "dinner": "pizza"
            }
        })
    }

    #[test]
    fn test_object_key() {
        let data = person();
        assert_eq!(evaluate(&data, "name"), Extracted::Value(&json!("John")));
        assert_eq!(evaluate(&data, "favoriteFoods.lunch"), Extracted::Value(&json!("sandwich")));
    }

    #[test]
    fn test_array_index() {
        let data = person();
        assert_eq!(evaluate(&data, "pets.1.name"), Extracted::Value(&json!("Fido")));

        let list = json!([{"name": "John"}, {"name": "Mary"}]);
        assert_eq!(evaluate(&list, "1.name"), Extracted::Value(&json!("Mary")));
    }

    #[test]
    fn test_wildcard_over_array() {
        let data = person();
        assert_eq!(
            evaluate(&data, "pets.*.type").to_value(),
            Some(json!(["cat", "dog"]))
        );
    }

    #[test]
    fn test_wildcard_over_object_values() {
        let data = person();
        assert_eq!(
            evaluate(&data, "favoriteFoods.*").to_value(),
            Some(json!(["pancakes", "sandwich", "pizza"]))
        );
    }

    #[test]
    fn test_object_wildcard_flattens_following_segments() {
        let data = json!({"groups": {"x": {"m": [1, 2]}, "y": {"m": [3]}}});
        assert_eq!(
            evaluate(&data, "groups.*.m"),
            Extracted::Collection(vec![&json!(1), &json!(2), &json!(3)])
        );
    }

    #[test]
    fn test_wildcard_over_empty_container() {
        assert_eq!(
            evaluate(&json!({"pets": []}), "pets.*.type"),
            Extracted::Collection(Vec::new())
        );
        assert_eq!(evaluate(&json!({"m": {}}), "m.*"), Extracted::Collection(Vec::new()));
    }

    #[test]
    fn test_wildcard_with_no_matches_is_empty_collection() {
        let data = person();
        assert_eq!(evaluate(&data, "pets.*.color"), Extracted::Collection(Vec::new()));
    }

    #[test]
    fn test_out_of_range_differs_from_missing_key() {
        let data = person();
        assert_eq!(evaluate(&data, "pets.2.type"), Extracted::Collection(Vec::new()));

        let small = json!({"a": 1});
        assert_eq!(evaluate(&small, "b"), Extracted::Absent);
        assert_ne!(evaluate(&small, "b"), Extracted::Collection(Vec::new()));
    }

    #[test]
    fn test_null_values() {
        let data = json!({"a": null, "list": [null, {"x": 1}]});
        assert!(evaluate(&data, "a").is_absent());
        assert_eq!(evaluate(&data, "list.0.x"), Extracted::Collection(Vec::new()));
        assert_eq!(evaluate(&data, "list.*").to_value(), Some(json!([{"x": 1}])));
    }

    #[test]
    fn test_nested_wildcards_flatten() {
        let data = json!({
            "groups": [
                {"members": [{"id": 1}, {"id": 2}]},
                {"members": []},
                {"members": [{"id": 3}]}
            ]
        });
        assert_eq!(
            evaluate(&data, "groups.*.members.*.id").to_value(),
            Some(json!([1, 2, 3]))
        );
    }

    #[test]
    fn test_wildcard_splices_array_leaves() {
        let data = json!({"rows": [{"tags": ["a", "b"]}, {"tags": ["c"]}]});
        assert_eq!(evaluate(&data, "rows.*.tags").to_value(), Some(json!(["a", "b", "c"])));
    }

    #[test]
    fn test_scalar_with_remaining_segments() {
        let data = person();
        assert!(evaluate(&data, "name.first").is_absent());
        assert!(evaluate(&data, "pets.first").is_absent());
    }

    #[test]
    fn test_container_result_is_returned_as_is() {
        let data = person();
        assert_eq!(evaluate(&data, "pets.0").as_value(), Some(&json!({"name": "Fluffy", "type": "cat"})));
    }
}
