//! Smart merge of configuration mappings
//!
//! Rules for a key present on both sides:
//!
//! 1. Values of different types: the incoming value wins
//! 2. Both mappings: merge recursively
//! 3. Both sequences: union, base first, duplicates dropped
//! 4. Both scalars (or null): the incoming value wins
//!
//! Sequence elements are compared, never merged. Two mappings inside a
//! sequence that differ in any key are both kept.

use serde_json::Value;

use super::layer::ConfigMap;

/// Merge `incoming` over `base`, returning a new mapping.
///
/// Neither argument is modified. Keys of `base` keep their position; keys that
/// only exist in `incoming` are appended in their own order.
pub fn merge(base: &ConfigMap, incoming: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    for (key, incoming_value) in incoming {
        let value = match merged.get(key) {
            Some(base_value) => merge_value(base_value, incoming_value),
            None => incoming_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

/// Merge a sequence of mappings left to right, starting from an empty mapping.
pub fn merge_all<'a>(layers: impl IntoIterator<Item = &'a ConfigMap>) -> ConfigMap {
    layers
        .into_iter()
        .fold(ConfigMap::new(), |acc, layer| merge(&acc, layer))
}

fn merge_value(base: &Value, incoming: &Value) -> Value {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            Value::Object(merge(base_map, incoming_map))
        }
        (Value::Array(base_items), Value::Array(incoming_items)) => {
            Value::Array(union(base_items, incoming_items))
        }
        // Scalars, null, and mismatched shapes
        (_, incoming) => incoming.clone(),
    }
}

fn union(base: &[Value], incoming: &[Value]) -> Vec<Value> {
    let mut items: Vec<Value> = Vec::with_capacity(base.len() + incoming.len());
    for item in base.iter().chain(incoming) {
        if !items.contains(item) {
            items.push(item.clone());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected a mapping, got {other}"),
        }
    }

    #[test]
    fn test_scalar_override() {
        let merged = merge(&map(json!({"timeout": 100})), &map(json!({"timeout": 200})));
        assert_eq!(merged["timeout"], 200);
    }

    #[test]
    fn test_nested_mappings_merge_key_wise() {
        let base = map(json!({"a": {"x": 1, "y": 2}}));
        let incoming = map(json!({"a": {"y": 3, "z": 4}}));

        let merged = merge(&base, &incoming);
        assert_eq!(Value::Object(merged), json!({"a": {"x": 1, "y": 3, "z": 4}}));
    }

    #[test]
    fn test_sequences_union_in_first_occurrence_order() {
        let merged = merge(&map(json!({"a": [1, 2]})), &map(json!({"a": [2, 3]})));
        assert_eq!(merged["a"], json!([1, 2, 3]));
    }

    #[test]
    fn test_union_drops_duplicates_already_in_base() {
        let merged = merge(
            &map(json!({"gems": ["rake", "rake", "rspec"]})),
            &map(json!({"gems": ["rspec", "rubocop", "rake"]})),
        );
        assert_eq!(merged["gems"], json!(["rake", "rspec", "rubocop"]));
    }

    #[test]
    fn test_mappings_inside_sequences_are_not_merged() {
        let merged = merge(
            &map(json!({"matrix": [{"ruby": "3.1", "env": "a"}]})),
            &map(json!({"matrix": [{"ruby": "3.1", "env": "b"}, {"ruby": "3.1", "env": "a"}]})),
        );
        assert_eq!(
            merged["matrix"],
            json!([{"ruby": "3.1", "env": "a"}, {"ruby": "3.1", "env": "b"}])
        );
    }

    #[test]
    fn test_type_mismatch_takes_incoming() {
        let merged = merge(&map(json!({"a": [1]})), &map(json!({"a": "x"})));
        assert_eq!(merged["a"], "x");

        let merged = merge(&map(json!({"a": {"k": 1}})), &map(json!({"a": [1]})));
        assert_eq!(merged["a"], json!([1]));

        let merged = merge(&map(json!({"a": 1})), &map(json!({"a": 1.5})));
        assert_eq!(merged["a"], 1.5);
    }

    #[test]
    fn test_null_and_booleans_take_incoming() {
        let merged = merge(&map(json!({"a": 1, "b": true})), &map(json!({"a": null, "b": false})));
        assert!(merged["a"].is_null());
        assert_eq!(merged["b"], false);

        let merged = merge(&map(json!({"b": true})), &map(json!({"b": true})));
        assert_eq!(merged["b"], true);
    }

    #[test]
    fn test_empty_mapping_is_identity() {
        let config = map(json!({"a": {"b": [1, 2]}, "c": "d"}));
        assert_eq!(merge(&config, &ConfigMap::new()), config);
        assert_eq!(merge(&ConfigMap::new(), &config), config);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let base = map(json!({"a": {"x": 1}, "list": [1]}));
        let incoming = map(json!({"a": {"y": 2}, "list": [2]}));
        let base_before = base.clone();
        let incoming_before = incoming.clone();

        let _ = merge(&base, &incoming);

        assert_eq!(base, base_before);
        assert_eq!(incoming, incoming_before);
    }

    #[test]
    fn test_key_order_base_first_then_new_keys() {
        let merged = merge(
            &map(json!({"zeta": 1, "alpha": 2})),
            &map(json!({"beta": 3, "zeta": 4})),
        );
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn test_merge_all_applies_layers_in_order() {
        let builtin = map(json!({"timeout": 100, "cache": {"mode": "off"}}));
        let host = map(json!({"timeout": 200}));
        let repo = map(json!({"cache": {"mode": "on"}}));
        let cli = map(json!({"timeout": 50}));

        let merged = merge_all([&builtin, &host, &repo, &cli]);

        assert_eq!(merged["timeout"], 50);
        assert_eq!(merged["cache"]["mode"], "on");
    }
}
