//! `KEY=VALUE` additional settings
//!
//! Overrides arrive as dotted keys (`travis.rubies=[3.2]`) and become the
//! additional-settings layer. Values are read as YAML so `true`, `3` and
//! `[a, b]` keep their types; anything else, including text YAML would reject
//! or read as a block mapping (`note: see docs`), is a plain string.

use serde_json::Value;

use super::layer::ConfigMap;
use super::merge::merge;
use crate::{Error, Result};

/// Split `entry` into its key path and parsed value.
pub fn parse_override(entry: &str) -> Result<(Vec<String>, Value)> {
    let (key, raw) = entry
        .split_once('=')
        .ok_or_else(|| Error::invalid_override(entry, "expected KEY=VALUE"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_override(entry, "key is empty"));
    }

    let path: Vec<String> = key.split('.').map(|s| s.trim().to_string()).collect();
    if path.iter().any(String::is_empty) {
        return Err(Error::invalid_override(entry, "key has an empty segment"));
    }

    Ok((path, parse_value(raw.trim())))
}

/// Typed value for `raw`, or `raw` itself as a string.
///
/// Collections are only taken from flow syntax (`[..]`, `{..}`), and null
/// only from an explicit null literal.
fn parse_value(raw: &str) -> Value {
    let flow = raw.starts_with('[') || raw.starts_with('{');
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Array(_) | Value::Object(_)) if !flow => Value::String(raw.to_string()),
        Ok(Value::Null) if !matches!(raw, "~" | "null" | "Null" | "NULL") => {
            Value::String(raw.to_string())
        }
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "Setting is not YAML, keeping it as a string");
            Value::String(raw.to_string())
        }
    }
}

/// Build the additional-settings mapping from a list of overrides.
///
/// Entries are smart-merged in order, so two overrides of the same sequence
/// accumulate while a repeated scalar keeps the last value.
pub fn overrides_to_config<S: AsRef<str>>(entries: &[S]) -> Result<ConfigMap> {
    let mut config = ConfigMap::new();
    for entry in entries {
        let (path, value) = parse_override(entry.as_ref())?;
        tracing::debug!(key = %path.join("."), %value, "Additional setting");
        config = merge(&config, &nest(&path, value));
    }
    Ok(config)
}

/// Wrap `value` in one mapping per key segment, innermost last.
fn nest(path: &[String], value: Value) -> ConfigMap {
    let mut current = value;
    for segment in path.iter().rev() {
        let mut map = ConfigMap::new();
        map.insert(segment.clone(), current);
        current = Value::Object(map);
    }
    match current {
        Value::Object(map) => map,
        // `parse_override` guarantees at least one segment
        _ => ConfigMap::new(),
    }
}
