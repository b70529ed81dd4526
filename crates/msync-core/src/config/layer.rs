//! Layer types
//!
//! A layer maps target names to partial configuration mappings. Layers are
//! validated once when they are built, so resolution can assume every entry
//! is a mapping.

use serde_json::Value;

use crate::{Error, Result};

/// A configuration mapping: string keys to arbitrary configuration values.
pub type ConfigMap = serde_json::Map<String, Value>;

/// Conventional key of the global-defaults entry in a defaults file.
pub const DEFAULT_GLOBAL_KEY: &str = ":global";

/// The reserved key naming the global-defaults entry.
///
/// The loader reads global defaults from this key and the resolver skips it
/// when enumerating targets, so both must be handed the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalKey(String);

impl GlobalKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` is the reserved key rather than a target.
    pub fn matches(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl Default for GlobalKey {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_KEY)
    }
}

impl std::fmt::Display for GlobalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A target-keyed layer of partial configurations.
///
/// Target names keep the order in which they were inserted (file order when
/// loaded from disk).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    /// Every value is a `Value::Object`.
    entries: ConfigMap,
}

impl Layer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from a parsed document.
    ///
    /// `name` identifies the layer in error messages. The document must be a
    /// mapping (or null, for an empty file) whose entries are mappings; a null
    /// entry, as written by a bare `target:` line in YAML, counts as an empty
    /// mapping.
    pub fn from_value(name: &str, value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Self::from_map(name, map),
            other => Err(Error::invalid_layer(
                name,
                format!("expected a mapping of targets, found {}", kind(&other)),
            )),
        }
    }

    /// Build a layer from a mapping of target names to configurations.
    pub fn from_map(name: &str, map: ConfigMap) -> Result<Self> {
        let mut entries = ConfigMap::new();
        for (target, config) in map {
            let config = match config {
                Value::Object(config) => config,
                Value::Null => ConfigMap::new(),
                other => {
                    return Err(Error::invalid_layer(
                        name,
                        format!(
                            "entry '{}' is {}, expected a mapping",
                            target,
                            kind(&other)
                        ),
                    ));
                }
            };
            entries.insert(target, Value::Object(config));
        }
        Ok(Self { entries })
    }

    /// Add or replace the configuration for `target`.
    pub fn insert(&mut self, target: impl Into<String>, config: ConfigMap) {
        self.entries.insert(target.into(), Value::Object(config));
    }

    /// The partial configuration for `target`, if the layer has one.
    pub fn get(&self, target: &str) -> Option<&ConfigMap> {
        self.entries.get(target).and_then(Value::as_object)
    }

    /// Target names in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ConfigMap)> for Layer {
    fn from_iter<I: IntoIterator<Item = (String, ConfigMap)>>(iter: I) -> Self {
        let mut layer = Self::new();
        for (target, config) in iter {
            layer.insert(target, config);
        }
        layer
    }
}

/// The five sources a resolver merges, lowest priority first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layers {
    /// Applies to every target
    pub global_defaults: ConfigMap,

    /// Per-target defaults
    pub defaults: Layer,

    /// Per-target module defaults, overriding `defaults`
    pub module_defaults: Layer,

    /// Per-target module configuration, overriding `module_defaults`
    pub module_configs: Layer,

    /// Applies to every target, overriding everything else
    pub additional_settings: ConfigMap,
}

impl Layers {
    pub fn new(
        global_defaults: ConfigMap,
        defaults: Layer,
        module_defaults: Layer,
        module_configs: Layer,
        additional_settings: ConfigMap,
    ) -> Self {
        Self {
            global_defaults,
            defaults,
            module_defaults,
            module_configs,
            additional_settings,
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
