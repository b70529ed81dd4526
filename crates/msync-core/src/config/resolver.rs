//! Per-target resolution and managed/unmanaged classification
//!
//! The `ConfigResolver` owns the five layers and answers two questions for
//! any target name: what is its effective configuration, and should it be
//! acted upon at all.

use std::collections::{HashMap, HashSet};
use std::iter;

use msync_fs::target_ancestors;
use serde::Serialize;
use serde_json::Value;

use super::layer::{ConfigMap, GlobalKey, Layer, Layers};
use super::merge::merge;

/// Key that excludes a target (and everything below it) from management.
pub const UNMANAGED_KEY: &str = "unmanaged";

/// Candidate targets split by whether they are managed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetPartition {
    /// Targets to act upon, in candidate order
    pub managed: Vec<String>,

    /// Excluded targets, in candidate order
    pub unmanaged: Vec<String>,
}

/// Resolves configuration for targets by merging layers in priority order
///
/// Priority, lowest first:
/// 1. Global defaults
/// 2. Defaults for the target
/// 3. Module defaults for the target
/// 4. Module configuration for the target
/// 5. Additional settings
///
/// The resolver never mutates its layers, so a single instance can be shared
/// across threads and queried any number of times.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    layers: Layers,

    /// Reserved key that is never treated as a target
    global_key: GlobalKey,
}

impl ConfigResolver {
    /// Create a resolver over `layers`.
    ///
    /// `global_key` must be the key the layers were loaded with; it is
    /// excluded from every target enumeration.
    pub fn new(layers: Layers, global_key: GlobalKey) -> Self {
        Self { layers, global_key }
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    pub fn global_key(&self) -> &GlobalKey {
        &self.global_key
    }

    /// The partial configuration for `target_name` in `layer`, or an empty
    /// mapping when the layer has no entry for it.
    pub fn lookup_config(layer: &Layer, target_name: &str) -> ConfigMap {
        layer.get(target_name).cloned().unwrap_or_default()
    }

    /// Resolve the full configuration for `target_name`.
    ///
    /// Merges global defaults, then the target's entries in defaults, module
    /// defaults and module configs, then the additional settings. Each step
    /// uses the smart merge, so later layers override scalars while nested
    /// mappings and sequences accumulate.
    pub fn build_file_configs(&self, target_name: &str) -> ConfigMap {
        let empty = ConfigMap::new();
        let per_target = [
            &self.layers.defaults,
            &self.layers.module_defaults,
            &self.layers.module_configs,
        ]
        .map(|layer| layer.get(target_name).unwrap_or(&empty));

        per_target
            .into_iter()
            .chain(iter::once(&self.layers.additional_settings))
            .fold(self.layers.global_defaults.clone(), |resolved, layer| {
                merge(&resolved, layer)
            })
    }

    /// Whether `target_name` should be acted upon.
    ///
    /// A target is unmanaged when its own resolved configuration, or that of
    /// any directory above it, has a truthy `unmanaged` key.
    pub fn is_managed(&self, target_name: &str) -> bool {
        self.excluded_by(target_name).is_none()
    }

    /// The path whose `unmanaged` flag excludes `target_name`, if any.
    ///
    /// Ancestors are checked from the top directory down to the target
    /// itself, stopping at the first flagged one.
    pub fn excluded_by(&self, target_name: &str) -> Option<String> {
        let excluded = exclusion_chain(target_name).find(|path| self.is_flagged(path));
        if let Some(ref path) = excluded {
            tracing::debug!(target_name, excluded_by = %path, "Target is unmanaged");
        }
        excluded
    }

    /// The targets worth classifying for a scan that found `target_names`.
    ///
    /// This is `target_names`, then the targets of the defaults layer, then the
    /// targets of the module configs layer, deduplicated in first-occurrence
    /// order, without the global key. Targets that only exist in configuration
    /// are therefore still considered.
    pub fn candidate_targets<S: AsRef<str>>(&self, target_names: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        target_names
            .iter()
            .map(|name| name.as_ref())
            .chain(self.layers.defaults.targets())
            .chain(self.layers.module_configs.targets())
            .filter(|name| !self.global_key.matches(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    /// Candidate targets that are managed.
    pub fn managed_files<S: AsRef<str>>(&self, target_names: &[S]) -> Vec<String> {
        self.partition(target_names).managed
    }

    /// Candidate targets that must not be touched.
    pub fn unmanaged_files<S: AsRef<str>>(&self, target_names: &[S]) -> Vec<String> {
        self.partition(target_names).unmanaged
    }

    /// Split the candidate targets into managed and unmanaged.
    ///
    /// Equivalent to filtering the candidates with [`Self::is_managed`], but a
    /// directory shared by several candidates is only resolved once.
    pub fn partition<S: AsRef<str>>(&self, target_names: &[S]) -> TargetPartition {
        let mut flagged: HashMap<String, bool> = HashMap::new();
        let mut partition = TargetPartition::default();

        for target in self.candidate_targets(target_names) {
            let excluded = exclusion_chain(&target).any(|path| {
                *flagged
                    .entry(path.clone())
                    .or_insert_with(|| self.is_flagged(&path))
            });

            if excluded {
                partition.unmanaged.push(target);
            } else {
                partition.managed.push(target);
            }
        }

        tracing::debug!(
            managed = partition.managed.len(),
            unmanaged = partition.unmanaged.len(),
            "Partitioned targets"
        );
        partition
    }

    fn is_flagged(&self, path: &str) -> bool {
        self.build_file_configs(path)
            .get(UNMANAGED_KEY)
            .is_some_and(is_truthy)
    }
}

/// The target's ancestors, shortest first, followed by the target itself.
fn exclusion_chain(target_name: &str) -> impl Iterator<Item = String> {
    target_ancestors(target_name)
        .into_iter()
        .chain(iter::once(target_name))
        .map(str::to_string)
}

/// Everything except `null` and `false` counts as set.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}
