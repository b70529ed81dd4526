//! Loading layers from files
//!
//! The `LayerLoader` reads the target-keyed layer files, splits the global
//! defaults out of the defaults file, and hands the result to a resolver
//! configured with the same global key.

use msync_fs::{ConfigStore, NormalizedPath, io, validate_target_name};
use serde_json::Value;

use super::layer::{ConfigMap, GlobalKey, Layer, Layers};
use super::resolver::ConfigResolver;
use crate::{Error, Result};

/// Defaults file name used when none is given.
pub const DEFAULT_DEFAULTS_FILE: &str = "config_defaults.yml";

/// Per-module configuration file name used when none is given.
pub const DEFAULT_MODULE_CONFIG_FILE: &str = ".sync.yml";

/// Builds [`Layers`] from layer files on disk.
///
/// Every file is optional unless [`LayerLoader::require_defaults`] is set.
/// Formats are detected from the file extension (YAML, JSON or TOML).
#[derive(Debug, Clone, Default)]
pub struct LayerLoader {
    global_key: GlobalKey,
    store: ConfigStore,
    defaults_file: Option<NormalizedPath>,
    require_defaults: bool,
    module_defaults_file: Option<NormalizedPath>,
    module_config_file: Option<NormalizedPath>,
    additional_settings: ConfigMap,
}

impl LayerLoader {
    /// Create a loader that reads global defaults from `global_key`.
    pub fn new(global_key: GlobalKey) -> Self {
        Self {
            global_key,
            ..Self::default()
        }
    }

    /// File holding the defaults layer and, under the global key, the
    /// global defaults.
    pub fn defaults_file(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.defaults_file = Some(path.into());
        self
    }

    /// Fail with [`Error::ConfigNotFound`] when the defaults file is missing.
    pub fn require_defaults(mut self, required: bool) -> Self {
        self.require_defaults = required;
        self
    }

    pub fn module_defaults_file(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.module_defaults_file = Some(path.into());
        self
    }

    pub fn module_config_file(mut self, path: impl Into<NormalizedPath>) -> Self {
        self.module_config_file = Some(path.into());
        self
    }

    /// Settings applied over every target, e.g. from `--set` flags.
    pub fn additional_settings(mut self, settings: ConfigMap) -> Self {
        self.additional_settings = settings;
        self
    }

    pub fn global_key(&self) -> &GlobalKey {
        &self.global_key
    }

    /// Read all configured files into a set of layers.
    pub fn load(&self) -> Result<Layers> {
        let defaults = self.read_layer(
            "defaults",
            self.defaults_file.as_ref(),
            self.require_defaults,
        )?;
        let module_defaults =
            self.read_layer("module_defaults", self.module_defaults_file.as_ref(), false)?;
        let module_configs =
            self.read_layer("module_configs", self.module_config_file.as_ref(), false)?;

        let global_defaults = defaults
            .get(self.global_key.as_str())
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            global_key = %self.global_key,
            defaults = defaults.len(),
            module_defaults = module_defaults.len(),
            module_configs = module_configs.len(),
            "Loaded layers"
        );

        Ok(Layers::new(
            global_defaults,
            defaults,
            module_defaults,
            module_configs,
            self.additional_settings.clone(),
        ))
    }

    /// Load the layers and build a resolver sharing this loader's global key.
    pub fn load_resolver(&self) -> Result<ConfigResolver> {
        let layers = self.load()?;
        Ok(ConfigResolver::new(layers, self.global_key.clone()))
    }

    fn read_layer(
        &self,
        name: &str,
        path: Option<&NormalizedPath>,
        required: bool,
    ) -> Result<Layer> {
        let Some(path) = path else {
            return Ok(Layer::new());
        };

        let Some(content) = io::read_text_if_exists(path)? else {
            if required {
                return Err(Error::ConfigNotFound {
                    path: path.to_native(),
                });
            }
            tracing::debug!(layer = name, %path, "No layer file found, skipping");
            return Ok(Layer::new());
        };

        if content.trim().is_empty() {
            tracing::debug!(layer = name, %path, "Layer file is empty");
            return Ok(Layer::new());
        }

        tracing::debug!(layer = name, %path, "Loading layer file");
        let value: Value = self.store.parse(path, &content)?;
        let layer = Layer::from_value(name, value)?;
        self.validate_targets(name, &layer)?;
        Ok(layer)
    }

    fn validate_targets(&self, name: &str, layer: &Layer) -> Result<()> {
        for target in layer.targets() {
            if self.global_key.matches(target) {
                continue;
            }
            match validate_target_name(target) {
                Ok(()) => {}
                Err(msync_fs::Error::InvalidTargetName { reason, .. }) => {
                    return Err(Error::InvalidTarget {
                        layer: name.to_string(),
                        name: target.to_string(),
                        reason,
                    });
                }
                Err(other) => return Err(other.into()),
            }
        }
        Ok(())
    }
}
