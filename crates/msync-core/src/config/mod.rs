//! Configuration layers, smart merge and per-target resolution
//!
//! # Layer hierarchy
//!
//! A target's configuration is merged from five sources, later sources
//! overriding earlier ones:
//!
//! 1. **Global defaults** - the global-key entry of the defaults file
//! 2. **Defaults** - `config_defaults.yml`, keyed by target
//! 3. **Module defaults** - per-module defaults, keyed by target
//! 4. **Module configs** - the module's `.sync.yml`, keyed by target
//! 5. **Additional settings** - ad-hoc overrides such as `--set key=value`
//!
//! # Exclusion
//!
//! A target whose resolved configuration (or the resolved configuration of
//! any of its directory ancestors) carries a truthy `unmanaged` key is left
//! alone.
//!
//! # Example
//!
//! ```ignore
//! use msync_core::config::{GlobalKey, LayerLoader};
//!
//! let resolver = LayerLoader::new(GlobalKey::default())
//!     .defaults_file("config_defaults.yml")
//!     .module_config_file("modules/ntp/.sync.yml")
//!     .load_resolver()?;
//!
//! let config = resolver.build_file_configs("spec/spec_helper.rb");
//! let managed = resolver.managed_files(&["Gemfile", "Rakefile"]);
//! ```

mod layer;
mod loader;
mod merge;
mod overrides;
mod resolver;

pub use layer::{ConfigMap, DEFAULT_GLOBAL_KEY, GlobalKey, Layer, Layers};
pub use loader::{DEFAULT_DEFAULTS_FILE, DEFAULT_MODULE_CONFIG_FILE, LayerLoader};
pub use merge::{merge, merge_all};
pub use overrides::{overrides_to_config, parse_override};
pub use resolver::{ConfigResolver, TargetPartition, UNMANAGED_KEY};
