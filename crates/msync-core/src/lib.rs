//! Layered configuration resolution for msync
//!
//! This crate turns five sources of partial configuration into one resolved
//! configuration per target file, and decides which targets are managed.
//!
//! - **Smart merge**: type-aware recursive merge of configuration mappings
//! - **Layers**: validated, target-keyed partial configurations
//! - **Resolver**: priority-ordered resolution and ancestor-based exclusion
//! - **Loader**: reads layer files and command-line overrides
//!
//! # Architecture
//!
//! ```text
//!                    msync-cli
//!                        |
//!                   msync-core
//!                        |
//!                    msync-fs
//! ```
//!
//! # Example
//!
//! ```
//! use msync_core::{ConfigResolver, GlobalKey, Layer, Layers};
//! use serde_json::json;
//!
//! let defaults = Layer::from_value(
//!     "defaults",
//!     json!({ "spec": { "unmanaged": true }, "Gemfile": { "gems": ["rake"] } }),
//! )
//! .unwrap();
//!
//! let layers = Layers {
//!     defaults,
//!     ..Layers::default()
//! };
//! let resolver = ConfigResolver::new(layers, GlobalKey::default());
//!
//! assert_eq!(resolver.build_file_configs("Gemfile")["gems"], json!(["rake"]));
//! assert!(!resolver.is_managed("spec/spec_helper.rb"));
//! ```

pub mod config;
pub mod error;

pub use config::{
    ConfigMap, ConfigResolver, DEFAULT_GLOBAL_KEY, GlobalKey, Layer, LayerLoader, Layers,
    TargetPartition, UNMANAGED_KEY, merge, merge_all, overrides_to_config, parse_override,
};
pub use error::{Error, Result};
