//! Filesystem helpers for msync
//!
//! Provides target-path normalization, format-agnostic config loading and
//! template directory scanning. Nothing in here knows about layers or merging.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
pub use path::{NormalizedPath, target_ancestors, validate_target_name};
pub use scan::{TEMPLATE_EXTENSION, scan_targets};
