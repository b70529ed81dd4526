//! Resolver construction from command-line flags
//!
//! Every command works on the same resolver: the layer files named by the
//! global flags plus the `--set` overrides.

use msync_core::{ConfigResolver, GlobalKey, LayerLoader, overrides_to_config};
use msync_fs::{scan_targets, validate_target_name};

use crate::cli::{LayerArgs, TargetArgs};
use crate::error::{CliError, Result};

/// Load the layers named by `args` and build a resolver over them.
pub fn load_resolver(args: &LayerArgs) -> Result<ConfigResolver> {
    if args.global_key.is_empty() {
        return Err(CliError::user("--global-key must not be empty"));
    }

    let additional = overrides_to_config(&args.settings)?;
    let mut loader = LayerLoader::new(GlobalKey::new(args.global_key.as_str()))
        .defaults_file(args.defaults.as_path())
        .module_config_file(args.module_config.as_path())
        .additional_settings(additional);
    if let Some(ref module_defaults) = args.module_defaults {
        loader = loader.module_defaults_file(module_defaults.as_path());
    }

    tracing::debug!(defaults = %args.defaults.display(), "Building resolver");
    Ok(loader.load_resolver()?)
}

/// The target names given on the command line followed by any scanned templates.
pub fn collect_targets(args: &TargetArgs) -> Result<Vec<String>> {
    let mut targets = Vec::with_capacity(args.targets.len());
    for target in &args.targets {
        validate_target_name(target)?;
        targets.push(target.clone());
    }

    if let Some(ref templates) = args.templates {
        targets.extend(scan_targets(templates)?);
    }
    Ok(targets)
}
