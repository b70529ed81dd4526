//! Resolve command: print a target's effective configuration

use colored::Colorize;
use msync_core::ConfigResolver;
use msync_fs::validate_target_name;

use crate::error::Result;

/// Render the resolved configuration for `target` as YAML or JSON.
pub fn render_resolved(resolver: &ConfigResolver, target: &str, json: bool) -> Result<String> {
    validate_target_name(target)?;
    let config = resolver.build_file_configs(target);

    if json {
        let mut rendered = serde_json::to_string_pretty(&config)?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(serde_yaml::to_string(&config)?)
    }
}

/// Run the resolve command
pub fn run_resolve(resolver: &ConfigResolver, target: &str, json: bool) -> Result<()> {
    print!("{}", render_resolved(resolver, target, json)?);

    if let Some(excluded_by) = resolver.excluded_by(target) {
        eprintln!(
            "{} {} is unmanaged (excluded by {})",
            "note:".yellow().bold(),
            target,
            excluded_by.cyan()
        );
    }
    Ok(())
}
