//! Managed and unmanaged target listings
//!
//! Plain output is one target per line so it can be piped into other tools.

use msync_core::ConfigResolver;
use serde::Serialize;

use crate::error::Result;

/// An unmanaged target and the path whose flag excludes it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ExcludedTarget {
    pub target: String,
    pub excluded_by: String,
}

/// Unmanaged targets paired with the path that excludes each one.
pub fn excluded_targets(resolver: &ConfigResolver, targets: &[String]) -> Vec<ExcludedTarget> {
    resolver
        .unmanaged_files(targets)
        .into_iter()
        .map(|target| {
            let excluded_by = resolver
                .excluded_by(&target)
                .unwrap_or_else(|| target.clone());
            ExcludedTarget {
                target,
                excluded_by,
            }
        })
        .collect()
}

/// Render the managed targets.
pub fn render_managed(resolver: &ConfigResolver, targets: &[String], json: bool) -> Result<String> {
    let managed = resolver.managed_files(targets);
    if json {
        return Ok(serde_json::to_string_pretty(&managed)? + "\n");
    }
    Ok(lines(managed))
}

/// Render the unmanaged targets, noting when a directory excludes them.
pub fn render_unmanaged(
    resolver: &ConfigResolver,
    targets: &[String],
    json: bool,
) -> Result<String> {
    let excluded = excluded_targets(resolver, targets);
    if json {
        return Ok(serde_json::to_string_pretty(&excluded)? + "\n");
    }

    Ok(lines(excluded.into_iter().map(|entry| {
        if entry.excluded_by == entry.target {
            entry.target
        } else {
            format!("{} (excluded by {})", entry.target, entry.excluded_by)
        }
    })))
}

/// Run the managed command
pub fn run_managed(resolver: &ConfigResolver, targets: &[String], json: bool) -> Result<()> {
    print!("{}", render_managed(resolver, targets, json)?);
    Ok(())
}

/// Run the unmanaged command
pub fn run_unmanaged(resolver: &ConfigResolver, targets: &[String], json: bool) -> Result<()> {
    print!("{}", render_unmanaged(resolver, targets, json)?);
    Ok(())
}

fn lines(items: impl IntoIterator<Item = String>) -> String {
    items.into_iter().map(|item| item + "\n").collect()
}
