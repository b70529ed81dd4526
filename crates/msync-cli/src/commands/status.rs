//! Status command implementation

use colored::Colorize;
use msync_core::ConfigResolver;

use super::files::excluded_targets;
use crate::error::Result;

/// Render both partitions, human-readable or as JSON.
pub fn render_status(resolver: &ConfigResolver, targets: &[String], json: bool) -> Result<String> {
    if json {
        let partition = resolver.partition(targets);
        return Ok(serde_json::to_string_pretty(&partition)? + "\n");
    }

    let managed = resolver.managed_files(targets);
    let excluded = excluded_targets(resolver, targets);
    let mut out = Vec::new();

    out.push(format!("{} ({}):", "Managed".bold(), managed.len()));
    if managed.is_empty() {
        out.push(format!("  {}", "None".dimmed()));
    } else {
        for target in &managed {
            out.push(format!("  {} {}", "+".green(), target));
        }
    }
    out.push(String::new());

    out.push(format!("{} ({}):", "Unmanaged".bold(), excluded.len()));
    if excluded.is_empty() {
        out.push(format!("  {}", "None".dimmed()));
    } else {
        for entry in &excluded {
            if entry.excluded_by == entry.target {
                out.push(format!("  {} {}", "-".yellow(), entry.target));
            } else {
                out.push(format!(
                    "  {} {} {}",
                    "-".yellow(),
                    entry.target,
                    format!("(excluded by {})", entry.excluded_by).dimmed()
                ));
            }
        }
    }

    Ok(out.join("\n") + "\n")
}

/// Run the status command
pub fn run_status(resolver: &ConfigResolver, targets: &[String], json: bool) -> Result<()> {
    print!("{}", render_status(resolver, targets, json)?);
    Ok(())
}
