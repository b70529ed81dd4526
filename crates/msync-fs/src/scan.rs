//! Template directory scanning
//!
//! Turns a directory of templates into the list of target names the
//! resolver classifies.

use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// Extension carried by template files and dropped from their target name.
pub const TEMPLATE_EXTENSION: &str = ".erb";

/// List every file under `root` as a relative, `/`-separated target name.
///
/// Entries are visited in file-name order so the result is stable across
/// platforms. A trailing [`TEMPLATE_EXTENSION`] is stripped, so
/// `spec/spec_helper.rb.erb` becomes `spec/spec_helper.rb`.
pub fn scan_targets(root: impl AsRef<Path>) -> Result<Vec<String>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::io(
            root,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "template directory does not exist",
            ),
        ));
    }

    let mut targets = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let name = NormalizedPath::new(relative);
        let name = name.as_str();
        let target = name.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(name);
        targets.push(target.to_string());
    }

    tracing::debug!(root = %root.display(), count = targets.len(), "Scanned template directory");
    Ok(targets)
}
