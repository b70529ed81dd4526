//! Normalized target paths
//!
//! Target names are relative, `/`-separated identifiers such as
//! `spec/spec_helper.rb`. They are never touched on disk by the resolver; the
//! only structure it needs is the chain of directory ancestors.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path starts at the filesystem root.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Non-empty path components, with `.` segments dropped.
    pub fn components(&self) -> Vec<&str> {
        self.inner
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .collect()
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Directory prefixes of the target name `name`, shortest first.
///
/// Only `/` separates components, so `spec\x` is a single file name on
/// every platform. `a/b/c.conf` yields `a` then `a/b`; the name itself is not
/// included. Empty and `.` components do not produce a prefix of their own.
pub fn target_ancestors(name: &str) -> Vec<&str> {
    name.match_indices('/')
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let prefix = &name[..idx];
            let last = prefix.rsplit('/').next().unwrap_or(prefix);
            !last.is_empty() && last != "." && !name[idx..].trim_start_matches('/').is_empty()
        })
        .map(|idx| &name[..idx])
        .collect()
}

/// Check that `name` can be used as a target name.
///
/// Target names are relative, `/`-separated paths inside a managed
/// repository: they must be non-empty, relative, free of `..` segments,
/// backslashes and NUL bytes.
pub fn validate_target_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_target(name, "name is empty"));
    }
    if name.contains('\0') {
        return Err(Error::invalid_target(name, "name contains a NUL byte"));
    }
    if name.contains('\\') {
        return Err(Error::invalid_target(
            name,
            "name contains a backslash; use '/' to separate directories",
        ));
    }

    let path = NormalizedPath::new(name);
    if path.is_absolute() {
        return Err(Error::invalid_target(name, "name must be relative"));
    }
    if path.components().contains(&"..") {
        return Err(Error::invalid_target(name, "name must not contain '..'"));
    }
    if path.components().is_empty() {
        return Err(Error::invalid_target(name, "name has no path components"));
    }
    Ok(())
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
