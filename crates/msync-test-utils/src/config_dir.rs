//! [`TestConfigDir`] builder for msync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory holding the module's own configuration file.
pub const MODULE_DIR: &str = "module";

/// Directory holding template files.
pub const TEMPLATE_DIR: &str = "moduleroot";

/// A temporary config directory laid out the way the `msync` binary expects:
///
/// ```text
/// <root>/config_defaults.yml
/// <root>/module_defaults.yml
/// <root>/module/.sync.yml
/// <root>/moduleroot/<templates>
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use msync_test_utils::TestConfigDir;
///
/// let dir = TestConfigDir::new()
///     .with_defaults(":global:\n  owner: acme\n")
///     .with_template("Gemfile.erb");
/// assert!(dir.defaults_path().exists());
/// ```
pub struct TestConfigDir {
    temp_dir: TempDir,
}

impl Default for TestConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn defaults_path(&self) -> PathBuf {
        self.root().join("config_defaults.yml")
    }

    pub fn module_defaults_path(&self) -> PathBuf {
        self.root().join("module_defaults.yml")
    }

    pub fn module_config_path(&self) -> PathBuf {
        self.root().join(MODULE_DIR).join(".sync.yml")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root().join(TEMPLATE_DIR)
    }

    /// Write `config_defaults.yml`.
    pub fn with_defaults(self, yaml: &str) -> Self {
        self.write_file(&self.defaults_path(), yaml);
        self
    }

    /// Write `module_defaults.yml`.
    pub fn with_module_defaults(self, yaml: &str) -> Self {
        self.write_file(&self.module_defaults_path(), yaml);
        self
    }

    /// Write `module/.sync.yml`.
    pub fn with_module_config(self, yaml: &str) -> Self {
        self.write_file(&self.module_config_path(), yaml);
        self
    }

    /// Create an empty template at `relative` below the template directory.
    pub fn with_template(self, relative: &str) -> Self {
        let path = self.template_dir().join(relative);
        self.write_file(&path, "");
        self
    }

    /// Write `content` to `path`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write_file(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("TestConfigDir: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(path, content)
            .unwrap_or_else(|e| panic!("TestConfigDir: failed to write {}: {e}", path.display()));
    }
}
