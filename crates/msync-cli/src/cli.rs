//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use msync_core::DEFAULT_GLOBAL_KEY;
use msync_core::config::{DEFAULT_DEFAULTS_FILE, DEFAULT_MODULE_CONFIG_FILE};

/// msync - Resolve layered file configuration and decide which files are managed
#[derive(Parser, Debug)]
#[command(name = "msync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub layers: LayerArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the configuration layers come from
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LayerArgs {
    /// Defaults file; its global-key entry holds the global defaults
    #[arg(long, global = true, env = "MSYNC_DEFAULTS", default_value = DEFAULT_DEFAULTS_FILE)]
    pub defaults: PathBuf,

    /// Per-module defaults file
    #[arg(long, global = true)]
    pub module_defaults: Option<PathBuf>,

    /// Per-module configuration file
    #[arg(long, global = true, default_value = DEFAULT_MODULE_CONFIG_FILE)]
    pub module_config: PathBuf,

    /// Reserved key naming the global defaults entry
    #[arg(long, global = true, default_value = DEFAULT_GLOBAL_KEY)]
    pub global_key: String,

    /// Additional setting applied over every layer (repeatable)
    ///
    /// Dotted keys nest: `-s travis.fast_finish=true`.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", global = true)]
    pub settings: Vec<String>,
}

/// Which targets to classify
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetArgs {
    /// Target names to consider, in addition to configured targets
    pub targets: Vec<String>,

    /// Template directory to scan for target names
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved configuration for a target
    ///
    /// Examples:
    ///   msync resolve Gemfile
    ///   msync resolve spec/spec_helper.rb --json
    ///   msync resolve .travis.yml -s travis.fast_finish=true
    Resolve {
        /// Target name, e.g. `spec/spec_helper.rb`
        target: String,

        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// List targets that will be managed
    Managed(TargetArgs),

    /// List targets that are excluded, with the path that excludes them
    Unmanaged(TargetArgs),

    /// Show managed and unmanaged targets together
    Status(TargetArgs),
}
