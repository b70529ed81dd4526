//! Command implementations for msync-cli

pub mod files;
pub mod resolve;
pub mod status;

pub use files::{run_managed, run_unmanaged};
pub use resolve::run_resolve;
pub use status::run_status;
