//! Shared test utilities for the msync workspace.
//!
//! This crate provides standardised layer-file fixtures so crate test suites
//! do not each hand-roll temp directories. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`config_dir`]: [`TestConfigDir`] builder for layer files and templates

pub mod config_dir;

pub use config_dir::TestConfigDir;
