//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`show`] - Print a parsed package description
//! - [`generic`] - Look up non-standard tags
//! - [`deps`] - List and check dependency constraints
//! - [`validate`] - Check that required fields are present
//! - [`themes`] - List and inspect installed themes
//! - [`config`] - Configuration management (path, show, init)

pub mod common;
pub mod config;
pub mod deps;
pub mod generic;
pub mod show;
pub mod themes;
pub mod validate;
