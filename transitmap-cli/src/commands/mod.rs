//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, path, show)
//! - [`fetch`] - Single fetch, printed as a table or JSON
//! - [`run`] - Main command (refresh loop with dashboard)

pub mod common;
pub mod config;
pub mod fetch;
pub mod run;
