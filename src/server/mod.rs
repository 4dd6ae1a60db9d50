//! Server module for Leadscout
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `providers`: Search and generation provider construction
//! - `init`: Router assembly and run loop

pub mod config;
mod init;
mod loader;
mod providers;

pub use init::run;
pub use loader::load_config;
pub use providers::build_pipeline;
