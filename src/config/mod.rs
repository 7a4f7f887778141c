//! Configuration module for the civil registry
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RegistryPaths;
pub use settings::Settings;
