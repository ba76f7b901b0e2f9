//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Utilities: The standard utility collaborator
//! - Loaders: Directory-backed command, module and feather loaders
//! - Adapters: Transport implementations

pub mod config;
pub mod utilities;
pub mod loaders;
pub mod adapters;
