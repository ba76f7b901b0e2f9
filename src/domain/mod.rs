//! Domain layer - Core types and collaborator seams
//!
//! This layer contains:
//! - Entities: Commands, messages, dispatch details, feathers
//! - Traits: Abstractions for the transport, utilities and plugin loaders

pub mod entities;
pub mod traits;
