//! Application layer - Boot, lifecycle and dispatch
//!
//! This layer contains:
//! - Context: The store assembled from loader results
//! - Coordinator: Concurrent plugin loading and the readiness gate
//! - Lifecycle: Connection state and the kill switch
//! - Messaging: Command parsing and dispatching
//! - Services: The bot run loop
//! - Errors: Error types for every layer

pub mod errors;
pub mod context;
pub mod coordinator;
pub mod lifecycle;
pub mod messaging;
pub mod services;
