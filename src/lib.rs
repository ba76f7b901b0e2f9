//! feather-bot - a chat bot that boots commands, library modules and
//! feathers from disk, then dispatches chat commands behind a permission gate.

pub mod domain;
pub mod application;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::context::{ContextPatch, ContextStore, InjectedContext, Services};
pub use application::coordinator::{PluginLoadCoordinator, Ready};
pub use application::errors::{BootError, BotError, CommandError, ConfigError, LoadError, TransportError};
pub use application::lifecycle::{
    KillSwitch, LifecycleAction, LifecycleController, LifecycleState, ReconnectOutcome, Reconnector,
};
pub use application::messaging::{DispatchOutcome, DispatchReport, MessageDispatcher};
pub use application::services::BotService;
