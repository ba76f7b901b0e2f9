//! Domain traits - Abstractions for external collaborators

pub mod transport;
pub mod utilities;
pub mod loader;

pub use transport::{BotInfo, EventStream, Transport, TransportEvent};
pub use utilities::Utilities;
pub use loader::{CommandLoader, FeatherLoader, LoadedCommands, LoaderKind, ModuleLoader};
