//! Domain entities - Core objects shared by every layer

pub mod user;
pub mod message;
pub mod command;
pub mod plugin;

pub use user::User;
pub use message::{InboundMessage, DispatchDetails};
pub use command::{Command, CommandAction, CommandHandler, CommandRegistry, CommandState, Permission};
pub use plugin::{Feather, ModuleExports};
