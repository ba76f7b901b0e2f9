//! Message handling - Parsing and dispatching inbound messages

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{DispatchOutcome, DispatchReport, MessageDispatcher};
pub use parser::{CommandLine, CommandParser};
