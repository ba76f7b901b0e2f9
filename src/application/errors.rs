//! Application layer errors

use thiserror::Error;

use crate::domain::traits::LoaderKind;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Boot failed: {0}")]
    Boot(#[from] BootError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Plugin loading failed; the bot never becomes ready
#[derive(Error, Debug)]
pub enum BootError {
    #[error("{loader} loader failed: {source}")]
    Load {
        loader: LoaderKind,
        #[source]
        source: LoadError,
    },
}

/// Errors raised by a single loader
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid plugin: {0}")]
    Invalid(String),

    #[error("Duplicate keyword: {0}")]
    Duplicate(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Transport errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connect failed: {0}")]
    Connect(String),

    #[error("Send failed: {0}")]
    Send(String),

    /// The transport will never accept another connection
    #[error("Transport closed")]
    Closed,

    #[error("Event stream already taken")]
    EventsTaken,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
