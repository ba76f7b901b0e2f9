use std::fmt;

use async_trait::async_trait;

use crate::application::context::InjectedContext;
use crate::application::errors::LoadError;
use crate::domain::entities::{CommandRegistry, Feather, ModuleExports};

/// Result of the command loader
#[derive(Debug, Clone, Default)]
pub struct LoadedCommands {
    pub commands: CommandRegistry,
    /// Internal commands, reachable through the context but never by keyword
    pub privates: CommandRegistry,
}

#[async_trait]
pub trait CommandLoader: Send + Sync {
    async fn load(&self, ctx: &InjectedContext) -> Result<LoadedCommands, LoadError>;
}

#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, ctx: &InjectedContext) -> Result<ModuleExports, LoadError>;
}

#[async_trait]
pub trait FeatherLoader: Send + Sync {
    async fn load(&self, ctx: &InjectedContext) -> Result<Vec<Feather>, LoadError>;
}

/// Which of the three loaders a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    Commands,
    Modules,
    Feathers,
}

impl LoaderKind {
    pub fn as_str(&self) -> &str {
        match self {
            LoaderKind::Commands => "commands",
            LoaderKind::Modules => "modules",
            LoaderKind::Feathers => "feathers",
        }
    }
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
