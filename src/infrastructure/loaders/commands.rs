//! Command loader - one YAML manifest per command

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::context::InjectedContext;
use crate::application::errors::LoadError;
use crate::domain::traits::{CommandLoader, LoadedCommands};
use super::manifest::CommandManifest;
use super::plugin_files;

pub struct DirectoryCommandLoader {
    dir: PathBuf,
}

impl DirectoryCommandLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl CommandLoader for DirectoryCommandLoader {
    async fn load(&self, _ctx: &InjectedContext) -> Result<LoadedCommands, LoadError> {
        let mut loaded = LoadedCommands::default();
        let mut seen = HashSet::new();

        for path in plugin_files(&self.dir, &["yaml", "yml"]).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            let manifest = CommandManifest::parse(&content, &path)?;
            let internal = manifest.internal;
            let command = manifest.into_command()?;

            if !seen.insert((internal, command.keyword.clone())) {
                return Err(LoadError::Duplicate(command.keyword));
            }

            tracing::debug!("Loaded command {} from {}", command.keyword, path.display());
            if internal {
                loaded.privates.register(command);
            } else {
                loaded.commands.register(command);
            }
        }

        Ok(loaded)
    }
}
