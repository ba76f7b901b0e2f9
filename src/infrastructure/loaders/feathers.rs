//! Feather loader - one YAML manifest per feather

use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::context::InjectedContext;
use crate::application::errors::LoadError;
use crate::domain::entities::Feather;
use crate::domain::traits::FeatherLoader;
use super::{parse_error, plugin_files};

pub struct DirectoryFeatherLoader {
    dir: PathBuf,
}

impl DirectoryFeatherLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FeatherLoader for DirectoryFeatherLoader {
    async fn load(&self, _ctx: &InjectedContext) -> Result<Vec<Feather>, LoadError> {
        let mut feathers: Vec<Feather> = Vec::new();

        for path in plugin_files(&self.dir, &["yaml", "yml"]).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            let feather: Feather = serde_yaml::from_str(&content).map_err(|e| parse_error(&path, e))?;

            if feather.name.trim().is_empty() {
                return Err(LoadError::Invalid(format!("{} has no name", path.display())));
            }
            if feathers.iter().any(|f| f.name == feather.name) {
                return Err(LoadError::Duplicate(feather.name));
            }
            if !feather.enabled {
                tracing::info!("Feather {} is disabled", feather.name);
            }
            feathers.push(feather);
        }

        Ok(feathers)
    }
}
