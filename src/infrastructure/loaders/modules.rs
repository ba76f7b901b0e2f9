//! Module loader - data files exported under their file stem

use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::context::InjectedContext;
use crate::application::errors::LoadError;
use crate::domain::entities::ModuleExports;
use crate::domain::traits::ModuleLoader;
use super::{parse_error, plugin_files};

pub struct DirectoryModuleLoader {
    dir: PathBuf,
}

impl DirectoryModuleLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ModuleLoader for DirectoryModuleLoader {
    async fn load(&self, _ctx: &InjectedContext) -> Result<ModuleExports, LoadError> {
        let mut exports = ModuleExports::new();

        for path in plugin_files(&self.dir, &["yaml", "yml", "json"]).await? {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let content = tokio::fs::read_to_string(&path).await?;

            let value: serde_json::Value = if path.extension().and_then(|e| e.to_str()) == Some("json") {
                serde_json::from_str(&content).map_err(|e| parse_error(&path, e))?
            } else {
                serde_yaml::from_str(&content).map_err(|e| parse_error(&path, e))?
            };

            if exports.insert(name.clone(), value).is_some() {
                return Err(LoadError::Duplicate(name));
            }
        }

        Ok(exports)
    }
}
