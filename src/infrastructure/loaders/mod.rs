//! Directory-backed plugin loaders
//!
//! Each loader scans one configured directory. A missing directory loads
//! nothing; an unreadable or invalid file fails the load.

pub mod actions;
pub mod commands;
pub mod feathers;
pub mod manifest;
pub mod modules;

pub use commands::DirectoryCommandLoader;
pub use feathers::DirectoryFeatherLoader;
pub use manifest::{Builtin, CommandManifest};
pub use modules::DirectoryModuleLoader;

use std::path::{Path, PathBuf};

use crate::application::errors::LoadError;

/// Plugin files in `dir` with one of `extensions`, sorted by path
pub(crate) async fn plugin_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    if !tokio::fs::try_exists(dir).await? {
        tracing::warn!("Plugin directory does not exist: {}", dir.display());
        return Ok(files);
    }

    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }

        // Skip hidden files
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(true);
        if hidden {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(&e))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

pub(crate) fn parse_error(path: &Path, message: impl ToString) -> LoadError {
    LoadError::Parse {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}
