use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Exports of library modules, keyed by module name
pub type ModuleExports = HashMap<String, serde_json::Value>;

/// A loaded feather (feature plugin). Opaque to the core beyond its name.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Feather {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl Feather {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            enabled: true,
            settings: serde_json::Value::Null,
        }
    }
}
