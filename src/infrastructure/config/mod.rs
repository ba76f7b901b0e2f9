//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub transport: TransportConfig,
    #[serde(default)]
    pub admins: Vec<String>,
    pub plugins: PluginConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    /// Presence text shown once connected
    pub playing: String,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportConfig {
    pub token: Option<String>,
    #[serde(default = "default_console_user")]
    pub console_user_id: String,
}

fn default_console_user() -> String {
    "console".to_string()
}

/// Directories scanned by the three loaders
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    pub commands: PathBuf,
    pub modules: PathBuf,
    pub feathers: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "feather-bot".to_string(),
                prefix: "!".to_string(),
                playing: "with feathers".to_string(),
                debug: false,
            },
            transport: TransportConfig {
                token: None,
                console_user_id: default_console_user(),
            },
            admins: Vec::new(),
            plugins: PluginConfig {
                commands: PathBuf::from("./commands"),
                modules: PathBuf::from("./lib"),
                feathers: PathBuf::from("./feathers"),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("BOT_TOKEN") {
            self.transport.token = Some(token);
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }

        if let Ok(playing) = std::env::var("BOT_PLAYING") {
            self.bot.playing = playing;
        }

        if let Ok(debug) = std::env::var("BOT_DEBUG") {
            self.bot.debug = matches!(debug.as_str(), "1" | "true" | "yes");
        }
    }

    /// The process needs at least a token and a presence string
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.transport.token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingField("transport.token".to_string())),
        }

        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }

        if self.bot.playing.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.playing".to_string()));
        }

        Ok(())
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admins.iter().any(|id| id == user_id)
    }
}
