//! Standard utility collaborator backed by the configuration

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::traits::{Transport, Utilities};
use crate::infrastructure::config::Config;

/// Presence text longer than this is cut
pub const MAX_STATUS_CHARS: usize = 128;

static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").expect("valid regex"));
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

pub struct StandardUtilities {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl StandardUtilities {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: config.clone(),
            transport,
        }
    }

    fn prefix(&self) -> &str {
        &self.config.bot.prefix
    }
}

impl Utilities for StandardUtilities {
    fn is_command(&self, text: &str) -> bool {
        text.strip_prefix(self.prefix())
            .map(|rest| !rest.trim().is_empty())
            .unwrap_or(false)
    }

    fn strip_prefix(&self, text: &str) -> String {
        text.strip_prefix(self.prefix()).unwrap_or(text).to_string()
    }

    fn server_id(&self, channel_id: &str) -> Option<String> {
        self.transport.server_for_channel(channel_id)
    }

    fn is_administrator(&self, user_id: &str) -> bool {
        self.config.is_admin(user_id)
    }

    fn filter_status_text(&self, text: &str) -> String {
        let expanded = text
            .replace("{prefix}", self.prefix())
            .replace("{name}", &self.config.bot.name);
        let cleaned = CONTROL_CHARS.replace_all(&expanded, " ");
        let collapsed = WHITESPACE_RUNS.replace_all(cleaned.trim(), " ");
        collapsed.chars().take(MAX_STATUS_CHARS).collect()
    }
}
