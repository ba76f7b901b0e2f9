//! Command manifest definition

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::errors::LoadError;
use crate::domain::entities::{Command, Permission};
use super::actions::{HelpAction, ReplyAction, ShutdownAction};

/// One command declared in a YAML file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandManifest {
    /// Command keyword (required)
    pub keyword: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub permission: Permission,

    /// Registered but answered with a disabled notice
    #[serde(default)]
    pub disabled: bool,

    /// Goes to the internal registry instead of the dispatchable one
    #[serde(default)]
    pub internal: bool,

    pub description: Option<String>,

    pub usage: Option<String>,

    /// Reply template; `{user}`, `{input}` and `{keyword}` are expanded
    pub reply: Option<String>,

    pub builtin: Option<Builtin>,
}

/// Actions shipped with the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Builtin {
    Help,
    Shutdown,
}

impl CommandManifest {
    pub fn parse(content: &str, path: &Path) -> Result<Self, LoadError> {
        serde_yaml::from_str(content).map_err(|e| LoadError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn into_command(self) -> Result<Command, LoadError> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() || keyword.chars().any(char::is_whitespace) {
            return Err(LoadError::Invalid(format!("bad keyword '{}'", self.keyword)));
        }

        let mut command = Command::new(keyword)
            .with_aliases(self.aliases)
            .with_permission(self.permission);

        command = match (self.reply, self.builtin) {
            (Some(template), None) => command.with_action(ReplyAction::new(template)),
            (None, Some(Builtin::Help)) => command.with_action(HelpAction),
            (None, Some(Builtin::Shutdown)) => command.with_action(ShutdownAction),
            (Some(_), Some(_)) => {
                return Err(LoadError::Invalid(format!("'{}' has both reply and builtin", keyword)));
            }
            (None, None) => {
                return Err(LoadError::Invalid(format!("'{}' has no reply or builtin", keyword)));
            }
        };

        if let Some(desc) = self.description {
            command = command.with_description(desc);
        }
        if let Some(usage) = self.usage {
            command = command.with_usage(usage);
        }
        if self.disabled {
            command = command.disabled();
        }

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CommandState;

    fn parse(yaml: &str) -> Result<CommandManifest, LoadError> {
        CommandManifest::parse(yaml, Path::new("test.yaml"))
    }

    #[test]
    fn test_minimal_manifest() {
        let manifest = parse("keyword: ping\nreply: pong\n").expect("parse");
        assert_eq!(manifest.permission, Permission::Public);
        assert!(!manifest.internal);

        let command = manifest.into_command().expect("command");
        assert_eq!(command.keyword, "ping");
        assert_eq!(command.state, CommandState::Enabled);
    }

    #[test]
    fn test_full_manifest() {
        let yaml = r#"
keyword: Shutdown
aliases: [die, stop]
permission: private
disabled: true
description: Stop the bot
usage: "!shutdown"
builtin: shutdown
"#;
        let command = parse(yaml).and_then(CommandManifest::into_command).expect("command");

        assert_eq!(command.keyword, "shutdown");
        assert_eq!(command.aliases, vec!["die", "stop"]);
        assert_eq!(command.permission, Permission::Private);
        assert_eq!(command.state, CommandState::Disabled);
        assert_eq!(command.usage.as_deref(), Some("!shutdown"));
    }

    #[test]
    fn test_action_is_required_and_unique() {
        let none = parse("keyword: ping\n").expect("parse");
        assert!(matches!(none.into_command(), Err(LoadError::Invalid(_))));

        let both = parse("keyword: ping\nreply: pong\nbuiltin: help\n").expect("parse");
        assert!(matches!(both.into_command(), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_keyword_must_be_one_token() {
        let manifest = parse("keyword: two words\nreply: x\n").expect("parse");
        assert!(manifest.into_command().is_err());
    }

    #[test]
    fn test_unknown_permission_is_a_parse_error() {
        assert!(matches!(
            parse("keyword: ping\nreply: pong\npermission: owner\n"),
            Err(LoadError::Parse { .. })
        ));
    }
}
