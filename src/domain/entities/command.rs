use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::context::InjectedContext;
use crate::application::errors::CommandError;
use super::DispatchDetails;

/// Who may run a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Public,
    Private,
}

impl Permission {
    pub fn as_str(&self) -> &str {
        match self {
            Permission::Public => "public",
            Permission::Private => "private",
        }
    }

    /// Public commands always pass, private ones only for administrators.
    pub fn allows(&self, is_administrator: bool) -> bool {
        match self {
            Permission::Public => true,
            Permission::Private => is_administrator,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Enabled,
    Disabled,
}

/// Body of a command, run once per accepted invocation
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn run(&self, ctx: Arc<InjectedContext>, details: DispatchDetails) -> Result<(), CommandError>;
}

/// Synchronous handler; a returned string is sent back to the invoking channel
pub type CommandHandler = Box<
    dyn Fn(&InjectedContext, &DispatchDetails) -> Result<Option<String>, CommandError> + Send + Sync,
>;

struct HandlerAction(CommandHandler);

#[async_trait]
impl CommandAction for HandlerAction {
    async fn run(&self, ctx: Arc<InjectedContext>, details: DispatchDetails) -> Result<(), CommandError> {
        if let Some(reply) = (self.0)(ctx.as_ref(), &details)? {
            ctx.transport().send_message(&details.channel_id, &reply).await?;
        }
        Ok(())
    }
}

struct NoopAction;

#[async_trait]
impl CommandAction for NoopAction {
    async fn run(&self, _ctx: Arc<InjectedContext>, _details: DispatchDetails) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub keyword: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub permission: Permission,
    pub state: CommandState,
    action: Arc<dyn CommandAction>,
}

impl Command {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            description: None,
            aliases: Vec::new(),
            usage: None,
            permission: Permission::Public,
            state: CommandState::Enabled,
            action: Arc::new(NoopAction),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.state = CommandState::Disabled;
        self
    }

    pub fn with_action<A: CommandAction + 'static>(mut self, action: A) -> Self {
        self.action = Arc::new(action);
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&InjectedContext, &DispatchDetails) -> Result<Option<String>, CommandError> + Send + Sync + 'static,
    {
        self.action = Arc::new(HandlerAction(Box::new(handler)));
        self
    }

    pub fn action(&self) -> Arc<dyn CommandAction> {
        Arc::clone(&self.action)
    }

    pub fn is_enabled(&self) -> bool {
        self.state == CommandState::Enabled
    }

    pub fn has_alias(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.aliases.iter().any(|a| a.to_lowercase() == keyword)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("keyword", &self.keyword)
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Command registry keyed by lower-cased keyword
#[derive(Clone, Default, Debug)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last registration for a keyword wins; the replaced command is returned.
    pub fn register(&mut self, command: Command) -> Option<Arc<Command>> {
        self.commands.insert(command.keyword.to_lowercase(), Arc::new(command))
    }

    pub fn get(&self, keyword: &str) -> Option<&Arc<Command>> {
        self.commands.get(&keyword.to_lowercase())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Exact keyword first. Otherwise every command carrying the keyword
    /// as an alias, in keyword order.
    pub fn resolve(&self, keyword: &str) -> Vec<Arc<Command>> {
        if let Some(cmd) = self.get(keyword) {
            return vec![Arc::clone(cmd)];
        }
        self.commands
            .values()
            .filter(|c| c.has_alias(keyword))
            .cloned()
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Command> for CommandRegistry {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        let mut registry = Self::new();
        for command in iter {
            registry.register(command);
        }
        registry
    }
}
