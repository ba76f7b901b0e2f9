//! Actions available to manifest-declared commands

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::context::InjectedContext;
use crate::application::errors::CommandError;
use crate::domain::entities::{CommandAction, DispatchDetails};

/// Sends a fixed template back to the channel
pub struct ReplyAction {
    template: String,
}

impl ReplyAction {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn render(&self, details: &DispatchDetails) -> String {
        self.template
            .replace("{user}", &details.username)
            .replace("{input}", &details.input)
            .replace("{keyword}", &details.keyword)
    }
}

#[async_trait]
impl CommandAction for ReplyAction {
    async fn run(&self, ctx: Arc<InjectedContext>, details: DispatchDetails) -> Result<(), CommandError> {
        let text = self.render(&details);
        ctx.transport().send_message(&details.channel_id, &text).await?;
        Ok(())
    }
}

/// Lists the commands the caller may run, or the usage of one
pub struct HelpAction;

impl HelpAction {
    pub fn render(ctx: &InjectedContext, details: &DispatchDetails) -> String {
        let prefix = &ctx.config().bot.prefix;
        let visible = |allowed: bool| allowed || details.is_administrator;

        if let Some(name) = details.input.split_whitespace().next() {
            return match ctx.commands().get(name) {
                Some(cmd) if visible(cmd.permission.allows(false)) => {
                    let mut help = format!(
                        "{}{} - {}",
                        prefix,
                        cmd.keyword,
                        cmd.description.as_deref().unwrap_or("No description")
                    );
                    if let Some(usage) = &cmd.usage {
                        help.push_str(&format!("\nUsage: {}", usage));
                    }
                    if !cmd.aliases.is_empty() {
                        help.push_str(&format!("\nAliases: {}", cmd.aliases.join(", ")));
                    }
                    help
                }
                _ => format!("Command {}{} not found", prefix, name.to_lowercase()),
            };
        }

        let mut help = "Available commands:\n".to_string();
        for cmd in ctx.commands().all() {
            if !cmd.is_enabled() || !visible(cmd.permission.allows(false)) {
                continue;
            }
            help.push_str(&format!(
                "  {}{} - {}\n",
                prefix,
                cmd.keyword,
                cmd.description.as_deref().unwrap_or("")
            ));
        }
        help
    }
}

#[async_trait]
impl CommandAction for HelpAction {
    async fn run(&self, ctx: Arc<InjectedContext>, details: DispatchDetails) -> Result<(), CommandError> {
        let text = Self::render(&ctx, &details);
        ctx.transport().send_message(&details.channel_id, &text).await?;
        Ok(())
    }
}

/// Throws the kill switch
pub struct ShutdownAction;

#[async_trait]
impl CommandAction for ShutdownAction {
    async fn run(&self, ctx: Arc<InjectedContext>, details: DispatchDetails) -> Result<(), CommandError> {
        tracing::info!("Shutdown requested by {} ({})", details.username, details.user_id);
        ctx.transport().send_message(&details.channel_id, "Shutting down.").await?;
        ctx.kill_switch().kill().await?;
        Ok(())
    }
}
