//! Message dispatcher - Routes command messages to their actions

use std::sync::Arc;

use chrono::Utc;

use crate::application::context::InjectedContext;
use crate::application::coordinator::Ready;
use crate::domain::entities::{Command, DispatchDetails, InboundMessage};
use super::parser::{CommandLine, CommandParser};

/// What happened to one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not in command form; nothing was done
    Ignored,
    /// No command or alias matched
    Unresolved { keyword: String },
    Dispatched(DispatchReport),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub keyword: String,
    pub invoked: Vec<String>,
    pub denied: usize,
    pub disabled: Vec<String>,
    pub failed: Vec<String>,
}

/// Message dispatcher - parses, resolves, gates and invokes commands
#[derive(Clone)]
pub struct MessageDispatcher {
    context: Arc<InjectedContext>,
}

impl MessageDispatcher {
    pub fn new(ready: &Ready) -> Self {
        Self {
            context: Arc::clone(ready.context()),
        }
    }

    /// Process one message to completion. Action failures are logged here
    /// and never reach the caller.
    pub async fn dispatch(&self, message: InboundMessage) -> DispatchOutcome {
        let utilities = self.context.utilities();
        let parser = CommandParser::new(utilities);

        let Some(line) = parser.parse(&message.text) else {
            return DispatchOutcome::Ignored;
        };

        let targets = self.context.commands().resolve(&line.keyword);
        if targets.is_empty() {
            tracing::debug!("No command for keyword '{}'", line.keyword);
            return DispatchOutcome::Unresolved { keyword: line.keyword };
        }

        let details = self.details(&message, line);
        tracing::debug!(
            "Dispatching '{}' from {} to {} command(s), {} ms after receipt",
            details.keyword,
            details.user_id,
            targets.len(),
            (Utc::now() - message.received_at).num_milliseconds(),
        );
        let mut report = DispatchReport {
            keyword: details.keyword.clone(),
            ..Default::default()
        };

        for command in targets {
            if !command.permission.allows(details.is_administrator) {
                report.denied += 1;
                continue;
            }

            if !command.is_enabled() {
                self.reply_disabled(&command, &details).await;
                report.disabled.push(command.keyword.clone());
                continue;
            }

            if self.invoke(&command, details.clone()).await {
                report.invoked.push(command.keyword.clone());
            } else {
                report.failed.push(command.keyword.clone());
            }
        }

        DispatchOutcome::Dispatched(report)
    }

    fn details(&self, message: &InboundMessage, line: CommandLine) -> DispatchDetails {
        let utilities = self.context.utilities();
        let is_direct_message = self.context.transport().is_direct_message(&message.channel_id);
        let server_id = if is_direct_message {
            None
        } else {
            utilities.server_id(&message.channel_id)
        };

        DispatchDetails {
            username: message.author.display_name(),
            user_id: message.author.id.clone(),
            channel_id: message.channel_id.clone(),
            message: message.text.clone(),
            is_direct_message,
            is_command_form: true,
            is_administrator: utilities.is_administrator(&message.author.id),
            server_id,
            keyword: line.keyword,
            input: line.input,
            args: line.args,
        }
    }

    /// Run the action in its own task so a panic is contained too
    async fn invoke(&self, command: &Command, details: DispatchDetails) -> bool {
        let action = command.action();
        let ctx = Arc::clone(&self.context);
        let user_id = details.user_id.clone();

        match tokio::spawn(async move { action.run(ctx, details).await }).await {
            Ok(Ok(())) => {
                tracing::debug!("Command '{}' run by {}", command.keyword, user_id);
                true
            }
            Ok(Err(e)) => {
                tracing::error!("Command '{}' failed: {}", command.keyword, e);
                false
            }
            Err(e) => {
                tracing::error!("Command '{}' aborted: {}", command.keyword, e);
                false
            }
        }
    }

    async fn reply_disabled(&self, command: &Command, details: &DispatchDetails) {
        let text = format!("`{}` is currently disabled.", command.keyword);
        if let Err(e) = self.context.transport().send_message(&details.channel_id, &text).await {
            tracing::warn!("Failed to send disabled notice for '{}': {}", command.keyword, e);
        }
    }
}
