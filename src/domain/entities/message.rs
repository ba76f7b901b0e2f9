use super::User;
use chrono::{DateTime, Utc};

/// A chat message as delivered by the transport
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(channel_id: impl Into<String>, author: User, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id: channel_id.into(),
            author,
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}

/// Everything a command action learns about the message that invoked it.
///
/// `input` is the text after the keyword, trimmed. `args` is the whole
/// post-prefix text split on whitespace, so `args[0]` is the keyword as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchDetails {
    pub username: String,
    pub user_id: String,
    pub channel_id: String,
    pub message: String,
    pub is_direct_message: bool,
    pub is_command_form: bool,
    pub is_administrator: bool,
    pub server_id: Option<String>,
    pub keyword: String,
    pub input: String,
    pub args: Vec<String>,
}
