use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::errors::TransportError;
use crate::domain::entities::InboundMessage;

/// Events a transport produces into the bot
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Ready,
    Message(InboundMessage),
    Disconnect { reason: String, code: u16 },
    ServerRemoved { server_id: String },
}

/// Receiving half of a transport's event stream
pub type EventStream = mpsc::Receiver<TransportEvent>;

/// Transport trait - abstraction for chat service connections
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open (or reopen) the connection. `Ready` follows on the event stream.
    async fn connect(&self) -> Result<(), TransportError>;

    /// Close the connection. A `Disconnect` event follows on the event stream.
    async fn disconnect(&self) -> Result<(), TransportError>;

    async fn set_presence(&self, playing: &str) -> Result<(), TransportError>;

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), TransportError>;

    fn is_direct_message(&self, channel_id: &str) -> bool;

    /// Server owning a channel, if the transport knows it
    fn server_for_channel(&self, channel_id: &str) -> Option<String>;

    fn bot_info(&self) -> BotInfo;

    /// Hand out the event stream. Only the first call gets it.
    fn take_events(&self) -> Option<EventStream>;
}

/// Bot identity on the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    pub id: String,
    pub username: String,
}
