//! Console transport for development/testing

use async_trait::async_trait;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::application::errors::TransportError;
use crate::domain::entities::{InboundMessage, User};
use crate::domain::traits::{BotInfo, EventStream, Transport, TransportEvent};

/// The only channel; it counts as a direct message channel
pub const CONSOLE_CHANNEL: &str = "console";

const EVENT_BUFFER: usize = 64;

/// Console transport: stdin lines in, stdout lines out
pub struct ConsoleTransport {
    info: BotInfo,
    user: User,
    events_tx: mpsc::Sender<TransportEvent>,
    events_rx: Mutex<Option<mpsc::Receiver<TransportEvent>>>,
    reader_started: AtomicBool,
    closed: Arc<AtomicBool>,
}

impl ConsoleTransport {
    pub fn new(bot_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let user_id = user_id.into();
        Self {
            info: BotInfo {
                id: "console-bot".to_string(),
                username: bot_name.into(),
            },
            user: User::new(user_id.clone()).with_username(user_id),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            reader_started: AtomicBool::new(false),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    async fn emit(&self, event: TransportEvent) -> Result<(), TransportError> {
        self.events_tx
            .send(event)
            .await
            .map_err(|_| TransportError::Closed)
    }

    /// Stdin is read on a plain thread so a pending read never holds up
    /// runtime shutdown.
    fn spawn_reader(&self) -> Result<(), TransportError> {
        let events = self.events_tx.clone();
        let closed = Arc::clone(&self.closed);
        let user = self.user.clone();

        std::thread::Builder::new()
            .name("console-stdin".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(line) => {
                            let message = InboundMessage::new(CONSOLE_CHANNEL, user.clone(), line);
                            if events.blocking_send(TransportEvent::Message(message)).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Failed to read stdin: {}", e);
                            break;
                        }
                    }
                }

                closed.store(true, Ordering::SeqCst);
                let _ = events.blocking_send(TransportEvent::Disconnect {
                    reason: "console closed".to_string(),
                    code: 1000,
                });
            })
            .map(|_| ())
            .map_err(|e| TransportError::Connect(format!("failed to start stdin reader: {}", e)))
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        // Ready goes out before the reader can fill the buffer
        self.emit(TransportEvent::Ready).await?;
        if !self.reader_started.swap(true, Ordering::SeqCst) {
            tracing::info!("Starting console transport (dev mode)");
            if let Err(e) = self.spawn_reader() {
                self.reader_started.store(false, Ordering::SeqCst);
                return Err(e);
            }
        }
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        self.emit(TransportEvent::Disconnect {
            reason: "requested".to_string(),
            code: 1000,
        })
        .await
    }

    async fn set_presence(&self, playing: &str) -> Result<(), TransportError> {
        tracing::info!("Presence: playing {}", playing);
        Ok(())
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), TransportError> {
        println!("[{}] {}", channel_id, text);
        Ok(())
    }

    fn is_direct_message(&self, channel_id: &str) -> bool {
        channel_id == CONSOLE_CHANNEL
    }

    fn server_for_channel(&self, _channel_id: &str) -> Option<String> {
        None
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }

    fn take_events(&self) -> Option<EventStream> {
        self.events_rx.lock().ok()?.take()
    }
}
