//! Fakes shared by unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::context::InjectedContext;
use crate::application::errors::{LoadError, TransportError};
use crate::domain::entities::{Feather, ModuleExports};
use crate::domain::traits::{
    BotInfo, CommandLoader, EventStream, FeatherLoader, LoadedCommands, ModuleLoader, Transport,
    TransportEvent, Utilities,
};

pub struct StubTransport {
    servers: HashMap<String, String>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    failing_connects: AtomicUsize,
    failing_disconnects: AtomicUsize,
    closed: AtomicBool,
    _events_tx: mpsc::Sender<TransportEvent>,
    events_rx: Mutex<Option<EventStream>>,
}

impl Default for StubTransport {
    fn default() -> Self {
        let (events_tx, events_rx) = mpsc::channel(16);
        Self {
            servers: HashMap::new(),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            failing_connects: AtomicUsize::new(0),
            failing_disconnects: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            _events_tx: events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }
}

impl StubTransport {
    pub fn with_server(mut self, channel_id: &str, server_id: &str) -> Self {
        self.servers.insert(channel_id.to_string(), server_id.to_string());
        self
    }

    pub fn fail_next_connects(&self, n: usize) {
        self.failing_connects.store(n, Ordering::SeqCst);
    }

    pub fn fail_next_disconnects(&self, n: usize) {
        self.failing_disconnects.store(n, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        let failing = self.failing_connects.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_connects.store(failing - 1, Ordering::SeqCst);
            return Err(TransportError::Connect("refused".to_string()));
        }
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing_disconnects.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_disconnects.store(failing - 1, Ordering::SeqCst);
            return Err(TransportError::Send("disconnect refused".to_string()));
        }
        Ok(())
    }

    async fn set_presence(&self, _playing: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send_message(&self, _channel_id: &str, _text: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn is_direct_message(&self, channel_id: &str) -> bool {
        channel_id.starts_with("dm-")
    }

    fn server_for_channel(&self, channel_id: &str) -> Option<String> {
        self.servers.get(channel_id).cloned()
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "bot".to_string(),
            username: "stub".to_string(),
        }
    }

    fn take_events(&self) -> Option<EventStream> {
        self.events_rx.lock().unwrap().take()
    }
}

/// `!` prefix, administrators by id
pub struct StubUtilities {
    admins: Vec<String>,
    everything_is_command: bool,
}

impl Default for StubUtilities {
    fn default() -> Self {
        Self {
            admins: vec!["admin".to_string()],
            everything_is_command: false,
        }
    }
}

impl StubUtilities {
    pub fn treat_everything_as_command(mut self) -> Self {
        self.everything_is_command = true;
        self
    }
}

impl Utilities for StubUtilities {
    fn is_command(&self, text: &str) -> bool {
        self.everything_is_command || (text.starts_with('!') && text.len() > 1)
    }

    fn strip_prefix(&self, text: &str) -> String {
        text.strip_prefix('!').unwrap_or(text).to_string()
    }

    fn server_id(&self, channel_id: &str) -> Option<String> {
        Some(format!("server-of-{}", channel_id))
    }

    fn is_administrator(&self, user_id: &str) -> bool {
        self.admins.iter().any(|a| a == user_id)
    }

    fn filter_status_text(&self, text: &str) -> String {
        text.trim().to_string()
    }
}

/// Loader returning a fixed value or a fixed failure
pub struct StaticLoader<T> {
    result: Result<T, String>,
}

impl<T> StaticLoader<T> {
    pub fn ok(value: T) -> Self {
        Self { result: Ok(value) }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl<T: Clone> StaticLoader<T> {
    fn get(&self) -> Result<T, LoadError> {
        self.result.clone().map_err(LoadError::Invalid)
    }
}

#[async_trait]
impl CommandLoader for StaticLoader<LoadedCommands> {
    async fn load(&self, _ctx: &InjectedContext) -> Result<LoadedCommands, LoadError> {
        self.get()
    }
}

#[async_trait]
impl ModuleLoader for StaticLoader<ModuleExports> {
    async fn load(&self, _ctx: &InjectedContext) -> Result<ModuleExports, LoadError> {
        self.get()
    }
}

#[async_trait]
impl FeatherLoader for StaticLoader<Vec<Feather>> {
    async fn load(&self, _ctx: &InjectedContext) -> Result<Vec<Feather>, LoadError> {
        self.get()
    }
}
