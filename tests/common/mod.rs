//! Shared fakes for integration tests
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock, RwLockWriteGuard};

use feather_bot::application::context::{ContextStore, InjectedContext, Services};
use feather_bot::application::coordinator::{PluginLoadCoordinator, Ready};
use feather_bot::application::errors::{BootError, CommandError, LoadError, TransportError};
use feather_bot::domain::entities::{
    Command, CommandAction, DispatchDetails, Feather, InboundMessage, ModuleExports, User,
};
use feather_bot::domain::traits::{
    BotInfo, CommandLoader, EventStream, FeatherLoader, LoadedCommands, ModuleLoader, Transport,
    TransportEvent,
};
use feather_bot::infrastructure::config::Config;
use feather_bot::infrastructure::utilities::StandardUtilities;

pub const ADMIN: &str = "admin-1";
pub const GUILD_CHANNEL: &str = "general";
pub const GUILD: &str = "guild-1";
pub const DM_CHANNEL: &str = "dm-1";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn config() -> Config {
    let mut config = Config::default();
    config.transport.token = Some("test-token".to_string());
    config.bot.playing = "chess".to_string();
    config.bot.debug = true;
    config.admins = vec![ADMIN.to_string()];
    config
}

/// Transport that records every call and lets the test inject events
pub struct FakeTransport {
    dm_channels: HashSet<String>,
    servers: HashMap<String, String>,
    sent: Mutex<Vec<(String, String)>>,
    presence: Mutex<Vec<String>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    failing_disconnects: AtomicUsize,
    connect_gate: RwLock<()>,
    events_tx: mpsc::Sender<TransportEvent>,
    events_rx: Mutex<Option<EventStream>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        let (events_tx, events_rx) = mpsc::channel(64);
        Arc::new(Self {
            dm_channels: HashSet::from([DM_CHANNEL.to_string()]),
            servers: HashMap::from([(GUILD_CHANNEL.to_string(), GUILD.to_string())]),
            sent: Mutex::new(Vec::new()),
            presence: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            failing_disconnects: AtomicUsize::new(0),
            connect_gate: RwLock::new(()),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        })
    }

    pub async fn push(&self, event: TransportEvent) {
        self.events_tx.send(event).await.expect("event stream open");
    }

    pub async fn say(&self, channel_id: &str, user_id: &str, text: &str) {
        self.push(TransportEvent::Message(message(channel_id, user_id, text))).await;
    }

    /// `connect` waits until the returned guard is dropped
    pub async fn stall_connects(&self) -> RwLockWriteGuard<'_, ()> {
        self.connect_gate.write().await
    }

    pub fn fail_next_disconnect(&self) {
        self.failing_disconnects.store(1, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn presence(&self) -> Vec<String> {
        self.presence.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    pub fn events_available(&self) -> bool {
        self.events_rx.lock().unwrap().is_some()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        let _open = self.connect_gate.read().await;
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.events_tx
            .send(TransportEvent::Ready)
            .await
            .map_err(|_| TransportError::Closed)
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.failing_disconnects.swap(0, Ordering::SeqCst) > 0 {
            return Err(TransportError::Send("disconnect refused".to_string()));
        }
        self.events_tx
            .send(TransportEvent::Disconnect {
                reason: "requested".to_string(),
                code: 1000,
            })
            .await
            .map_err(|_| TransportError::Closed)
    }

    async fn set_presence(&self, playing: &str) -> Result<(), TransportError> {
        self.presence.lock().unwrap().push(playing.to_string());
        Ok(())
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push((channel_id.to_string(), text.to_string()));
        Ok(())
    }

    fn is_direct_message(&self, channel_id: &str) -> bool {
        self.dm_channels.contains(channel_id)
    }

    fn server_for_channel(&self, channel_id: &str) -> Option<String> {
        self.servers.get(channel_id).cloned()
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "bot-1".to_string(),
            username: "feather".to_string(),
        }
    }

    fn take_events(&self) -> Option<EventStream> {
        self.events_rx.lock().unwrap().take()
    }
}

pub fn message(channel_id: &str, user_id: &str, text: &str) -> InboundMessage {
    InboundMessage::new(channel_id, User::new(user_id).with_username(format!("user {}", user_id)), text)
}

/// Records every invocation of the actions it hands out
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<(String, DispatchDetails)>>>,
}

impl Recorder {
    pub fn action(&self, tag: &str) -> RecordingAction {
        RecordingAction {
            tag: tag.to_string(),
            calls: Arc::clone(&self.calls),
        }
    }

    pub fn tags(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn details(&self) -> Vec<DispatchDetails> {
        self.calls.lock().unwrap().iter().map(|(_, d)| d.clone()).collect()
    }
}

pub struct RecordingAction {
    tag: String,
    calls: Arc<Mutex<Vec<(String, DispatchDetails)>>>,
}

#[async_trait]
impl CommandAction for RecordingAction {
    async fn run(&self, _ctx: Arc<InjectedContext>, details: DispatchDetails) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push((self.tag.clone(), details));
        Ok(())
    }
}

/// Loader with a canned result
pub struct Fixed<T>(pub Result<T, String>);

impl<T> Fixed<T> {
    pub fn ok(value: T) -> Arc<Self> {
        Arc::new(Self(Ok(value)))
    }

    pub fn err(message: &str) -> Arc<Self> {
        Arc::new(Self(Err(message.to_string())))
    }
}

impl<T: Clone> Fixed<T> {
    fn get(&self) -> Result<T, LoadError> {
        self.0.clone().map_err(LoadError::Invalid)
    }
}

#[async_trait]
impl CommandLoader for Fixed<LoadedCommands> {
    async fn load(&self, _ctx: &InjectedContext) -> Result<LoadedCommands, LoadError> {
        self.get()
    }
}

#[async_trait]
impl ModuleLoader for Fixed<ModuleExports> {
    async fn load(&self, _ctx: &InjectedContext) -> Result<ModuleExports, LoadError> {
        self.get()
    }
}

#[async_trait]
impl FeatherLoader for Fixed<Vec<Feather>> {
    async fn load(&self, _ctx: &InjectedContext) -> Result<Vec<Feather>, LoadError> {
        self.get()
    }
}

pub fn services(transport: &Arc<FakeTransport>, config: &Config) -> Services {
    let transport: Arc<dyn Transport> = transport.clone();
    let utilities = Arc::new(StandardUtilities::new(config, Arc::clone(&transport)));
    Services::new(utilities, transport)
}

pub fn coordinator(commands: Vec<Command>) -> PluginLoadCoordinator {
    PluginLoadCoordinator::new(
        Fixed::ok(LoadedCommands {
            commands: commands.into_iter().collect(),
            privates: Default::default(),
        }),
        Fixed::ok(ModuleExports::new()),
        Fixed::ok(Vec::<Feather>::new()),
    )
}

/// Load `commands` through the coordinator
pub async fn boot(transport: &Arc<FakeTransport>, commands: Vec<Command>) -> Result<Ready, BootError> {
    ensure_init();
    let config = config();
    let store = ContextStore::new(config.clone(), services(transport, &config));
    coordinator(commands).load(store).await
}

/// Poll `check` until it holds or two seconds pass
pub async fn eventually<F>(mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
