//! Connection lifecycle - ready, disconnect, reconnect and kill

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::context::InjectedContext;
use crate::application::coordinator::Ready;
use crate::application::errors::TransportError;
use crate::domain::traits::{EventStream, Transport};

/// Per-instance shutdown flag. Once thrown it stays thrown.
#[derive(Clone)]
pub struct KillSwitch {
    manual_kill: Arc<AtomicBool>,
    disconnect_requested: Arc<AtomicBool>,
    transport: Arc<dyn Transport>,
}

impl KillSwitch {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            manual_kill: Arc::new(AtomicBool::new(false)),
            disconnect_requested: Arc::new(AtomicBool::new(false)),
            transport,
        }
    }

    /// Set the flag and ask the transport to disconnect. Returns whether this
    /// call issued the disconnect; a failed disconnect is retried by the next call.
    pub async fn kill(&self) -> Result<bool, TransportError> {
        self.manual_kill.store(true, Ordering::SeqCst);
        if self.disconnect_requested.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }

        tracing::info!("Manual kill requested, disconnecting");
        if let Err(e) = self.transport.disconnect().await {
            self.disconnect_requested.store(false, Ordering::SeqCst);
            return Err(e);
        }
        Ok(true)
    }

    pub fn is_killed(&self) -> bool {
        self.manual_kill.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Listening,
    Reconnecting,
    Killed,
}

/// What the run loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Continue,
    /// Start a [`Reconnector`] alongside the event loop
    Reconnect,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectOutcome {
    Connected,
    Killed,
}

/// Retries `connect` until it succeeds, the kill switch is thrown or the
/// transport reports it is closed for good. Runs off the event loop so the
/// event stream keeps draining while the transport is down.
pub struct Reconnector {
    transport: Arc<dyn Transport>,
    kill_switch: KillSwitch,
}

impl Reconnector {
    pub async fn run(self) -> Result<ReconnectOutcome, TransportError> {
        loop {
            if self.kill_switch.is_killed() {
                return Ok(ReconnectOutcome::Killed);
            }
            match self.transport.connect().await {
                Ok(()) => return Ok(ReconnectOutcome::Connected),
                Err(TransportError::Closed) => return Err(TransportError::Closed),
                Err(e) => {
                    tracing::warn!("Reconnect failed: {}", e);
                    tokio::task::yield_now().await;
                }
            }
        }
    }
}

pub struct LifecycleController {
    state: LifecycleState,
    transport: Arc<dyn Transport>,
    kill_switch: KillSwitch,
    disconnected_while_reconnecting: bool,
}

impl LifecycleController {
    pub fn new(transport: Arc<dyn Transport>, kill_switch: KillSwitch) -> Self {
        Self {
            state: LifecycleState::Idle,
            transport,
            kill_switch,
            disconnected_while_reconnecting: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The single Idle -> Listening transition. Needs proof that loading finished.
    pub fn listen(&mut self, _ready: &Ready) -> Result<EventStream, TransportError> {
        if self.state != LifecycleState::Idle {
            return Err(TransportError::EventsTaken);
        }
        let events = self.transport.take_events().ok_or(TransportError::EventsTaken)?;
        self.state = LifecycleState::Listening;
        tracing::debug!("Lifecycle listening");
        Ok(events)
    }

    /// Transport is (re)connected: publish presence
    pub async fn on_ready(&mut self, ctx: &InjectedContext) -> Result<(), TransportError> {
        if self.state == LifecycleState::Killed {
            return Ok(());
        }
        self.state = LifecycleState::Listening;

        let status = ctx.utilities().filter_status_text(&ctx.config().bot.playing);
        let info = self.transport.bot_info();
        tracing::info!("Connected as {} ({}), playing {}", info.username, info.id, status);
        self.transport.set_presence(&status).await
    }

    /// Shut down after a manual kill, otherwise reconnect. A disconnect seen
    /// while a reconnect is running is remembered and retried once it ends.
    pub fn on_disconnect(&mut self, reason: &str, code: u16) -> LifecycleAction {
        if self.kill_switch.is_killed() || self.state == LifecycleState::Killed {
            tracing::info!("Disconnected ({}: {}), shutting down", code, reason);
            self.state = LifecycleState::Killed;
            return LifecycleAction::Shutdown;
        }

        if self.state == LifecycleState::Reconnecting {
            tracing::debug!("Disconnected ({}: {}) while reconnecting", code, reason);
            self.disconnected_while_reconnecting = true;
            return LifecycleAction::Continue;
        }

        tracing::warn!("Disconnected ({}: {}), reconnecting", code, reason);
        self.state = LifecycleState::Reconnecting;
        LifecycleAction::Reconnect
    }

    pub fn reconnector(&self) -> Reconnector {
        Reconnector {
            transport: Arc::clone(&self.transport),
            kill_switch: self.kill_switch.clone(),
        }
    }

    pub fn on_reconnect_finished(&mut self, outcome: ReconnectOutcome) -> LifecycleAction {
        match outcome {
            ReconnectOutcome::Killed => {
                self.state = LifecycleState::Killed;
                LifecycleAction::Shutdown
            }
            ReconnectOutcome::Connected if self.disconnected_while_reconnecting => {
                self.disconnected_while_reconnecting = false;
                LifecycleAction::Reconnect
            }
            ReconnectOutcome::Connected => {
                self.state = LifecycleState::Listening;
                LifecycleAction::Continue
            }
        }
    }
}
