//! Bot service - boots plugins and drives the transport event loop

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::application::context::{ContextStore, Services};
use crate::application::coordinator::PluginLoadCoordinator;
use crate::application::errors::{BotError, TransportError};
use crate::application::lifecycle::{KillSwitch, LifecycleAction, LifecycleController};
use crate::application::messaging::MessageDispatcher;
use crate::domain::traits::TransportEvent;
use crate::infrastructure::config::Config;

/// Boots plugins, then drives transport events until a manual kill
pub struct BotService {
    config: Config,
    services: Services,
    coordinator: PluginLoadCoordinator,
}

impl BotService {
    pub fn new(config: Config, services: Services, coordinator: PluginLoadCoordinator) -> Self {
        Self {
            config,
            services,
            coordinator,
        }
    }

    pub fn kill_switch(&self) -> KillSwitch {
        self.services.kill_switch.clone()
    }

    /// Returns `Ok(())` only after a manual kill completed its disconnect.
    pub async fn run(self) -> Result<(), BotError> {
        let Self { config, services, coordinator } = self;
        let transport = Arc::clone(&services.transport);
        let mut lifecycle = LifecycleController::new(Arc::clone(&transport), services.kill_switch.clone());

        tracing::info!("Starting {}", config.bot.name);
        let ready = coordinator.load(ContextStore::new(config, services)).await?;

        let mut events = lifecycle.listen(&ready)?;
        let dispatcher = MessageDispatcher::new(&ready);
        transport.connect().await?;

        let mut in_flight = JoinSet::new();
        let mut reconnects = JoinSet::new();

        loop {
            let action = tokio::select! {
                Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = result {
                        tracing::error!("Message task aborted: {}", e);
                    }
                    LifecycleAction::Continue
                }
                Some(result) = reconnects.join_next(), if !reconnects.is_empty() => {
                    match result {
                        Ok(outcome) => lifecycle.on_reconnect_finished(outcome?),
                        Err(e) => {
                            tracing::error!("Reconnect task aborted: {}", e);
                            LifecycleAction::Reconnect
                        }
                    }
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        return Err(TransportError::Closed.into());
                    };

                    match event {
                        TransportEvent::Ready => {
                            if let Err(e) = lifecycle.on_ready(ready.context()).await {
                                tracing::warn!("Failed to set presence: {}", e);
                            }
                            LifecycleAction::Continue
                        }
                        TransportEvent::Message(message) => {
                            let dispatcher = dispatcher.clone();
                            in_flight.spawn(async move {
                                dispatcher.dispatch(message).await;
                            });
                            LifecycleAction::Continue
                        }
                        TransportEvent::Disconnect { reason, code } => lifecycle.on_disconnect(&reason, code),
                        TransportEvent::ServerRemoved { server_id } => {
                            tracing::info!("Removed from server {}", server_id);
                            LifecycleAction::Continue
                        }
                    }
                }
            };

            match action {
                LifecycleAction::Continue => {}
                LifecycleAction::Reconnect => {
                    reconnects.spawn(lifecycle.reconnector().run());
                }
                LifecycleAction::Shutdown => break,
            }
        }

        reconnects.shutdown().await;

        while let Some(result) = in_flight.join_next().await {
            if let Err(e) = result {
                tracing::error!("Message task aborted: {}", e);
            }
        }

        tracing::info!("Shut down");
        Ok(())
    }
}
