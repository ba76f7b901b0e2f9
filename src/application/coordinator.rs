//! Plugin load coordinator - runs the three loaders and assembles the context

use std::sync::Arc;

use crate::application::context::{ContextPatch, ContextStore, InjectedContext};
use crate::application::errors::{BootError, LoadError};
use crate::domain::traits::{CommandLoader, FeatherLoader, LoaderKind, ModuleLoader};

/// Proof that every loader succeeded and the context is complete.
///
/// Only [`PluginLoadCoordinator::load`] creates one.
pub struct Ready {
    context: Arc<InjectedContext>,
}

impl Ready {
    pub fn context(&self) -> &Arc<InjectedContext> {
        &self.context
    }
}

pub struct PluginLoadCoordinator {
    commands: Arc<dyn CommandLoader>,
    modules: Arc<dyn ModuleLoader>,
    feathers: Arc<dyn FeatherLoader>,
}

impl PluginLoadCoordinator {
    pub fn new(
        commands: Arc<dyn CommandLoader>,
        modules: Arc<dyn ModuleLoader>,
        feathers: Arc<dyn FeatherLoader>,
    ) -> Self {
        Self {
            commands,
            modules,
            feathers,
        }
    }

    /// Run all three loads concurrently and wait for every one of them.
    /// Any failure discards all results and the context is never published.
    pub async fn load(self, mut store: ContextStore) -> Result<Ready, BootError> {
        let debug = store.context().config().bot.debug;

        let (commands, modules, feathers) = {
            let ctx = store.context();
            tokio::join!(
                self.commands.load(ctx),
                self.modules.load(ctx),
                self.feathers.load(ctx),
            )
        };

        let (commands, modules, feathers) = match (commands, modules, feathers) {
            (Ok(c), Ok(m), Ok(f)) => (c, m, f),
            (c, m, f) => {
                let failures = [
                    (LoaderKind::Commands, c.err()),
                    (LoaderKind::Modules, m.err()),
                    (LoaderKind::Feathers, f.err()),
                ];
                let mut first = None;
                for (loader, err) in failures {
                    let Some(err) = err else { continue };
                    if debug {
                        tracing::error!("Plugin load failed ({}): {}", loader, err);
                    }
                    first.get_or_insert((loader, err));
                }
                let (loader, source) = first.unwrap_or((
                    LoaderKind::Commands,
                    LoadError::Invalid("unknown load failure".to_string()),
                ));
                return Err(BootError::Load { loader, source });
            }
        };

        tracing::info!(
            "Loaded {} commands, {} internal commands, {} modules, {} feathers",
            commands.commands.len(),
            commands.privates.len(),
            modules.len(),
            feathers.len(),
        );

        store
            .merge(ContextPatch::new().with_commands(commands.commands, commands.privates))
            .merge(ContextPatch::new().with_modules(modules))
            .merge(ContextPatch::new().with_feathers(feathers));

        Ok(Ready {
            context: store.into_shared(),
        })
    }
}
