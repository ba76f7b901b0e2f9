//! Context store - capabilities handed to loaders and commands

use std::sync::Arc;

use crate::application::lifecycle::KillSwitch;
use crate::domain::entities::{CommandRegistry, Feather, ModuleExports};
use crate::domain::traits::{Transport, Utilities};
use crate::infrastructure::config::Config;

/// Runtime handles present from the start
#[derive(Clone)]
pub struct Services {
    pub utilities: Arc<dyn Utilities>,
    pub transport: Arc<dyn Transport>,
    pub kill_switch: KillSwitch,
}

impl Services {
    pub fn new(utilities: Arc<dyn Utilities>, transport: Arc<dyn Transport>) -> Self {
        let kill_switch = KillSwitch::new(Arc::clone(&transport));
        Self {
            utilities,
            transport,
            kill_switch,
        }
    }
}

/// Capabilities shared with loaders and command actions
#[derive(Clone)]
pub struct InjectedContext {
    config: Arc<Config>,
    services: Services,
    commands: CommandRegistry,
    privates: CommandRegistry,
    modules: ModuleExports,
    feathers: Vec<Feather>,
}

impl InjectedContext {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn utilities(&self) -> &dyn Utilities {
        self.services.utilities.as_ref()
    }

    pub fn transport(&self) -> &dyn Transport {
        self.services.transport.as_ref()
    }

    pub fn kill_switch(&self) -> &KillSwitch {
        &self.services.kill_switch
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn privates(&self) -> &CommandRegistry {
        &self.privates
    }

    pub fn modules(&self) -> &ModuleExports {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&serde_json::Value> {
        self.modules.get(name)
    }

    pub fn feathers(&self) -> &[Feather] {
        &self.feathers
    }
}

/// Partial update applied by [`ContextStore::merge`]
#[derive(Default)]
pub struct ContextPatch {
    pub config: Option<Config>,
    pub commands: Option<CommandRegistry>,
    pub privates: Option<CommandRegistry>,
    pub modules: Option<ModuleExports>,
    pub feathers: Option<Vec<Feather>>,
}

impl ContextPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commands(mut self, commands: CommandRegistry, privates: CommandRegistry) -> Self {
        self.commands = Some(commands);
        self.privates = Some(privates);
        self
    }

    pub fn with_modules(mut self, modules: ModuleExports) -> Self {
        self.modules = Some(modules);
        self
    }

    pub fn with_feathers(mut self, feathers: Vec<Feather>) -> Self {
        self.feathers = Some(feathers);
        self
    }
}

/// Owns the context while it is being assembled.
///
/// Merges are not synchronized; the coordinator is the only writer.
pub struct ContextStore {
    context: InjectedContext,
}

impl ContextStore {
    pub fn new(config: Config, services: Services) -> Self {
        Self {
            context: InjectedContext {
                config: Arc::new(config),
                services,
                commands: CommandRegistry::new(),
                privates: CommandRegistry::new(),
                modules: ModuleExports::new(),
                feathers: Vec::new(),
            },
        }
    }

    /// Copy every populated field of `patch` into the store, last writer wins.
    /// Module exports merge entry by entry.
    pub fn merge(&mut self, patch: ContextPatch) -> &mut Self {
        let ctx = &mut self.context;

        if let Some(config) = patch.config {
            ctx.config = Arc::new(config);
        }
        if let Some(commands) = patch.commands {
            ctx.commands = commands;
        }
        if let Some(privates) = patch.privates {
            ctx.privates = privates;
        }
        if let Some(modules) = patch.modules {
            ctx.modules.extend(modules);
        }
        if let Some(feathers) = patch.feathers {
            ctx.feathers = feathers;
        }

        self
    }

    pub fn context(&self) -> &InjectedContext {
        &self.context
    }

    /// Freeze the context for sharing
    pub fn into_shared(self) -> Arc<InjectedContext> {
        Arc::new(self.context)
    }
}
