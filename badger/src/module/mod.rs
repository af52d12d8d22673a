use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use badger_config::{BasicConfiguration, ConfigError, ModuleConfiguration};
use badger_core::{
    text::{
        color::{Color, NamedColor},
        TextComponent,
    },
    PermissionOracle,
};
use badger_inventory::InventoryBackups;
use thiserror::Error;

use crate::{
    command::{CommandDispatcher, ModuleCommand},
    error::BadgerError,
    event::{EventRegistry, OwnedRegistrar},
    modules::info_books::catalog::CatalogError,
};

pub mod language;

pub use language::LanguageTable;

#[derive(Debug, Clone)]
pub struct ModuleMetadata {
    /// The name of the module.
    pub name: &'static str,
    /// The version of the module.
    pub version: &'static str,
    /// The authors of the module.
    pub authors: &'static str,
    /// A description of the module.
    pub description: &'static str,
}

pub trait Module: Send {
    fn metadata(&self) -> &ModuleMetadata;

    /// Called once when the host enables the module. Registers listeners and
    /// commands through `ctx` and builds the module's runtime state.
    fn on_enable(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleError>;

    /// Drops the runtime state. Persisted configuration is left alone and the
    /// host unregisters the module's hooks afterwards.
    fn on_disable(&mut self) {}
}

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("book catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("couldn't create data folder {path:?}: {source}")]
    DataFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Logs through the host logger with the module name as prefix.
#[derive(Debug, Clone)]
pub struct ModuleLogger {
    module_name: String,
}

impl ModuleLogger {
    #[must_use]
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
        }
    }

    pub fn info(&self, message: &str) {
        log::info!("[{}] {}", self.module_name, message);
    }

    pub fn warn(&self, message: &str) {
        log::warn!("[{}] {}", self.module_name, message);
    }

    pub fn error(&self, message: &str) {
        log::error!("[{}] {}", self.module_name, message);
    }

    pub fn debug(&self, message: &str) {
        log::debug!("[{}] {}", self.module_name, message);
    }
}

/// What the host hands to every module.
#[derive(Clone)]
pub struct Services {
    pub config: Arc<BasicConfiguration>,
    pub permissions: Arc<dyn PermissionOracle>,
    pub backups: Arc<InventoryBackups>,
}

/// A chat line from a module: `[<module>] <message>`, the prefix in dark
/// purple.
#[must_use]
pub fn chat_message(module: &str, message: impl Into<String>) -> TextComponent<'static> {
    TextComponent::text_string(format!("[{module}] "))
        .color_named(NamedColor::DarkPurple)
        .add_child(TextComponent::text_string(message.into()).color(Color::Reset))
}

pub struct ModuleContext<'a> {
    metadata: &'a ModuleMetadata,
    data_folder: PathBuf,
    pub services: &'a Services,
    events: &'a mut EventRegistry,
    commands: &'a mut CommandDispatcher,
    logger: ModuleLogger,
}

impl<'a> ModuleContext<'a> {
    pub fn new(
        metadata: &'a ModuleMetadata,
        services: &'a Services,
        events: &'a mut EventRegistry,
        commands: &'a mut CommandDispatcher,
    ) -> Self {
        Self {
            metadata,
            data_folder: services.config.modules_folder.join(metadata.name),
            services,
            events,
            commands,
            logger: ModuleLogger::new(metadata.name),
        }
    }

    /// `<modules folder>/<module name>`
    #[must_use]
    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    #[must_use]
    pub fn logger(&self) -> &ModuleLogger {
        &self.logger
    }

    pub fn ensure_data_folder(&self) -> Result<(), ModuleError> {
        std::fs::create_dir_all(&self.data_folder).map_err(|source| ModuleError::DataFolder {
            path: self.data_folder.clone(),
            source,
        })
    }

    /// Loads the module's config file, merging in and persisting defaults.
    pub fn load_config<C: ModuleConfiguration>(&self) -> C {
        C::load(&self.data_folder)
    }

    /// Loads `<data folder>/<name>_<language>.lang`.
    pub fn load_language(&self) -> LanguageTable {
        let path = self.data_folder.join(format!(
            "{}_{}.lang",
            self.metadata.name, self.services.config.language
        ));
        LanguageTable::load(&path, &self.logger)
    }

    /// Listener registration, recorded under this module.
    pub fn listeners(&mut self) -> OwnedRegistrar<'_> {
        self.events.owned(self.metadata.name)
    }

    pub fn register_command(&mut self, command: Box<dyn ModuleCommand>) -> bool {
        self.commands.register(self.metadata.name, command)
    }
}

struct ModuleEntry {
    module: Box<dyn Module>,
    enabled: bool,
}

/// Owns the modules and switches them on and off.
#[derive(Default)]
pub struct ModuleManager {
    modules: Vec<ModuleEntry>,
}

impl ModuleManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: Box<dyn Module>) {
        self.modules.push(ModuleEntry {
            module,
            enabled: false,
        });
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut ModuleEntry> {
        self.modules
            .iter_mut()
            .find(|entry| entry.module.metadata().name.eq_ignore_ascii_case(name))
    }

    /// Enables one module. Failure is logged and rolls back whatever the
    /// module registered before failing.
    pub fn enable(
        &mut self,
        name: &str,
        services: &Services,
        events: &mut EventRegistry,
        commands: &mut CommandDispatcher,
    ) -> bool {
        let Some(entry) = self.entry_mut(name) else {
            log::warn!("No module called '{name}'");
            return false;
        };
        if entry.enabled {
            return true;
        }

        let metadata = entry.module.metadata().clone();
        log::info!("Enabling {} v{}", metadata.name, metadata.version);
        let result = {
            let mut ctx = ModuleContext::new(&metadata, services, events, commands);
            entry.module.on_enable(&mut ctx)
        };
        match result {
            Ok(()) => {
                entry.enabled = true;
                true
            }
            Err(err) => {
                err.log();
                log::error!("[{}] Failed to enable, module stays disabled", metadata.name);
                events.unregister_owner(metadata.name);
                commands.unregister_owner(metadata.name);
                false
            }
        }
    }

    pub fn enable_all(
        &mut self,
        services: &Services,
        events: &mut EventRegistry,
        commands: &mut CommandDispatcher,
    ) {
        let names: Vec<&'static str> = self
            .modules
            .iter()
            .map(|entry| entry.module.metadata().name)
            .collect();
        for name in names {
            self.enable(name, services, events, commands);
        }
    }

    /// Disables one module and unregisters all of its listeners and commands.
    pub fn disable(
        &mut self,
        name: &str,
        events: &mut EventRegistry,
        commands: &mut CommandDispatcher,
    ) -> bool {
        let Some(entry) = self.entry_mut(name) else {
            return false;
        };
        if !entry.enabled {
            return false;
        }

        let module_name = entry.module.metadata().name;
        entry.module.on_disable();
        entry.enabled = false;
        let listeners = events.unregister_owner(module_name);
        let removed = commands.unregister_owner(module_name);
        log::info!(
            "Disabled {module_name} ({listeners} listeners, {removed} commands unregistered)"
        );
        true
    }

    pub fn disable_all(&mut self, events: &mut EventRegistry, commands: &mut CommandDispatcher) {
        let names: Vec<&'static str> = self
            .modules
            .iter()
            .rev()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.module.metadata().name)
            .collect();
        for name in names {
            self.disable(name, events, commands);
        }
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.modules
            .iter()
            .any(|entry| entry.enabled && entry.module.metadata().name.eq_ignore_ascii_case(name))
    }

    /// Metadata of every module and whether it is enabled.
    pub fn list(&self) -> impl Iterator<Item = (&ModuleMetadata, bool)> {
        self.modules
            .iter()
            .map(|entry| (entry.module.metadata(), entry.enabled))
    }
}
