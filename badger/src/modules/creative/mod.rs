use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use badger_config::ModuleConfiguration;
use badger_inventory::Material;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use uuid::Uuid;

use crate::{
    event::EventPriority,
    module::{LanguageTable, Module, ModuleContext, ModuleError, ModuleLogger, ModuleMetadata},
};

mod listener;

pub use listener::CreativeListener;

pub const NAME: &str = "bCreative";

static METADATA: ModuleMetadata = ModuleMetadata {
    name: NAME,
    version: env!("CARGO_PKG_VERSION"),
    authors: "TheCodingBadgers",
    description: "Keeps creative mode players from moving items in or out of creative worlds.",
};

/// `<modules>/bCreative/config.toml`
#[serde_inline_default]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CreativeConfig {
    /// Worlds the restrictions apply in.
    #[serde(default)]
    pub worlds: Vec<String>,
    /// Blocks creative players may not open, by name or legacy id.
    #[serde_inline_default(vec!["ENDER_CHEST".to_string(), "CHEST".to_string()])]
    pub interact_blacklist: Vec<String>,
}

impl Default for CreativeConfig {
    fn default() -> Self {
        Self {
            worlds: Vec::new(),
            interact_blacklist: vec!["ENDER_CHEST".to_string(), "CHEST".to_string()],
        }
    }
}

impl ModuleConfiguration for CreativeConfig {}

/// What bCreative knows while it is enabled.
#[derive(Debug, Default)]
pub struct CreativeState {
    /// Lower-cased world names.
    pub active_worlds: HashSet<String>,
    pub interact_blacklist: Vec<Material>,
    /// Entity id of the last item each player was refused.
    pub last_pickup: HashMap<Uuid, i32>,
    pub language: LanguageTable,
}

impl CreativeState {
    /// Builds the state from a loaded config. Blacklist entries that name no
    /// material are skipped.
    pub fn from_config(config: &CreativeConfig, language: LanguageTable, logger: &ModuleLogger) -> Self {
        let active_worlds = config
            .worlds
            .iter()
            .map(|world| world.to_lowercase())
            .collect();

        let mut interact_blacklist = Vec::new();
        for entry in &config.interact_blacklist {
            match resolve_material(entry) {
                Some(material) if !interact_blacklist.contains(&material) => {
                    interact_blacklist.push(material);
                }
                Some(_) => {}
                None => logger.debug(&format!("'{entry}' is not a material, ignoring it")),
            }
        }

        Self {
            active_worlds,
            interact_blacklist,
            last_pickup: HashMap::new(),
            language,
        }
    }

    #[must_use]
    pub fn is_active(&self, world: &str) -> bool {
        self.active_worlds.contains(&world.to_lowercase())
    }

    pub fn clear(&mut self) {
        self.active_worlds.clear();
        self.interact_blacklist.clear();
        self.last_pickup.clear();
        self.language = LanguageTable::default();
    }
}

/// A numeric legacy id, then the exact symbolic name, then a lenient match.
fn resolve_material(entry: &str) -> Option<Material> {
    if let Ok(id) = entry.trim().parse::<u16>() {
        return Material::from_legacy_id(id);
    }
    Material::from_name(entry).or_else(|| Material::match_material(entry))
}

#[derive(Default)]
pub struct CreativeModule {
    state: Option<Arc<Mutex<CreativeState>>>,
}

impl Module for CreativeModule {
    fn metadata(&self) -> &ModuleMetadata {
        &METADATA
    }

    fn on_enable(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleError> {
        ctx.ensure_data_folder()?;
        let config: CreativeConfig = ctx.load_config();
        let language = ctx.load_language();
        let state = CreativeState::from_config(&config, language, ctx.logger());

        let logger = ctx.logger();
        logger.info("bCreative is active in the following worlds:");
        for world in &state.active_worlds {
            logger.info(&format!(" - {world}"));
        }
        logger.info("bCreative will block interaction with the following materials:");
        for material in &state.interact_blacklist {
            logger.info(&format!(" - {material}"));
        }

        let state = Arc::new(Mutex::new(state));
        let listener = Arc::new(CreativeListener::new(
            ctx.services.permissions.clone(),
            ctx.services.backups.clone(),
            &ctx.services.config.default_world,
            state.clone(),
        ));

        let mut registrar = ctx.listeners();
        let l = listener.clone();
        registrar.register_player_interact(EventPriority::Normal, move |event| l.on_interact(event));
        let l = listener.clone();
        registrar.register_player_drop_item(EventPriority::Normal, move |event| l.on_drop(event));
        let l = listener.clone();
        registrar.register_player_pickup_item(EventPriority::Normal, move |event| l.on_pickup(event));
        registrar.register_player_teleport(EventPriority::Normal, move |event| {
            listener.on_teleport(event)
        });

        self.state = Some(state);
        Ok(())
    }

    fn on_disable(&mut self) {
        if let Some(state) = self.state.take() {
            state.lock().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use badger_inventory::Material;

    use crate::module::{LanguageTable, ModuleLogger};

    use super::{CreativeConfig, CreativeState};

    #[test]
    fn state_from_config() {
        let config = CreativeConfig {
            worlds: vec!["Creative".to_string(), "PLOTS".to_string()],
            interact_blacklist: vec![
                "54".to_string(),
                "ENDER_CHEST".to_string(),
                "trapped chest".to_string(),
                "chest".to_string(),
                "not a block".to_string(),
                "9999".to_string(),
            ],
        };
        let state = CreativeState::from_config(
            &config,
            LanguageTable::default(),
            &ModuleLogger::new("test"),
        );

        assert!(state.is_active("creative"));
        assert!(state.is_active("Plots"));
        assert!(!state.is_active("world"));
        assert_eq!(
            state.interact_blacklist,
            [Material::Chest, Material::EnderChest, Material::TrappedChest]
        );
    }

    #[test]
    fn default_blacklist() {
        let state = CreativeState::from_config(
            &CreativeConfig::default(),
            LanguageTable::default(),
            &ModuleLogger::new("test"),
        );
        assert!(state.active_worlds.is_empty());
        assert_eq!(state.interact_blacklist, [Material::EnderChest, Material::Chest]);
    }
}
