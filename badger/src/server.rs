use std::{collections::HashMap, sync::Arc};

use badger_config::BasicConfiguration;
use badger_core::{GameMode, PermissionOracle};
use badger_inventory::InventoryBackups;

use crate::{
    command::{CommandDispatcher, CommandSender},
    entity::player::Player,
    event::{DispatchReport, EventRegistry, PlayerTeleportEvent},
    module::{Module, ModuleManager, ModuleMetadata, Services},
    modules,
};

/// The module host: owns the event bus, the commands, the modules and the
/// players currently online.
pub struct Server {
    services: Services,
    events: EventRegistry,
    commands: CommandDispatcher,
    modules: ModuleManager,
    /// lower-cased name -> player
    players: HashMap<String, Arc<Player>>,
}

impl Server {
    #[must_use]
    pub fn new(config: BasicConfiguration, permissions: Arc<dyn PermissionOracle>) -> Self {
        Self {
            services: Services {
                config: Arc::new(config),
                permissions,
                backups: Arc::new(InventoryBackups::new()),
            },
            events: EventRegistry::default(),
            commands: CommandDispatcher::default(),
            modules: ModuleManager::new(),
            players: HashMap::new(),
        }
    }

    /// A server with bCreative, bInfoBooks and bHelpful added, not yet
    /// enabled.
    #[must_use]
    pub fn with_default_modules(
        config: BasicConfiguration,
        permissions: Arc<dyn PermissionOracle>,
    ) -> Self {
        let mut server = Self::new(config, permissions);
        for module in modules::default_modules() {
            server.add_module(module);
        }
        server
    }

    #[must_use]
    pub fn config(&self) -> &BasicConfiguration {
        &self.services.config
    }

    #[must_use]
    pub fn services(&self) -> &Services {
        &self.services
    }

    #[must_use]
    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn add_module(&mut self, module: Box<dyn Module>) {
        self.modules.add(module);
    }

    pub fn enable_modules(&mut self) {
        self.modules
            .enable_all(&self.services, &mut self.events, &mut self.commands);
    }

    pub fn enable_module(&mut self, name: &str) -> bool {
        self.modules
            .enable(name, &self.services, &mut self.events, &mut self.commands)
    }

    pub fn disable_module(&mut self, name: &str) -> bool {
        self.modules
            .disable(name, &mut self.events, &mut self.commands)
    }

    pub fn disable_modules(&mut self) {
        self.modules
            .disable_all(&mut self.events, &mut self.commands);
    }

    #[must_use]
    pub fn is_module_enabled(&self, name: &str) -> bool {
        self.modules.is_enabled(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = (&ModuleMetadata, bool)> {
        self.modules.list()
    }

    /// Whether a module registered a command with this label or alias.
    #[must_use]
    pub fn is_command_registered(&self, label: &str) -> bool {
        self.commands.is_registered(label)
    }

    #[must_use]
    pub fn commands(&self) -> &CommandDispatcher {
        &self.commands
    }

    pub fn handle_command(&mut self, sender: &CommandSender, line: &str) {
        self.commands.handle_command(sender, line);
    }

    pub fn add_player(&mut self, name: &str, world: &str, game_mode: GameMode) -> Arc<Player> {
        let player = Arc::new(Player::new(name, world, game_mode));
        log::info!("{name} joined {world} in {game_mode} mode");
        self.players.insert(name.to_lowercase(), player.clone());
        player
    }

    #[must_use]
    pub fn get_player_by_name(&self, name: &str) -> Option<Arc<Player>> {
        self.players.get(&name.to_lowercase()).cloned()
    }

    pub fn remove_player(&mut self, name: &str) -> Option<Arc<Player>> {
        let player = self.players.remove(&name.to_lowercase())?;
        self.services.backups.forget(player.id);
        Some(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &Arc<Player>> {
        self.players.values()
    }

    /// Moves a player to `world` unless a listener vetoes it.
    pub fn teleport(&self, player: &Player, world: &str) -> DispatchReport {
        let from = player.world();
        let report = self.events.on_player_teleport(&PlayerTeleportEvent {
            player,
            from: &from,
            to: world,
        });
        if !report.cancelled {
            player.set_world(world);
        }
        report
    }
}
