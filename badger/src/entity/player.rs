use badger_core::{text::TextComponent, GameMode};
use badger_inventory::PlayerInventory;
use parking_lot::{Mutex, MutexGuard};
use uuid::Uuid;

/// A player as the host reports it to the modules.
pub struct Player {
    pub id: Uuid,
    pub name: String,
    game_mode: Mutex<GameMode>,
    world: Mutex<String>,
    inventory: Mutex<PlayerInventory>,
    /// Every chat message delivered to this player, oldest first.
    messages: Mutex<Vec<TextComponent<'static>>>,
}

impl Player {
    /// Creates a player with the offline-mode UUID derived from its name.
    #[must_use]
    pub fn new(name: &str, world: &str, game_mode: GameMode) -> Self {
        let id = Uuid::new_v3(
            &Uuid::NAMESPACE_OID,
            format!("OfflinePlayer:{name}").as_bytes(),
        );
        Self::with_id(id, name, world, game_mode)
    }

    #[must_use]
    pub fn with_id(id: Uuid, name: &str, world: &str, game_mode: GameMode) -> Self {
        Self {
            id,
            name: name.to_string(),
            game_mode: Mutex::new(game_mode),
            world: Mutex::new(world.to_string()),
            inventory: Mutex::new(PlayerInventory::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn game_mode(&self) -> GameMode {
        *self.game_mode.lock()
    }

    pub fn set_game_mode(&self, game_mode: GameMode) {
        *self.game_mode.lock() = game_mode;
    }

    pub fn world(&self) -> String {
        self.world.lock().clone()
    }

    pub fn set_world(&self, world: &str) {
        *self.world.lock() = world.to_string();
    }

    pub fn inventory(&self) -> MutexGuard<'_, PlayerInventory> {
        self.inventory.lock()
    }

    pub fn send_message(&self, message: TextComponent<'static>) {
        log::debug!("[{} <- chat] {}", self.name, message.plain());
        self.messages.lock().push(message);
    }

    /// Removes and returns the delivered messages.
    pub fn take_messages(&self) -> Vec<TextComponent<'static>> {
        std::mem::take(&mut *self.messages.lock())
    }
}
