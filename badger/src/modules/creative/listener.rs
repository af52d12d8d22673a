use std::sync::Arc;

use badger_core::{GameMode, PermissionOracle};
use badger_inventory::InventoryBackups;
use parking_lot::Mutex;

use super::{CreativeState, NAME};
use crate::{
    entity::player::Player,
    event::{
        EventResult, InteractAction, PlayerDropItemEvent, PlayerInteractEvent,
        PlayerPickupItemEvent, PlayerTeleportEvent,
    },
    module::chat_message,
};

const PERMISSION_INTERACT: &str = "bcreative.player.interact";
const PERMISSION_DROP: &str = "bcreative.player.item.drop";
const PERMISSION_PICKUP: &str = "bcreative.player.item.pickup";
const PERMISSION_TELEPORT: &str = "bcreative.player.teleport";

pub struct CreativeListener {
    permissions: Arc<dyn PermissionOracle>,
    backups: Arc<InventoryBackups>,
    default_world: String,
    state: Arc<Mutex<CreativeState>>,
}

impl CreativeListener {
    pub fn new(
        permissions: Arc<dyn PermissionOracle>,
        backups: Arc<InventoryBackups>,
        default_world: &str,
        state: Arc<Mutex<CreativeState>>,
    ) -> Self {
        Self {
            permissions,
            backups,
            default_world: default_world.to_string(),
            state,
        }
    }

    /// A creative player without `node` standing in an active world.
    fn is_restricted(&self, player: &Player, node: &str, state: &CreativeState) -> bool {
        !self.permissions.has(&player.id, node)
            && player.game_mode() == GameMode::Creative
            && state.is_active(&player.world())
    }

    pub fn on_interact(&self, event: &PlayerInteractEvent<'_>) -> EventResult {
        let state = self.state.lock();
        if !self.is_restricted(event.player, PERMISSION_INTERACT, &state) {
            return EventResult::Allow;
        }
        if event.action != InteractAction::RightClickBlock {
            return EventResult::Allow;
        }
        let Some(material) = event.clicked_block else {
            return EventResult::Allow;
        };
        if !state.interact_blacklist.contains(&material) {
            return EventResult::Allow;
        }

        let message = state
            .language
            .get_or(
                "interact-denied",
                "You cannot open '%material%' whilst in creative mode.",
            )
            .replace("%material%", material.name());
        EventResult::deny(chat_message(NAME, message))
    }

    pub fn on_drop(&self, event: &PlayerDropItemEvent<'_>) -> EventResult {
        let state = self.state.lock();
        if !self.is_restricted(event.player, PERMISSION_DROP, &state) {
            return EventResult::Allow;
        }

        let message = state.language.get_or(
            "drop-denied",
            "You cannot drop items whilst in creative mode.",
        );
        EventResult::deny(chat_message(NAME, message))
    }

    /// Always vetoed when restricted, but the player is only told once per
    /// item so standing on a stack doesn't flood the chat.
    pub fn on_pickup(&self, event: &PlayerPickupItemEvent<'_>) -> EventResult {
        let mut state = self.state.lock();
        if !self.is_restricted(event.player, PERMISSION_PICKUP, &state) {
            return EventResult::Allow;
        }

        let entity_id = event.item.entity_id;
        if state.last_pickup.get(&event.player.id) == Some(&entity_id) {
            return EventResult::Deny(Vec::new());
        }
        state.last_pickup.insert(event.player.id, entity_id);

        let message = state.language.get_or(
            "pickup-denied",
            "You cannot pickup items whilst in creative mode.",
        );
        EventResult::deny(chat_message(NAME, message))
    }

    /// Swaps inventories when a player crosses into or out of an active
    /// world. Entering and leaving are checked independently, so a teleport
    /// between two active worlds runs both.
    pub fn on_teleport(&self, event: &PlayerTeleportEvent<'_>) -> EventResult {
        let player = event.player;
        if self.permissions.has(&player.id, PERMISSION_TELEPORT) {
            return EventResult::Allow;
        }
        if !event.changes_world() {
            return EventResult::Allow;
        }

        let state = self.state.lock();
        let from_active = state.is_active(event.from);
        let to_active = state.is_active(event.to);
        let mut messages = Vec::new();

        if to_active {
            let backup_world = if from_active {
                self.default_world.as_str()
            } else {
                event.from
            };
            let mut inventory = player.inventory();
            self.backups
                .backup(player.id, backup_world, &mut inventory, true);
            self.backups.restore(player.id, event.to, &mut inventory);
            messages.push(chat_message(
                NAME,
                state.language.get_or(
                    "teleport-enter",
                    "Your inventory has been backed up whilst you are in the creative world",
                ),
            ));
        }

        if from_active {
            let restore_world = if to_active {
                self.default_world.as_str()
            } else {
                event.to
            };
            let mut inventory = player.inventory();
            self.backups
                .backup(player.id, event.from, &mut inventory, true);
            self.backups.restore(player.id, restore_world, &mut inventory);
            messages.push(chat_message(
                NAME,
                state.language.get_or(
                    "teleport-leave",
                    "Your inventory has been restored now you have left the creative world",
                ),
            ));
        }

        if messages.is_empty() {
            EventResult::Allow
        } else {
            EventResult::Notice(messages)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use badger_core::{GameMode, PermissionTable};
    use badger_inventory::{InventoryBackups, ItemEntity, ItemStack, Material, PlayerInventory};
    use parking_lot::Mutex;

    use crate::{
        entity::player::Player,
        event::{
            EventResult, InteractAction, PlayerDropItemEvent, PlayerInteractEvent,
            PlayerPickupItemEvent, PlayerTeleportEvent,
        },
        module::{LanguageTable, ModuleLogger},
        modules::creative::{CreativeConfig, CreativeState},
    };

    use super::CreativeListener;

    struct Fixture {
        permissions: Arc<PermissionTable>,
        backups: Arc<InventoryBackups>,
        state: Arc<Mutex<CreativeState>>,
        listener: CreativeListener,
    }

    fn fixture(worlds: &[&str]) -> Fixture {
        let config = CreativeConfig {
            worlds: worlds.iter().map(ToString::to_string).collect(),
            ..CreativeConfig::default()
        };
        let state = Arc::new(Mutex::new(CreativeState::from_config(
            &config,
            LanguageTable::default(),
            &ModuleLogger::new("test"),
        )));
        let permissions = Arc::new(PermissionTable::new());
        let backups = Arc::new(InventoryBackups::new());
        let listener =
            CreativeListener::new(permissions.clone(), backups.clone(), "world", state.clone());
        Fixture {
            permissions,
            backups,
            state,
            listener,
        }
    }

    fn message_of(result: &EventResult) -> Vec<String> {
        match result {
            EventResult::Deny(messages) | EventResult::Notice(messages) => {
                messages.iter().map(|m| m.plain()).collect()
            }
            _ => Vec::new(),
        }
    }

    fn teleport(listener: &CreativeListener, player: &Player, to: &str) -> EventResult {
        let from = player.world();
        let result = listener.on_teleport(&PlayerTeleportEvent {
            player,
            from: &from,
            to,
        });
        player.set_world(to);
        result
    }

    fn filled_inventory() -> PlayerInventory {
        let mut inventory = PlayerInventory::new();
        inventory.add_item(ItemStack::new(Material::Diamond, 12)).unwrap();
        inventory.add_item(ItemStack::new(Material::Bread, 3)).unwrap();
        inventory
    }

    #[test]
    fn interact_with_blacklisted_block() {
        let f = fixture(&["Creative"]);
        let player = Player::new("Steve", "creative", GameMode::Creative);
        let click = |material| PlayerInteractEvent {
            player: &player,
            action: InteractAction::RightClickBlock,
            clicked_block: Some(material),
        };

        let result = f.listener.on_interact(&click(Material::Chest));
        assert!(result.is_denied());
        assert_eq!(
            message_of(&result),
            ["[bCreative] You cannot open 'CHEST' whilst in creative mode."]
        );
        assert_eq!(f.listener.on_interact(&click(Material::Stone)), EventResult::Allow);

        let left = PlayerInteractEvent {
            player: &player,
            action: InteractAction::LeftClickBlock,
            clicked_block: Some(Material::Chest),
        };
        assert_eq!(f.listener.on_interact(&left), EventResult::Allow);
    }

    #[test]
    fn bypass_permission_is_never_vetoed() {
        let f = fixture(&["creative"]);
        let player = Player::new("Admin", "creative", GameMode::Creative);
        f.permissions.grant(player.id, "bcreative.player.*");
        let item = ItemEntity::new(1, ItemStack::new(Material::Dirt, 1));

        let drop = PlayerDropItemEvent {
            player: &player,
            item: &item,
        };
        assert_eq!(f.listener.on_drop(&drop), EventResult::Allow);
        let pickup = PlayerPickupItemEvent {
            player: &player,
            item: &item,
        };
        assert_eq!(f.listener.on_pickup(&pickup), EventResult::Allow);
        let interact = PlayerInteractEvent {
            player: &player,
            action: InteractAction::RightClickBlock,
            clicked_block: Some(Material::EnderChest),
        };
        assert_eq!(f.listener.on_interact(&interact), EventResult::Allow);

        *player.inventory() = filled_inventory();
        assert_eq!(teleport(&f.listener, &player, "world"), EventResult::Allow);
        assert_eq!(*player.inventory(), filled_inventory());
    }

    #[test]
    fn inactive_world_or_survival_is_left_alone() {
        let f = fixture(&["creative"]);
        let item = ItemEntity::new(1, ItemStack::new(Material::Dirt, 1));

        let elsewhere = Player::new("Steve", "world", GameMode::Creative);
        let survival = Player::new("Alex", "creative", GameMode::Survival);
        for player in [&elsewhere, &survival] {
            let drop = PlayerDropItemEvent {
                player,
                item: &item,
            };
            assert_eq!(f.listener.on_drop(&drop), EventResult::Allow);
        }
    }

    #[test]
    fn drop_is_denied() {
        let f = fixture(&["creative"]);
        let player = Player::new("Steve", "Creative", GameMode::Creative);
        let item = ItemEntity::new(1, ItemStack::new(Material::Dirt, 1));
        let result = f.listener.on_drop(&PlayerDropItemEvent {
            player: &player,
            item: &item,
        });
        assert_eq!(
            message_of(&result),
            ["[bCreative] You cannot drop items whilst in creative mode."]
        );
    }

    #[test]
    fn pickup_message_once_per_item() {
        let f = fixture(&["creative"]);
        let player = Player::new("Steve", "creative", GameMode::Creative);
        let first = ItemEntity::new(10, ItemStack::new(Material::Dirt, 1));
        let second = ItemEntity::new(11, ItemStack::new(Material::Dirt, 1));
        let pickup = |item| {
            f.listener.on_pickup(&PlayerPickupItemEvent {
                player: &player,
                item,
            })
        };

        let result = pickup(&first);
        assert_eq!(
            message_of(&result),
            ["[bCreative] You cannot pickup items whilst in creative mode."]
        );
        assert_eq!(pickup(&first), EventResult::Deny(Vec::new()));
        assert_eq!(pickup(&first), EventResult::Deny(Vec::new()));
        assert_eq!(message_of(&pickup(&second)).len(), 1);
        assert_eq!(message_of(&pickup(&first)).len(), 1);
        assert_eq!(f.state.lock().last_pickup.get(&player.id), Some(&10));
    }

    #[test]
    fn language_file_overrides_messages() {
        let f = fixture(&["creative"]);
        f.state.lock().language.read(
            Cursor::new("#interact-denied\nHands off the %material%!\n"),
            &ModuleLogger::new("test"),
        );
        let player = Player::new("Steve", "creative", GameMode::Creative);
        let result = f.listener.on_interact(&PlayerInteractEvent {
            player: &player,
            action: InteractAction::RightClickBlock,
            clicked_block: Some(Material::EnderChest),
        });
        assert_eq!(message_of(&result), ["[bCreative] Hands off the ENDER_CHEST!"]);
    }

    #[test]
    fn teleport_round_trip_restores_inventory() {
        let f = fixture(&["creative"]);
        let player = Player::new("Steve", "world", GameMode::Survival);
        *player.inventory() = filled_inventory();

        let result = teleport(&f.listener, &player, "Creative");
        assert_eq!(
            message_of(&result),
            ["[bCreative] Your inventory has been backed up whilst you are in the creative world"]
        );
        assert!(player.inventory().is_empty());
        assert!(f.backups.has_backup(player.id, "world"));

        player
            .inventory()
            .add_item(ItemStack::new(Material::Bedrock, 64))
            .unwrap();
        let result = teleport(&f.listener, &player, "world");
        assert_eq!(
            message_of(&result),
            ["[bCreative] Your inventory has been restored now you have left the creative world"]
        );
        assert_eq!(*player.inventory(), filled_inventory());

        // the creative inventory waits for the next visit
        teleport(&f.listener, &player, "creative");
        assert!(player.inventory().contains(Material::Bedrock));
        assert!(!player.inventory().contains(Material::Diamond));
    }

    #[test]
    fn same_world_teleport_is_ignored() {
        let f = fixture(&["creative"]);
        let player = Player::new("Steve", "creative", GameMode::Creative);
        *player.inventory() = filled_inventory();
        assert_eq!(teleport(&f.listener, &player, "CREATIVE"), EventResult::Allow);
        assert_eq!(*player.inventory(), filled_inventory());
    }

    #[test]
    fn same_world_teleport_ignores_unicode_case() {
        let f = fixture(&["Übung"]);
        let player = Player::new("Steve", "Übung", GameMode::Creative);
        *player.inventory() = filled_inventory();
        assert_eq!(teleport(&f.listener, &player, "übung"), EventResult::Allow);
        assert_eq!(*player.inventory(), filled_inventory());
        assert!(!f.backups.has_backup(player.id, "world"));
    }

    #[test]
    fn teleport_between_two_active_worlds_runs_both_branches() {
        let f = fixture(&["creative", "plots"]);
        let player = Player::new("Steve", "creative", GameMode::Creative);

        let mut plots_inventory = PlayerInventory::new();
        plots_inventory
            .add_item(ItemStack::new(Material::Bedrock, 1))
            .unwrap();
        f.backups
            .backup(player.id, "plots", &mut plots_inventory, false);
        *player.inventory() = filled_inventory();

        let result = teleport(&f.listener, &player, "plots");
        assert_eq!(message_of(&result).len(), 2);

        // entering parks the creative inventory under the default world and
        // loads the plots one; leaving then files that under "creative" and
        // brings the default world's inventory back
        assert_eq!(*player.inventory(), filled_inventory());
        assert!(!f.backups.has_backup(player.id, "world"));
        assert!(!f.backups.has_backup(player.id, "plots"));

        let mut parked = PlayerInventory::new();
        assert!(f.backups.restore(player.id, "creative", &mut parked));
        assert!(parked.contains(Material::Bedrock));
    }
}
