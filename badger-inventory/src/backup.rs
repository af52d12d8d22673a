use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::PlayerInventory;

/// Saved inventories, one per player and world.
///
/// World names are compared case-insensitively.
#[derive(Default, Debug)]
pub struct InventoryBackups {
    saved: Mutex<HashMap<(Uuid, String), PlayerInventory>>,
}

impl InventoryBackups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a copy of `inventory` as the player's inventory for `world`,
    /// replacing an older backup. With `clear` the live inventory is emptied
    /// afterwards.
    pub fn backup(&self, player: Uuid, world: &str, inventory: &mut PlayerInventory, clear: bool) {
        let snapshot = if clear {
            std::mem::take(inventory)
        } else {
            inventory.clone()
        };
        self.saved
            .lock()
            .insert((player, world.to_lowercase()), snapshot);
    }

    /// Replaces `inventory` with the backup stored for `world` and forgets the
    /// backup. Returns false, leaving `inventory` untouched, when there is
    /// none.
    pub fn restore(&self, player: Uuid, world: &str, inventory: &mut PlayerInventory) -> bool {
        match self.saved.lock().remove(&(player, world.to_lowercase())) {
            Some(saved) => {
                *inventory = saved;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_backup(&self, player: Uuid, world: &str) -> bool {
        self.saved
            .lock()
            .contains_key(&(player, world.to_lowercase()))
    }

    /// Drops every backup of a player.
    pub fn forget(&self, player: Uuid) {
        self.saved.lock().retain(|(owner, _), _| *owner != player);
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::{ItemStack, Material, PlayerInventory};

    use super::InventoryBackups;

    #[test]
    fn backup_and_restore_per_world() {
        let backups = InventoryBackups::new();
        let player = Uuid::new_v4();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(ItemStack::new(Material::Diamond, 5)).unwrap();
        let original = inventory.clone();

        backups.backup(player, "World", &mut inventory, true);
        assert!(inventory.is_empty());
        assert!(backups.has_backup(player, "world"));

        assert!(!backups.restore(player, "creative", &mut inventory));
        assert!(backups.restore(player, "WORLD", &mut inventory));
        assert_eq!(inventory, original);
        assert!(!backups.has_backup(player, "world"));
    }

    #[test]
    fn backup_without_clearing_keeps_items() {
        let backups = InventoryBackups::new();
        let player = Uuid::new_v4();
        let mut inventory = PlayerInventory::new();
        inventory.add_item(ItemStack::new(Material::Bread, 1)).unwrap();

        backups.backup(player, "world", &mut inventory, false);
        assert!(!inventory.is_empty());
        backups.forget(player);
        assert!(!backups.has_backup(player, "world"));
    }
}
