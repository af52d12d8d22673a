use badger_inventory::{InventoryAction, InventoryView, ItemEntity, ItemStack, Material};

use crate::entity::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractAction {
    LeftClickAir,
    LeftClickBlock,
    RightClickAir,
    RightClickBlock,
    /// Stepping on a pressure plate, trampling farmland...
    Physical,
}

/// A player clicked, or stepped on, something.
pub struct PlayerInteractEvent<'a> {
    pub player: &'a Player,
    pub action: InteractAction,
    /// The block involved, if any.
    pub clicked_block: Option<Material>,
}

pub struct PlayerDropItemEvent<'a> {
    pub player: &'a Player,
    pub item: &'a ItemEntity,
}

pub struct PlayerPickupItemEvent<'a> {
    pub player: &'a Player,
    pub item: &'a ItemEntity,
}

/// A teleport between two locations, identified here only by world name.
pub struct PlayerTeleportEvent<'a> {
    pub player: &'a Player,
    pub from: &'a str,
    pub to: &'a str,
}

impl PlayerTeleportEvent<'_> {
    #[must_use]
    pub fn changes_world(&self) -> bool {
        !badger_core::names_match(self.from, self.to)
    }
}

pub struct InventoryClickEvent<'a> {
    pub player: &'a Player,
    pub view: InventoryView,
    pub action: InventoryAction,
    pub raw_slot: i32,
    /// What the player holds on the cursor.
    pub cursor: Option<&'a ItemStack>,
}
