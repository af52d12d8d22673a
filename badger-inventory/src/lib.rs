pub mod backup;
mod error;
pub mod item;
pub mod material;
pub mod player;

pub use backup::InventoryBackups;
pub use error::InventoryError;
pub use item::{BookMeta, ItemEntity, ItemStack};
pub use material::Material;
pub use player::PlayerInventory;

/// What kind of inventory a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryType {
    Player,
    Creative,
    Chest,
    EnderChest,
    Dispenser,
    Dropper,
    Furnace,
    Workbench,
    Hopper,
    Anvil,
    Beacon,
    BrewingStand,
    Enchanting,
    Merchant,
}

/// The window a player has open: the top inventory is the container, the
/// bottom one is always the player's own inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryView {
    pub top_type: InventoryType,
    pub top_size: usize,
}

impl InventoryView {
    #[must_use]
    pub const fn new(top_type: InventoryType, top_size: usize) -> Self {
        Self { top_type, top_size }
    }

    /// Whether a raw slot index of this view lies in the bottom (player)
    /// inventory. Clicks outside the window use negative raw slots and count
    /// as top.
    #[must_use]
    pub fn is_bottom_slot(&self, raw_slot: i32) -> bool {
        i64::from(raw_slot) - self.top_size as i64 >= 0
    }
}

/// https://wiki.vg/Inventory click modes, as the host reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryAction {
    Nothing,
    PickupAll,
    PickupSome,
    PickupHalf,
    PickupOne,
    PlaceAll,
    PlaceSome,
    PlaceOne,
    SwapWithCursor,
    DropAllCursor,
    DropOneCursor,
    DropAllSlot,
    DropOneSlot,
    MoveToOtherInventory,
    HotbarMoveAndReadd,
    HotbarSwap,
    CloneStack,
    CollectToCursor,
    Unknown,
}

impl InventoryAction {
    /// Actions that put the cursor or slot item somewhere else.
    #[must_use]
    pub const fn is_place(self) -> bool {
        matches!(
            self,
            Self::DropAllCursor
                | Self::DropAllSlot
                | Self::DropOneCursor
                | Self::DropOneSlot
                | Self::PlaceAll
                | Self::PlaceOne
                | Self::PlaceSome
                | Self::SwapWithCursor
        )
    }
}
