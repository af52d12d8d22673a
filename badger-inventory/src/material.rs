use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! materials {
    ($($variant:ident = ($name:literal, $id:literal, $max_stack:literal)),+ $(,)?) => {
        /// Block and item types, with their legacy numeric ids.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum Material {
            $($variant,)+
        }

        impl Material {
            pub const ALL: &'static [Material] = &[$(Material::$variant,)+];

            /// The symbolic name, e.g. `ENDER_CHEST`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Material::$variant => $name,)+
                }
            }

            #[must_use]
            pub const fn legacy_id(self) -> u16 {
                match self {
                    $(Material::$variant => $id,)+
                }
            }

            #[must_use]
            pub const fn max_stack_size(self) -> u8 {
                match self {
                    $(Material::$variant => $max_stack,)+
                }
            }

            #[must_use]
            pub fn from_legacy_id(id: u16) -> Option<Self> {
                match id {
                    $($id => Some(Material::$variant),)+
                    _ => None,
                }
            }

            /// Exact lookup by symbolic name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Material::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

materials! {
    Air = ("AIR", 0, 0),
    Stone = ("STONE", 1, 64),
    Grass = ("GRASS", 2, 64),
    Dirt = ("DIRT", 3, 64),
    Cobblestone = ("COBBLESTONE", 4, 64),
    Wood = ("WOOD", 5, 64),
    Bedrock = ("BEDROCK", 7, 64),
    Sand = ("SAND", 12, 64),
    Gravel = ("GRAVEL", 13, 64),
    Log = ("LOG", 17, 64),
    Glass = ("GLASS", 20, 64),
    Dispenser = ("DISPENSER", 23, 64),
    NoteBlock = ("NOTE_BLOCK", 25, 64),
    BedBlock = ("BED_BLOCK", 26, 1),
    Wool = ("WOOL", 35, 64),
    Tnt = ("TNT", 46, 64),
    Bookshelf = ("BOOKSHELF", 47, 64),
    Chest = ("CHEST", 54, 64),
    Workbench = ("WORKBENCH", 58, 64),
    Furnace = ("FURNACE", 61, 64),
    WoodenDoor = ("WOODEN_DOOR", 64, 1),
    Lever = ("LEVER", 69, 64),
    StoneButton = ("STONE_BUTTON", 77, 64),
    Jukebox = ("JUKEBOX", 84, 64),
    TrapDoor = ("TRAP_DOOR", 96, 64),
    FenceGate = ("FENCE_GATE", 107, 64),
    EnchantmentTable = ("ENCHANTMENT_TABLE", 116, 64),
    BrewingStand = ("BREWING_STAND", 117, 64),
    EnderChest = ("ENDER_CHEST", 130, 64),
    Beacon = ("BEACON", 138, 64),
    Anvil = ("ANVIL", 145, 64),
    TrappedChest = ("TRAPPED_CHEST", 146, 64),
    Hopper = ("HOPPER", 154, 64),
    Dropper = ("DROPPER", 158, 64),
    IronSword = ("IRON_SWORD", 267, 1),
    Diamond = ("DIAMOND", 264, 64),
    Bread = ("BREAD", 297, 64),
    Book = ("BOOK", 340, 64),
    BookAndQuill = ("BOOK_AND_QUILL", 386, 1),
    WrittenBook = ("WRITTEN_BOOK", 387, 16),
    ItemFrame = ("ITEM_FRAME", 389, 64),
    StorageMinecart = ("STORAGE_MINECART", 342, 1),
    HopperMinecart = ("HOPPER_MINECART", 408, 1),
}

impl Material {
    /// Lenient lookup: ignores case, accepts spaces or dashes for
    /// underscores and a `minecraft:` namespace, or a numeric legacy id.
    #[must_use]
    pub fn match_material(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if let Ok(id) = trimmed.parse::<u16>() {
            return Self::from_legacy_id(id);
        }
        let stripped = trimmed
            .strip_prefix("minecraft:")
            .unwrap_or(trimmed)
            .to_uppercase()
            .replace([' ', '-'], "_");
        Self::from_name(&stripped)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
