use serde::{Deserialize, Serialize};

use crate::Material;

/// Metadata carried by a written book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMeta {
    pub title: String,
    pub author: String,
    pub pages: Vec<String>,
    /// Tooltip lines shown under the item name
    pub lore: Vec<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: Material,
    pub item_count: u8,
    pub book: Option<BookMeta>,
}

impl ItemStack {
    #[must_use]
    pub const fn new(material: Material, item_count: u8) -> Self {
        Self {
            material,
            item_count,
            book: None,
        }
    }

    #[must_use]
    pub fn written_book(meta: BookMeta) -> Self {
        Self {
            material: Material::WrittenBook,
            item_count: 1,
            book: Some(meta),
        }
    }

    /// The custom display name, if the item has one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.book.as_ref().and_then(|meta| meta.display_name.as_deref())
    }

    /// Whether `other` can be merged into this stack.
    #[must_use]
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.material == other.material && self.book == other.book
    }
}

/// An item lying in a world. The entity id tells two drops of equal stacks
/// apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntity {
    pub entity_id: i32,
    pub stack: ItemStack,
}

impl ItemEntity {
    #[must_use]
    pub const fn new(entity_id: i32, stack: ItemStack) -> Self {
        Self { entity_id, stack }
    }
}
