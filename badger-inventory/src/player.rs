use itertools::chain;

use crate::{InventoryError, ItemStack, Material};

pub const MAIN_SLOTS: usize = 36;
pub const ARMOR_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInventory {
    // Hotbar is the first 9 slots
    items: [Option<ItemStack>; MAIN_SLOTS],
    armor: [Option<ItemStack>; ARMOR_SLOTS],
    offhand: Option<ItemStack>,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self {
            items: std::array::from_fn(|_| None),
            armor: std::array::from_fn(|_| None),
            offhand: None,
        }
    }
}

impl PlayerInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots 0..36 are the main inventory, 36..40 the armor, 40 the offhand.
    #[must_use]
    pub fn get_slot(&self, slot: usize) -> Option<&Option<ItemStack>> {
        match slot {
            0..=35 => Some(&self.items[slot]),
            36..=39 => Some(&self.armor[slot - MAIN_SLOTS]),
            40 => Some(&self.offhand),
            _ => None,
        }
    }

    fn get_slot_mut(&mut self, slot: usize) -> Option<&mut Option<ItemStack>> {
        match slot {
            0..=35 => Some(&mut self.items[slot]),
            36..=39 => Some(&mut self.armor[slot - MAIN_SLOTS]),
            40 => Some(&mut self.offhand),
            _ => None,
        }
    }

    pub fn set_slot(&mut self, slot: usize, item: Option<ItemStack>) -> Result<(), InventoryError> {
        let target = self
            .get_slot_mut(slot)
            .ok_or(InventoryError::InvalidSlot(slot))?;
        *target = item;
        Ok(())
    }

    /// Adds the stack to the main inventory, topping up similar stacks before
    /// taking empty slots. Nothing changes when the whole stack doesn't fit.
    pub fn add_item(&mut self, stack: ItemStack) -> Result<(), InventoryError> {
        let max = stack.material.max_stack_size().max(1);
        let mut space = 0usize;
        for slot in &self.items {
            space += match slot {
                None => usize::from(max),
                Some(existing) if existing.is_similar(&stack) => {
                    usize::from(max.saturating_sub(existing.item_count))
                }
                Some(_) => 0,
            };
        }
        if space < usize::from(stack.item_count) {
            return Err(InventoryError::Full);
        }

        let mut remaining = stack.item_count;
        for existing in self.items.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if existing.is_similar(&stack) && existing.item_count < max {
                let moved = remaining.min(max - existing.item_count);
                existing.item_count += moved;
                remaining -= moved;
            }
        }
        for slot in &mut self.items {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(max);
                let mut placed = stack.clone();
                placed.item_count = moved;
                *slot = Some(placed);
                remaining -= moved;
            }
        }
        Ok(())
    }

    /// Removes and returns the stack in `slot`.
    pub fn take_item(&mut self, slot: usize) -> Result<Option<ItemStack>, InventoryError> {
        Ok(self
            .get_slot_mut(slot)
            .ok_or(InventoryError::InvalidSlot(slot))?
            .take())
    }

    #[must_use]
    pub fn contains(&self, material: Material) -> bool {
        self.contents().any(|item| item.material == material)
    }

    /// Every non-empty stack, armor and offhand included.
    pub fn contents(&self) -> impl Iterator<Item = &ItemStack> + '_ {
        chain!(
            self.items.iter(),
            self.armor.iter(),
            std::iter::once(&self.offhand)
        )
        .flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents().next().is_none()
    }
}
