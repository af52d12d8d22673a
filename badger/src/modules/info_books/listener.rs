use std::sync::Arc;

use badger_inventory::InventoryType;
use parking_lot::RwLock;

use super::{catalog::BookCatalog, NAME};
use crate::{
    event::{EventResult, InventoryClickEvent, PlayerDropItemEvent},
    module::chat_message,
};

/// Keeps info books out of containers and destroys dropped ones.
pub struct InfoBookListener {
    catalog: Arc<RwLock<BookCatalog>>,
}

impl InfoBookListener {
    pub fn new(catalog: Arc<RwLock<BookCatalog>>) -> Self {
        Self { catalog }
    }

    pub fn on_inventory_click(&self, event: &InventoryClickEvent<'_>) -> EventResult {
        if !self.catalog.read().is_info_book(event.cursor) {
            return EventResult::Allow;
        }
        if !event.action.is_place() {
            return EventResult::Allow;
        }
        if matches!(
            event.view.top_type,
            InventoryType::Player | InventoryType::Creative
        ) {
            return EventResult::Allow;
        }
        if event.view.is_bottom_slot(event.raw_slot) {
            return EventResult::Allow;
        }

        EventResult::Deny(vec![
            chat_message(
                NAME,
                "You can't store InfoBooks. Please drop the InfoBook to remove it from your inventory.",
            ),
            chat_message(
                NAME,
                "You can get another copy of the book via the '/book' command.",
            ),
        ])
    }

    pub fn on_drop(&self, event: &PlayerDropItemEvent<'_>) -> EventResult {
        if self.catalog.read().is_info_book(Some(&event.item.stack)) {
            EventResult::Discard
        } else {
            EventResult::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use badger_core::GameMode;
    use badger_inventory::{
        InventoryAction, InventoryType, InventoryView, ItemEntity, ItemStack, Material,
    };
    use parking_lot::RwLock;

    use crate::{
        entity::player::Player,
        event::{EventResult, InventoryClickEvent, PlayerDropItemEvent},
        modules::info_books::catalog::{BookCatalog, InfoBook},
    };

    use super::InfoBookListener;

    fn listener() -> (InfoBookListener, ItemStack) {
        let mut catalog = BookCatalog::new("books".into());
        let book = InfoBook::example();
        let item = book.to_item("Steve");
        catalog.insert(book);
        (InfoBookListener::new(Arc::new(RwLock::new(catalog))), item)
    }

    fn click<'a>(
        player: &'a Player,
        cursor: Option<&'a ItemStack>,
        top_type: InventoryType,
        action: InventoryAction,
        raw_slot: i32,
    ) -> InventoryClickEvent<'a> {
        InventoryClickEvent {
            player,
            view: InventoryView::new(top_type, 27),
            action,
            raw_slot,
            cursor,
        }
    }

    #[test]
    fn storing_in_a_chest_is_denied() {
        let (listener, book) = listener();
        let player = Player::new("Steve", "world", GameMode::Survival);

        let result = listener.on_inventory_click(&click(
            &player,
            Some(&book),
            InventoryType::Chest,
            InventoryAction::PlaceAll,
            3,
        ));
        let EventResult::Deny(messages) = result else {
            panic!("expected a veto");
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1].plain(),
            "[bInfoBooks] You can get another copy of the book via the '/book' command."
        );
    }

    #[test]
    fn allowed_clicks() {
        let (listener, book) = listener();
        let player = Player::new("Steve", "world", GameMode::Survival);
        let stone = ItemStack::new(Material::Stone, 1);

        let cases = [
            // bottom inventory
            click(&player, Some(&book), InventoryType::Chest, InventoryAction::PlaceAll, 27),
            // own inventory
            click(&player, Some(&book), InventoryType::Player, InventoryAction::PlaceOne, 3),
            click(&player, Some(&book), InventoryType::Creative, InventoryAction::PlaceOne, 3),
            // picking up is fine
            click(&player, Some(&book), InventoryType::Chest, InventoryAction::PickupAll, 3),
            // not an info book
            click(&player, Some(&stone), InventoryType::Chest, InventoryAction::PlaceAll, 3),
            click(&player, None, InventoryType::Chest, InventoryAction::PlaceAll, 3),
        ];
        for event in &cases {
            assert_eq!(listener.on_inventory_click(event), EventResult::Allow);
        }
    }

    #[test]
    fn dropped_info_books_are_discarded() {
        let (listener, book) = listener();
        let player = Player::new("Steve", "world", GameMode::Survival);

        let dropped = ItemEntity::new(1, book);
        let result = listener.on_drop(&PlayerDropItemEvent {
            player: &player,
            item: &dropped,
        });
        assert_eq!(result, EventResult::Discard);

        let dirt = ItemEntity::new(2, ItemStack::new(Material::Dirt, 1));
        let result = listener.on_drop(&PlayerDropItemEvent {
            player: &player,
            item: &dirt,
        });
        assert_eq!(result, EventResult::Allow);
    }
}
