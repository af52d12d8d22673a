use badger_core::text::TextComponent;

pub mod player;

pub use player::{
    InteractAction, InventoryClickEvent, PlayerDropItemEvent, PlayerInteractEvent,
    PlayerPickupItemEvent, PlayerTeleportEvent,
};

/// What a listener decided about an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Let the host apply the default effect.
    Allow,
    /// Let the default effect through and tell the player something.
    Notice(Vec<TextComponent<'static>>),
    /// Veto the default effect. An empty list vetoes silently.
    Deny(Vec<TextComponent<'static>>),
    /// Only meaningful for drops: the item leaves the player but is destroyed
    /// instead of spawned in the world.
    Discard,
}

impl EventResult {
    #[must_use]
    pub fn deny(message: TextComponent<'static>) -> Self {
        Self::Deny(vec![message])
    }

    #[must_use]
    pub fn notice(message: TextComponent<'static>) -> Self {
        Self::Notice(vec![message])
    }

    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }
}

/// Listeners run from `Lowest` to `Highest`; within a priority in
/// registration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventPriority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
}

/// The folded outcome of every listener an event was delivered to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub cancelled: bool,
    pub discarded: bool,
    /// Messages that were delivered to the acting player.
    pub messages: Vec<TextComponent<'static>>,
}

impl DispatchReport {
    fn apply(&mut self, result: EventResult) {
        match result {
            EventResult::Allow => {}
            EventResult::Notice(messages) => self.messages.extend(messages),
            EventResult::Deny(messages) => {
                self.cancelled = true;
                self.messages.extend(messages);
            }
            EventResult::Discard => self.discarded = true,
        }
    }
}

struct RegisteredListener<T: ?Sized> {
    owner: String,
    priority: EventPriority,
    inner: Box<T>,
}

fn insert_sorted<T: ?Sized>(list: &mut Vec<RegisteredListener<T>>, listener: RegisteredListener<T>) {
    let index = list
        .iter()
        .position(|registered| registered.priority > listener.priority)
        .unwrap_or(list.len());
    list.insert(index, listener);
}

macro_rules! event_types {
    ($($event_name:ident, $register_name:ident, $name:ident, $data:ident),+ $(,)?) => {
        $(
            pub trait $name: Send + Sync {
                fn $event_name(&self, event: &$data<'_>) -> EventResult;
            }

            impl<Func> $name for Func
            where
                Func: Fn(&$data<'_>) -> EventResult + Send + Sync,
            {
                fn $event_name(&self, event: &$data<'_>) -> EventResult {
                    self(event)
                }
            }
        )*

        #[derive(Default)]
        struct EventTypeContainer {
            $($event_name: Vec<RegisteredListener<dyn $name>>,)*
        }

        impl EventTypeContainer {
            fn remove_owner(&mut self, owner: &str) -> usize {
                let mut removed = 0;
                $(
                    let before = self.$event_name.len();
                    self.$event_name.retain(|listener| listener.owner != owner);
                    removed += before - self.$event_name.len();
                )*
                removed
            }

            fn count_owner(&self, owner: &str) -> usize {
                let mut count = 0;
                $(
                    count += self
                        .$event_name
                        .iter()
                        .filter(|listener| listener.owner == owner)
                        .count();
                )*
                count
            }
        }

        impl EventRegistry {
            $(
                /// Runs every listener and delivers the collected messages to
                /// the acting player.
                pub fn $event_name(&self, event: &$data<'_>) -> DispatchReport {
                    let mut report = DispatchReport::default();
                    for listener in &self.container.$event_name {
                        report.apply(listener.inner.$event_name(event));
                    }
                    for message in &report.messages {
                        event.player.send_message(message.clone());
                    }
                    report
                }
            )*
        }

        impl OwnedRegistrar<'_> {
            $(
                pub fn $register_name<F>(&mut self, priority: EventPriority, fun: F)
                where
                    F: Fn(&$data<'_>) -> EventResult + Send + Sync + 'static,
                {
                    let inner: Box<dyn $name> = Box::new(fun);
                    insert_sorted(
                        &mut self.registry.container.$event_name,
                        RegisteredListener {
                            owner: self.owner.to_string(),
                            priority,
                            inner,
                        },
                    );
                }
            )*
        }
    };
}

event_types![
    on_player_interact, register_player_interact, PlayerInteractListener, PlayerInteractEvent,
    on_player_drop_item, register_player_drop_item, PlayerDropItemListener, PlayerDropItemEvent,
    on_player_pickup_item, register_player_pickup_item, PlayerPickupItemListener, PlayerPickupItemEvent,
    on_player_teleport, register_player_teleport, PlayerTeleportListener, PlayerTeleportEvent,
    on_inventory_click, register_inventory_click, InventoryClickListener, InventoryClickEvent,
];

/// The host's event bus.
#[derive(Default)]
pub struct EventRegistry {
    container: EventTypeContainer,
}

impl EventRegistry {
    /// A registrar that records `owner` on every listener it adds.
    pub fn owned<'r>(&'r mut self, owner: &'r str) -> OwnedRegistrar<'r> {
        OwnedRegistrar {
            owner,
            registry: self,
        }
    }

    /// Removes every listener `owner` registered. Returns how many.
    pub fn unregister_owner(&mut self, owner: &str) -> usize {
        self.container.remove_owner(owner)
    }

    #[must_use]
    pub fn listener_count(&self, owner: &str) -> usize {
        self.container.count_owner(owner)
    }
}

pub struct OwnedRegistrar<'r> {
    owner: &'r str,
    registry: &'r mut EventRegistry,
}

#[cfg(test)]
mod tests {
    use badger_core::{text::TextComponent, GameMode};
    use badger_inventory::{ItemEntity, ItemStack, Material};

    use crate::entity::player::Player;

    use super::{EventPriority, EventRegistry, EventResult, PlayerDropItemEvent};

    fn drop_event<'a>(player: &'a Player, item: &'a ItemEntity) -> PlayerDropItemEvent<'a> {
        PlayerDropItemEvent { player, item }
    }

    #[test]
    fn results_fold_and_messages_are_delivered() {
        let mut registry = EventRegistry::default();
        registry
            .owned("first")
            .register_player_drop_item(EventPriority::Normal, |_| EventResult::Allow);
        registry.owned("second").register_player_drop_item(EventPriority::Normal, |_| {
            EventResult::deny(TextComponent::text("no"))
        });

        let player = Player::new("Steve", "world", GameMode::Creative);
        let item = ItemEntity::new(1, ItemStack::new(Material::Stone, 1));
        let report = registry.on_player_drop_item(&drop_event(&player, &item));

        assert!(report.cancelled);
        assert!(!report.discarded);
        assert_eq!(player.take_messages(), vec![TextComponent::text("no")]);
    }

    #[test]
    fn listeners_run_by_priority() {
        let mut registry = EventRegistry::default();
        for (owner, priority) in [
            ("high", EventPriority::High),
            ("lowest", EventPriority::Lowest),
            ("normal", EventPriority::Normal),
        ] {
            registry
                .owned(owner)
                .register_player_drop_item(priority, move |_| {
                    EventResult::notice(TextComponent::text(owner))
                });
        }

        let player = Player::new("Alex", "world", GameMode::Survival);
        let item = ItemEntity::new(7, ItemStack::new(Material::Dirt, 1));
        let report = registry.on_player_drop_item(&drop_event(&player, &item));

        let order: Vec<String> = report.messages.iter().map(|m| m.plain()).collect();
        assert_eq!(order, ["lowest", "normal", "high"]);
        assert!(!report.cancelled);
    }

    #[test]
    fn unregister_removes_only_the_owner() {
        let mut registry = EventRegistry::default();
        let mut registrar = registry.owned("bCreative");
        registrar.register_player_drop_item(EventPriority::Normal, |_| EventResult::Allow);
        registrar.register_player_pickup_item(EventPriority::Normal, |_| EventResult::Allow);
        registry
            .owned("bInfoBooks")
            .register_player_drop_item(EventPriority::Normal, |_| EventResult::Discard);

        assert_eq!(registry.listener_count("bCreative"), 2);
        assert_eq!(registry.unregister_owner("bCreative"), 2);
        assert_eq!(registry.listener_count("bCreative"), 0);
        assert_eq!(registry.listener_count("bInfoBooks"), 1);
    }
}
