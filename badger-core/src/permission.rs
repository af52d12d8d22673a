use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use uuid::Uuid;

/// Answers whether a principal holds a capability node.
///
/// The host's permission back-end sits behind this trait. Modules receive it
/// through their context and hand it to the listeners they build.
pub trait PermissionOracle: Send + Sync {
    fn has(&self, principal: &Uuid, node: &str) -> bool;
}

/// In-memory grants keyed by principal.
///
/// A grant of `*` matches every node and a grant of `prefix.*` matches every
/// node below `prefix`.
#[derive(Default, Debug)]
pub struct PermissionTable {
    grants: RwLock<HashMap<Uuid, HashSet<String>>>,
}

impl PermissionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, principal: Uuid, node: impl Into<String>) {
        self.grants
            .write()
            .entry(principal)
            .or_default()
            .insert(node.into().to_lowercase());
    }

    pub fn revoke(&self, principal: &Uuid, node: &str) -> bool {
        self.grants
            .write()
            .get_mut(principal)
            .is_some_and(|nodes| nodes.remove(&node.to_lowercase()))
    }
}

impl PermissionOracle for PermissionTable {
    fn has(&self, principal: &Uuid, node: &str) -> bool {
        let grants = self.grants.read();
        let Some(nodes) = grants.get(principal) else {
            return false;
        };
        let node = node.to_lowercase();
        if nodes.contains("*") || nodes.contains(&node) {
            return true;
        }
        // walk up the node: a.b.c -> a.b.* -> a.*
        let mut rest = node.as_str();
        while let Some(dot) = rest.rfind('.') {
            rest = &rest[..dot];
            if nodes.contains(&format!("{rest}.*")) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{PermissionOracle, PermissionTable};

    #[test]
    fn exact_and_wildcard_grants() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let table = PermissionTable::new();
        table.grant(alice, "bcreative.player.interact");
        table.grant(bob, "bcreative.*");

        assert!(table.has(&alice, "bcreative.player.interact"));
        assert!(table.has(&alice, "BCreative.Player.Interact"));
        assert!(!table.has(&alice, "bcreative.player.item.drop"));
        assert!(table.has(&bob, "bcreative.player.item.drop"));
        assert!(!table.has(&bob, "binfobooks.reload"));
        assert!(!table.has(&Uuid::new_v4(), "bcreative.player.interact"));
    }

    #[test]
    fn star_matches_everything() {
        let op = Uuid::new_v4();
        let table = PermissionTable::new();
        table.grant(op, "*");
        assert!(table.has(&op, "anything.at.all"));
        assert!(table.revoke(&op, "*"));
        assert!(!table.has(&op, "anything.at.all"));
    }
}
