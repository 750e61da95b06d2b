//! Bookkeeping of live entities.
//!
//! The engine does not own entities; it only tracks which uids are alive so
//! it can refuse duplicates and observe destruction.

use std::collections::HashSet;

use satchel_component::Uid;

/// Live entity uids in creation order, plus a count of destroyed ones.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    order: Vec<Uid>,
    live: HashSet<Uid>,
    destroyed: u64,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `uid`. Returns `false` if it is already alive.
    pub fn track(&mut self, uid: Uid) -> bool {
        if !self.live.insert(uid.clone()) {
            return false;
        }
        self.order.push(uid);
        true
    }

    /// Stop tracking a destroyed entity. Returns `false` if `uid` was not
    /// alive.
    pub fn on_entity_destroyed(&mut self, uid: &Uid) -> bool {
        if !self.live.remove(uid) {
            return false;
        }
        self.order.retain(|live| live != uid);
        self.destroyed += 1;
        true
    }

    /// Returns `true` if `uid` is tracked and not yet destroyed.
    #[must_use]
    pub fn is_alive(&self, uid: &Uid) -> bool {
        self.live.contains(uid)
    }

    /// Live uids in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Uid> {
        self.order.iter()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of entities destroyed so far.
    #[must_use]
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_rejects_live_duplicates() {
        let mut registry = EntityRegistry::new();
        assert!(registry.track(Uid::from("a")));
        assert!(!registry.track(Uid::from("a")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_destroy_once() {
        let mut registry = EntityRegistry::new();
        registry.track(Uid::from("a"));
        registry.track(Uid::from("b"));
        assert!(registry.on_entity_destroyed(&Uid::from("a")));
        assert!(!registry.on_entity_destroyed(&Uid::from("a")));
        assert!(!registry.is_alive(&Uid::from("a")));
        assert_eq!(registry.destroyed_count(), 1);
        let live: Vec<_> = registry.iter().map(Uid::as_str).collect();
        assert_eq!(live, ["b"]);
    }

    #[test]
    fn test_uid_reusable_after_destroy() {
        let mut registry = EntityRegistry::new();
        registry.track(Uid::from("a"));
        registry.on_entity_destroyed(&Uid::from("a"));
        assert!(registry.track(Uid::from("a")));
    }
}
