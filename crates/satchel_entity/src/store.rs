//! Insertion-ordered component storage for a single entity.

use satchel_component::{ComponentInstance, ComponentName};

/// At most one [`ComponentInstance`] per canonical name, kept in the order
/// the names were first inserted.
///
/// Entities hold only a handful of components, so lookups are a linear scan
/// over a contiguous vector.
#[derive(Debug, Default)]
pub struct ComponentStore {
    entries: Vec<ComponentInstance>,
}

impl ComponentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &ComponentName) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name() == name)
    }

    /// Returns the entry stored under `name`.
    #[must_use]
    pub fn get(&self, name: &ComponentName) -> Option<&ComponentInstance> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Mutable variant of [`ComponentStore::get`].
    #[must_use]
    pub fn get_mut(&mut self, name: &ComponentName) -> Option<&mut ComponentInstance> {
        self.entries.iter_mut().find(|entry| entry.name() == name)
    }

    /// Returns `true` if an entry is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &ComponentName) -> bool {
        self.position(name).is_some()
    }

    /// Store `instance` under its own name. An existing entry for that name is
    /// replaced in place, keeping its position, and returned.
    pub fn insert(&mut self, instance: ComponentInstance) -> Option<ComponentInstance> {
        match self.position(instance.name()) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index], instance)),
            None => {
                self.entries.push(instance);
                None
            }
        }
    }

    /// Take the entry for `name` out of the store, preserving the order of
    /// the remaining entries.
    pub fn remove(&mut self, name: &ComponentName) -> Option<ComponentInstance> {
        let index = self.position(name)?;
        Some(self.entries.remove(index))
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ComponentInstance> {
        self.entries.iter_mut()
    }

    /// Remove every entry, in insertion order.
    pub fn drain(&mut self) -> impl Iterator<Item = ComponentInstance> + '_ {
        self.entries.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
