//! The owning-context contract.

use satchel_component::{ComponentError, ComponentInstance, ComponentKey, Properties, Uid};

use crate::entity::Entity;
use crate::error::EntityError;

/// What an [`Entity`] needs from whoever owns it: identifiers, component
/// construction, and destruction bookkeeping.
///
/// The context is passed explicitly to the entity operations that need it.
pub trait EntityContext {
    /// Produce a fresh identifier for an entity created without one.
    fn generate_uid(&mut self) -> Uid;

    /// Called by [`Entity::new`] before the entity is handed out.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::DuplicateUid`] if `uid` already names a live
    /// entity in this context.
    fn on_entity_created(&mut self, uid: &Uid) -> Result<(), EntityError>;

    /// Build a component instance by kind from a configuration mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError`] if the kind is unknown or the properties do
    /// not fit it.
    fn create_component(
        &self,
        key: ComponentKey<'_>,
        properties: Properties,
    ) -> Result<ComponentInstance, ComponentError>;

    /// Called exactly once per entity, at the end of
    /// [`Entity::destroy`].
    fn on_entity_destroyed(&mut self, entity: &Entity);
}
