//! The [`Entity`] type: a component bag with lifecycle and event fan-out.

use std::ops::Index;

use satchel_component::{
    ComponentDefinition, ComponentInstance, ComponentKey, ComponentName, EntityEvent, OwnerToken,
    Properties, Uid,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::context::EntityContext;
use crate::error::EntityError;
use crate::store::ComponentStore;

/// A uniquely identified container owning at most one component per kind.
///
/// Components are looked up by canonical name, so `"position"`,
/// `"POSITION"` and `ComponentKey::of::<Position>()` all address the same
/// entry. Once [`destroy`](Entity::destroy)ed, every mutating operation fails
/// with [`EntityError::InvalidState`].
#[derive(Debug)]
pub struct Entity {
    token: OwnerToken,
    store: ComponentStore,
    destroyed: bool,
}

impl Entity {
    /// Create an entity, asking `ctx` for a uid if none is supplied, and
    /// report it to `ctx` before handing it out.
    ///
    /// # Errors
    ///
    /// Returns whatever [`EntityContext::on_entity_created`] rejects the uid
    /// with, typically [`EntityError::DuplicateUid`].
    pub fn new<C: EntityContext + ?Sized>(
        ctx: &mut C,
        uid: Option<Uid>,
    ) -> Result<Self, EntityError> {
        let uid = uid.unwrap_or_else(|| ctx.generate_uid());
        ctx.on_entity_created(&uid)?;
        Ok(Self::with_uid(uid))
    }

    fn with_uid(uid: Uid) -> Self {
        Self {
            token: OwnerToken::new(uid),
            store: ComponentStore::new(),
            destroyed: false,
        }
    }

    /// Returns the entity's uid.
    #[must_use]
    pub fn uid(&self) -> &Uid {
        self.token.uid()
    }

    /// Returns `true` once [`Entity::destroy`] has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Attached components, in attachment order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.store.iter()
    }

    /// Returns the number of attached components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no component is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn ensure_live(&self) -> Result<(), EntityError> {
        if self.destroyed {
            return Err(EntityError::InvalidState(self.uid().clone()));
        }
        Ok(())
    }

    fn not_found(&self, component: ComponentName) -> EntityError {
        EntityError::NotFound {
            entity: self.uid().clone(),
            component,
        }
    }

    /// Build a component of kind `key` from `properties` through `ctx` and
    /// attach it.
    ///
    /// # Errors
    ///
    /// - [`EntityError::InvalidState`] if the entity is destroyed.
    /// - [`EntityError::Component`] if the context cannot build the component.
    pub fn add<'k, C: EntityContext + ?Sized>(
        &mut self,
        ctx: &C,
        key: impl Into<ComponentKey<'k>>,
        properties: Properties,
    ) -> Result<(), EntityError> {
        self.ensure_live()?;
        let instance = ctx.create_component(key.into(), properties)?;
        self.attach(instance)?;
        Ok(())
    }

    /// Store `instance` under its canonical name and run its attachment hook.
    ///
    /// An existing entry with the same name is overwritten without running
    /// any of its hooks; it is handed back, no longer owned. Remove it first
    /// if it needs cleanup.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidState`] if the entity is destroyed.
    pub fn attach(
        &mut self,
        mut instance: ComponentInstance,
    ) -> Result<Option<ComponentInstance>, EntityError> {
        self.ensure_live()?;
        let name = instance.name().clone();
        instance.attach(&self.token);
        let replaced = self.store.insert(instance).map(|mut old| {
            old.release(&self.token);
            old
        });
        debug!(
            entity = %self.uid(),
            component = %name,
            replaced = replaced.is_some(),
            "component attached"
        );
        Ok(replaced)
    }

    /// Detach the component of kind `key`, run its detachment hook and hand
    /// it back.
    ///
    /// # Errors
    ///
    /// - [`EntityError::InvalidState`] if the entity is destroyed.
    /// - [`EntityError::NotFound`] if no such component is attached.
    pub fn remove<'k>(
        &mut self,
        key: impl Into<ComponentKey<'k>>,
    ) -> Result<ComponentInstance, EntityError> {
        self.ensure_live()?;
        let name = key.into().resolve();
        let mut instance = match self.store.remove(&name) {
            Some(instance) => instance,
            None => return Err(self.not_found(name)),
        };
        instance.detach(&self.token);
        debug!(entity = %self.uid(), component = %name, "component removed");
        Ok(instance)
    }

    /// Returns `true` if a component of kind `key` is attached.
    #[must_use]
    pub fn has<'k>(&self, key: impl Into<ComponentKey<'k>>) -> bool {
        self.get(key).is_ok()
    }

    /// Returns `true` if `component`'s owner back-reference is this entity.
    #[must_use]
    pub fn owns(&self, component: &ComponentInstance) -> bool {
        component.is_owned_by(&self.token)
    }

    /// The attached component of kind `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] if no such component is attached.
    pub fn get<'k>(
        &self,
        key: impl Into<ComponentKey<'k>>,
    ) -> Result<&ComponentInstance, EntityError> {
        let name = key.into().resolve();
        match self.store.get(&name) {
            Some(instance) => Ok(instance),
            None => Err(self.not_found(name)),
        }
    }

    /// Mutable access to the attached component of kind `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::NotFound`] if no such component is attached.
    pub fn get_mut<'k>(
        &mut self,
        key: impl Into<ComponentKey<'k>>,
    ) -> Result<&mut ComponentInstance, EntityError> {
        let name = key.into().resolve();
        // `self.not_found` would borrow all of `self` while the store's
        // mutable borrow is still live on the returned path.
        match self.store.get_mut(&name) {
            Some(instance) => Ok(instance),
            None => Err(EntityError::NotFound {
                entity: self.token.uid().clone(),
                component: name,
            }),
        }
    }

    /// The attached component of kind `K`, as a `K`.
    #[must_use]
    pub fn get_as<K: ComponentDefinition>(&self) -> Option<&K> {
        self.store
            .get(&ComponentName::of::<K>())
            .and_then(ComponentInstance::downcast_ref::<K>)
    }

    #[must_use]
    pub fn get_as_mut<K: ComponentDefinition>(&mut self) -> Option<&mut K> {
        self.store
            .get_mut(&ComponentName::of::<K>())
            .and_then(ComponentInstance::downcast_mut::<K>)
    }

    /// Destroy the entity: mark it destroyed, run every component's
    /// destruction hook in attachment order, then notify `ctx` once.
    ///
    /// The destroyed components are dropped; the entity stays behind, empty,
    /// until its owner discards it.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidState`] if the entity was already
    /// destroyed. Nothing is run a second time.
    pub fn destroy<C: EntityContext + ?Sized>(&mut self, ctx: &mut C) -> Result<(), EntityError> {
        self.ensure_live()?;
        self.destroyed = true;
        let mut count = 0usize;
        for mut instance in self.store.drain() {
            instance.destroy(&self.token);
            count += 1;
        }
        debug!(entity = %self.uid(), components = count, "entity destroyed");
        ctx.on_entity_destroyed(self);
        Ok(())
    }

    /// Fire the event `name` through every attached component in attachment
    /// order, stopping right after the first handler that prevents it.
    ///
    /// Handlers may rewrite the payload; the returned event carries its final
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidState`] if the entity is destroyed.
    pub fn fire_event(
        &mut self,
        name: impl Into<String>,
        data: Value,
    ) -> Result<EntityEvent, EntityError> {
        self.ensure_live()?;
        let mut event = EntityEvent::new(name, data);
        for instance in self.store.iter_mut() {
            instance.dispatch(&mut event);
            if event.is_prevented() {
                trace!(
                    entity = %self.token.uid(),
                    event = event.name(),
                    by = %instance.name(),
                    "event prevented"
                );
                return Ok(event);
            }
        }
        trace!(entity = %self.token.uid(), event = event.name(), "event dispatched");
        Ok(event)
    }
}

impl Index<&str> for Entity {
    type Output = ComponentInstance;

    /// # Panics
    ///
    /// Panics if no component with that name is attached. Use
    /// [`Entity::get`] for a fallible lookup.
    fn index(&self, name: &str) -> &ComponentInstance {
        &self[ComponentKey::Name(name)]
    }
}

impl<'k> Index<ComponentKey<'k>> for Entity {
    type Output = ComponentInstance;

    /// # Panics
    ///
    /// Panics if no component of that kind is attached. Use
    /// [`Entity::get`] for a fallible lookup.
    fn index(&self, key: ComponentKey<'k>) -> &ComponentInstance {
        match self.get(key) {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }
}
