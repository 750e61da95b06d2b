//! Core [`Component`] trait and the [`ComponentInstance`] wrapper.
//!
//! A component kind is a plain Rust type implementing [`Component`] (its
//! hooks) and [`ComponentDefinition`] (its canonical name and how it is built
//! from a configuration mapping). Entities never hold kinds directly: they
//! hold [`ComponentInstance`]s, which carry the canonical name and the owner
//! back-reference on behalf of every kind.

use std::any::Any;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::event::EntityEvent;
use crate::name::ComponentName;
use crate::owner::{OwnerRef, OwnerToken};

/// Object-safe access to [`Any`] for component trait objects.
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Lifecycle and event hooks shared by every component kind.
///
/// All hooks default to no-ops.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use satchel_component::{Component, ComponentDefinition, EntityEvent};
///
/// #[derive(Debug, Deserialize)]
/// struct Health {
///     current: i64,
/// }
///
/// impl Component for Health {
///     fn on_event(&mut self, event: &mut EntityEvent) {
///         if event.is("damage") {
///             self.current -= event.data["amount"].as_i64().unwrap_or(0);
///         }
///     }
/// }
///
/// impl ComponentDefinition for Health {
///     const NAME: &'static str = "HEALTH";
/// }
/// ```
pub trait Component: AsAny + fmt::Debug + Send {
    /// Called after the component has been stored on an entity.
    fn on_attached(&mut self, owner: &OwnerRef) {
        let _ = owner;
    }

    /// Called for every event fired on the owning entity.
    fn on_event(&mut self, event: &mut EntityEvent) {
        let _ = event;
    }

    /// Called after the component has been removed from its entity.
    fn on_detached(&mut self) {}

    /// Called when the owning entity is destroyed.
    fn on_destroyed(&mut self) {}
}

/// A registrable component kind.
///
/// The kind's `Deserialize` impl is its constructor: the configuration
/// mapping handed to the registry is deserialised field by field into the
/// kind.
pub trait ComponentDefinition: Component + DeserializeOwned {
    /// Kind name. Folded to uppercase once, when it becomes a
    /// [`ComponentName`].
    const NAME: &'static str;
}

/// A component instance together with the state every kind shares: its
/// canonical name and the back-reference to its owning entity.
pub struct ComponentInstance {
    name: ComponentName,
    owner: Option<OwnerRef>,
    inner: Box<dyn Component>,
}

impl ComponentInstance {
    /// Wrap a concrete component of kind `K`.
    #[must_use]
    pub fn new<K: ComponentDefinition>(component: K) -> Self {
        Self::from_boxed(ComponentName::of::<K>(), Box::new(component))
    }

    /// Wrap an already boxed component under a canonical name.
    #[must_use]
    pub fn from_boxed(name: ComponentName, inner: Box<dyn Component>) -> Self {
        Self {
            name,
            owner: None,
            inner,
        }
    }

    /// The canonical name of this instance's kind.
    #[must_use]
    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    /// The entity this instance is currently attached to, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_ref()
    }

    /// Returns `true` if this instance is attached to any entity.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns `true` if this instance is attached to exactly `token`.
    #[must_use]
    pub fn is_owned_by(&self, token: &OwnerToken) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.is(token))
    }

    /// Returns `true` if the concrete component is a `K`.
    #[must_use]
    pub fn is<K: Component>(&self) -> bool {
        self.component().as_any().is::<K>()
    }

    /// The concrete component as a `K`, if it is one.
    #[must_use]
    pub fn downcast_ref<K: Component>(&self) -> Option<&K> {
        self.component().as_any().downcast_ref::<K>()
    }

    /// Mutable access to the concrete component as a `K`, if it is one.
    #[must_use]
    pub fn downcast_mut<K: Component>(&mut self) -> Option<&mut K> {
        self.component_mut().as_any_mut().downcast_mut::<K>()
    }

    /// Unwrap into the concrete component, or `None` if it is not a `K`.
    /// Check with [`ComponentInstance::is`] first to keep the instance on a
    /// mismatch.
    #[must_use]
    pub fn into_inner<K: Component>(self) -> Option<K> {
        <dyn Component as AsAny>::into_any(self.inner)
            .downcast::<K>()
            .ok()
            .map(|component| *component)
    }

    /// The concrete component as a trait object.
    pub fn component(&self) -> &(dyn Component + 'static) {
        &*self.inner
    }

    /// Mutable access to the concrete component as a trait object.
    pub fn component_mut(&mut self) -> &mut (dyn Component + 'static) {
        &mut *self.inner
    }

    /// Attach to the entity holding `token` and run the attachment hook.
    ///
    /// Returns `false`, doing nothing, if the instance is already attached.
    pub fn attach(&mut self, token: &OwnerToken) -> bool {
        if self.owner.is_some() {
            return false;
        }
        let owner = token.downgrade();
        self.inner.on_attached(&owner);
        self.owner = Some(owner);
        true
    }

    /// Forward an event to the event hook.
    pub fn dispatch(&mut self, event: &mut EntityEvent) {
        self.inner.on_event(event);
    }

    /// Clear the owner and run the detachment hook.
    ///
    /// Only the owning entity's `token` can detach; returns `false` otherwise.
    pub fn detach(&mut self, token: &OwnerToken) -> bool {
        if !self.is_owned_by(token) {
            return false;
        }
        self.owner = None;
        self.inner.on_detached();
        true
    }

    /// Clear the owner without running any hook. Used when an entry is
    /// overwritten in place.
    ///
    /// Only the owning entity's `token` can release; returns `false` otherwise.
    pub fn release(&mut self, token: &OwnerToken) -> bool {
        if !self.is_owned_by(token) {
            return false;
        }
        self.owner = None;
        true
    }

    /// Run the destruction hook and clear the owner.
    ///
    /// Only the owning entity's `token` can destroy; returns `false` otherwise,
    /// so the hook runs at most once per attachment.
    pub fn destroy(&mut self, token: &OwnerToken) -> bool {
        if !self.is_owned_by(token) {
            return false;
        }
        self.inner.on_destroyed();
        self.owner = None;
        true
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("name", &self.name)
            .field("owner", &self.owner.as_ref().map(OwnerRef::uid))
            .field("component", &self.inner)
            .finish()
    }
}
