//! Entity-layer error types.

use satchel_component::{ComponentError, ComponentName, Uid};

/// Errors raised by [`Entity`](crate::Entity) operations.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// No component with this canonical name is attached.
    #[error("component '{component}' not found on entity {entity}")]
    NotFound {
        entity: Uid,
        component: ComponentName,
    },

    /// The uid already names a live entity in the owning context.
    #[error("entity uid {0} is already in use")]
    DuplicateUid(Uid),

    /// The entity has been destroyed and can no longer be changed.
    #[error("entity {0} is destroyed")]
    InvalidState(Uid),

    /// Building the component failed.
    #[error(transparent)]
    Component(#[from] ComponentError),
}
