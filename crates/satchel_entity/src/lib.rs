//! # satchel_entity
//!
//! An [`Entity`] is a uniquely identified bag of components, at most one per
//! kind. It attaches and detaches components, fans named events out through
//! them in attachment order, and cascades its own destruction.
//!
//! Everything an entity needs from the outside world goes through the
//! [`EntityContext`] it is handed.

pub mod context;
pub mod entity;
pub mod error;
pub mod store;

pub use context::EntityContext;
pub use entity::Entity;
pub use error::EntityError;
pub use store::ComponentStore;
