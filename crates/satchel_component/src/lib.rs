//! # satchel_component
//!
//! The component half of the entity-component core: what a component is,
//! how its kind is named, and how instances are built by name.
//!
//! This crate provides:
//!
//! - [`Component`] / [`ComponentDefinition`] — hooks and construction contract.
//! - [`ComponentInstance`] — a component plus its name and owner back-reference.
//! - [`ComponentName`] / [`ComponentKey`] — case-insensitive kind identity.
//! - [`EntityEvent`] — the payload fanned out through an entity.
//! - [`Registry`] / [`ComponentRegistry`] — name tables and the instance factory.
//! - [`Uid`] / [`OwnerToken`] / [`OwnerRef`] — entity identity.

pub mod component;
pub mod error;
pub mod event;
pub mod name;
pub mod owner;
pub mod registry;

pub use component::{AsAny, Component, ComponentDefinition, ComponentInstance};
pub use error::ComponentError;
pub use event::EntityEvent;
pub use name::{ComponentKey, ComponentName};
pub use owner::{OwnerRef, OwnerToken, Uid};
pub use registry::{Blueprint, ComponentRegistry, Properties, Registry};
