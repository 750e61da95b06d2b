//! # satchel_engine
//!
//! The owning context for satchel entities. An [`Engine`] registers
//! component definitions, builds component instances by name, generates
//! entity uids and keeps track of which entities are alive.
//!
//! ## Usage
//!
//! ```rust
//! use satchel_component::{Component, ComponentDefinition, Properties};
//! use satchel_engine::{Engine, EngineConfig};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! impl Component for Position {}
//!
//! impl ComponentDefinition for Position {
//!     const NAME: &'static str = "POSITION";
//! }
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! engine.register_component::<Position>();
//!
//! let mut entity = engine.create_entity(None).unwrap();
//! let mut properties = Properties::new();
//! properties.insert("x".into(), 1.0_f64.into());
//! properties.insert("y".into(), 2.0_f64.into());
//! entity.add(&engine, "position", properties).unwrap();
//! assert!(entity.has("Position"));
//! ```

pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod uid;

pub use config::{EngineConfig, UidStrategy};
pub use engine::Engine;
pub use entities::EntityRegistry;
pub use error::EngineError;
pub use satchel_entity::{Entity, EntityContext};
pub use uid::UidGenerator;
