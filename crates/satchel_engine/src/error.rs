//! Engine-level error types.

use satchel_component::ComponentError;
use satchel_entity::EntityError;

/// Errors that can occur in engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Component(#[from] ComponentError),
}
