//! Component-layer error types.

use crate::name::ComponentName;

/// Errors raised while building component instances.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// No definition is registered under this canonical name.
    #[error("component '{0}' is not registered")]
    NotRegistered(ComponentName),

    /// The configuration mapping does not fit the definition's fields.
    #[error("invalid configuration for component '{component}': {source}")]
    InvalidConfiguration {
        component: ComponentName,
        #[source]
        source: serde_json::Error,
    },
}
