//! Engine configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Environment variable selecting the [`UidStrategy`].
pub const UID_STRATEGY_ENV: &str = "SATCHEL_UID_STRATEGY";

/// Environment variable setting [`EngineConfig::uid_prefix`].
pub const UID_PREFIX_ENV: &str = "SATCHEL_UID_PREFIX";

/// How the engine generates uids for entities created without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UidStrategy {
    /// Random v4 UUIDs.
    #[default]
    Uuid,
    /// `1`, `2`, `3`, ... in creation order. Reproducible across runs.
    Sequential,
}

impl FromStr for UidStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "sequential" => Ok(Self::Sequential),
            _ => Err(EngineError::InvalidConfig {
                key: UID_STRATEGY_ENV,
                value: s.to_owned(),
            }),
        }
    }
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Strategy for generated uids.
    pub uid_strategy: UidStrategy,
    /// Optional prefix for generated uids, joined with a `-`.
    pub uid_prefix: Option<String>,
}

impl EngineConfig {
    /// Default configuration: random uuid uids with no prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how entity uids are generated.
    #[must_use]
    pub fn with_uid_strategy(mut self, strategy: UidStrategy) -> Self {
        self.uid_strategy = strategy;
        self
    }

    /// Set a prefix prepended to every generated uid.
    #[must_use]
    pub fn with_uid_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uid_prefix = Some(prefix.into());
        self
    }

    /// Read the configuration from `SATCHEL_*` environment variables, falling
    /// back to defaults for unset ones.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for an unknown uid strategy.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for an unknown uid strategy.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let mut config = Self::default();
        if let Some(strategy) = lookup(UID_STRATEGY_ENV) {
            config.uid_strategy = strategy.parse()?;
        }
        config.uid_prefix = lookup(UID_PREFIX_ENV).filter(|prefix| !prefix.is_empty());
        Ok(config)
    }
}
