//! Uid generation for entities created without an explicit uid.

use satchel_component::Uid;
use uuid::Uuid;

use crate::config::{EngineConfig, UidStrategy};

/// Hands out uids according to the configured [`UidStrategy`].
#[derive(Debug)]
pub struct UidGenerator {
    strategy: UidStrategy,
    prefix: Option<String>,
    next_id: u64,
}

impl UidGenerator {
    /// Build a generator from the uid settings in `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            strategy: config.uid_strategy,
            prefix: config.uid_prefix.clone(),
            next_id: 1,
        }
    }

    /// Generate the next uid.
    pub fn generate(&mut self) -> Uid {
        let body = match self.strategy {
            UidStrategy::Uuid => Uuid::new_v4().to_string(),
            UidStrategy::Sequential => {
                let id = self.next_id;
                self.next_id += 1;
                id.to_string()
            }
        };
        match &self.prefix {
            Some(prefix) => Uid::new(format!("{prefix}-{body}")),
            None => Uid::new(body),
        }
    }

    /// Number of sequential uids handed out so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let config = EngineConfig::new().with_uid_strategy(UidStrategy::Sequential);
        let mut uids = UidGenerator::new(&config);
        assert_eq!(uids.generate().as_str(), "1");
        assert_eq!(uids.generate().as_str(), "2");
        assert_eq!(uids.count(), 2);
    }

    #[test]
    fn test_prefix() {
        let config = EngineConfig::new()
            .with_uid_strategy(UidStrategy::Sequential)
            .with_uid_prefix("npc");
        let mut uids = UidGenerator::new(&config);
        assert_eq!(uids.generate().as_str(), "npc-1");
    }

    #[test]
    fn test_uuid_ids_parse_and_differ() {
        let mut uids = UidGenerator::new(&EngineConfig::default());
        let a = uids.generate();
        let b = uids.generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_eq!(uids.count(), 0);
    }
}
