//! Entity identifiers and the component-to-entity back-reference.
//!
//! A [`Uid`] is an opaque identifier handed out by the owning context (or
//! supplied by the caller). The [`OwnerToken`] is held by an entity for its
//! whole life; components only ever see a non-owning [`OwnerRef`] to it.

use std::fmt;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque entity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random (v4) identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Uid {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Uid {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<Uuid> for Uid {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

/// Identity of a live entity. Dropping the token invalidates every
/// [`OwnerRef`] that was derived from it.
#[derive(Debug)]
pub struct OwnerToken(Arc<Uid>);

impl OwnerToken {
    /// Mint a new owner identity for `uid`. Two tokens are never the same
    /// owner, even with equal uids.
    #[must_use]
    pub fn new(uid: Uid) -> Self {
        Self(Arc::new(uid))
    }

    #[must_use]
    pub fn uid(&self) -> &Uid {
        &self.0
    }

    /// Create a back-reference to this identity.
    #[must_use]
    pub fn downgrade(&self) -> OwnerRef {
        OwnerRef {
            uid: Uid::clone(&self.0),
            token: Arc::downgrade(&self.0),
        }
    }
}

/// Non-owning back-reference from a component to the entity it is attached
/// to. Only usable for identity checks and for looking the owner up by uid.
#[derive(Debug, Clone)]
pub struct OwnerRef {
    uid: Uid,
    token: Weak<Uid>,
}

impl OwnerRef {
    /// Uid of the owning entity.
    #[must_use]
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Returns `true` if this reference points at exactly `token`.
    #[must_use]
    pub fn is(&self, token: &OwnerToken) -> bool {
        std::ptr::eq(self.token.as_ptr(), Arc::as_ptr(&token.0))
    }

    /// Returns `true` while the owning entity still exists.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.token.strong_count() > 0
    }
}
