//! Canonical component names.
//!
//! Every component kind is identified by a single uppercased name. The name
//! is folded once, when a [`ComponentName`] is built, and every store and
//! registry lookup compares the folded form. Folding follows Unicode case
//! mapping, so `"énergie"` and `"ÉNERGIE"` name the same kind.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentDefinition;

/// The canonical (uppercase) name of a component kind.
///
/// Names that are already uppercase and `'static` are kept borrowed, so the
/// names declared by [`ComponentDefinition::NAME`] never allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentName(Cow<'static, str>);

impl ComponentName {
    /// Build the canonical name for a static kind name.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        if is_canonical(name) {
            Self(Cow::Borrowed(name))
        } else {
            Self(Cow::Owned(name.to_uppercase()))
        }
    }

    /// Fold an arbitrary string into its canonical form.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self(Cow::Owned(name.to_uppercase()))
    }

    /// The canonical name of a component definition.
    #[must_use]
    pub fn of<K: ComponentDefinition>() -> Self {
        Self::new(K::NAME)
    }

    /// Returns the canonical name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns `true` if uppercasing `name` would leave it unchanged.
fn is_canonical(name: &str) -> bool {
    name.chars().all(|c| {
        let mut upper = c.to_uppercase();
        upper.next() == Some(c) && upper.next().is_none()
    })
}

/// A reference to a component kind, either by name or by canonical name.
///
/// This is the argument type of every entity and registry operation that
/// accepts "a component kind". Plain names are matched case-insensitively.
#[derive(Debug, Clone, Copy)]
pub enum ComponentKey<'a> {
    /// A name in any case, e.g. `"position"`.
    Name(&'a str),
    /// An already canonical name, e.g. from [`ComponentName::of`].
    Canonical(&'a ComponentName),
    /// The name declared by a component definition.
    Kind(&'static str),
}

impl<'a> ComponentKey<'a> {
    /// Key for the definition `K`.
    #[must_use]
    pub fn of<K: ComponentDefinition>() -> ComponentKey<'static> {
        ComponentKey::Kind(K::NAME)
    }

    /// Resolve to the canonical name.
    #[must_use]
    pub fn resolve(self) -> ComponentName {
        match self {
            ComponentKey::Name(name) => ComponentName::parse(name),
            ComponentKey::Canonical(name) => name.clone(),
            ComponentKey::Kind(name) => ComponentName::new(name),
        }
    }
}

impl<'a> From<&'a str> for ComponentKey<'a> {
    fn from(name: &'a str) -> Self {
        ComponentKey::Name(name)
    }
}

impl<'a> From<&'a String> for ComponentKey<'a> {
    fn from(name: &'a String) -> Self {
        ComponentKey::Name(name)
    }
}

impl<'a> From<&'a ComponentName> for ComponentKey<'a> {
    fn from(name: &'a ComponentName) -> Self {
        ComponentKey::Canonical(name)
    }
}
