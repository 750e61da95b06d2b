//! Canonical-name registries.
//!
//! [`Registry`] is a plain name-to-value table. [`ComponentRegistry`] builds
//! on it to hold one [`Blueprint`] per component kind and to construct
//! instances from configuration mappings.

use std::collections::HashMap;

use serde::de;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::component::{Component, ComponentDefinition, ComponentInstance};
use crate::error::ComponentError;
use crate::name::{ComponentKey, ComponentName};

/// Configuration mapping handed to a definition: field name to value.
pub type Properties = Map<String, Value>;

/// Table of values keyed by canonical name.
#[derive(Debug)]
pub struct Registry<V> {
    entries: HashMap<ComponentName, V>,
}

impl<V> Registry<V> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store `value` under `name`, returning the value it replaced.
    pub fn register(&mut self, name: ComponentName, value: V) -> Option<V> {
        self.entries.insert(name, value)
    }

    /// Returns the value registered under `name`.
    #[must_use]
    pub fn get(&self, name: &ComponentName) -> Option<&V> {
        self.entries.get(name)
    }

    /// Returns `true` if a value is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &ComponentName) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&ComponentName> {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        names
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

type Construct = fn(Properties) -> Result<Box<dyn Component>, serde_json::Error>;

/// How to build one component kind.
#[derive(Debug, Clone)]
pub struct Blueprint {
    name: ComponentName,
    construct: Construct,
}

impl Blueprint {
    /// Blueprint for the definition `K`, constructed by deserialising the
    /// configuration mapping into `K`. Keys that `K` does not read are
    /// rejected, whether or not `K` denies unknown fields itself.
    #[must_use]
    pub fn of<K: ComponentDefinition>() -> Self {
        Self {
            name: ComponentName::of::<K>(),
            construct: construct::<K>,
        }
    }

    /// Blueprint with a hand-written constructor.
    #[must_use]
    pub fn new(name: ComponentName, construct: Construct) -> Self {
        Self { name, construct }
    }

    /// The canonical name this blueprint builds.
    #[must_use]
    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    /// Build an instance from `properties`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidConfiguration`] if the properties do
    /// not fit the kind.
    pub fn build(&self, properties: Properties) -> Result<ComponentInstance, ComponentError> {
        let component =
            (self.construct)(properties).map_err(|source| ComponentError::InvalidConfiguration {
                component: self.name.clone(),
                source,
            })?;
        Ok(ComponentInstance::from_boxed(self.name.clone(), component))
    }
}

/// Deserialise `properties` into `K`, rejecting any key `K` does not read.
fn construct<K: ComponentDefinition>(
    properties: Properties,
) -> Result<Box<dyn Component>, serde_json::Error> {
    let mut unknown = Vec::new();
    let component: K = serde_ignored::deserialize(Value::Object(properties), |path| {
        unknown.push(path.to_string());
    })?;
    if !unknown.is_empty() {
        return Err(de::Error::custom(format_args!(
            "unknown field(s): {}",
            unknown.join(", ")
        )));
    }
    Ok(Box::new(component))
}

/// Registry of component definitions, and the factory for their instances.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    blueprints: Registry<Blueprint>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the definition `K` under its canonical name. Registering a
    /// name twice replaces the earlier definition.
    pub fn register<K: ComponentDefinition>(&mut self) {
        self.register_blueprint(Blueprint::of::<K>());
    }

    /// Register a hand-built blueprint under its name, replacing any earlier
    /// one.
    pub fn register_blueprint(&mut self, blueprint: Blueprint) {
        let name = blueprint.name().clone();
        if self.blueprints.register(name.clone(), blueprint).is_some() {
            warn!(component = %name, "component definition replaced");
        } else {
            debug!(component = %name, "component registered");
        }
    }

    /// Returns `true` if a definition is registered for `key`.
    #[must_use]
    pub fn contains<'a>(&self, key: impl Into<ComponentKey<'a>>) -> bool {
        self.blueprints.contains(&key.into().resolve())
    }

    /// Returns the blueprint registered for `key`.
    #[must_use]
    pub fn blueprint<'a>(&self, key: impl Into<ComponentKey<'a>>) -> Option<&Blueprint> {
        self.blueprints.get(&key.into().resolve())
    }

    /// Build a new instance of a registered kind from `properties`.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::NotRegistered`] if no definition exists for the
    ///   canonical name.
    /// - [`ComponentError::InvalidConfiguration`] if `properties` do not fit
    ///   the definition.
    pub fn create<'a>(
        &self,
        key: impl Into<ComponentKey<'a>>,
        properties: Properties,
    ) -> Result<ComponentInstance, ComponentError> {
        let name = key.into().resolve();
        let blueprint = self
            .blueprints
            .get(&name)
            .ok_or_else(|| ComponentError::NotRegistered(name.clone()))?;
        blueprint.build(properties)
    }

    /// Returns the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Returns `true` if no definition is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&ComponentName> {
        self.blueprints.names()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Position {
        x: i32,
        y: i32,
    }

    impl Component for Position {}

    impl ComponentDefinition for Position {
        const NAME: &'static str = "POSITION";
    }

    #[derive(Debug, Deserialize)]
    struct Name {
        #[serde(default)]
        value: String,
    }

    impl Component for Name {}

    impl ComponentDefinition for Name {
        const NAME: &'static str = "Name";
    }

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn make_registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::new();
        registry.register::<Position>();
        registry.register::<Name>();
        registry
    }

    #[test]
    fn test_generic_registry_replaces() {
        let mut registry = Registry::new();
        assert!(registry.register(ComponentName::new("A"), 1).is_none());
        assert_eq!(registry.register(ComponentName::new("A"), 2), Some(1));
        assert_eq!(registry.get(&ComponentName::new("A")), Some(&2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = make_registry();
        let names: Vec<_> = registry.names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["NAME", "POSITION"]);
    }

    #[test]
    fn test_create_from_properties() {
        let registry = make_registry();
        let instance = registry
            .create("position", props(json!({"x": 1, "y": 2})))
            .unwrap();
        assert_eq!(instance.name().as_str(), "POSITION");
        let position = instance.downcast_ref::<Position>().unwrap();
        assert_eq!((position.x, position.y), (1, 2));
    }

    #[test]
    fn test_create_by_kind() {
        let registry = make_registry();
        let instance = registry
            .create(ComponentKey::of::<Name>(), Properties::new())
            .unwrap();
        assert_eq!(instance.downcast_ref::<Name>().unwrap().value, "");
    }

    #[test]
    fn test_create_unregistered() {
        let registry = make_registry();
        let err = registry.create("velocity", Properties::new()).unwrap_err();
        assert!(matches!(err, ComponentError::NotRegistered(ref name) if name.as_str() == "VELOCITY"));
    }

    #[test]
    fn test_create_missing_field() {
        let registry = make_registry();
        let err = registry
            .create("POSITION", props(json!({"x": 1})))
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("POSITION"));
    }

    #[test]
    fn test_create_unknown_field() {
        let registry = make_registry();
        let err = registry
            .create("POSITION", props(json!({"x": 1, "y": 2, "z": 3})))
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_create_unknown_field_without_deny() {
        let registry = make_registry();
        let err = registry
            .create("name", props(json!({"valeu": "typo"})))
            .unwrap_err();
        match err {
            ComponentError::InvalidConfiguration { component, source } => {
                assert_eq!(component.as_str(), "NAME");
                assert!(source.to_string().contains("valeu"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_create_nested_unknown_field() {
        #[derive(Debug, Deserialize)]
        struct Inner {
            #[serde(default)]
            a: i32,
        }

        #[derive(Debug, Deserialize)]
        struct Outer {
            inner: Inner,
        }

        impl Component for Outer {}

        impl ComponentDefinition for Outer {
            const NAME: &'static str = "OUTER";
        }

        let mut registry = ComponentRegistry::new();
        registry.register::<Outer>();
        let ok = registry
            .create("outer", props(json!({"inner": {"a": 1}})))
            .unwrap();
        assert_eq!(ok.downcast_ref::<Outer>().unwrap().inner.a, 1);
        let err = registry
            .create("outer", props(json!({"inner": {"b": 1}})))
            .unwrap_err();
        assert!(err.to_string().contains("inner.b"));
    }

    #[test]
    fn test_create_wrong_type() {
        let registry = make_registry();
        let err = registry
            .create("POSITION", props(json!({"x": "one", "y": 2})))
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_reregister_overwrites() {
        let mut registry = make_registry();
        registry.register_blueprint(Blueprint::new(ComponentName::new("POSITION"), |_| {
            Ok(Box::new(Name {
                value: "replaced".into(),
            }))
        }));
        assert_eq!(registry.len(), 2);
        let instance = registry.create("position", Properties::new()).unwrap();
        assert_eq!(instance.downcast_ref::<Name>().unwrap().value, "replaced");
    }
}
