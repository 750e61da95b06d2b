//! The [`Engine`]: the owning context entities are created and destroyed
//! through.

use satchel_component::{
    ComponentDefinition, ComponentError, ComponentInstance, ComponentKey, ComponentRegistry,
    Properties, Uid,
};
use satchel_entity::{Entity, EntityContext, EntityError};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::entities::EntityRegistry;
use crate::error::EngineError;
use crate::uid::UidGenerator;

/// Owns the component registry and the bookkeeping of live entities.
///
/// Entities themselves are owned by the caller; every entity operation that
/// needs the engine takes it as an argument.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    components: ComponentRegistry,
    entities: EntityRegistry,
    uids: UidGenerator,
}

impl Engine {
    /// Create an engine with an empty component registry.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let uids = UidGenerator::new(&config);
        Self {
            config,
            components: ComponentRegistry::new(),
            entities: EntityRegistry::new(),
            uids,
        }
    }

    /// Returns the configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register the component definition `K`.
    pub fn register_component<K: ComponentDefinition>(&mut self) {
        self.components.register::<K>();
    }

    /// Returns the component registry.
    #[must_use]
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.components
    }

    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Returns `true` if `uid` names an entity created through this engine
    /// and not yet destroyed.
    #[must_use]
    pub fn is_alive(&self, uid: &Uid) -> bool {
        self.entities.is_alive(uid)
    }

    /// Create a new, empty entity. A uid is generated if none is supplied.
    ///
    /// Equivalent to [`Entity::new`] with this engine as the context.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::DuplicateUid`] if an entity with the supplied
    /// uid is still alive.
    pub fn create_entity(&mut self, uid: Option<Uid>) -> Result<Entity, EngineError> {
        Ok(Entity::new(self, uid)?)
    }

    /// Destroy `entity` and everything attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Entity`] if the entity was already destroyed.
    pub fn destroy_entity(&mut self, entity: &mut Entity) -> Result<(), EngineError> {
        entity.destroy(self)?;
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EntityContext for Engine {
    /// Generated uids skip any that a caller has already claimed.
    fn generate_uid(&mut self) -> Uid {
        loop {
            let uid = self.uids.generate();
            if !self.entities.is_alive(&uid) {
                return uid;
            }
        }
    }

    fn on_entity_created(&mut self, uid: &Uid) -> Result<(), EntityError> {
        if !self.entities.track(uid.clone()) {
            return Err(EntityError::DuplicateUid(uid.clone()));
        }
        debug!(entity = %uid, "entity created");
        Ok(())
    }

    fn create_component(
        &self,
        key: ComponentKey<'_>,
        properties: Properties,
    ) -> Result<ComponentInstance, ComponentError> {
        self.components.create(key, properties)
    }

    fn on_entity_destroyed(&mut self, entity: &Entity) {
        if !self.entities.on_entity_destroyed(entity.uid()) {
            warn!(entity = %entity.uid(), "destroyed entity was not tracked by this engine");
        }
    }
}

#[cfg(test)]
mod tests {
    use satchel_component::{Component, EntityEvent};
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::config::UidStrategy;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }

    impl Component for Position {}

    impl ComponentDefinition for Position {
        const NAME: &'static str = "POSITION";
    }

    #[derive(Debug, Deserialize)]
    struct Shield {
        #[serde(default)]
        blocked: u32,
    }

    impl Component for Shield {
        fn on_event(&mut self, event: &mut EntityEvent) {
            if event.is("damage") && event.data["amount"].as_i64().unwrap_or(0) < 0 {
                self.blocked += 1;
                event.handle();
            }
        }
    }

    impl ComponentDefinition for Shield {
        const NAME: &'static str = "Shield";
    }

    #[derive(Debug, Deserialize)]
    struct Hits {
        #[serde(default)]
        count: u32,
    }

    impl Component for Hits {
        fn on_event(&mut self, event: &mut EntityEvent) {
            if event.is("damage") {
                self.count += 1;
            }
        }
    }

    impl ComponentDefinition for Hits {
        const NAME: &'static str = "hits";
    }

    fn props(value: Value) -> Properties {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn make_engine() -> Engine {
        let mut engine =
            Engine::new(EngineConfig::new().with_uid_strategy(UidStrategy::Sequential));
        engine.register_component::<Position>();
        engine.register_component::<Shield>();
        engine.register_component::<Hits>();
        engine
    }

    #[test]
    fn test_position_scenario() {
        let mut engine = make_engine();
        let mut e = engine.create_entity(None).unwrap();
        e.add(&engine, "POSITION", props(json!({"x": 1, "y": 2})))
            .unwrap();
        assert!(e.has("position"));
        assert_eq!(e["POSITION"].downcast_ref::<Position>().unwrap().x, 1);

        let removed = e.remove("POSITION").unwrap();
        assert_eq!(
            removed.into_inner::<Position>().unwrap(),
            Position { x: 1, y: 2 }
        );
        assert!(!e.has("POSITION"));
    }

    #[test]
    fn test_damage_scenario() {
        let mut engine = make_engine();
        let mut e = engine.create_entity(None).unwrap();
        e.add(&engine, "shield", Properties::new()).unwrap();
        e.add(&engine, "hits", Properties::new()).unwrap();

        let evt = e.fire_event("damage", json!({"amount": -5})).unwrap();
        assert!(evt.is_prevented());
        assert!(evt.is_handled());
        assert_eq!(e.get_as::<Shield>().unwrap().blocked, 1);
        assert_eq!(e.get_as::<Hits>().unwrap().count, 0);

        let evt = e.fire_event("damage", json!({"amount": 5})).unwrap();
        assert!(!evt.is_prevented());
        assert_eq!(e.get_as::<Hits>().unwrap().count, 1);
    }

    #[test]
    fn test_create_entity_tracks_uids() {
        let mut engine = make_engine();
        let a = engine.create_entity(None).unwrap();
        let b = engine.create_entity(Some(Uid::from("hero"))).unwrap();
        assert_eq!(a.uid().as_str(), "1");
        assert!(engine.is_alive(a.uid()));
        assert!(engine.is_alive(b.uid()));
        let live: Vec<_> = engine.entities().iter().map(Uid::as_str).collect();
        assert_eq!(live, ["1", "hero"]);
    }

    #[test]
    fn test_duplicate_uid_rejected_while_alive() {
        let mut engine = make_engine();
        let mut hero = engine.create_entity(Some(Uid::from("hero"))).unwrap();
        let err = engine.create_entity(Some(Uid::from("hero"))).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Entity(EntityError::DuplicateUid(_))
        ));

        engine.destroy_entity(&mut hero).unwrap();
        assert!(engine.create_entity(Some(Uid::from("hero"))).is_ok());
    }

    #[test]
    fn test_generated_uid_skips_live_ones() {
        let mut engine = make_engine();
        let taken = engine.create_entity(Some(Uid::from("1"))).unwrap();
        let generated = engine.create_entity(None).unwrap();
        assert_eq!(generated.uid().as_str(), "2");
        assert_ne!(taken.uid(), generated.uid());
    }

    #[test]
    fn test_destroy_notifies_once() {
        let mut engine = make_engine();
        let mut e = engine.create_entity(None).unwrap();
        e.add(&engine, "hits", Properties::new()).unwrap();

        engine.destroy_entity(&mut e).unwrap();
        assert!(e.is_destroyed());
        assert!(!engine.is_alive(e.uid()));
        assert_eq!(engine.entities().destroyed_count(), 1);

        let err = engine.destroy_entity(&mut e).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Entity(EntityError::InvalidState(_))
        ));
        assert_eq!(engine.entities().destroyed_count(), 1);
    }

    #[test]
    fn test_entity_new_registers_with_engine() {
        let mut engine = make_engine();
        let mut e = Entity::new(&mut engine, None).unwrap();
        assert_eq!(e.uid().as_str(), "1");
        assert!(engine.is_alive(e.uid()));
        assert_eq!(engine.entities().len(), 1);

        let err = Entity::new(&mut engine, Some(Uid::from("1"))).unwrap_err();
        assert!(matches!(err, EntityError::DuplicateUid(_)));

        engine.destroy_entity(&mut e).unwrap();
        assert!(!engine.is_alive(e.uid()));
        assert_eq!(engine.entities().destroyed_count(), 1);
    }

    #[test]
    fn test_add_unregistered_kind() {
        let mut engine = make_engine();
        let mut e = engine.create_entity(None).unwrap();
        let err = e.add(&engine, "velocity", Properties::new()).unwrap_err();
        let err = EngineError::from(err);
        assert_eq!(err.to_string(), "component 'VELOCITY' is not registered");
    }
}
