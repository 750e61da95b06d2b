//! # satchel_app — demo
//!
//! Builds an engine, attaches components by name, fires events through an
//! entity and tears it down again, logging each step.
//!
//! The engine is configured from `SATCHEL_*` environment variables; logging
//! honours `RUST_LOG`.

mod components;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

use satchel_component::Properties;
use satchel_engine::{Engine, EngineConfig};

use components::{Armor, Health, Position};

fn props(value: Value) -> Result<Properties> {
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("component properties must be an object, got {other}"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("satchel_app=info".parse()?))
        .init();

    let config = EngineConfig::from_env().context("reading engine configuration")?;
    info!(?config, "engine starting");

    let mut engine = Engine::new(config);
    engine.register_component::<Position>();
    engine.register_component::<Armor>();
    engine.register_component::<Health>();
    info!(components = engine.components().len(), "components registered");

    let mut hero = engine.create_entity(None)?;
    hero.add(&engine, "position", props(json!({"x": 1.0, "y": 2.0}))?)?;
    hero.add(&engine, "armor", props(json!({"rating": 2}))?)?;
    hero.add(&engine, "HEALTH", props(json!({"current": 10, "max": 10}))?)?;

    let moved = hero.fire_event("move", json!({"dx": 3.0, "dy": -1.0}))?;
    if let Some(position) = hero.get_as::<Position>() {
        info!(event = moved.name(), x = position.x, y = position.y, "moved");
    }

    for amount in [5, -5] {
        let evt = hero.fire_event("damage", json!({ "amount": amount }))?;
        info!(
            amount,
            prevented = evt.is_prevented(),
            data = %evt.data,
            "damage event"
        );
    }

    let position = hero.remove("Position")?;
    info!(
        entity = %hero.uid(),
        removed = %position.name(),
        still_attached = hero.has("position"),
        "component removed"
    );

    engine.destroy_entity(&mut hero)?;
    info!(
        entity = %hero.uid(),
        live = engine.entities().len(),
        destroyed = engine.entities().destroyed_count(),
        "engine shut down"
    );
    Ok(())
}
