//! Component kinds used by the demo.

use satchel_component::{Component, ComponentDefinition, EntityEvent, OwnerRef};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Component for Position {
    fn on_attached(&mut self, owner: &OwnerRef) {
        info!(entity = %owner.uid(), x = self.x, y = self.y, "position attached");
    }

    fn on_event(&mut self, event: &mut EntityEvent) {
        if event.is("move") {
            self.x += event.data["dx"].as_f64().unwrap_or(0.0) as f32;
            self.y += event.data["dy"].as_f64().unwrap_or(0.0) as f32;
        }
    }
}

impl ComponentDefinition for Position {
    const NAME: &'static str = "Position";
}

/// Swallows healing disguised as damage.
#[derive(Debug, Deserialize)]
pub struct Armor {
    #[serde(default)]
    pub rating: i64,
}

impl Component for Armor {
    fn on_event(&mut self, event: &mut EntityEvent) {
        if !event.is("damage") {
            return;
        }
        let amount = event.data["amount"].as_i64().unwrap_or(0);
        if amount < 0 {
            event.prevent();
            return;
        }
        event.data["amount"] = (amount - self.rating).max(0).into();
    }

    fn on_destroyed(&mut self) {
        info!(rating = self.rating, "armor destroyed");
    }
}

impl ComponentDefinition for Armor {
    const NAME: &'static str = "ARMOR";
}

#[derive(Debug, Deserialize)]
pub struct Health {
    pub current: i64,
    pub max: i64,
}

impl Component for Health {
    fn on_event(&mut self, event: &mut EntityEvent) {
        if event.is("damage") {
            let amount = event.data["amount"].as_i64().unwrap_or(0);
            self.current = (self.current - amount).clamp(0, self.max);
            event.data["remaining"] = self.current.into();
        }
    }

    fn on_destroyed(&mut self) {
        info!(current = self.current, "health destroyed");
    }
}

impl ComponentDefinition for Health {
    const NAME: &'static str = "health";
}
