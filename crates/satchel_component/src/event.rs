//! Named events fanned out through an entity's components.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, mutable payload carried through every component attached to an
/// entity, in attachment order.
///
/// Any handler may [`prevent`](EntityEvent::prevent) the event, which stops
/// the fan-out right after that handler returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEvent {
    name: String,
    /// Handler-mutable payload.
    pub data: Value,
    prevented: bool,
    handled: bool,
}

impl EntityEvent {
    /// A fresh event that is neither prevented nor handled.
    #[must_use]
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
            prevented: false,
            handled: false,
        }
    }

    /// The event's name, as fired.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this event is called `name`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Stop propagation to the remaining components.
    pub fn prevent(&mut self) {
        self.prevented = true;
    }

    /// Mark the event as consumed. A handled event is also prevented.
    pub fn handle(&mut self) {
        self.handled = true;
        self.prevented = true;
    }

    /// Returns `true` once a component has stopped propagation.
    #[must_use]
    pub fn is_prevented(&self) -> bool {
        self.prevented
    }

    #[must_use]
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_event_is_not_prevented() {
        let evt = EntityEvent::new("damage", json!({"amount": 5}));
        assert!(evt.is("damage"));
        assert!(!evt.is("heal"));
        assert!(!evt.is_prevented());
        assert!(!evt.is_handled());
    }

    #[test]
    fn test_handle_implies_prevent() {
        let mut evt = EntityEvent::new("damage", Value::Null);
        evt.handle();
        assert!(evt.is_handled());
        assert!(evt.is_prevented());
    }

    #[test]
    fn test_prevent_does_not_mark_handled() {
        let mut evt = EntityEvent::new("damage", Value::Null);
        evt.prevent();
        assert!(evt.is_prevented());
        assert!(!evt.is_handled());
    }

    #[test]
    fn test_payload_is_mutable() {
        let mut evt = EntityEvent::new("damage", json!({"amount": 5}));
        evt.data["amount"] = json!(2);
        assert_eq!(evt.data["amount"], 2);
    }
}
