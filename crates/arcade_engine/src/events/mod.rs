//! Topic-keyed event bus
//!
//! Publish/subscribe hub that decouples the ECS core from gameplay logic.
//! The physics system publishes [`topics::COLLISION`]; the core itself never
//! subscribes. Listeners registered at the time `emit` is called are the
//! ones notified for that emission.

use std::collections::HashMap;

use crate::ecs::EntityId;
use crate::foundation::math::Vec2;

/// Well-known topics produced by the engine core
pub mod topics {
    /// A dynamic body struck an obstacle. Payload:
    /// [`EventPayload::Collision`].
    pub const COLLISION: &str = "collision";
}

/// Payload of a collision notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The dynamic body that moved into the obstacle
    pub entity_a: EntityId,
    /// The obstacle that was struck
    pub entity_b: EntityId,
    /// Unit surface normal at the impact point, pointing away from the
    /// obstacle
    pub normal: Vec2,
}

/// Variant for type-safe event payloads
///
/// The core only produces [`EventPayload::Collision`]; the other variants
/// exist for gameplay systems that reuse the bus for their own topics.
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// Collision notification from the physics system
    Collision(CollisionEvent),
    /// A bare entity reference
    Entity(EntityId),
    /// A scalar value (damage, score delta, ...)
    Scalar(f32),
    /// A free-form string
    Text(String),
    /// Topic-only notification with no data
    None,
}

impl EventPayload {
    /// Get the collision payload if present
    pub fn as_collision(&self) -> Option<&CollisionEvent> {
        match self {
            EventPayload::Collision(event) => Some(event),
            _ => None,
        }
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    callback: Box<dyn FnMut(&EventPayload)>,
}

/// Topic-keyed publish/subscribe hub
///
/// Single-threaded by design: the engine frame loop is the only caller, so
/// listeners are plain `FnMut` closures with no synchronization. Gameplay
/// listeners that need shared state capture it via `Rc<RefCell<..>>`.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<Listener>>,
    next_id: u64,
}

impl EventBus {
    /// Create a new empty event bus
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a listener for a topic; returns a handle for [`EventBus::off`]
    pub fn on(
        &mut self,
        topic: impl Into<String>,
        callback: impl FnMut(&EventPayload) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(topic.into()).or_default().push(Listener {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Unregister a listener. Unknown topic/handle pairs are a silent no-op.
    pub fn off(&mut self, topic: &str, id: ListenerId) {
        if let Some(list) = self.listeners.get_mut(topic) {
            list.retain(|listener| listener.id != id);
            if list.is_empty() {
                self.listeners.remove(topic);
            }
        }
    }

    /// Broadcast a payload to every listener of the topic, in registration
    /// order. Topics with no listeners are a no-op.
    pub fn emit(&mut self, topic: &str, payload: &EventPayload) {
        if let Some(list) = self.listeners.get_mut(topic) {
            for listener in list.iter_mut() {
                (listener.callback)(payload);
            }
        }
    }

    /// Number of listeners currently registered for a topic
    pub fn listener_count(&self, topic: &str) -> usize {
        self.listeners.get(topic).map_or(0, Vec::len)
    }

    /// Remove every listener on every topic
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
