//! Core system trait
//!
//! Systems are cross-entity processors invoked once per frame in
//! registration order, after all component per-frame hooks have run.

use std::any::{Any, TypeId};

use crate::ecs::{EntityId, World};

/// The core system trait
///
/// A system may declare a required component set via [`System::query`];
/// the world refreshes that query every frame and passes the matching
/// entities into [`System::update`]. Systems with an empty query receive
/// an empty slice.
pub trait System: Any {
    /// Component types an entity must carry to appear in this system's
    /// per-frame entity list
    fn query(&self) -> Vec<TypeId> {
        Vec::new()
    }

    /// Called when the system is registered with the world
    fn on_attach(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Per-frame processing. `entities` is the freshly refreshed result of
    /// [`System::query`], in entity creation order.
    fn update(&mut self, world: &mut World, entities: &[EntityId], dt: f32);

    /// Called when the system is removed from the world
    fn on_detach(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Upcast for typed registry lookups
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed registry lookups
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
