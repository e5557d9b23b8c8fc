//! Core component trait
//!
//! A component is a capability or data bundle attached to exactly one
//! entity. Component types are identified by their [`TypeId`]; the world
//! enforces one instance of a given type per entity.

use std::any::{Any, TypeId};

use crate::ecs::{EntityId, World};

/// The core component trait
///
/// Components are owned by their entity and observe lifecycle hooks. All
/// hooks receive `&mut World`: during a hook the component itself is
/// temporarily checked out of its entity, so structural mutation (queries,
/// adding or removing other components, marking entities for destruction)
/// is legal and destruction stays deferred to end of frame.
///
/// Pure data components implement only [`Component::as_any`] /
/// [`Component::as_any_mut`]; behavior components override the hooks they
/// need. A component that overrides [`Component::on_update`] must also
/// return `true` from [`Component::has_update`] so the entity can cache it
/// in its per-frame update list.
pub trait Component: Any {
    /// Called after the component is attached to an entity
    fn on_attach(&mut self, entity: EntityId, world: &mut World) {
        let _ = (entity, world);
    }

    /// Per-frame hook, invoked before any system runs. Only called when
    /// [`Component::has_update`] returns `true`.
    fn on_update(&mut self, entity: EntityId, world: &mut World, dt: f32) {
        let _ = (entity, world, dt);
    }

    /// Called when the component is removed or its entity is torn down
    fn on_detach(&mut self, entity: EntityId, world: &mut World) {
        let _ = (entity, world);
    }

    /// Whether this component wants the per-frame [`Component::on_update`]
    /// hook
    fn has_update(&self) -> bool {
        false
    }

    /// Component types this one refuses to share an entity with. Attaching
    /// while a listed type is present is rejected with a warning.
    fn exclusive_with(&self) -> Vec<TypeId> {
        Vec::new()
    }

    /// Upcast for typed registry lookups
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed registry lookups
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
