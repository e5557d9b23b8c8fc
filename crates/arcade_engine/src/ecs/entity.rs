//! Entity handle and record
//!
//! An entity is an identity plus an ordered set of owned components.
//! Entities are created only through [`crate::ecs::World::create_entity`]
//! and carry a free-form tag, an active flag, and a pending-destroy mark
//! consumed by the world's deferred-destroy flush.

use std::any::TypeId;

use crate::ecs::Component;

/// Unique entity identity, monotonically increasing per world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric identity
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One owned component, keyed by its type token
///
/// The boxed value is `None` only while the component is checked out for a
/// lifecycle hook dispatch; the slot itself remains so lookups and queries
/// keep reporting the component as present.
pub(crate) struct ComponentSlot {
    pub(crate) type_id: TypeId,
    pub(crate) component: Option<Box<dyn Component>>,
}

/// Entity record: identity, tag, flags, and owned components in
/// registration order
pub struct Entity {
    id: EntityId,
    tag: String,
    active: bool,
    pending_destroy: bool,
    pub(crate) slots: Vec<ComponentSlot>,
    /// Component types that opted into the per-frame update hook, in
    /// registration order. A cache over `slots`, not a second source of
    /// truth.
    pub(crate) updatable: Vec<TypeId>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            active: true,
            pending_destroy: false,
            slots: Vec::new(),
            updatable: Vec::new(),
        }
    }

    /// The entity's identity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's free-form tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the entity participates in updates and queries
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the entity has been marked for end-of-frame destruction
    pub fn is_pending_destroy(&self) -> bool {
        self.pending_destroy
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.pending_destroy = true;
    }

    /// Whether a component of the given type is attached (true even while
    /// the component is checked out for a hook dispatch)
    pub fn has(&self, type_id: TypeId) -> bool {
        self.slots.iter().any(|slot| slot.type_id == type_id)
    }

    pub(crate) fn slot_index(&self, type_id: TypeId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.type_id == type_id)
    }

    /// Typed component lookup
    pub fn get<C: Component>(&self) -> Option<&C> {
        let index = self.slot_index(TypeId::of::<C>())?;
        self.slots[index]
            .component
            .as_deref()
            .and_then(|component| component.as_any().downcast_ref::<C>())
    }

    /// Typed mutable component lookup
    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        let index = self.slot_index(TypeId::of::<C>())?;
        self.slots[index]
            .component
            .as_deref_mut()
            .and_then(|component| component.as_any_mut().downcast_mut::<C>())
    }

    pub(crate) fn insert_slot(&mut self, type_id: TypeId, component: Box<dyn Component>) {
        if component.has_update() {
            self.updatable.push(type_id);
        }
        self.slots.push(ComponentSlot {
            type_id,
            component: Some(component),
        });
    }

    /// Remove the slot entirely, returning the boxed component if it was
    /// not checked out
    pub(crate) fn remove_slot(&mut self, type_id: TypeId) -> Option<Box<dyn Component>> {
        let index = self.slot_index(type_id)?;
        let slot = self.slots.remove(index);
        self.updatable.retain(|&id| id != type_id);
        slot.component
    }

    /// Check a component out for a hook dispatch, leaving the slot in place
    pub(crate) fn take_component(&mut self, type_id: TypeId) -> Option<Box<dyn Component>> {
        let index = self.slot_index(type_id)?;
        self.slots[index].component.take()
    }

    /// Return a checked-out component to its slot. Fails (returns the box
    /// back) when the slot was removed during the dispatch.
    pub(crate) fn untake_component(
        &mut self,
        type_id: TypeId,
        component: Box<dyn Component>,
    ) -> Result<(), Box<dyn Component>> {
        match self.slot_index(type_id) {
            Some(index) if self.slots[index].component.is_none() => {
                self.slots[index].component = Some(component);
                Ok(())
            }
            _ => Err(component),
        }
    }
}
