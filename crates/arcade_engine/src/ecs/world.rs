//! World: entity registry, frame loop, and query cache
//!
//! The world owns every entity, component, and system. Frames are driven by
//! [`World::update`], which runs in three phases: component per-frame hooks,
//! systems in registration order, then the deferred-destroy flush. Queries
//! over component sets are cached and conservatively invalidated on any
//! structural change.

use std::any::TypeId;
use std::collections::HashMap;

use crate::ecs::components::Transform;
use crate::ecs::entity::Entity;
use crate::ecs::{Component, EntityId, System};
use crate::events::EventBus;
use crate::foundation::math::Vec2;

/// Logical output surface handed to the world at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface width in world units
    pub width: f32,
    /// Surface height in world units
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Central ECS container and frame driver
pub struct World {
    next_entity_id: u64,
    entities: HashMap<EntityId, Entity>,
    /// Entity handles in creation order; queries and update iterate this.
    entity_list: Vec<EntityId>,
    systems: Vec<Box<dyn System>>,
    destroy_queue: Vec<EntityId>,
    query_cache: HashMap<Vec<TypeId>, Vec<EntityId>>,
    events: EventBus,
    viewport: Viewport,
    initialized: bool,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: HashMap::new(),
            entity_list: Vec::new(),
            systems: Vec::new(),
            destroy_queue: Vec::new(),
            query_cache: HashMap::new(),
            events: EventBus::new(),
            viewport: Viewport::default(),
            initialized: false,
        }
    }

    /// Bind the world to its output surface. Must be called once before the
    /// first [`World::update`].
    pub fn init(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.initialized = true;
        log::info!(
            "World initialized with {}x{} viewport",
            viewport.width,
            viewport.height
        );
    }

    /// The surface the world was initialized with
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Tear everything down: systems detach in reverse registration order
    /// while entities are still present, then all entities are destroyed
    /// immediately (with detach hooks) and event listeners dropped.
    pub fn dispose(&mut self) {
        while let Some(mut system) = self.systems.pop() {
            system.on_detach(self);
        }

        let all: Vec<EntityId> = self.entity_list.clone();
        for id in all {
            self.destroy(id);
        }
        self.flush_destroyed();

        self.events.clear();
        self.initialized = false;
        log::info!("World disposed");
    }

    /// The event bus shared by systems and gameplay code
    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }

    // --- entities -------------------------------------------------------

    /// Create a new entity carrying a default [`Transform`]
    pub fn create_entity(&mut self, tag: impl Into<String>) -> EntityId {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.insert(id, Entity::new(id, tag));
        self.entity_list.push(id);
        self.invalidate_queries();
        self.add_component(id, Transform::default());
        id
    }

    /// Borrow an entity record
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Whether the entity exists (it may still be pending destruction)
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities, including those pending destruction
    pub fn entity_count(&self) -> usize {
        self.entity_list.len()
    }

    /// Enable or disable an entity. Inactive entities keep their components
    /// but are skipped by queries and per-frame hooks.
    pub fn set_active(&mut self, id: EntityId, active: bool) {
        if let Some(record) = self.entities.get_mut(&id) {
            if record.is_active() != active {
                record.set_active(active);
                self.invalidate_queries();
            }
        }
    }

    /// First active entity (in creation order) with the given tag
    pub fn find_by_tag(&self, tag: &str) -> Option<EntityId> {
        self.entity_list.iter().copied().find(|id| {
            self.entities
                .get(id)
                .is_some_and(|e| e.tag() == tag && e.is_active() && !e.is_pending_destroy())
        })
    }

    /// Every active entity with the given tag, in creation order
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<EntityId> {
        self.entity_list
            .iter()
            .copied()
            .filter(|id| {
                self.entities
                    .get(id)
                    .is_some_and(|e| e.tag() == tag && e.is_active() && !e.is_pending_destroy())
            })
            .collect()
    }

    /// Mark an entity for destruction at the end of the current frame.
    /// Idempotent; children are destroyed with their parent during the
    /// flush.
    pub fn destroy(&mut self, id: EntityId) {
        let Some(record) = self.entities.get_mut(&id) else {
            return;
        };
        if record.is_pending_destroy() {
            return;
        }
        record.mark_destroyed();
        self.destroy_queue.push(id);
        self.invalidate_queries();
    }

    // --- components -----------------------------------------------------

    /// Attach a component. Exactly one component of a given type may live
    /// on an entity; duplicates and exclusivity conflicts are rejected with
    /// a warning.
    pub fn add_component<C: Component>(&mut self, id: EntityId, component: C) {
        let type_id = TypeId::of::<C>();
        let Some(record) = self.entities.get_mut(&id) else {
            log::warn!("add_component on unknown entity {}", id.raw());
            return;
        };
        if record.has(type_id) {
            log::warn!(
                "entity {} already has a {}, ignoring duplicate",
                id.raw(),
                std::any::type_name::<C>()
            );
            return;
        }
        let boxed: Box<dyn Component> = Box::new(component);
        for conflict in boxed.exclusive_with() {
            if record.has(conflict) {
                log::warn!(
                    "entity {} rejects {}: conflicting component present",
                    id.raw(),
                    std::any::type_name::<C>()
                );
                return;
            }
        }
        record.insert_slot(type_id, boxed);
        self.invalidate_queries();
        self.with_component_taken(id, type_id, |component, entity, world| {
            component.on_attach(entity, world);
        });
    }

    /// Detach and drop a component, running its detach hook. [`Transform`]
    /// is irremovable; removing an absent component is a no-op.
    pub fn remove_component<C: Component>(&mut self, id: EntityId) {
        let type_id = TypeId::of::<C>();
        if type_id == TypeId::of::<Transform>() {
            log::warn!("Transform cannot be removed from entity {}", id.raw());
            return;
        }
        let Some(record) = self.entities.get_mut(&id) else {
            return;
        };
        let Some(mut component) = record.remove_slot(type_id) else {
            return;
        };
        self.invalidate_queries();
        component.on_detach(id, self);
    }

    /// Whether the entity carries a component of the given type
    pub fn has_component<C: Component>(&self, id: EntityId) -> bool {
        self.entities
            .get(&id)
            .is_some_and(|e| e.has(TypeId::of::<C>()))
    }

    /// Typed component lookup
    pub fn get_component<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.entities.get(&id)?.get::<C>()
    }

    /// Typed mutable component lookup
    pub fn get_component_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.entities.get_mut(&id)?.get_mut::<C>()
    }

    // --- hierarchy ------------------------------------------------------

    /// Reparent an entity (or unparent it with `None`). Positions stay
    /// local; the world position of a child is the sum of local positions
    /// up its parent chain.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        let old_parent = self
            .get_component::<Transform>(child)
            .and_then(Transform::parent);
        if let Some(old) = old_parent {
            if let Some(transform) = self.get_component_mut::<Transform>(old) {
                transform.remove_child(child);
            }
        }
        if let Some(transform) = self.get_component_mut::<Transform>(child) {
            transform.set_parent(parent);
        }
        if let Some(new_parent) = parent {
            if let Some(transform) = self.get_component_mut::<Transform>(new_parent) {
                transform.add_child(child);
            }
        }
    }

    /// Parent of an entity, if it has one
    pub fn parent_of(&self, id: EntityId) -> Option<EntityId> {
        self.get_component::<Transform>(id)
            .and_then(Transform::parent)
    }

    /// Direct children of an entity, in parenting order
    pub fn children_of(&self, id: EntityId) -> Vec<EntityId> {
        self.get_component::<Transform>(id)
            .map(|t| t.children().to_vec())
            .unwrap_or_default()
    }

    /// Parent `child` under `parent`
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) {
        self.set_parent(child, Some(parent));
    }

    /// Unparent `child` if it is currently under `parent`
    pub fn remove_child(&mut self, parent: EntityId, child: EntityId) {
        if self.parent_of(child) == Some(parent) {
            self.set_parent(child, None);
        }
    }

    /// Absolute position of an entity: its local position plus every
    /// ancestor's local position
    pub fn world_position(&self, id: EntityId) -> Vec2 {
        let mut position = Vec2::zeros();
        let mut current = Some(id);
        while let Some(cursor) = current {
            match self.get_component::<Transform>(cursor) {
                Some(transform) => {
                    position += transform.position;
                    current = transform.parent();
                }
                None => break,
            }
        }
        position
    }

    // --- queries --------------------------------------------------------

    /// Entities (active, not pending destruction) carrying every listed
    /// component type, in creation order. An empty requirement list matches
    /// nothing. Results are cached until the next structural change.
    pub fn query_ids(&mut self, required: &[TypeId]) -> Vec<EntityId> {
        if required.is_empty() {
            return Vec::new();
        }
        let mut key: Vec<TypeId> = required.to_vec();
        key.sort_unstable();
        key.dedup();

        if let Some(cached) = self.query_cache.get(&key) {
            return cached.clone();
        }

        let mut result = Vec::new();
        for &id in &self.entity_list {
            let Some(record) = self.entities.get(&id) else {
                continue;
            };
            if !record.is_active() || record.is_pending_destroy() {
                continue;
            }
            if key.iter().all(|&type_id| record.has(type_id)) {
                result.push(id);
            }
        }
        self.query_cache.insert(key, result.clone());
        result
    }

    /// Entities carrying component `A`
    pub fn query<A: Component>(&mut self) -> Vec<EntityId> {
        self.query_ids(&[TypeId::of::<A>()])
    }

    /// Entities carrying components `A` and `B`
    pub fn query2<A: Component, B: Component>(&mut self) -> Vec<EntityId> {
        self.query_ids(&[TypeId::of::<A>(), TypeId::of::<B>()])
    }

    /// Entities carrying components `A`, `B`, and `C`
    pub fn query3<A: Component, B: Component, C: Component>(&mut self) -> Vec<EntityId> {
        self.query_ids(&[TypeId::of::<A>(), TypeId::of::<B>(), TypeId::of::<C>()])
    }

    /// First entity carrying component `A`
    pub fn query_one<A: Component>(&mut self) -> Option<EntityId> {
        self.query::<A>().first().copied()
    }

    fn invalidate_queries(&mut self) {
        self.query_cache.clear();
    }

    // --- systems --------------------------------------------------------

    /// Register a system. Systems run in registration order every frame.
    pub fn add_system<S: System>(&mut self, system: S) {
        let mut boxed: Box<dyn System> = Box::new(system);
        boxed.on_attach(self);
        self.systems.push(boxed);
    }

    /// Remove the first registered system of the given type, running its
    /// detach hook. Absent types are a silent no-op.
    pub fn remove_system<S: System>(&mut self) {
        if let Some(index) = self.systems.iter().position(|s| s.as_any().is::<S>()) {
            let mut system = self.systems.remove(index);
            system.on_detach(self);
        }
    }

    /// Typed lookup of a registered system
    pub fn get_system<S: System>(&self) -> Option<&S> {
        self.systems.iter().find_map(|s| s.as_any().downcast_ref())
    }

    /// Typed mutable lookup of a registered system
    pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut())
    }

    // --- frame loop -----------------------------------------------------

    /// Advance one frame: component hooks, then systems, then the
    /// deferred-destroy flush
    pub fn update(&mut self, dt: f32) {
        // Phase 1: per-frame component hooks, entity creation order.
        let frame_entities: Vec<EntityId> = self.entity_list.clone();
        for id in frame_entities {
            let runnable = self
                .entities
                .get(&id)
                .is_some_and(|e| e.is_active() && !e.is_pending_destroy());
            if !runnable {
                continue;
            }
            let updatable = self
                .entities
                .get(&id)
                .map(|e| e.updatable.clone())
                .unwrap_or_default();
            for type_id in updatable {
                self.with_component_taken(id, type_id, |component, entity, world| {
                    component.on_update(entity, world, dt);
                });
            }
        }

        // Phase 2: systems in registration order, each with a freshly
        // refreshed query result.
        let mut systems = std::mem::take(&mut self.systems);
        for system in &mut systems {
            let required = system.query();
            let entities = self.query_ids(&required);
            system.update(self, &entities, dt);
        }
        // Systems registered during the frame run starting next frame.
        systems.append(&mut self.systems);
        self.systems = systems;

        // Phase 3: deferred destruction.
        self.flush_destroyed();
    }

    fn flush_destroyed(&mut self) {
        if self.destroy_queue.is_empty() {
            return;
        }
        // Detach hooks and child cascades may enqueue more entities; keep
        // draining until the queue stays empty.
        while !self.destroy_queue.is_empty() {
            let queue = std::mem::take(&mut self.destroy_queue);
            for id in queue {
                self.teardown_entity(id);
            }
        }
        self.invalidate_queries();
    }

    fn teardown_entity(&mut self, id: EntityId) {
        let Some(mut record) = self.entities.remove(&id) else {
            return;
        };
        self.entity_list.retain(|&e| e != id);

        let (parent, children) = record
            .get::<Transform>()
            .map(|t| (t.parent(), t.children().to_vec()))
            .unwrap_or((None, Vec::new()));

        for child in children {
            self.destroy(child);
        }
        if let Some(parent_id) = parent {
            if let Some(transform) = self.get_component_mut::<Transform>(parent_id) {
                transform.remove_child(id);
            }
        }

        for slot in record.slots.drain(..) {
            if let Some(mut component) = slot.component {
                component.on_detach(id, self);
            }
        }
    }

    /// Check a component out of its slot, run `f`, and put it back. The
    /// slot stays in place during the call so queries keep matching; if the
    /// hook removed its own slot the component is dropped.
    fn with_component_taken<F>(&mut self, id: EntityId, type_id: TypeId, f: F)
    where
        F: FnOnce(&mut dyn Component, EntityId, &mut World),
    {
        let Some(record) = self.entities.get_mut(&id) else {
            return;
        };
        let Some(mut component) = record.take_component(type_id) else {
            return;
        };
        f(component.as_mut(), id, self);
        if let Some(record) = self.entities.get_mut(&id) {
            let _ = record.untake_component(type_id, component);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Health {
        current: f32,
    }

    impl Component for Health {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Lifetime {
        remaining: f32,
    }

    impl Component for Lifetime {
        fn on_update(&mut self, entity: EntityId, world: &mut World, dt: f32) {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                world.destroy(entity);
            }
        }
        fn has_update(&self) -> bool {
            true
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Recorder {
        log: Rc<RefCell<Vec<&'static str>>>,
        label: &'static str,
    }

    impl Component for Recorder {
        fn on_update(&mut self, _entity: EntityId, _world: &mut World, _dt: f32) {
            self.log.borrow_mut().push(self.label);
        }
        fn has_update(&self) -> bool {
            true
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct RecorderSystem {
        log: Rc<RefCell<Vec<&'static str>>>,
        label: &'static str,
    }

    impl System for RecorderSystem {
        fn update(&mut self, _world: &mut World, _entities: &[EntityId], _dt: f32) {
            self.log.borrow_mut().push(self.label);
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_create_entity_attaches_transform() {
        let mut world = World::new();
        let id = world.create_entity("player");
        assert!(world.has_component::<Transform>(id));
        assert_eq!(world.entity(id).map(Entity::tag), Some("player"));
    }

    #[test]
    fn test_one_component_per_type() {
        let mut world = World::new();
        let id = world.create_entity("player");
        world.add_component(id, Health { current: 100.0 });
        world.add_component(id, Health { current: 5.0 });
        let health = world.get_component::<Health>(id).unwrap();
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_transform_is_irremovable() {
        let mut world = World::new();
        let id = world.create_entity("player");
        world.remove_component::<Transform>(id);
        assert!(world.has_component::<Transform>(id));
    }

    #[test]
    fn test_query_tracks_component_changes() {
        let mut world = World::new();
        let a = world.create_entity("a");
        let b = world.create_entity("b");
        world.add_component(a, Health { current: 1.0 });

        assert_eq!(world.query::<Health>(), vec![a]);

        world.add_component(b, Health { current: 2.0 });
        assert_eq!(world.query::<Health>(), vec![a, b]);

        world.remove_component::<Health>(a);
        assert_eq!(world.query::<Health>(), vec![b]);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let mut world = World::new();
        world.create_entity("a");
        world.create_entity("b");
        assert!(world.query_ids(&[]).is_empty());
    }

    #[test]
    fn test_inactive_entities_skip_queries() {
        let mut world = World::new();
        let a = world.create_entity("a");
        world.add_component(a, Health { current: 1.0 });
        world.set_active(a, false);
        assert!(world.query::<Health>().is_empty());
        world.set_active(a, true);
        assert_eq!(world.query::<Health>(), vec![a]);
    }

    #[test]
    fn test_destroy_is_deferred_and_idempotent() {
        let mut world = World::new();
        let id = world.create_entity("doomed");
        world.add_component(id, Health { current: 1.0 });

        world.destroy(id);
        world.destroy(id);

        // Components stay readable until the end-of-frame flush, but the
        // entity no longer matches queries.
        assert!(world.is_alive(id));
        assert!(world.get_component::<Health>(id).is_some());
        assert!(world.query::<Health>().is_empty());

        world.update(0.016);
        assert!(!world.is_alive(id));
    }

    #[test]
    fn test_destroy_cascades_to_children() {
        let mut world = World::new();
        let parent = world.create_entity("ship");
        let child = world.create_entity("turret");
        let grandchild = world.create_entity("barrel");
        world.set_parent(child, Some(parent));
        world.set_parent(grandchild, Some(child));

        world.destroy(parent);
        world.update(0.016);

        assert!(!world.is_alive(parent));
        assert!(!world.is_alive(child));
        assert!(!world.is_alive(grandchild));
    }

    #[test]
    fn test_component_can_destroy_own_entity_during_update() {
        let mut world = World::new();
        let id = world.create_entity("spark");
        world.add_component(id, Lifetime { remaining: 0.01 });

        world.update(0.016);
        assert!(!world.is_alive(id));
    }

    #[test]
    fn test_component_hooks_run_before_systems() {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        world.add_system(RecorderSystem {
            log: Rc::clone(&log),
            label: "system",
        });
        let id = world.create_entity("e");
        world.add_component(
            id,
            Recorder {
                log: Rc::clone(&log),
                label: "component",
            },
        );

        world.update(0.016);
        assert_eq!(*log.borrow(), vec!["component", "system"]);
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second"] {
            world.add_system(RecorderSystem {
                log: Rc::clone(&log),
                label,
            });
        }
        world.update(0.016);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_typed_system_lookup() {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        world.add_system(RecorderSystem {
            log,
            label: "only",
        });
        assert!(world.get_system::<RecorderSystem>().is_some());
        world.remove_system::<RecorderSystem>();
        assert!(world.get_system::<RecorderSystem>().is_none());
    }

    #[test]
    fn test_tag_lookup() {
        let mut world = World::new();
        let a = world.create_entity("asteroid");
        let _b = world.create_entity("ship");
        let c = world.create_entity("asteroid");

        assert_eq!(world.find_by_tag("asteroid"), Some(a));
        assert_eq!(world.find_all_by_tag("asteroid"), vec![a, c]);
        assert_eq!(world.find_by_tag("station"), None);

        // Inactive entities drop out of tag lookups.
        world.set_active(a, false);
        assert_eq!(world.find_by_tag("asteroid"), Some(c));
        assert_eq!(world.find_all_by_tag("asteroid"), vec![c]);
    }

    #[test]
    fn test_world_position_sums_parent_chain() {
        let mut world = World::new();
        let parent = world.create_entity("ship");
        let child = world.create_entity("turret");
        world.set_parent(child, Some(parent));

        world.get_component_mut::<Transform>(parent).unwrap().position = Vec2::new(10.0, 20.0);
        world.get_component_mut::<Transform>(child).unwrap().position = Vec2::new(1.0, 2.0);

        let position = world.world_position(child);
        assert_eq!(position, Vec2::new(11.0, 22.0));
    }

    struct TeardownWatcher {
        entities_at_detach: Rc<RefCell<usize>>,
    }

    impl System for TeardownWatcher {
        fn update(&mut self, _world: &mut World, _entities: &[EntityId], _dt: f32) {}
        fn on_detach(&mut self, world: &mut World) {
            *self.entities_at_detach.borrow_mut() = world.entity_count();
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_dispose_detaches_systems_before_entities() {
        let mut world = World::new();
        let seen = Rc::new(RefCell::new(0));
        world.add_system(TeardownWatcher {
            entities_at_detach: Rc::clone(&seen),
        });
        world.create_entity("a");
        world.create_entity("b");

        world.dispose();

        // The system's detach hook still saw both entities.
        assert_eq!(*seen.borrow(), 2);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_dispose_clears_everything() {
        let mut world = World::new();
        world.create_entity("a");
        world.create_entity("b");
        world.events().on("tick", |_| {});
        world.dispose();
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.events().listener_count("tick"), 0);
    }
}
