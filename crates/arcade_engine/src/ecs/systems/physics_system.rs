//! Continuous-collision physics system
//!
//! Moves every dynamic body (transform + rigid body + circle collider) by
//! sweeping its collider along the frame displacement instead of teleporting
//! it, so fast bodies cannot tunnel through thin obstacles. Each impact
//! reflects the velocity against the contact normal, nudges the body out of
//! contact, and publishes a [`topics::COLLISION`] event; the remaining slice
//! of the frame is then re-swept, up to a per-body bounce budget.

use std::any::{Any, TypeId};

use crate::config::PhysicsConfig;
use crate::ecs::components::{BoxCollider, CircleCollider, RigidBody, Transform};
use crate::ecs::{EntityId, System, World};
use crate::events::{topics, CollisionEvent, EventPayload};
use crate::foundation::math::{length_squared, Vec2};
use crate::physics::sweep::{sweep_circle_box, sweep_circle_circle, BoxBounds, SweepHit};

/// Swept-collision integrator for dynamic circle bodies
pub struct PhysicsSystem {
    config: PhysicsConfig,
}

impl PhysicsSystem {
    /// Create a physics system with the reference tuning
    pub fn new() -> Self {
        Self {
            config: PhysicsConfig::default(),
        }
    }

    /// Create a physics system with explicit tuning
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// The active tuning parameters
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Earliest obstacle struck along `delta`. Boxes are tested before
    /// circles; a later candidate replaces the best only with a strictly
    /// smaller time of impact, so on exact ties the first box wins.
    fn earliest_hit(
        entity: EntityId,
        center: Vec2,
        radius: f32,
        delta: Vec2,
        boxes: &[(EntityId, BoxBounds)],
        circles: &[(EntityId, Vec2, f32)],
    ) -> Option<(EntityId, SweepHit)> {
        let mut best: Option<(EntityId, SweepHit)> = None;

        for &(other, bounds) in boxes {
            if other == entity {
                continue;
            }
            if let Some(hit) = sweep_circle_box(center, radius, delta, &bounds) {
                if best.map_or(true, |(_, b)| hit.t < b.t) {
                    best = Some((other, hit));
                }
            }
        }
        for &(other, other_center, other_radius) in circles {
            if other == entity {
                continue;
            }
            if let Some(hit) = sweep_circle_circle(center, radius, delta, other_center, other_radius)
            {
                if best.map_or(true, |(_, b)| hit.t < b.t) {
                    best = Some((other, hit));
                }
            }
        }
        best
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PhysicsSystem {
    fn query(&self) -> Vec<TypeId> {
        vec![
            TypeId::of::<Transform>(),
            TypeId::of::<RigidBody>(),
            TypeId::of::<CircleCollider>(),
        ]
    }

    fn update(&mut self, world: &mut World, entities: &[EntityId], dt: f32) {
        let dt = dt.min(self.config.max_dt);
        if dt <= 0.0 {
            return;
        }

        // Bodies without a collider move by plain integration.
        let plain: Vec<EntityId> = world
            .query2::<Transform, RigidBody>()
            .into_iter()
            .filter(|&id| !world.has_component::<CircleCollider>(id))
            .collect();
        for id in plain {
            let Some(velocity) = world.get_component::<RigidBody>(id).map(|b| b.velocity) else {
                continue;
            };
            if let Some(transform) = world.get_component_mut::<Transform>(id) {
                transform.position += velocity * dt;
            }
        }

        // Snapshot every obstacle at its pre-step position. Dynamic bodies
        // see each other where the frame started.
        let boxes: Vec<(EntityId, BoxBounds)> = world
            .query2::<Transform, BoxCollider>()
            .into_iter()
            .filter_map(|id| {
                let collider = world.get_component::<BoxCollider>(id)?;
                Some((id, collider.world_bounds(world, id)))
            })
            .collect();
        let circles: Vec<(EntityId, Vec2, f32)> = world
            .query2::<Transform, CircleCollider>()
            .into_iter()
            .filter_map(|id| {
                let collider = world.get_component::<CircleCollider>(id)?;
                Some((id, collider.world_center(world, id), collider.radius))
            })
            .collect();

        for &entity in entities {
            let Some(body) = world.get_component::<RigidBody>(entity) else {
                continue;
            };
            let mut velocity = body.velocity;
            let bounce = body.bounce;
            if velocity.norm() < self.config.min_speed {
                continue;
            }
            let Some(collider) = world.get_component::<CircleCollider>(entity) else {
                continue;
            };
            let radius = collider.radius;
            let offset = collider.offset;
            // Sweep in world space, where the obstacle snapshots live; the
            // resulting displacement lands on the local transform below.
            let start = world.world_position(entity);
            let mut position = start;

            let mut events: Vec<CollisionEvent> = Vec::new();
            let mut remaining = dt;
            let mut bounces = 0;
            while remaining > 0.0 && bounces < self.config.max_bounces {
                let delta = velocity * remaining;
                if length_squared(delta) < 1e-8 {
                    position += delta;
                    break;
                }
                let center = position + offset;
                match Self::earliest_hit(entity, center, radius, delta, &boxes, &circles) {
                    None => {
                        position += delta;
                        remaining = 0.0;
                    }
                    Some((other, hit)) => {
                        position += delta * hit.t;
                        position += hit.normal * self.config.push_out;
                        let along_normal = velocity.dot(&hit.normal);
                        velocity -= hit.normal * ((1.0 + bounce) * along_normal);
                        remaining *= 1.0 - hit.t;
                        bounces += 1;
                        events.push(CollisionEvent {
                            entity_a: entity,
                            entity_b: other,
                            normal: hit.normal,
                        });
                    }
                }
            }
            if bounces == self.config.max_bounces && remaining > 0.0 {
                log::debug!(
                    "entity {} exhausted its bounce budget this frame",
                    entity.raw()
                );
            }

            if let Some(transform) = world.get_component_mut::<Transform>(entity) {
                transform.position += position - start;
            }
            if let Some(body) = world.get_component_mut::<RigidBody>(entity) {
                body.velocity = velocity;
            }
            for event in events {
                world
                    .events()
                    .emit(topics::COLLISION, &EventPayload::Collision(event));
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
