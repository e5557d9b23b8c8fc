//! # Arcade Engine
//!
//! A small 2D arcade game engine built around a runtime-composition ECS and
//! continuous-collision physics. The [`ecs::World`] owns entities, their
//! components, and the registered systems, and drives them through a fixed
//! three-phase frame: component hooks, systems, deferred destruction.
//!
//! Fast-moving bodies are integrated by the
//! [`ecs::systems::PhysicsSystem`], which sweeps each circle collider along
//! its frame displacement and resolves bounces against box and circle
//! obstacles, so projectiles never tunnel through thin walls.
//!
//! ```
//! use arcade_engine::ecs::components::{BoxCollider, CircleCollider, RigidBody, Transform};
//! use arcade_engine::ecs::systems::PhysicsSystem;
//! use arcade_engine::ecs::{Viewport, World};
//!
//! let mut world = World::new();
//! world.init(Viewport::default());
//! world.add_system(PhysicsSystem::new());
//!
//! let wall = world.create_entity("wall");
//! world.get_component_mut::<Transform>(wall).unwrap().position.x = 60.0;
//! world.add_component(wall, BoxCollider::new().with_size(10.0, 200.0));
//!
//! let ball = world.create_entity("ball");
//! world.add_component(ball, RigidBody::new().with_velocity(120.0, 0.0));
//! world.add_component(ball, CircleCollider::new().with_radius(4.0));
//!
//! world.update(1.0 / 60.0);
//! ```

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod physics;

/// Commonly used engine types
pub mod prelude {
    pub use crate::config::{Config, EngineConfig, PhysicsConfig};
    pub use crate::ecs::components::{
        BoxCollider, CircleCollider, RigidBody, Shape, ShapeRenderer, SpriteRenderer, Transform,
    };
    pub use crate::ecs::systems::PhysicsSystem;
    pub use crate::ecs::{Component, Entity, EntityId, System, Viewport, World};
    pub use crate::events::{topics, CollisionEvent, EventBus, EventPayload};
    pub use crate::foundation::math::Vec2;
}
