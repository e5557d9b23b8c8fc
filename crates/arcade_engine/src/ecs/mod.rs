//! Entity Component System
//!
//! A small runtime-composition ECS: entities are opaque handles, components
//! are type-keyed capability bundles with lifecycle hooks, and systems are
//! cross-entity processors driven once per frame by the [`World`].

pub mod component;
pub mod components;
pub mod entity;
pub mod system;
pub mod systems;
pub mod world;

pub use component::Component;
pub use entity::{Entity, EntityId};
pub use system::System;
pub use world::{Viewport, World};
