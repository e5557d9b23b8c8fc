//! Continuous-collision physics
//!
//! Geometry lives in [`sweep`]; frame integration and bounce resolution
//! live in [`crate::ecs::systems::PhysicsSystem`].

pub mod sweep;

pub use sweep::{BoxBounds, SweepHit};
