//! Built-in engine systems

pub mod physics_system;

pub use physics_system::PhysicsSystem;
