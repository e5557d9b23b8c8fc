//! Built-in engine components

pub mod collision;
pub mod renderable;
pub mod rigid_body;
pub mod transform;

pub use collision::{BoxCollider, CircleCollider};
pub use renderable::{Color, Shape, ShapeRenderer, SpriteRenderer};
pub use rigid_body::RigidBody;
pub use transform::Transform;
