//! Collider data components
//!
//! Colliders describe shape only; they carry no behavior. An entity with a
//! collider and a [`crate::ecs::components::RigidBody`] is a dynamic body,
//! a collider without one is a static obstacle. Offsets are relative to the
//! entity's transform position.

use std::any::Any;

use crate::ecs::{Component, EntityId, World};
use crate::foundation::math::Vec2;
use crate::physics::sweep::BoxBounds;

/// Axis-aligned box collider, centered on the entity position plus offset
#[derive(Debug, Clone)]
pub struct BoxCollider {
    /// Full width in world units
    pub width: f32,
    /// Full height in world units
    pub height: f32,
    /// Center offset from the entity position
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a box collider with the default 32x32 extent
    pub fn new() -> Self {
        Self {
            width: 32.0,
            height: 32.0,
            offset: Vec2::zeros(),
        }
    }

    /// Set the full extents
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the center offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Edge coordinates when the owning entity sits at `origin`
    pub fn bounds(&self, origin: Vec2) -> BoxBounds {
        let center = origin + self.offset;
        BoxBounds {
            left: center.x - self.width / 2.0,
            right: center.x + self.width / 2.0,
            top: center.y - self.height / 2.0,
            bottom: center.y + self.height / 2.0,
        }
    }

    /// Edge coordinates at the entity's absolute position
    pub fn world_bounds(&self, world: &World, entity: EntityId) -> BoxBounds {
        self.bounds(world.world_position(entity))
    }
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for BoxCollider {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Circle collider, centered on the entity position plus offset
#[derive(Debug, Clone)]
pub struct CircleCollider {
    /// Radius in world units
    pub radius: f32,
    /// Center offset from the entity position
    pub offset: Vec2,
}

impl CircleCollider {
    /// Create a circle collider with the default radius of 16
    pub fn new() -> Self {
        Self {
            radius: 16.0,
            offset: Vec2::zeros(),
        }
    }

    /// Set the radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the center offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Circle center when the owning entity sits at `origin`
    pub fn center(&self, origin: Vec2) -> Vec2 {
        origin + self.offset
    }

    /// Circle center at the entity's absolute position
    pub fn world_center(&self, world: &World, entity: EntityId) -> Vec2 {
        self.center(world.world_position(entity))
    }
}

impl Default for CircleCollider {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CircleCollider {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_bounds_centered_on_origin_plus_offset() {
        let collider = BoxCollider::new().with_size(10.0, 4.0).with_offset(1.0, 2.0);
        let bounds = collider.bounds(Vec2::new(100.0, 50.0));
        assert_relative_eq!(bounds.left, 96.0);
        assert_relative_eq!(bounds.right, 106.0);
        assert_relative_eq!(bounds.top, 50.0);
        assert_relative_eq!(bounds.bottom, 54.0);
    }

    #[test]
    fn test_collider_defaults() {
        let box_collider = BoxCollider::default();
        assert_relative_eq!(box_collider.width, 32.0);
        assert_relative_eq!(box_collider.height, 32.0);

        let circle = CircleCollider::default();
        assert_relative_eq!(circle.radius, 16.0);
    }

    #[test]
    fn test_circle_center_applies_offset() {
        let collider = CircleCollider::new().with_offset(0.0, -3.0);
        assert_eq!(collider.center(Vec2::new(5.0, 5.0)), Vec2::new(5.0, 2.0));
    }
}
