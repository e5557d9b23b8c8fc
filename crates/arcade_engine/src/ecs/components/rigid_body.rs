//! Rigid body component
//!
//! Marks an entity as a dynamic body for the physics system: it moves by
//! its velocity each frame and bounces off colliders it sweeps into.

use std::any::Any;

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// Linear velocity and restitution for a dynamic body
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Velocity in world units per second
    pub velocity: Vec2,
    /// Restitution factor applied on impact. 1.0 is a perfectly elastic
    /// bounce; 0.0 kills the normal component of velocity entirely.
    pub bounce: f32,
}

impl RigidBody {
    /// Create a body at rest with elastic restitution
    pub fn new() -> Self {
        Self {
            velocity: Vec2::zeros(),
            bounce: 1.0,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    /// Set the restitution factor
    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    /// Current speed in world units per second
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Point the velocity along `angle` (radians, y-down screen convention)
    /// at the given speed
    pub fn set_velocity_from_angle(&mut self, angle: f32, speed: f32) {
        self.velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RigidBody {
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
    fn test_defaults() {
        let body = RigidBody::default();
        assert_eq!(body.velocity, Vec2::zeros());
        assert_relative_eq!(body.bounce, 1.0);
    }

    #[test]
    fn test_speed() {
        let body = RigidBody::new().with_velocity(3.0, 4.0);
        assert_relative_eq!(body.speed(), 5.0);
    }

    #[test]
    fn test_velocity_from_angle() {
        let mut body = RigidBody::new();
        body.set_velocity_from_angle(std::f32::consts::FRAC_PI_2, 10.0);
        assert_relative_eq!(body.velocity.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(body.velocity.y, 10.0, epsilon = 1e-5);
    }
}
