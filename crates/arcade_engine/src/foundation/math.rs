//! Math utilities and types
//!
//! Provides the fundamental 2D math types used across the engine.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Squared length of a 2D vector without the square root
#[inline]
pub fn length_squared(v: Vec2) -> f32 {
    v.x * v.x + v.y * v.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_squared_matches_norm() {
        let v = Vec2::new(3.0, 4.0);
        assert_relative_eq!(length_squared(v), 25.0, epsilon = 1e-6);
        assert_relative_eq!(length_squared(v).sqrt(), v.norm(), epsilon = 1e-6);
    }
}
