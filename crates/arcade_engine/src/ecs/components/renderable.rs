//! Renderable data components
//!
//! Visual description only; an external renderer walks entities carrying
//! one of these and draws them. An entity may carry either a
//! [`ShapeRenderer`] or a [`SpriteRenderer`], never both.

use std::any::{Any, TypeId};

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// RGBA color with components in `[0, 1]`
pub type Color = [f32; 4];

/// Primitive shape drawn by a [`ShapeRenderer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle with full extents
    Rect {
        /// Full width in world units
        width: f32,
        /// Full height in world units
        height: f32,
    },
    /// Circle
    Circle {
        /// Radius in world units
        radius: f32,
    },
}

/// Draws a solid primitive shape at the entity position
#[derive(Debug, Clone)]
pub struct ShapeRenderer {
    /// The shape to draw
    pub shape: Shape,
    /// Fill color
    pub color: Color,
    /// Whether the shape is drawn this frame
    pub visible: bool,
}

impl ShapeRenderer {
    /// Create a renderer for the given shape, opaque white
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            color: [1.0, 1.0, 1.0, 1.0],
            visible: true,
        }
    }

    /// Set the fill color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Component for ShapeRenderer {
    fn exclusive_with(&self) -> Vec<TypeId> {
        vec![TypeId::of::<SpriteRenderer>()]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Draws a named texture at the entity position, optionally animated as a
/// horizontal sprite-sheet strip
#[derive(Debug, Clone)]
pub struct SpriteRenderer {
    /// Key of the texture in the host's asset store
    pub texture: String,
    /// Drawn size in world units
    pub size: Vec2,
    /// Tint color multiplied into the texture
    pub tint: Color,
    /// Current sheet frame, `0..frame_count`
    pub frame: u32,
    /// Number of frames in the sheet; 1 means a static sprite
    pub frame_count: u32,
    /// Frames per second when animated; the render collaborator advances
    /// `frame` at this rate
    pub frame_rate: f32,
    /// Mirror horizontally
    pub flip_x: bool,
    /// Mirror vertically
    pub flip_y: bool,
    /// Whether the sprite is drawn this frame
    pub visible: bool,
}

impl SpriteRenderer {
    /// Create a renderer for the named texture at 32x32, unanimated
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            size: Vec2::new(32.0, 32.0),
            tint: [1.0, 1.0, 1.0, 1.0],
            frame: 0,
            frame_count: 1,
            frame_rate: 0.0,
            flip_x: false,
            flip_y: false,
            visible: true,
        }
    }

    /// Set the drawn size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    /// Set the tint color
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Animate over a sheet of `frame_count` frames at `frame_rate` fps
    pub fn with_animation(mut self, frame_count: u32, frame_rate: f32) -> Self {
        self.frame_count = frame_count.max(1);
        self.frame_rate = frame_rate;
        self
    }
}

impl Component for SpriteRenderer {
    fn exclusive_with(&self) -> Vec<TypeId> {
        vec![TypeId::of::<ShapeRenderer>()]
    }

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
    use crate::ecs::World;

    #[test]
    fn test_renderers_are_mutually_exclusive() {
        let mut world = World::new();
        let id = world.create_entity("sprite-first");
        world.add_component(id, SpriteRenderer::new("ship"));
        world.add_component(
            id,
            ShapeRenderer::new(Shape::Circle { radius: 4.0 }),
        );
        assert!(world.has_component::<SpriteRenderer>(id));
        assert!(!world.has_component::<ShapeRenderer>(id));

        let other = world.create_entity("shape-first");
        world.add_component(
            other,
            ShapeRenderer::new(Shape::Rect {
                width: 8.0,
                height: 8.0,
            }),
        );
        world.add_component(other, SpriteRenderer::new("ship"));
        assert!(world.has_component::<ShapeRenderer>(other));
        assert!(!world.has_component::<SpriteRenderer>(other));
    }
}
