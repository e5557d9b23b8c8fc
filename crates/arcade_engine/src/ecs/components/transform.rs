//! Spatial transform component
//!
//! Every entity carries exactly one `Transform`; the world attaches it at
//! creation and refuses to remove it. Positions are local: a parented
//! entity's absolute position is the sum of local positions up the chain
//! (see [`crate::ecs::World::world_position`]).

use std::any::Any;

use crate::ecs::{Component, EntityId};
use crate::foundation::math::Vec2;

/// Position, rotation, and scale, plus the entity's place in the scene
/// hierarchy
#[derive(Debug, Clone)]
pub struct Transform {
    /// Local position in world units
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Per-axis scale factor
    pub scale: Vec2,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

impl Transform {
    /// Create a transform at the origin with identity rotation and scale
    pub fn new() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the local position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the rotation in radians
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Set a uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// The entity this transform is parented to, if any
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Direct children, in the order they were parented
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<EntityId>) {
        self.parent = parent;
    }

    pub(crate) fn add_child(&mut self, child: EntityId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: EntityId) {
        self.children.retain(|&id| id != child);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Transform {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
