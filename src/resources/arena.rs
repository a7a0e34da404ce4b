//! Arena bounds resource.
//!
//! [`Arena`] is the rectangle moving boxes bounce inside, anchored at the
//! origin. The collision example sizes its quadtree to the same region.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
