//! Kinematic body component.
//!
//! [`RigidBody`] stores the velocity integrated by
//! [`bounce_movement`](crate::systems::movement::bounce_movement). The
//! `frozen` flag skips integration for a body whose position is controlled
//! elsewhere.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Velocity in world units per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    /// When true, movement systems leave the entity alone.
    pub frozen: bool,
}

impl RigidBody {
    pub fn new(velocity: Vec2) -> Self {
        Self {
            velocity,
            frozen: false,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
