//! Box movement with boundary reflection.
//!
//! [`bounce_movement`] integrates [`RigidBody`] velocities into [`Aabb`]
//! positions and keeps every dynamic box inside the [`Arena`]: a box that
//! reaches an edge is clamped back onto it and the matching velocity
//! component is reflected. There is no restitution coefficient.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::aabb::Aabb;
use crate::components::rigidbody::RigidBody;
use crate::resources::arena::Arena;
use crate::resources::worldtime::WorldTime;

/// Clamp `aabb` into `[0, width] x [0, height]`, reflecting `velocity` on
/// each axis where an edge was reached.
///
/// Returns true if the box touched an edge.
pub fn reflect(aabb: &mut Aabb, velocity: &mut Vec2, width: f32, height: f32) -> bool {
    let mut bounced = false;

    if aabb.x1 <= 0.0 {
        aabb.move_to(0.0, aabb.y1);
        velocity.x = velocity.x.abs();
        bounced = true;
    } else if aabb.x2 >= width {
        aabb.move_to(width - aabb.width(), aabb.y1);
        velocity.x = -velocity.x.abs();
        bounced = true;
    }

    if aabb.y1 <= 0.0 {
        aabb.move_to(aabb.x1, 0.0);
        velocity.y = velocity.y.abs();
        bounced = true;
    } else if aabb.y2 >= height {
        aabb.move_to(aabb.x1, height - aabb.height());
        velocity.y = -velocity.y.abs();
        bounced = true;
    }

    bounced
}

/// Move dynamic boxes by `velocity * delta` and bounce them off the arena.
///
/// Static and frozen boxes are skipped.
pub fn bounce_movement(
    time: Res<WorldTime>,
    arena: Res<Arena>,
    mut query: Query<(&mut Aabb, &mut RigidBody)>,
) {
    let dt = time.delta;
    for (mut aabb, mut body) in query.iter_mut() {
        if body.frozen || aabb.is_static() {
            continue;
        }
        let velocity = body.velocity;
        aabb.move_by(velocity * dt);
        reflect(&mut aabb, &mut body.velocity, arena.width, arena.height);
    }
}
