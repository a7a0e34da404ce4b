//! Sprite character controller.
//!
//! Each tick [`sprite_controller_system`] advances the pose animations, sets
//! the horizontal velocity from [`SpriteInput`], starts a jump when pressed,
//! integrates the position, clamps it to the sprite's bounds and applies
//! gravity up to the fall speed cap.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::rigidbody::RigidBody;
use crate::components::sprite::{Facing, SpriteAnimations, SpriteCharacter};
use crate::resources::spriteinput::SpriteInput;
use crate::resources::worldtime::WorldTime;

pub fn sprite_controller_system(
    time: Res<WorldTime>,
    mut input: ResMut<SpriteInput>,
    mut query: Query<(&mut SpriteCharacter, &mut RigidBody, &mut SpriteAnimations)>,
) {
    for (mut sprite, mut body, mut animations) in query.iter_mut() {
        animations.update(time.delta);
        if body.frozen {
            continue;
        }
        move_sprite(&mut sprite, &mut body.velocity, &input, time.delta);
    }
    // jump is a press, not a hold
    input.jump = false;
}

/// One controller step for `sprite` moving at `velocity`.
pub fn move_sprite(
    sprite: &mut SpriteCharacter,
    velocity: &mut Vec2,
    input: &SpriteInput,
    delta: f32,
) {
    if input.left {
        velocity.x = -sprite.walk_speed;
        sprite.facing = Facing::Left;
        sprite.idle = false;
    } else if input.right {
        velocity.x = sprite.walk_speed;
        sprite.facing = Facing::Right;
        sprite.idle = false;
    } else {
        velocity.x = 0.0;
        sprite.idle = true;
    }

    if input.jump {
        velocity.y = -sprite.jump_speed;
        sprite.jumping = true;
    }

    sprite.position += *velocity * delta;

    let bounds = sprite.bounds;
    if sprite.position.x <= bounds.min_x {
        sprite.position.x = bounds.min_x;
    } else if sprite.position.x + sprite.size.x >= bounds.max_x {
        sprite.position.x = bounds.max_x - sprite.size.x;
    }

    if sprite.position.y + sprite.size.y > bounds.floor_y {
        sprite.position.y = bounds.floor_y - sprite.size.y;
        sprite.jumping = false;
    }

    velocity.y = (velocity.y + sprite.gravity * delta).min(sprite.max_fall_speed);
}
