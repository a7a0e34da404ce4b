//! Platformer sprite character.
//!
//! [`SpriteCharacter`] walks left and right along a floor, jumps and falls
//! under gravity. Its velocity lives in a
//! [`RigidBody`](crate::components::rigidbody::RigidBody) next to it;
//! [`sprite_controller_system`](crate::systems::sprite::sprite_controller_system)
//! moves it from the current [`SpriteInput`](crate::resources::spriteinput::SpriteInput).
//!
//! [`SpriteAnimations`] holds one frame animation per [`SpritePose`]. All six
//! advance every tick and the pose picks which one is shown. Frames are
//! column indices into the sprite sheet; left-facing poses play the flipped
//! sheet, so their indices run backwards.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::frameanimation::FrameAnimation;

/// Downward acceleration in units per second squared (20 per frame at 60 Hz).
pub const GRAVITY: f32 = 1200.0;
pub const WALK_SPEED: f32 = 200.0;
pub const JUMP_SPEED: f32 = 400.0;
pub const MAX_FALL_SPEED: f32 = 400.0;
pub const SPRITE_SIZE: f32 = 64.0;
pub const SPRITE_START: Vec2 = Vec2::new(150.0, 840.0);

/// Screen width of the animations example.
pub const SCREEN_WIDTH: f32 = 875.0;
/// Top edge of the floor rectangle.
pub const FLOOR_Y: f32 = 904.0;
pub const MIN_X: f32 = 130.0;
/// Gap kept between the sprite and the right screen edge.
pub const RIGHT_MARGIN: f32 = 10.0;

const IDLE_FRAMES: usize = 4;
const WALKING_FRAMES: usize = 6;
const JUMPING_FRAMES: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpriteMotion {
    #[default]
    Idle,
    Walking,
    Jumping,
}

/// Which of the six animations is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpritePose {
    pub motion: SpriteMotion,
    pub facing: Facing,
}

impl SpritePose {
    pub const ALL: [SpritePose; 6] = [
        SpritePose::new(SpriteMotion::Idle, Facing::Right),
        SpritePose::new(SpriteMotion::Idle, Facing::Left),
        SpritePose::new(SpriteMotion::Walking, Facing::Right),
        SpritePose::new(SpriteMotion::Walking, Facing::Left),
        SpritePose::new(SpriteMotion::Jumping, Facing::Right),
        SpritePose::new(SpriteMotion::Jumping, Facing::Left),
    ];

    pub const fn new(motion: SpriteMotion, facing: Facing) -> Self {
        Self { motion, facing }
    }

    fn index(self) -> usize {
        let motion = match self.motion {
            SpriteMotion::Idle => 0,
            SpriteMotion::Walking => 2,
            SpriteMotion::Jumping => 4,
        };
        match self.facing {
            Facing::Right => motion,
            Facing::Left => motion + 1,
        }
    }

    pub fn name(self) -> &'static str {
        match (self.motion, self.facing) {
            (SpriteMotion::Idle, Facing::Right) => "idle_right",
            (SpriteMotion::Idle, Facing::Left) => "idle_left",
            (SpriteMotion::Walking, Facing::Right) => "walking_right",
            (SpriteMotion::Walking, Facing::Left) => "walking_left",
            (SpriteMotion::Jumping, Facing::Right) => "jumping_right",
            (SpriteMotion::Jumping, Facing::Left) => "jumping_left",
        }
    }
}

/// Horizontal limits and floor height the sprite is kept within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub floor_y: f32,
}

impl Default for SpriteBounds {
    fn default() -> Self {
        Self {
            min_x: MIN_X,
            max_x: SCREEN_WIDTH - RIGHT_MARGIN,
            floor_y: FLOOR_Y,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpriteCharacter {
    /// Top-left corner.
    pub position: Vec2,
    pub size: Vec2,
    pub walk_speed: f32,
    pub jump_speed: f32,
    pub max_fall_speed: f32,
    pub gravity: f32,
    pub bounds: SpriteBounds,
    pub facing: Facing,
    pub idle: bool,
    pub jumping: bool,
}

impl Default for SpriteCharacter {
    fn default() -> Self {
        Self {
            position: SPRITE_START,
            size: Vec2::splat(SPRITE_SIZE),
            walk_speed: WALK_SPEED,
            jump_speed: JUMP_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            gravity: GRAVITY,
            bounds: SpriteBounds::default(),
            facing: Facing::Right,
            idle: true,
            jumping: false,
        }
    }
}

impl SpriteCharacter {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Jumping wins over walking, walking over idle.
    pub fn pose(&self) -> SpritePose {
        let motion = if self.jumping {
            SpriteMotion::Jumping
        } else if self.idle {
            SpriteMotion::Idle
        } else {
            SpriteMotion::Walking
        };
        SpritePose::new(motion, self.facing)
    }

    /// Whether the sprite rests on the floor.
    pub fn on_floor(&self) -> bool {
        self.position.y + self.size.y >= self.bounds.floor_y
    }
}

/// The six pose animations of one sprite.
#[derive(Component, Debug, Clone)]
pub struct SpriteAnimations {
    animations: [FrameAnimation<usize>; 6],
}

impl Default for SpriteAnimations {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteAnimations {
    pub fn new() -> Self {
        Self {
            animations: SpritePose::ALL.map(|pose| {
                let (time, frames) = match pose.motion {
                    SpriteMotion::Idle => (0.1, IDLE_FRAMES),
                    SpriteMotion::Walking => (0.05, WALKING_FRAMES),
                    SpriteMotion::Jumping => (0.1, JUMPING_FRAMES),
                };
                let columns: Vec<usize> = match pose.facing {
                    Facing::Right => (0..frames).collect(),
                    Facing::Left => (0..frames).rev().collect(),
                };
                FrameAnimation::new(time, columns)
            }),
        }
    }

    /// Advance every pose animation.
    pub fn update(&mut self, delta: f32) {
        for animation in &mut self.animations {
            animation.update(delta);
        }
    }

    pub fn get(&self, pose: SpritePose) -> &FrameAnimation<usize> {
        &self.animations[pose.index()]
    }

    pub fn get_mut(&mut self, pose: SpritePose) -> &mut FrameAnimation<usize> {
        &mut self.animations[pose.index()]
    }
}
