//! Showcase systems.
//!
//! This module groups all ECS systems that advance the simulation.
//!
//! Submodules overview
//! - [`collision`] – quadtree rebuild and overlap event emission
//! - [`frameanimation`] – advance frame animations by the world delta
//! - [`movement`] – integrate box positions and bounce off the arena
//! - [`sprite`] – walk, jump and gravity for the sprite character
//! - [`time`] – update simulation time and delta
//! - [`tween`] – easing curves, tween step functions and the tween system

pub mod collision;
pub mod frameanimation;
pub mod movement;
pub mod sprite;
pub mod time;
pub mod tween;
