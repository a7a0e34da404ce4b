//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the showcase world. Components define data such as shapes, tweens, boxes
//! and turtles.
//!
//! Submodules overview:
//! - [`aabb`] – axis-aligned bounding box with a static/dynamic tag
//! - [`frameanimation`] – fixed-rate frame cycling over arbitrary frames
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`shapes`] – tweenable shapes and the [`shapes::Tweenable`] bridge
//! - [`sprite`] – platformer character and its six pose animations
//! - [`turtle`] – turtle graphics state, save stack and drawn segments
//! - [`tween`] – tween state machine, properties and easing curves

pub mod aabb;
pub mod frameanimation;
pub mod rigidbody;
pub mod shapes;
pub mod sprite;
pub mod turtle;
pub mod tween;
