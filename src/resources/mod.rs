//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `arena` – bounds the moving boxes bounce inside
//! - `overlaps` – overlapping box pairs found this tick
//! - `quadtree` – AABB quadtree rebuilt every tick and its overlap scan
//! - `showcaseconfig` – INI-backed settings for the launcher and examples
//! - `spriteinput` – sprite key state and the headless input script
//! - `worldtime` – simulation time and delta
pub mod arena;
pub mod overlaps;
pub mod quadtree;
pub mod showcaseconfig;
pub mod spriteinput;
pub mod worldtime;
