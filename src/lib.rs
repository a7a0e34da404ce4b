//! JSGE showcase library.
//!
//! This module exposes the showcase's ECS components, resources, systems and
//! events, the Penrose L-system and the example launcher for use in
//! integration tests and by the `jsge-showcase` binary.

pub mod components;
pub mod events;
pub mod lsystem;
pub mod resources;
pub mod showcase;
pub mod systems;
