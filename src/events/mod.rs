//! Event types and observers used by the showcase.
//!
//! Events provide a decoupled way for systems to report what happened in a
//! tick without direct dependencies on whoever reacts to it.
//!
//! Submodules:
//! - [`collision`] – overlap notifications emitted by the quadtree scan
//! - [`tween`] – tween completion notifications
pub mod collision;
pub mod tween;
