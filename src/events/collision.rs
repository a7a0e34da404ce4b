//! Overlap event types and a logging observer.
//!
//! The [`overlap_detector`](crate::systems::collision::overlap_detector)
//! system emits [`OverlapEvent`] for every pair of overlapping boxes found by
//! the quadtree scan. Observers can subscribe to this event to react in a
//! decoupled manner.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::aabb::Aabb;

/// Event fired when two entities with an [`Aabb`] overlap.
///
/// `a` and `b` are the entity IDs of the participants; no ordering is
/// guaranteed. `area` is the intersection rectangle.
#[derive(Event, Debug, Clone, Copy)]
pub struct OverlapEvent {
    pub a: Entity,
    pub b: Entity,
    pub area: Aabb,
}

/// Global observer that logs each overlap at debug level.
pub fn observe_overlap_log(trigger: On<OverlapEvent>) {
    let event = trigger.event();
    debug!(
        "Overlap between {:?} and {:?}: {:.1}x{:.1}",
        event.a,
        event.b,
        event.area.width(),
        event.area.height()
    );
}
