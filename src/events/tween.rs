//! Tween completion events.
//!
//! [`tween_animation_system`](crate::systems::tween::tween_animation_system)
//! triggers a [`TweenFinishedEvent`] on the tick a tween reaches
//! [`TweenState::Finished`](crate::components::tween::TweenState::Finished).
//! Examples observe it to count completed tweens or chain the next one.

use bevy_ecs::prelude::*;

/// Event emitted once when a tween finishes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenFinishedEvent {
    /// The entity carrying the finished tween.
    pub entity: Entity,
}
