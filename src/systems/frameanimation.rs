//! Frame animation system.
//!
//! [`frame_animation_system`] advances every [`FrameAnimation<F>`] by the
//! scaled world delta. Register one instance per frame type.

use bevy_ecs::prelude::*;

use crate::components::frameanimation::FrameAnimation;
use crate::resources::worldtime::WorldTime;

pub fn frame_animation_system<F: Send + Sync + 'static>(
    time: Res<WorldTime>,
    mut query: Query<&mut FrameAnimation<F>>,
) {
    for mut anim in query.iter_mut() {
        anim.update(time.delta);
    }
}
