//! Tween animation systems.
//!
//! [`step`] is the state machine behind
//! [`TweenAnimation::update`](crate::components::tween::TweenAnimation::update):
//! the first call snapshots every `Start` parameter into the component and
//! moves to `Running`; each following call advances according to the
//! tween's [`TweenUpdate`] until the target is reached and the state becomes
//! `Finished`.
//!
//! [`tween_animation_system`] runs that step for every
//! [`TweenAnimation<C>`] in the world, reading delta time from
//! [`WorldTime`](crate::resources::worldtime::WorldTime), and triggers a
//! [`TweenFinishedEvent`] on the tick a tween completes.

use std::f32::consts::PI;

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::shapes::Tweenable;
use crate::components::tween::{
    Easing, TimingTrack, TweenAnimation, TweenParam, TweenProperties, TweenProperty, TweenState,
    TweenStateContainer, TweenUpdate,
};
use crate::events::tween::TweenFinishedEvent;
use crate::resources::worldtime::WorldTime;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve. Back and elastic curves leave `[0, 1]` between the ends.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
        Easing::SineOut => (t * PI / 2.0).sin(),
        Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
        Easing::QuartIn => t.powi(4),
        Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
        Easing::QuartInOut => {
            if t < 0.5 {
                8.0 * t.powi(4)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
            }
        }
        Easing::QuintIn => t.powi(5),
        Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
        Easing::QuintInOut => {
            if t < 0.5 {
                16.0 * t.powi(5)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
            }
        }
        Easing::ExpoIn => {
            if t == 0.0 {
                0.0
            } else {
                2f32.powf(10.0 * t - 10.0)
            }
        }
        Easing::ExpoOut => {
            if t == 1.0 {
                1.0
            } else {
                1.0 - 2f32.powf(-10.0 * t)
            }
        }
        Easing::ExpoInOut => {
            if t == 0.0 || t == 1.0 {
                t
            } else if t < 0.5 {
                2f32.powf(20.0 * t - 10.0) / 2.0
            } else {
                (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
            }
        }
        Easing::CircIn => 1.0 - (1.0 - t * t).sqrt(),
        Easing::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
        Easing::CircInOut => {
            if t < 0.5 {
                (1.0 - (1.0 - (2.0 * t) * (2.0 * t)).sqrt()) / 2.0
            } else {
                ((1.0 - (-2.0 * t + 2.0) * (-2.0 * t + 2.0)).sqrt() + 1.0) / 2.0
            }
        }
        Easing::BackIn => {
            const C1: f32 = 1.70158;
            const C3: f32 = C1 + 1.0;
            C3 * t * t * t - C1 * t * t
        }
        Easing::BackOut => {
            const C1: f32 = 1.70158;
            const C3: f32 = C1 + 1.0;
            let p = t - 1.0;
            1.0 + C3 * p * p * p + C1 * p * p
        }
        Easing::BackInOut => {
            const C2: f32 = 1.70158 * 1.525;
            if t < 0.5 {
                ((2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2)) / 2.0
            } else {
                ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
            }
        }
        Easing::ElasticIn => {
            const C4: f32 = (2.0 * PI) / 3.0;
            if t == 0.0 || t == 1.0 {
                t
            } else {
                -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
            }
        }
        Easing::ElasticOut => {
            const C4: f32 = (2.0 * PI) / 3.0;
            if t == 0.0 || t == 1.0 {
                t
            } else {
                2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
            }
        }
        Easing::ElasticInOut => {
            const C5: f32 = (2.0 * PI) / 4.5;
            if t == 0.0 || t == 1.0 {
                t
            } else if t < 0.5 {
                -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
            } else {
                (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0 + 1.0
            }
        }
        Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
        Easing::BounceOut => bounce_out(t),
        Easing::BounceInOut => {
            if t < 0.5 {
                (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
            } else {
                (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Linearly interpolate between two floats.
pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of the way from `start` to `end` covered by `value`.
fn progress(start: f32, end: f32, value: f32) -> f32 {
    (value - start) / (end - start)
}

/// Write every `Start` parameter into the component.
pub(crate) fn snapshot<C: Tweenable>(properties: &TweenProperties, component: &mut C) {
    for property in TweenProperty::ALL {
        if let Some(value) = properties.get(TweenParam::Start(property)) {
            component.set(property, value);
        }
    }
}

/// Advance one tween by `delta` seconds.
pub(crate) fn step<C: Tweenable>(
    properties: &TweenProperties,
    update: &TweenUpdate,
    component: &mut C,
    sc: &mut TweenStateContainer,
    delta: f32,
) {
    if sc.state == TweenState::Initialized {
        snapshot(properties, component);
        sc.state = TweenState::Running;
    }

    if sc.state != TweenState::Running {
        return;
    }

    match update {
        TweenUpdate::Velocity { tracks } => velocity_step(properties, tracks, component, sc, delta),
        TweenUpdate::Easing {
            tracks,
            easing,
            rate,
        } => easing_step(properties, tracks, *easing, *rate, component, sc, delta),
        TweenUpdate::Timing { tracks, total } => {
            timing_step(properties, tracks, *total, component, sc, delta)
        }
    }
}

fn velocity_step<C: Tweenable>(
    properties: &TweenProperties,
    tracks: &[TweenProperty],
    component: &mut C,
    sc: &mut TweenStateContainer,
    delta: f32,
) {
    let mut stop = false;
    let mut sum = 0.0;

    for &property in tracks {
        let start = properties.value(TweenParam::Start(property));
        let end = properties.value(TweenParam::End(property));
        let velocity = properties.value(TweenParam::Velocity(property));

        let current = component.get(property).unwrap_or(start);
        let mut next = current + velocity * delta;
        let reached = if end >= start { next >= end } else { next <= end };
        if reached {
            next = end;
            stop = true;
        }
        component.set(property, next);

        // read back: integer-backed fields truncate
        let stored = component.get(property).unwrap_or(next);
        sum += progress(start, end, stored);
    }

    sc.percentage = (sum / tracks.len() as f32).clamp(0.0, 1.0);
    if stop {
        sc.state = TweenState::Finished;
    }
}

fn easing_step<C: Tweenable>(
    properties: &TweenProperties,
    tracks: &[TweenProperty],
    easing: Easing,
    rate: f32,
    component: &mut C,
    sc: &mut TweenStateContainer,
    delta: f32,
) {
    sc.percentage += rate * delta;

    if sc.percentage >= 1.0 {
        for &property in tracks {
            component.set(property, properties.value(TweenParam::End(property)));
        }
        sc.percentage = 1.0;
        sc.state = TweenState::Finished;
        return;
    }

    let t = ease(easing, sc.percentage);
    for &property in tracks {
        let start = properties.value(TweenParam::Start(property));
        let end = properties.value(TweenParam::End(property));
        component.set(property, lerp_f32(start, end, t));
    }
}

fn timing_step<C: Tweenable>(
    properties: &TweenProperties,
    tracks: &[TimingTrack],
    total: f32,
    component: &mut C,
    sc: &mut TweenStateContainer,
    delta: f32,
) {
    sc.execution_time += delta;

    for track in tracks {
        match *track {
            TimingTrack::Linear(property) => {
                let start = properties.value(TweenParam::Start(property));
                let velocity = properties.value(TweenParam::Velocity(property));
                let current = component.get(property).unwrap_or(start);
                component.set(property, current + velocity * delta);
            }
            TimingTrack::Sine {
                property,
                amplitude,
                phase,
            } => {
                let start = properties.value(TweenParam::Start(property));
                let degrees = component
                    .get(phase)
                    .unwrap_or_else(|| properties.value(TweenParam::Start(phase)));
                component.set(property, start + amplitude * degrees.to_radians().sin());
            }
        }
    }

    if sc.execution_time >= total {
        sc.execution_time = total;
        sc.state = TweenState::Finished;
    }
    sc.percentage = (sc.execution_time / total).clamp(0.0, 1.0);
}

/// Advance every [`TweenAnimation<C>`] by the frame delta.
///
/// Triggers [`TweenFinishedEvent`] for each tween that finished this tick.
pub fn tween_animation_system<C: Tweenable>(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut TweenAnimation<C>)>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut tween) in query.iter_mut() {
        if tween.is_finished() {
            continue;
        }
        tween.update(dt);
        if tween.is_finished() {
            debug!("Tween on {:?} finished", entity);
            commands.trigger(TweenFinishedEvent { entity });
        }
    }
}
