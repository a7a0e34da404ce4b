//! Tween components for animated interpolation.
//!
//! A [`TweenAnimation`] owns a shape implementing
//! [`Tweenable`](super::shapes::Tweenable), a set of immutable
//! [`TweenProperties`] and a [`TweenStateContainer`] that moves through
//! `Initialized -> Running -> Finished`. How the shape advances is chosen
//! by [`TweenUpdate`]:
//! - [`TweenUpdate::Velocity`] – fixed rate, stops when a target is reached
//! - [`TweenUpdate::Easing`] – percentage driven, shaped by an [`Easing`] curve
//! - [`TweenUpdate::Timing`] – independent velocities until a total time elapses
//!
//! See [`crate::systems::tween`] for the step functions and the update system.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::components::shapes::Tweenable;
use crate::systems::tween::step;

/// Animatable field of a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenProperty {
    X,
    Y,
    Radius,
    Alpha,
    Angle,
}

impl TweenProperty {
    /// Every property, in snapshot order.
    pub const ALL: [TweenProperty; 5] = [
        TweenProperty::X,
        TweenProperty::Y,
        TweenProperty::Radius,
        TweenProperty::Alpha,
        TweenProperty::Angle,
    ];
}

/// Key into [`TweenProperties`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenParam {
    /// Value written into the component when the tween starts.
    Start(TweenProperty),
    /// Target value.
    End(TweenProperty),
    /// Units per second.
    Velocity(TweenProperty),
}

/// Named numeric parameters read by the update step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TweenProperties {
    values: FxHashMap<TweenParam, f32>,
}

impl TweenProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(param, value)` pairs; later pairs win.
    pub fn of(pairs: impl IntoIterator<Item = (TweenParam, f32)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    pub fn with_start(mut self, property: TweenProperty, value: f32) -> Self {
        self.values.insert(TweenParam::Start(property), value);
        self
    }

    pub fn with_end(mut self, property: TweenProperty, value: f32) -> Self {
        self.values.insert(TweenParam::End(property), value);
        self
    }

    pub fn with_velocity(mut self, property: TweenProperty, value: f32) -> Self {
        self.values.insert(TweenParam::Velocity(property), value);
        self
    }

    pub fn get(&self, param: TweenParam) -> Option<f32> {
        self.values.get(&param).copied()
    }

    pub fn contains(&self, param: TweenParam) -> bool {
        self.values.contains_key(&param)
    }

    /// Value of a parameter checked at construction; zero if absent.
    pub(crate) fn value(&self, param: TweenParam) -> f32 {
        self.get(param).unwrap_or_default()
    }

    pub(crate) fn require(&self, param: TweenParam) -> Result<f32, TweenError> {
        self.get(param).ok_or(TweenError::MissingParam(param))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Execution state of a tween.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenState {
    /// Not yet started; the next update snapshots start values.
    #[default]
    Initialized,
    Running,
    Finished,
}

/// Mutable progress of one tween.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TweenStateContainer {
    pub state: TweenState,
    /// Progress in `[0, 1]`.
    pub percentage: f32,
    /// Seconds spent running (timing tweens only).
    pub execution_time: f32,
}

impl TweenStateContainer {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed (no easing).
    #[default]
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    /// Pulls back slightly before moving forward.
    BackIn,
    BackOut,
    BackInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easing {
    /// Curves cycled through by the animations example.
    pub const CURVES: [Easing; 30] = [
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
    ];

    /// Parse a `snake_case` curve name such as `"quad_in_out"`.
    pub fn from_name(name: &str) -> Option<Easing> {
        serde_json::from_value(serde_json::Value::String(name.to_owned())).ok()
    }

    pub fn name(self) -> String {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(s)) => s,
            _ => format!("{:?}", self),
        }
    }
}

/// One property driven by a timing tween.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimingTrack {
    /// `value += velocity * delta`.
    Linear(TweenProperty),
    /// `value = start + amplitude * sin(phase)`, with `phase` read in degrees
    /// from another property of the same component.
    Sine {
        property: TweenProperty,
        amplitude: f32,
        phase: TweenProperty,
    },
}

impl TimingTrack {
    pub fn property(&self) -> TweenProperty {
        match *self {
            TimingTrack::Linear(property) => property,
            TimingTrack::Sine { property, .. } => property,
        }
    }
}

/// How a tween advances each tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TweenUpdate {
    Velocity {
        tracks: SmallVec<[TweenProperty; 2]>,
    },
    Easing {
        tracks: SmallVec<[TweenProperty; 2]>,
        easing: Easing,
        /// Percentage gained per second (`1 / duration`).
        rate: f32,
    },
    Timing {
        tracks: SmallVec<[TimingTrack; 4]>,
        /// Seconds until the tween finishes.
        total: f32,
    },
}

/// Tween construction errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TweenError {
    #[error("missing tween parameter {0:?}")]
    MissingParam(TweenParam),
    #[error("tween has no tracks")]
    NoTracks,
    #[error("tween duration must be positive, got {0}")]
    InvalidDuration(f32),
    #[error("start and end of {0:?} are equal")]
    EmptySpan(TweenProperty),
    #[error("component has no {0:?} property")]
    UnsupportedProperty(TweenProperty),
}

/// Animates a component toward the targets in its [`TweenProperties`].
#[derive(Component, Clone, Debug)]
pub struct TweenAnimation<C: Tweenable> {
    properties: TweenProperties,
    update: TweenUpdate,
    state: TweenStateContainer,
    component: C,
}

impl<C: Tweenable> TweenAnimation<C> {
    /// Fixed-rate tween over `tracks`; each needs `Start`, `End` and `Velocity`.
    pub fn velocity(
        properties: TweenProperties,
        component: C,
        tracks: &[TweenProperty],
    ) -> Result<Self, TweenError> {
        if tracks.is_empty() {
            return Err(TweenError::NoTracks);
        }
        for &property in tracks {
            check_supported(&component, property)?;
            check_span(&properties, property)?;
            properties.require(TweenParam::Velocity(property))?;
        }
        Ok(Self::with_update(
            properties,
            component,
            TweenUpdate::Velocity {
                tracks: tracks.iter().copied().collect(),
            },
        ))
    }

    /// Eased tween covering `tracks` in `duration` seconds.
    pub fn easing(
        properties: TweenProperties,
        component: C,
        tracks: &[TweenProperty],
        easing: Easing,
        duration: f32,
    ) -> Result<Self, TweenError> {
        if tracks.is_empty() {
            return Err(TweenError::NoTracks);
        }
        if !(duration > 0.0) {
            return Err(TweenError::InvalidDuration(duration));
        }
        for &property in tracks {
            check_supported(&component, property)?;
            check_span(&properties, property)?;
        }
        Ok(Self::with_update(
            properties,
            component,
            TweenUpdate::Easing {
                tracks: tracks.iter().copied().collect(),
                easing,
                rate: 1.0 / duration,
            },
        ))
    }

    /// Tween running `tracks` for `total` seconds.
    pub fn timing(
        properties: TweenProperties,
        component: C,
        tracks: &[TimingTrack],
        total: f32,
    ) -> Result<Self, TweenError> {
        if tracks.is_empty() {
            return Err(TweenError::NoTracks);
        }
        if !(total > 0.0) {
            return Err(TweenError::InvalidDuration(total));
        }
        for track in tracks {
            match *track {
                TimingTrack::Linear(property) => {
                    check_supported(&component, property)?;
                    properties.require(TweenParam::Start(property))?;
                    properties.require(TweenParam::Velocity(property))?;
                }
                TimingTrack::Sine {
                    property, phase, ..
                } => {
                    check_supported(&component, property)?;
                    check_supported(&component, phase)?;
                    properties.require(TweenParam::Start(property))?;
                    properties.require(TweenParam::Start(phase))?;
                }
            }
        }
        Ok(Self::with_update(
            properties,
            component,
            TweenUpdate::Timing {
                tracks: tracks.iter().copied().collect(),
                total,
            },
        ))
    }

    fn with_update(properties: TweenProperties, component: C, update: TweenUpdate) -> Self {
        Self {
            properties,
            update,
            state: TweenStateContainer::default(),
            component,
        }
    }

    /// Advance by `delta` seconds. Negative deltas are treated as zero.
    pub fn update(&mut self, delta: f32) {
        step(
            &self.properties,
            &self.update,
            &mut self.component,
            &mut self.state,
            delta.max(0.0),
        );
    }

    /// Return to `Initialized` so the next update replays from the start.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Swap the easing curve of an easing tween. Other kinds are unchanged.
    pub fn set_easing(&mut self, new_easing: Easing) {
        if let TweenUpdate::Easing { easing, .. } = &mut self.update {
            *easing = new_easing;
        }
    }

    pub fn easing_curve(&self) -> Option<Easing> {
        match self.update {
            TweenUpdate::Easing { easing, .. } => Some(easing),
            _ => None,
        }
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    pub fn properties(&self) -> &TweenProperties {
        &self.properties
    }

    pub fn kind(&self) -> &TweenUpdate {
        &self.update
    }

    pub fn state(&self) -> TweenState {
        self.state.state
    }

    pub fn state_container(&self) -> &TweenStateContainer {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.state == TweenState::Finished
    }

    pub fn percentage(&self) -> f32 {
        self.state.percentage
    }

    pub fn execution_time(&self) -> f32 {
        self.state.execution_time
    }

    /// Total run time of a timing tween.
    pub fn total_execution_time(&self) -> Option<f32> {
        match self.update {
            TweenUpdate::Timing { total, .. } => Some(total),
            _ => None,
        }
    }

    /// Change the run time of a timing tween and restart it. Other kinds are
    /// unchanged.
    pub fn set_total_execution_time(&mut self, new_total: f32) -> Result<(), TweenError> {
        if !(new_total > 0.0) {
            return Err(TweenError::InvalidDuration(new_total));
        }
        if let TweenUpdate::Timing { total, .. } = &mut self.update {
            *total = new_total;
            self.state.reset();
        }
        Ok(())
    }
}

fn check_supported<C: Tweenable>(component: &C, property: TweenProperty) -> Result<(), TweenError> {
    match component.get(property) {
        Some(_) => Ok(()),
        None => Err(TweenError::UnsupportedProperty(property)),
    }
}

fn check_span(properties: &TweenProperties, property: TweenProperty) -> Result<(), TweenError> {
    let start = properties.require(TweenParam::Start(property))?;
    let end = properties.require(TweenParam::End(property))?;
    if start == end {
        return Err(TweenError::EmptySpan(property));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::shapes::{Circle, Rectangle};

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn pos_props() -> TweenProperties {
        TweenProperties::new()
            .with_start(TweenProperty::X, 40.0)
            .with_start(TweenProperty::Y, 435.0)
            .with_end(TweenProperty::X, 340.0)
            .with_velocity(TweenProperty::X, 150.0)
    }

    #[test]
    fn test_properties_of_pairs() {
        let p = TweenProperties::of([
            (TweenParam::Start(TweenProperty::Radius), 10.0),
            (TweenParam::End(TweenProperty::Radius), 40.0),
        ]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.get(TweenParam::End(TweenProperty::Radius)), Some(40.0));
        assert!(!p.contains(TweenParam::Velocity(TweenProperty::Radius)));
    }

    #[test]
    fn test_velocity_requires_velocity_param() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::X, 0.0)
            .with_end(TweenProperty::X, 10.0);
        let err = TweenAnimation::velocity(props, Rectangle::new(0.0, 0.0, 8.0, 8.0), &[
            TweenProperty::X,
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TweenError::MissingParam(TweenParam::Velocity(TweenProperty::X))
        );
    }

    #[test]
    fn test_velocity_rejects_empty_span() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::X, 5.0)
            .with_end(TweenProperty::X, 5.0)
            .with_velocity(TweenProperty::X, 1.0);
        let err = TweenAnimation::velocity(props, Rectangle::new(0.0, 0.0, 8.0, 8.0), &[
            TweenProperty::X,
        ])
        .unwrap_err();
        assert_eq!(err, TweenError::EmptySpan(TweenProperty::X));
    }

    #[test]
    fn test_tracks_must_exist_on_the_component() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::Radius, 0.0)
            .with_end(TweenProperty::Radius, 10.0)
            .with_velocity(TweenProperty::Radius, 10.0);
        let err = TweenAnimation::velocity(props.clone(), Rectangle::new(0.0, 0.0, 8.0, 8.0), &[
            TweenProperty::Radius,
        ])
        .unwrap_err();
        assert_eq!(err, TweenError::UnsupportedProperty(TweenProperty::Radius));

        let err = TweenAnimation::easing(
            props.clone(),
            Rectangle::new(0.0, 0.0, 8.0, 8.0),
            &[TweenProperty::Radius],
            Easing::Linear,
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, TweenError::UnsupportedProperty(TweenProperty::Radius));

        // the sine phase is read from the component too
        let err = TweenAnimation::timing(
            props.clone().with_start(TweenProperty::Angle, 0.0),
            Circle::new(0.0, 0.0, 5.0),
            &[TimingTrack::Sine {
                property: TweenProperty::Radius,
                amplitude: 5.0,
                phase: TweenProperty::Angle,
            }],
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, TweenError::UnsupportedProperty(TweenProperty::Angle));

        // a supported track reaches its end at 60 Hz
        let mut tween =
            TweenAnimation::velocity(props, Circle::new(0.0, 0.0, 0.0), &[TweenProperty::Radius])
                .unwrap();
        for _ in 0..120 {
            tween.update(1.0 / 60.0);
        }
        assert!(tween.is_finished());
        assert_eq!(tween.component().radius, 10.0);
    }

    #[test]
    fn test_easing_rejects_non_positive_duration() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::Radius, 10.0)
            .with_end(TweenProperty::Radius, 40.0);
        let err = TweenAnimation::easing(
            props,
            Circle::new(0.0, 0.0, 0.0),
            &[TweenProperty::Radius],
            Easing::QuadIn,
            0.0,
        )
        .unwrap_err();
        assert_eq!(err, TweenError::InvalidDuration(0.0));
    }

    #[test]
    fn test_no_tracks_is_an_error() {
        let err = TweenAnimation::velocity(pos_props(), Rectangle::new(0.0, 0.0, 1.0, 1.0), &[])
            .unwrap_err();
        assert_eq!(err, TweenError::NoTracks);
    }

    #[test]
    fn test_new_tween_is_initialized() {
        let tw =
            TweenAnimation::velocity(pos_props(), Rectangle::new(0.0, 0.0, 80.0, 80.0), &[
                TweenProperty::X,
            ])
            .unwrap();
        assert_eq!(tw.state(), TweenState::Initialized);
        assert!(approx_eq(tw.percentage(), 0.0));
        assert!(tw.total_execution_time().is_none());
        assert!(tw.easing_curve().is_none());
    }

    #[test]
    fn test_set_easing_only_affects_easing_tweens() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::X, 0.0)
            .with_end(TweenProperty::X, 10.0);
        let mut tw = TweenAnimation::easing(
            props,
            Rectangle::new(0.0, 0.0, 1.0, 1.0),
            &[TweenProperty::X],
            Easing::Linear,
            2.0,
        )
        .unwrap();
        tw.set_easing(Easing::BounceOut);
        assert_eq!(tw.easing_curve(), Some(Easing::BounceOut));
        assert!(matches!(tw.kind(), TweenUpdate::Easing { rate, .. } if approx_eq(*rate, 0.5)));
    }

    #[test]
    fn test_timing_requires_phase_start() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::Y, 700.0);
        let err = TweenAnimation::timing(
            props,
            Circle::new(0.0, 0.0, 1.0),
            &[TimingTrack::Sine {
                property: TweenProperty::Y,
                amplitude: 50.0,
                phase: TweenProperty::Angle,
            }],
            4.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TweenError::MissingParam(TweenParam::Start(TweenProperty::Angle))
        );
    }

    #[test]
    fn test_easing_names_round_trip() {
        for easing in Easing::CURVES {
            let name = easing.name();
            assert_eq!(Easing::from_name(&name), Some(easing), "{name}");
        }
        assert_eq!(Easing::QuadInOut.name(), "quad_in_out");
        assert_eq!(Easing::from_name("nope"), None);
    }

    #[test]
    fn test_state_container_reset() {
        let mut sc = TweenStateContainer {
            state: TweenState::Finished,
            percentage: 1.0,
            execution_time: 3.0,
        };
        sc.reset();
        assert_eq!(sc, TweenStateContainer::default());
    }

    #[test]
    fn test_set_total_execution_time_restarts_timing() {
        let props = TweenProperties::new()
            .with_start(TweenProperty::X, 0.0)
            .with_velocity(TweenProperty::X, 10.0);
        let mut tween = TweenAnimation::timing(
            props,
            Circle::new(0.0, 0.0, 5.0),
            &[TimingTrack::Linear(TweenProperty::X)],
            1.5,
        )
        .unwrap();
        tween.update(2.0);
        assert!(tween.is_finished());
        tween.set_total_execution_time(3.5).unwrap();
        assert_eq!(tween.total_execution_time(), Some(3.5));
        assert_eq!(tween.state(), TweenState::Initialized);
        assert_eq!(
            tween.set_total_execution_time(0.0),
            Err(TweenError::InvalidDuration(0.0))
        );
    }
}
