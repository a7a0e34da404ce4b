//! Shape components animated by tweens.
//!
//! Each shape implements [`Tweenable`], the typed bridge between a tween's
//! update step and the shape's fields. Properties a shape does not have read
//! as `None` and ignore writes.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::tween::TweenProperty;

/// Get/set access to a component's animatable fields.
pub trait Tweenable: Send + Sync + 'static {
    /// Current value of `property`, or `None` if the shape does not have it.
    fn get(&self, property: TweenProperty) -> Option<f32>;
    /// Write `value` into `property`. Unknown properties are ignored.
    fn set(&mut self, property: TweenProperty, value: f32);
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Tweenable for Rectangle {
    fn get(&self, property: TweenProperty) -> Option<f32> {
        match property {
            TweenProperty::X => Some(self.x),
            TweenProperty::Y => Some(self.y),
            _ => None,
        }
    }

    fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::X => self.x = value,
            TweenProperty::Y => self.y = value,
            _ => {}
        }
    }
}

/// Circle centered at `(x, y)`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

impl Tweenable for Circle {
    fn get(&self, property: TweenProperty) -> Option<f32> {
        match property {
            TweenProperty::X => Some(self.x),
            TweenProperty::Y => Some(self.y),
            TweenProperty::Radius => Some(self.radius),
            _ => None,
        }
    }

    fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::X => self.x = value,
            TweenProperty::Y => self.y = value,
            TweenProperty::Radius => self.radius = value,
            _ => {}
        }
    }
}

/// Circle sector with an integer alpha channel.
///
/// Alpha writes are truncated toward zero and clamped to `0..=255`, so slow
/// alpha tweens advance in whole steps.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlphaCircleSector {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub alpha: u8,
}

impl AlphaCircleSector {
    pub fn new(x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) -> Self {
        Self {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            alpha: 255,
        }
    }
}

impl Tweenable for AlphaCircleSector {
    fn get(&self, property: TweenProperty) -> Option<f32> {
        match property {
            TweenProperty::X => Some(self.x),
            TweenProperty::Y => Some(self.y),
            TweenProperty::Radius => Some(self.radius),
            TweenProperty::Alpha => Some(f32::from(self.alpha)),
            TweenProperty::Angle => None,
        }
    }

    fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::X => self.x = value,
            TweenProperty::Y => self.y = value,
            TweenProperty::Radius => self.radius = value,
            TweenProperty::Alpha => self.alpha = value.trunc().clamp(0.0, 255.0) as u8,
            TweenProperty::Angle => {}
        }
    }
}

/// Regular polygon centered at `(x, y)`; `rotation` is in degrees.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub x: f32,
    pub y: f32,
    pub sides: u32,
    pub radius: f32,
    pub rotation: f32,
}

impl Polygon {
    pub fn new(x: f32, y: f32, sides: u32, radius: f32) -> Self {
        Self {
            x,
            y,
            sides,
            radius,
            rotation: 0.0,
        }
    }
}

impl Tweenable for Polygon {
    fn get(&self, property: TweenProperty) -> Option<f32> {
        match property {
            TweenProperty::X => Some(self.x),
            TweenProperty::Y => Some(self.y),
            TweenProperty::Radius => Some(self.radius),
            TweenProperty::Angle => Some(self.rotation),
            TweenProperty::Alpha => None,
        }
    }

    fn set(&mut self, property: TweenProperty, value: f32) {
        match property {
            TweenProperty::X => self.x = value,
            TweenProperty::Y => self.y = value,
            TweenProperty::Radius => self.radius = value,
            TweenProperty::Angle => self.rotation = value,
            TweenProperty::Alpha => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_ignores_radius() {
        let mut r = Rectangle::new(1.0, 2.0, 80.0, 80.0);
        r.set(TweenProperty::Radius, 10.0);
        assert_eq!(r, Rectangle::new(1.0, 2.0, 80.0, 80.0));
        assert_eq!(r.get(TweenProperty::Radius), None);
        assert_eq!(r.get(TweenProperty::X), Some(1.0));
    }

    #[test]
    fn alpha_truncates_and_clamps() {
        let mut s = AlphaCircleSector::new(0.0, 0.0, 40.0, 30.0, 330.0);
        s.set(TweenProperty::Alpha, 2.9);
        assert_eq!(s.alpha, 2);
        s.set(TweenProperty::Alpha, 400.0);
        assert_eq!(s.alpha, 255);
        s.set(TweenProperty::Alpha, -3.0);
        assert_eq!(s.alpha, 0);
    }

    #[test]
    fn polygon_angle_maps_to_rotation() {
        let mut p = Polygon::new(0.0, 0.0, 5, 40.0);
        p.set(TweenProperty::Angle, 90.0);
        assert_eq!(p.rotation, 90.0);
        assert_eq!(p.get(TweenProperty::Angle), Some(90.0));
        assert_eq!(p.get(TweenProperty::Alpha), None);
    }
}
