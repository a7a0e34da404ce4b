//! Axis-aligned bounding box component.
//!
//! An [`Aabb`] is stored as its two corners, `(x1, y1)` top-left and
//! `(x2, y2)` bottom-right, plus an [`AabbKind`] tag. Static boxes never move
//! and static-static pairs are skipped by the overlap scan.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Whether a box moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AabbKind {
    Static,
    #[default]
    Dynamic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Component, Serialize, Deserialize)]
pub struct Aabb {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub kind: AabbKind,
}

impl Aabb {
    /// Create a dynamic box from two corners. Corners are normalized so that
    /// `x1 <= x2` and `y1 <= y2`.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
            kind: AabbKind::Dynamic,
        }
    }

    /// Create a box from its top-left corner and size.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn with_kind(mut self, kind: AabbKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind == AabbKind::Static
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    /// Resize keeping the top-left corner.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.x2 = self.x1 + width;
        self.y2 = self.y1 + height;
    }

    /// Translate by `offset`.
    pub fn move_by(&mut self, offset: Vec2) {
        self.x1 += offset.x;
        self.x2 += offset.x;
        self.y1 += offset.y;
        self.y2 += offset.y;
    }

    /// Place the top-left corner at `(x, y)` keeping the size.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let (w, h) = (self.width(), self.height());
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// Intersection rectangle, if the boxes overlap. The result is tagged
    /// with this box's kind.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
            kind: self.kind,
        })
    }

    /// Point containment, edges included.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_boxes_overlap() {
        let a = Aabb::from_rect(10.0, 10.0, 5.0, 5.0);
        assert!(a.overlaps(&a));
        assert_eq!(a.intersection(&a), Some(a));
    }

    #[test]
    fn separated_boxes_do_not_overlap() {
        let a = Aabb::from_rect(0.0, 0.0, 5.0, 5.0);
        let b = Aabb::from_rect(6.0, 6.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::from_rect(0.0, 0.0, 5.0, 5.0);
        let b = Aabb::from_rect(5.0, 0.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn intersection_area() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(5.0, 8.0, 10.0, 10.0);
        let i = a.intersection(&b).unwrap();
        assert_eq!((i.x1, i.y1, i.x2, i.y2), (5.0, 8.0, 10.0, 10.0));
        assert_eq!(i.width(), 5.0);
        assert_eq!(i.height(), 2.0);
    }

    #[test]
    fn new_normalizes_corners() {
        let a = Aabb::new(10.0, 8.0, 2.0, 4.0);
        assert_eq!((a.x1, a.y1, a.x2, a.y2), (2.0, 4.0, 10.0, 8.0));
    }

    #[test]
    fn move_to_keeps_size() {
        let mut a = Aabb::from_rect(3.0, 4.0, 7.0, 2.0);
        a.move_to(0.0, 1.0);
        assert_eq!((a.x1, a.y1, a.width(), a.height()), (0.0, 1.0, 7.0, 2.0));
        a.move_by(Vec2::new(1.0, -1.0));
        assert_eq!(a.min(), Vec2::new(1.0, 0.0));
        assert!(a.contains_point(Vec2::new(8.0, 2.0)));
    }
}
