//! Per-frame overlap report.
//!
//! [`Overlaps`] is rewritten every tick by
//! [`overlap_detector`](crate::systems::collision::overlap_detector) with the
//! pairs found by the quadtree scan, so examples can read the latest result
//! without observing every [`OverlapEvent`](crate::events::collision::OverlapEvent).

use bevy_ecs::prelude::*;

use crate::components::aabb::Aabb;

/// Overlapping pair of box entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapPair {
    pub a: Entity,
    pub b: Entity,
    pub area: Aabb,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Overlaps {
    pub pairs: Vec<OverlapPair>,
}

impl Overlaps {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether `a` and `b` overlap this frame, in either order.
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs
            .iter()
            .any(|p| (p.a == a && p.b == b) || (p.a == b && p.b == a))
    }

    /// Entities involved in at least one overlap.
    pub fn involves(&self, entity: Entity) -> bool {
        self.pairs.iter().any(|p| p.a == entity || p.b == entity)
    }
}
