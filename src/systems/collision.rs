//! Quadtree collision systems.
//!
//! - [`quadtree_update_system`] rebuilds the [`AabbQuadtree`] resource from
//!   every entity with an [`Aabb`].
//! - [`overlap_detector`] scans the tree, rewrites [`Overlaps`] and triggers
//!   an [`OverlapEvent`] per pair.
//!
//! Run them after
//! [`bounce_movement`](crate::systems::movement::bounce_movement) and in this
//! order.

use bevy_ecs::prelude::*;

use crate::components::aabb::Aabb;
use crate::events::collision::OverlapEvent;
use crate::resources::overlaps::{OverlapPair, Overlaps};
use crate::resources::quadtree::AabbQuadtree;

/// Full rebuild of the quadtree from current box positions.
pub fn quadtree_update_system(mut quadtree: ResMut<AabbQuadtree>, query: Query<(Entity, &Aabb)>) {
    quadtree.update_with_owners(query.iter().map(|(entity, aabb)| (entity, *aabb)));
}

/// Report overlapping box pairs found in the quadtree.
pub fn overlap_detector(
    quadtree: Res<AabbQuadtree>,
    mut overlaps: ResMut<Overlaps>,
    mut commands: Commands,
) {
    overlaps.pairs.clear();
    for overlap in quadtree.compute_overlaps() {
        let (Some(a), Some(b)) = (quadtree.owner(overlap.a), quadtree.owner(overlap.b)) else {
            continue;
        };
        overlaps.pairs.push(OverlapPair {
            a,
            b,
            area: overlap.area,
        });
        commands.trigger(OverlapEvent {
            a,
            b,
            area: overlap.area,
        });
    }
}
