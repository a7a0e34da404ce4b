//! Bouncing boxes in an AABB quadtree.
//!
//! Random dynamic boxes move inside the arena and bounce off its edges.
//! Every tick the [`AabbQuadtree`] is rebuilt from their positions and
//! scanned for overlaps. Box sizes, positions and velocities come from a
//! seeded [`fastrand::Rng`], so runs are reproducible.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::aabb::Aabb;
use crate::components::rigidbody::RigidBody;
use crate::events::collision::{OverlapEvent, observe_overlap_log};
use crate::resources::arena::Arena;
use crate::resources::overlaps::Overlaps;
use crate::resources::quadtree::AabbQuadtree;
use crate::resources::showcaseconfig::ShowcaseConfig;
use crate::showcase::{FrameDriver, ShowcaseError};
use crate::systems::collision::{overlap_detector, quadtree_update_system};
use crate::systems::movement::bounce_movement;

const MIN_BOX_SIZE: u32 = 5;
const MAX_SPEED: i32 = 100;

/// Overlap events seen since the example started.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct OverlapStats {
    pub total: u64,
}

fn observe_overlap_count(_trigger: On<OverlapEvent>, mut stats: ResMut<OverlapStats>) {
    stats.total += 1;
}

pub struct CollisionExample {
    width: f32,
    height: f32,
    count: usize,
    max_depth: usize,
    seed: u64,
    schedule: Schedule,
}

impl CollisionExample {
    pub fn new(width: f32, height: f32, count: usize, max_depth: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            count,
            max_depth,
            seed,
            schedule: Schedule::default(),
        }
    }

    pub fn from_config(config: &ShowcaseConfig) -> Self {
        Self::new(
            config.arena_width,
            config.arena_height,
            config.aabbs,
            config.max_depth,
            config.seed,
        )
    }

    /// Random boxes inside `width x height`: sides in `5..=height / 15`,
    /// integer velocities in `-100..=100` on each axis.
    pub fn random_boxes(&self) -> Vec<(Aabb, RigidBody)> {
        let mut rng = fastrand::Rng::with_seed(self.seed);
        let max_size = ((self.height / 15.0) as u32).max(MIN_BOX_SIZE);
        (0..self.count)
            .map(|_| {
                let w = rng.u32(MIN_BOX_SIZE..=max_size) as f32;
                let h = rng.u32(MIN_BOX_SIZE..=max_size) as f32;
                let x = random_offset(&mut rng, self.width - w);
                let y = random_offset(&mut rng, self.height - h);
                let velocity = Vec2::new(
                    rng.i32(-MAX_SPEED..=MAX_SPEED) as f32,
                    rng.i32(-MAX_SPEED..=MAX_SPEED) as f32,
                );
                (Aabb::from_rect(x, y, w, h), RigidBody::new(velocity))
            })
            .collect()
    }
}

/// Integer offset in `1..=span - 2`, or `0` when the span is too small.
fn random_offset(rng: &mut fastrand::Rng, span: f32) -> f32 {
    let max = span as i32 - 2;
    if max < 1 { 0.0 } else { rng.i32(1..=max) as f32 }
}

impl FrameDriver for CollisionExample {
    fn title(&self) -> &str {
        "Collision Detection and AABB Quadtree"
    }

    fn create(&mut self, world: &mut World) -> Result<(), ShowcaseError> {
        world.insert_resource(Arena::new(self.width, self.height));
        world.insert_resource(AabbQuadtree::new(self.width, self.height, self.max_depth));
        world.init_resource::<Overlaps>();
        world.init_resource::<OverlapStats>();
        world.spawn(Observer::new(observe_overlap_log));
        world.spawn(Observer::new(observe_overlap_count));

        let boxes = self.random_boxes();
        info!(
            "Spawning {} boxes in {}x{} (seed {})",
            boxes.len(),
            self.width,
            self.height,
            self.seed
        );
        world.spawn_batch(boxes);

        self.schedule = Schedule::default();
        self.schedule
            .add_systems((bounce_movement, quadtree_update_system, overlap_detector).chain());
        Ok(())
    }

    fn update(&mut self, world: &mut World, _delta: f32) {
        self.schedule.run(world);
    }

    fn draw(&self, world: &World) -> Vec<String> {
        let mut lines = vec![format!(
            "AABBQuadtree (AABBs: {}, maxDepth: {})",
            self.count, self.max_depth
        )];
        if let Some(quadtree) = world.get_resource::<AabbQuadtree>() {
            lines.push(format!(
                "nodes: {}, depth: {}, boxes: {}",
                quadtree.node_count(),
                quadtree.depth(),
                quadtree.len()
            ));
        }
        if let Some(overlaps) = world.get_resource::<Overlaps>() {
            lines.push(format!("overlaps: {}", overlaps.len()));
            for pair in &overlaps.pairs {
                lines.push(format!(
                    "  {:?} x {:?}: ({:.1}, {:.1}) {:.1}x{:.1}",
                    pair.a,
                    pair.b,
                    pair.area.x1,
                    pair.area.y1,
                    pair.area.width(),
                    pair.area.height()
                ));
            }
        }
        if let Some(stats) = world.get_resource::<OverlapStats>() {
            lines.push(format!("overlap events: {}", stats.total));
        }
        lines
    }
}
