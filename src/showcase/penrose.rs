//! Penrose tiling drawn by a turtle.
//!
//! The tiling for the current generation is drawn progressively: each frame
//! reveals [`STEPS_STEP`] more segments until the whole turtle path is
//! visible.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::turtle::Turtle;
use crate::lsystem::PenroseLSystem;
use crate::showcase::{FrameDriver, ShowcaseError};

pub const MAX_GENERATIONS: u32 = 6;
/// Scale divisor of the first tiling built by `create`. Later rebuilds divide
/// by [`MAX_GENERATIONS`].
pub const INITIAL_SCALE_GENERATIONS: u32 = 5;
/// Segments revealed per frame.
pub const STEPS_STEP: usize = 12;
pub const DRAW_LENGTH: f32 = 650.0;
/// Turtle start, the center of an 800x450 screen.
pub const ORIGIN: Vec2 = Vec2::new(400.0, 225.0);

pub struct PenroseExample {
    generations: u32,
    steps: usize,
    turtle: Option<Entity>,
}

impl Default for PenroseExample {
    fn default() -> Self {
        Self::new()
    }
}

impl PenroseExample {
    pub fn new() -> Self {
        Self {
            generations: 1,
            steps: 1,
            turtle: None,
        }
    }

    pub fn generations(&self) -> u32 {
        self.generations
    }

    /// Segments currently visible.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn turtle_entity(&self) -> Option<Entity> {
        self.turtle
    }

    /// Show one more generation, up to [`MAX_GENERATIONS`].
    pub fn increase_generations(&mut self, world: &mut World) {
        if self.generations < MAX_GENERATIONS {
            self.generations += 1;
            self.rebuild(world, MAX_GENERATIONS);
        }
    }

    /// Show one generation less, down to 1.
    pub fn decrease_generations(&mut self, world: &mut World) {
        if self.generations > 1 {
            self.generations -= 1;
            self.rebuild(world, MAX_GENERATIONS);
        }
    }

    fn rebuild(&mut self, world: &mut World, scale_generations: u32) {
        let turtle = PenroseLSystem::generate(DRAW_LENGTH, self.generations, scale_generations)
            .build_turtle(ORIGIN);
        self.steps = 1;
        match self.turtle {
            Some(entity) if world.get_entity(entity).is_ok() => {
                world.entity_mut(entity).insert(turtle);
            }
            _ => self.turtle = Some(world.spawn(turtle).id()),
        }
    }

    fn frame_count(&self, world: &World) -> usize {
        self.turtle
            .and_then(|e| world.get::<Turtle>(e))
            .map_or(0, Turtle::frame_count)
    }
}

impl FrameDriver for PenroseExample {
    fn title(&self) -> &str {
        "Penrose L-System"
    }

    fn create(&mut self, world: &mut World) -> Result<(), ShowcaseError> {
        self.generations = 1;
        self.rebuild(world, INITIAL_SCALE_GENERATIONS);
        Ok(())
    }

    fn update(&mut self, world: &mut World, _delta: f32) {
        let total = self.frame_count(world).max(1);
        self.steps = (self.steps + STEPS_STEP).clamp(1, total);
    }

    fn draw(&self, world: &World) -> Vec<String> {
        let mut lines = vec![format!(
            "generations: {}/{}, segments: {}/{}",
            self.generations,
            MAX_GENERATIONS,
            self.steps,
            self.frame_count(world)
        )];
        if let Some(turtle) = self.turtle.and_then(|e| world.get::<Turtle>(e)) {
            let visible = turtle.segments_up_to(self.steps);
            let length: f32 = visible.iter().map(|s| s.length()).sum();
            lines.push(format!("drawn length: {length:.1}"));
            if let Some(last) = visible.last() {
                lines.push(format!("pen at ({:.1}, {:.1})", last.to.x, last.to.y));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_grow_and_clamp() {
        let mut world = World::new();
        let mut example = PenroseExample::new();
        example.create(&mut world).unwrap();
        example.update(&mut world, 1.0 / 60.0);
        assert_eq!(example.steps(), 13);
        example.update(&mut world, 1.0 / 60.0);
        // Generation 1 has 20 segments.
        assert_eq!(example.steps(), 20);
    }

    fn first_segment_length(world: &World, example: &PenroseExample) -> f32 {
        let turtle = world.get::<Turtle>(example.turtle_entity().unwrap()).unwrap();
        turtle.segments()[0].length()
    }

    #[test]
    fn first_build_uses_initial_scale() {
        let mut world = World::new();
        let mut example = PenroseExample::new();
        example.create(&mut world).unwrap();
        // 650 / 5, halved by the single rewrite
        assert!((first_segment_length(&world, &example) - 65.0).abs() < 1e-3);

        example.increase_generations(&mut world);
        example.decrease_generations(&mut world);
        assert_eq!(example.generations(), 1);
        assert!((first_segment_length(&world, &example) - 650.0 / 12.0).abs() < 1e-3);
    }

    #[test]
    fn generations_stay_in_range() {
        let mut world = World::new();
        let mut example = PenroseExample::new();
        example.create(&mut world).unwrap();
        example.decrease_generations(&mut world);
        assert_eq!(example.generations(), 1);
        example.increase_generations(&mut world);
        assert_eq!(example.generations(), 2);
        assert_eq!(example.steps(), 1);
        assert!(world.get::<Turtle>(example.turtle_entity().unwrap()).is_some());
        assert_eq!(world.query::<&Turtle>().iter(&world).count(), 1);
    }
}
