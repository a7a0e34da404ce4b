//! Showcase launcher.
//!
//! Every example implements [`FrameDriver`]: it builds its entities and
//! schedule in [`create`](FrameDriver::create), advances them in
//! [`update`](FrameDriver::update) and reports its visible state as text
//! lines from [`draw`](FrameDriver::draw).
//!
//! [`Showcase`] owns the [`World`] and runs one update-then-draw tick per
//! frame at a fixed delta. There is no window; drawing produces status lines
//! that the binary prints.
//!
//! # Examples
//!
//! | name | driver |
//! |------|--------|
//! | `animations` | [`animations::AnimationsExample`] |
//! | `collision` | [`collision::CollisionExample`] |
//! | `penrose` | [`penrose::PenroseExample`] |

pub mod animations;
pub mod collision;
pub mod penrose;

use bevy_ecs::prelude::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::tween::TweenError;
use crate::resources::showcaseconfig::{ConfigError, ShowcaseConfig};
use crate::resources::worldtime::WorldTime;
use crate::systems::time::update_world_time;

/// Names accepted by [`create_example`], in menu order.
pub const EXAMPLES: [&str; 3] = ["animations", "collision", "penrose"];

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("unknown example {0:?}, expected one of {EXAMPLES:?}")]
    UnknownExample(String),
    #[error(transparent)]
    Tween(#[from] TweenError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// A runnable example.
pub trait FrameDriver {
    fn title(&self) -> &str;

    /// Spawn entities, insert resources and build the schedule.
    fn create(&mut self, world: &mut World) -> Result<(), ShowcaseError>;

    /// Advance by `delta` seconds. [`WorldTime`] is already updated.
    fn update(&mut self, world: &mut World, delta: f32);

    /// Status lines describing what would be on screen.
    fn draw(&self, world: &World) -> Vec<String>;
}

/// Look up an example by name.
pub fn create_example(
    name: &str,
    config: &ShowcaseConfig,
) -> Result<Box<dyn FrameDriver>, ShowcaseError> {
    match name {
        "animations" => Ok(Box::new(animations::AnimationsExample::new(config.easing))),
        "collision" => Ok(Box::new(collision::CollisionExample::from_config(config))),
        "penrose" => Ok(Box::new(penrose::PenroseExample::new())),
        other => Err(ShowcaseError::UnknownExample(other.to_string())),
    }
}

/// Snapshot of a finished run, printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseReport {
    pub title: String,
    pub frames: u64,
    /// Simulated seconds.
    pub elapsed: f32,
    pub lines: Vec<String>,
}

impl ShowcaseReport {
    pub fn to_json(&self) -> Result<String, ShowcaseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A world driven by one example.
pub struct Showcase {
    world: World,
    driver: Box<dyn FrameDriver>,
}

impl Showcase {
    pub fn new(
        mut driver: Box<dyn FrameDriver>,
        config: &ShowcaseConfig,
    ) -> Result<Self, ShowcaseError> {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(config.clone());
        driver.create(&mut world)?;
        // Observers registered in create must exist before the first tick.
        world.flush();
        info!("Created example '{}'", driver.title());
        Ok(Self { world, driver })
    }

    /// One frame: advance time, update, then apply queued commands.
    pub fn tick(&mut self, delta: f32) {
        update_world_time(&mut self.world, delta);
        self.driver.update(&mut self.world, delta);
        self.world.flush();
    }

    pub fn draw(&self) -> Vec<String> {
        self.driver.draw(&self.world)
    }

    pub fn title(&self) -> &str {
        self.driver.title()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.world
            .get_resource::<WorldTime>()
            .map(|t| t.frame_count)
            .unwrap_or_default()
    }

    pub fn report(&self) -> ShowcaseReport {
        let elapsed = self
            .world
            .get_resource::<WorldTime>()
            .map(|t| t.elapsed)
            .unwrap_or_default();
        ShowcaseReport {
            title: self.title().to_string(),
            frames: self.frame_count(),
            elapsed,
            lines: self.draw(),
        }
    }

    /// Run `frames` ticks of `delta` seconds. `on_report` receives the draw
    /// output every `report_every` frames (never if zero).
    pub fn run(
        &mut self,
        frames: u32,
        delta: f32,
        report_every: u32,
        mut on_report: impl FnMut(u64, &[String]),
    ) -> ShowcaseReport {
        for _ in 0..frames {
            self.tick(delta);
            let frame = self.frame_count();
            if report_every > 0 && frame % report_every as u64 == 0 {
                debug!("Reporting frame {}", frame);
                on_report(frame, &self.draw());
            }
        }
        self.report()
    }
}
