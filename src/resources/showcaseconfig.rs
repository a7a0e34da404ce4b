//! Showcase configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are usable
//! without any file; missing keys keep their current values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [showcase]
//! target_fps = 60
//! frames = 600
//! report_every = 60
//!
//! [collision]
//! width = 530
//! height = 530
//! aabbs = 50
//! max_depth = 5
//! seed = 42
//!
//! [animation]
//! easing = linear
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::tween::Easing;

const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_REPORT_EVERY: u32 = 60;
const DEFAULT_ARENA_SIZE: f32 = 530.0;
const DEFAULT_AABBS: usize = 50;
const DEFAULT_MAX_DEPTH: usize = 5;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_CONFIG_PATH: &str = "./showcase.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for [{section}] {key}: {value}")]
    Invalid {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}

/// Showcase configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ShowcaseConfig {
    /// Fixed tick rate of the frame loop.
    pub target_fps: u32,
    /// Frames to run before exiting.
    pub frames: u32,
    /// Print status every this many frames. `0` only prints at the end.
    pub report_every: u32,
    /// Collision arena width.
    pub arena_width: f32,
    /// Collision arena height.
    pub arena_height: f32,
    /// Number of boxes spawned by the collision example.
    pub aabbs: usize,
    /// Quadtree depth limit.
    pub max_depth: usize,
    /// Seed for the collision example's random boxes.
    pub seed: u64,
    /// Initial easing curve of the animations example.
    pub easing: Easing,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseConfig {
    pub fn new() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            frames: DEFAULT_FRAMES,
            report_every: DEFAULT_REPORT_EVERY,
            arena_width: DEFAULT_ARENA_SIZE,
            arena_height: DEFAULT_ARENA_SIZE,
            aabbs: DEFAULT_AABBS,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: DEFAULT_SEED,
            easing: Easing::Linear,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per frame at the target rate.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Load configuration from the INI file.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|message| ConfigError::Load {
                path: self.config_path.clone(),
                message,
            })?;
        self.apply(&config)?;

        info!(
            "Loaded config: fps={}, frames={}, arena={}x{}, aabbs={}, max_depth={}, seed={}, easing={}",
            self.target_fps,
            self.frames,
            self.arena_width,
            self.arena_height,
            self.aabbs,
            self.max_depth,
            self.seed,
            self.easing.name()
        );
        Ok(())
    }

    /// Parse INI text, as [`load_from_file`](Self::load_from_file) does for
    /// a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|message| ConfigError::Load {
                path: self.config_path.clone(),
                message,
            })?;
        self.apply(&config)
    }

    /// A rejected key leaves `self` unchanged.
    fn apply(&mut self, config: &Ini) -> Result<(), ConfigError> {
        let mut next = self.clone();

        // [showcase] section
        if let Some(fps) = config.getuint("showcase", "target_fps").ok().flatten() {
            if fps == 0 {
                return Err(invalid("showcase", "target_fps", fps));
            }
            next.target_fps = fps as u32;
        }
        if let Some(frames) = config.getuint("showcase", "frames").ok().flatten() {
            next.frames = frames as u32;
        }
        if let Some(every) = config.getuint("showcase", "report_every").ok().flatten() {
            next.report_every = every as u32;
        }

        // [collision] section
        if let Some(width) = config.getfloat("collision", "width").ok().flatten() {
            if width <= 0.0 {
                return Err(invalid("collision", "width", width));
            }
            next.arena_width = width as f32;
        }
        if let Some(height) = config.getfloat("collision", "height").ok().flatten() {
            if height <= 0.0 {
                return Err(invalid("collision", "height", height));
            }
            next.arena_height = height as f32;
        }
        if let Some(aabbs) = config.getuint("collision", "aabbs").ok().flatten() {
            next.aabbs = aabbs as usize;
        }
        if let Some(depth) = config.getuint("collision", "max_depth").ok().flatten() {
            if depth == 0 {
                return Err(invalid("collision", "max_depth", depth));
            }
            next.max_depth = depth as usize;
        }
        if let Some(seed) = config.getuint("collision", "seed").ok().flatten() {
            next.seed = seed;
        }

        // [animation] section
        if let Some(name) = config.get("animation", "easing") {
            next.easing =
                Easing::from_name(name.trim()).ok_or_else(|| invalid("animation", "easing", name))?;
        }
        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("showcase", "target_fps", Some(self.target_fps.to_string()));
        config.set("showcase", "frames", Some(self.frames.to_string()));
        config.set("showcase", "report_every", Some(self.report_every.to_string()));

        config.set("collision", "width", Some(self.arena_width.to_string()));
        config.set("collision", "height", Some(self.arena_height.to_string()));
        config.set("collision", "aabbs", Some(self.aabbs.to_string()));
        config.set("collision", "max_depth", Some(self.max_depth.to_string()));
        config.set("collision", "seed", Some(self.seed.to_string()));

        config.set("animation", "easing", Some(self.easing.name()));

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}

fn invalid(section: &'static str, key: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        section,
        key,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let mut config = ShowcaseConfig::new();
        config
            .load_from_str("[collision]\naabbs = 12\n")
            .unwrap();
        assert_eq!(config.aabbs, 12);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.target_fps, DEFAULT_TARGET_FPS);
    }

    #[test]
    fn parses_every_section() {
        let mut config = ShowcaseConfig::new();
        config
            .load_from_str(
                "[showcase]\ntarget_fps = 30\nframes = 10\nreport_every = 0\n\
                 [collision]\nwidth = 200.5\nheight = 100\nmax_depth = 3\nseed = 9\n\
                 [animation]\neasing = bounce_out\n",
            )
            .unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.frames, 10);
        assert_eq!(config.report_every, 0);
        assert_eq!(config.arena_width, 200.5);
        assert_eq!(config.arena_height, 100.0);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.easing, Easing::BounceOut);
    }

    #[test]
    fn rejects_zero_depth_and_unknown_easing() {
        let mut config = ShowcaseConfig::new();
        assert!(matches!(
            config.load_from_str("[collision]\nmax_depth = 0\n"),
            Err(ConfigError::Invalid { key: "max_depth", .. })
        ));
        assert!(matches!(
            config.load_from_str("[animation]\neasing = wobbly\n"),
            Err(ConfigError::Invalid { key: "easing", .. })
        ));
    }

    #[test]
    fn rejected_load_keeps_previous_values() {
        let mut config = ShowcaseConfig::new();
        let before = config.clone();
        let text = "[showcase]\ntarget_fps = 30\n[collision]\naabbs = 3\nmax_depth = 0\n";
        assert!(config.load_from_str(text).is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn missing_file_is_load_error() {
        let mut config = ShowcaseConfig::with_path("/nonexistent/showcase.ini");
        assert!(matches!(
            config.load_from_file(),
            Err(ConfigError::Load { .. })
        ));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = std::env::temp_dir().join(format!("showcase-{}.ini", std::process::id()));
        let mut saved = ShowcaseConfig::with_path(&path);
        saved.aabbs = 7;
        saved.easing = Easing::SineInOut;
        saved.save_to_file().unwrap();

        let mut loaded = ShowcaseConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, saved);
    }
}
