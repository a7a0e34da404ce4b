//! JSGE showcase entry point.
//!
//! Runs one of the showcase examples headless:
//! - **bevy_ecs** for the entity-component-system world and schedules
//! - **configparser** for `showcase.ini`
//! - **clap** for command line flags
//!
//! # Main Loop
//!
//! 1. Load `showcase.ini` (defaults if missing), then apply CLI overrides
//! 2. Create the chosen example on a fresh ECS world
//! 3. Tick it at a fixed delta for the requested number of frames,
//!    printing its status lines every `report_every` frames
//! 4. Print the final report, as text or JSON
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --example collision --frames 300
//! ```

use clap::Parser;
use jsge_showcase::resources::showcaseconfig::ShowcaseConfig;
use jsge_showcase::showcase::{EXAMPLES, Showcase, ShowcaseError, create_example};
use log::{info, warn};
use std::path::PathBuf;

/// JSGE showcase: tweens, quadtree collisions and L-systems on an ECS world.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// List available examples and exit.
    #[arg(long)]
    list: bool,

    /// Example to run.
    #[arg(long, value_name = "NAME", default_value = "animations")]
    example: String,

    /// Frames to simulate (overrides the config file).
    #[arg(long, value_name = "N")]
    frames: Option<u32>,

    /// Fixed tick rate in frames per second (overrides the config file).
    #[arg(long, value_name = "F")]
    fps: Option<u32>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./showcase.ini")]
    config: PathBuf,

    /// Seed for random content (overrides the config file).
    #[arg(long, value_name = "S")]
    seed: Option<u64>,

    /// Print the final report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list {
        for name in EXAMPLES {
            println!("{name}");
        }
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ShowcaseError> {
    let mut config = ShowcaseConfig::with_path(&cli.config);
    if cli.config.exists() {
        config.load_from_file()?;
    } else {
        warn!("Config file {:?} not found, using defaults", cli.config);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps.max(1);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let driver = create_example(&cli.example, &config)?;
    let mut showcase = Showcase::new(driver, &config)?;
    info!(
        "Running '{}' for {} frames at {} fps",
        showcase.title(),
        config.frames,
        config.target_fps
    );

    let quiet = cli.json;
    let report = showcase.run(
        config.frames,
        config.frame_delta(),
        config.report_every,
        |frame, lines| {
            if !quiet {
                println!("--- frame {frame} ---");
                for line in lines {
                    println!("{line}");
                }
            }
        },
    );

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!(
            "=== {} after {} frames ({:.2}s) ===",
            report.title, report.frames, report.elapsed
        );
        for line in &report.lines {
            println!("{line}");
        }
    }
    Ok(())
}
