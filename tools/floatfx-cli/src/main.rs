//! floatfx CLI - inspect scenes and drive the float loop headless.
//!
//! Usage:
//!   floatfx init [DIR]                         Write a sample scene and event file
//!   floatfx check <SCENE>                      List tracked elements and their strengths
//!   floatfx simulate <SCENE> --events <FILE>   Replay events deterministically
//!   floatfx run <SCENE> [--events <FILE>]      Run the loop in real time until Ctrl+C
//!   floatfx config                             Print the resolved configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use floatfx_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "floatfx",
    about = "Decelerated pointer/orientation parallax, driven headless",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/floatfx/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the float options in the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Marker attribute name
    #[arg(long)]
    pub attribute: Option<String>,

    /// Raw deceleration (normalized to max(1, raw * 100 / 6))
    #[arg(long)]
    pub deceleration: Option<f64>,

    /// Global strength factor
    #[arg(long)]
    pub strength: Option<f64>,

    /// Decimal places in emitted transforms
    #[arg(long)]
    pub precision: Option<u32>,

    /// Direction: -1 inverts travel, 1 follows the input
    #[arg(long, allow_hyphen_values = true)]
    pub direction: Option<i32>,

    /// Fail on non-numeric marker values instead of tracking them as NaN
    #[arg(long)]
    pub strict_markers: bool,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<u32>,
}

impl OptionArgs {
    /// Layer these flags over a loaded config.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(attribute) = &self.attribute {
            config.float.attribute = attribute.clone();
        }
        if let Some(deceleration) = self.deceleration {
            config.float.deceleration = deceleration;
        }
        if let Some(strength) = self.strength {
            config.float.strength = strength;
        }
        if let Some(precision) = self.precision {
            config.float.precision = precision;
        }
        if let Some(direction) = self.direction {
            config.float.direction = direction;
        }
        if self.strict_markers {
            config.float.strict_markers = true;
        }
        if let Some(fps) = self.fps {
            config.frames.fps = fps;
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample scene.json and events.jsonl
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        output: PathBuf,
    },

    /// List the elements a scene would track
    Check {
        /// Path to scene.json
        scene: PathBuf,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Replay recorded events against a scene without sleeping
    Simulate {
        /// Path to scene.json
        scene: PathBuf,

        /// Path to events.jsonl
        #[arg(short, long)]
        events: PathBuf,

        /// Number of frames to render
        #[arg(long, default_value = "120")]
        frames: u64,

        /// Write every rendered frame to this JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Run the loop in real time until Ctrl+C
    Run {
        /// Path to scene.json
        scene: PathBuf,

        /// Events to replay on the wall-clock timeline
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Write every rendered frame to this JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print the resolved configuration
    Config {
        #[command(flatten)]
        options: OptionArgs,

        /// Save the resolved configuration back to the config file
        #[arg(long)]
        save: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    floatfx_common::logging::init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Init { output } => commands::init::run(output),
        Commands::Check { scene, options } => commands::check::run(scene, options.apply(config)),
        Commands::Simulate {
            scene,
            events,
            frames,
            output,
            options,
        } => commands::simulate::run(scene, events, frames, output, options.apply(config)),
        Commands::Run {
            scene,
            events,
            output,
            options,
        } => commands::run::run(scene, events, output, options.apply(config)).await,
        Commands::Config { options, save } => {
            commands::config::run(options.apply(config), cli.config, save)
        }
    }
}
