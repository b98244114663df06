use clap::{Parser, ValueEnum};
use log::LevelFilter;
use luma_core::RenderSettings;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments. Render flags override the scene file's
/// `render` block, which overrides the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "luma")]
#[command(about = "A Monte Carlo path tracer", version)]
pub struct Args {
    /// JSON scene file; renders the built-in demo scene when omitted
    pub scene: Option<PathBuf>,

    /// Output file path (.png, or .raw for headerless 8-bit RGB)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Worker thread count (defaults to available parallelism)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Tile edge length in pixels; 1 renders one pixel per task
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Seed for reproducible renders (also seeds the demo scene layout)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable Russian roulette; paths always run to the bounce limit
    #[arg(long)]
    pub no_roulette: bool,

    /// Store linear radiance instead of tone-mapped values
    #[arg(long)]
    pub no_tone_map: bool,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings given on the command line.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            threads: self.threads,
            tile_size: self.tile_size,
            background: None,
            russian_roulette: self.no_roulette.then_some(false),
            tone_map: self.no_tone_map.then_some(false),
            seed: self.seed,
        }
    }
}
