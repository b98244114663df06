//! Parallel tile renderer.
//!
//! A fixed pool of worker threads drains a shared tile queue. For every
//! pixel of a claimed tile a worker averages `samples_per_pixel` jittered
//! camera paths, tone-maps the result once and stores it in the film.

use std::time::Instant;

use luma_core::RenderSettings;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::film::Film;
use crate::integrator::{DEFAULT_BACKGROUND, DEFAULT_MAX_DEPTH};
use crate::queue::{Progress, TaskQueue};
use crate::tile::{generate_tiles, Tile, DEFAULT_TILE_SIZE};
use crate::tonemap::filmic_tone_map;
use crate::{Camera, Color, Integrator, RenderError, RenderResult, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum path length in bounces
    pub max_depth: u32,
    /// Worker thread count
    pub threads: usize,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Radiance of escaped paths
    pub background: Color,
    pub russian_roulette: bool,
    /// Apply the filmic tone-map before storing pixels
    pub tone_map: bool,
    /// Fixed seed for reproducible output; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            samples_per_pixel: 128,
            max_depth: DEFAULT_MAX_DEPTH,
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            tile_size: DEFAULT_TILE_SIZE,
            background: DEFAULT_BACKGROUND,
            russian_roulette: true,
            tone_map: true,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Overlay the fields set in `settings`.
    pub fn apply(&mut self, settings: &RenderSettings) {
        if let Some(width) = settings.width {
            self.width = width;
        }
        if let Some(height) = settings.height {
            self.height = height;
        }
        if let Some(samples) = settings.samples_per_pixel {
            self.samples_per_pixel = samples;
        }
        if let Some(max_depth) = settings.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(threads) = settings.threads {
            self.threads = threads;
        }
        if let Some(tile_size) = settings.tile_size {
            self.tile_size = tile_size;
        }
        if let Some(background) = settings.background {
            self.background = Color::from(background);
        }
        if let Some(enabled) = settings.russian_roulette {
            self.russian_roulette = enabled;
        }
        if let Some(enabled) = settings.tone_map {
            self.tone_map = enabled;
        }
        if settings.seed.is_some() {
            self.seed = settings.seed;
        }
    }

    /// Build a config from defaults overlaid with `settings`.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let mut config = Self::default();
        config.apply(settings);
        config
    }

    pub fn validate(&self) -> RenderResult<()> {
        let checks = [
            (self.width == 0, "width must be positive"),
            (self.height == 0, "height must be positive"),
            (self.samples_per_pixel == 0, "samples per pixel must be positive"),
            (self.threads == 0, "thread count must be positive"),
            (self.tile_size == 0, "tile size must be positive"),
        ];
        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(RenderError::InvalidConfig((*message).to_string())),
            None => Ok(()),
        }
    }

    pub fn integrator(&self) -> Integrator {
        Integrator::new(self.max_depth)
            .with_background(self.background)
            .with_russian_roulette(self.russian_roulette)
    }
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[y as usize * self.width as usize + x as usize] = color;
    }

    /// Interleaved 8-bit RGB, row-major from the top-left pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend(color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8));
        }
        bytes
    }
}

/// Average `samples` radiance estimates through pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    integrator: &Integrator,
    x: u32,
    y: u32,
    samples: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.jittered_ray(x, y, rng);
        pixel_color += integrator.radiance(scene, &ray, rng);
    }

    pixel_color / samples.max(1) as f32
}

/// Seed for one tile, independent of which worker claims it.
fn tile_seed(seed: u64, tile: &Tile) -> u64 {
    seed ^ (tile.index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// One frame in flight: the tile queue, the film and everything workers
/// read while rendering.
///
/// [`RenderSession::progress`] and [`RenderSession::preview`] may be called
/// from another thread while [`RenderSession::run`] is active.
pub struct RenderSession<'a> {
    scene: &'a Scene,
    camera: Camera,
    config: RenderConfig,
    integrator: Integrator,
    queue: TaskQueue<Tile>,
    film: Film,
}

impl<'a> RenderSession<'a> {
    /// Prepare a render. The camera is resized to the configured resolution.
    pub fn new(scene: &'a Scene, camera: &Camera, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;

        let mut camera = camera.clone().with_resolution(config.width, config.height);
        camera.initialize();

        let tiles = generate_tiles(config.width, config.height, config.tile_size);
        log::debug!(
            "Prepared {} tiles of up to {}x{} pixels",
            tiles.len(),
            config.tile_size,
            config.tile_size
        );

        Ok(Self {
            scene,
            camera,
            integrator: config.integrator(),
            queue: TaskQueue::new(tiles),
            film: Film::new(config.width, config.height),
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every tile on a dedicated pool of `threads` workers.
    ///
    /// Returns once all tiles are done. Calling it again renders nothing.
    pub fn run(&self) -> RenderResult<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("luma-worker-{i}"))
            .build()?;

        log::info!(
            "Rendering {}x{} at {} spp, {} threads, {} primitives",
            self.config.width,
            self.config.height,
            self.config.samples_per_pixel,
            self.config.threads,
            self.scene.len()
        );

        let start = Instant::now();
        pool.scope(|s| {
            for worker in 0..self.config.threads {
                s.spawn(move |_| self.work(worker));
            }
        });

        log::info!("Render finished in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Worker loop: claim tiles until the queue runs dry.
    fn work(&self, worker: usize) {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut tiles = 0;
        while let Some(tile) = self.queue.claim() {
            if let Some(seed) = self.config.seed {
                rng = StdRng::seed_from_u64(tile_seed(seed, tile));
            }
            self.render_tile(tile, &mut rng);
            tiles += 1;
        }

        log::debug!("Worker {worker} rendered {tiles} tiles");
    }

    fn render_tile(&self, tile: &Tile, rng: &mut StdRng) {
        for (x, y) in tile.pixels() {
            let color = render_pixel(
                &self.camera,
                self.scene,
                &self.integrator,
                x,
                y,
                self.config.samples_per_pixel,
                rng,
            );
            let color = if self.config.tone_map {
                filmic_tone_map(color)
            } else {
                color
            };
            self.film.store(x, y, color);
        }
    }

    /// Tiles claimed so far.
    pub fn progress(&self) -> Progress {
        self.queue.progress()
    }

    /// Snapshot of the film, possibly partially rendered.
    pub fn preview(&self) -> ImageBuffer {
        self.film.snapshot()
    }

    /// Finish the session and take the final image.
    pub fn into_image(self) -> ImageBuffer {
        self.film.snapshot()
    }
}

/// Render a full frame and return the image.
pub fn render(scene: &Scene, camera: &Camera, config: RenderConfig) -> RenderResult<ImageBuffer> {
    let session = RenderSession::new(scene, camera, config)?;
    session.run()?;
    Ok(session.into_image())
}
