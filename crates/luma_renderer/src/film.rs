//! Shared pixel buffer written by render workers.
//!
//! Each pixel is written by exactly one worker, once. Channels are stored
//! as relaxed atomics so a preview may be read while the render runs; such
//! a read can see a mix of finished and untouched pixels.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{Color, ImageBuffer};

#[derive(Debug)]
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<[AtomicU32; 3]>,
}

impl Film {
    /// Create a film with every pixel set to black.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        let pixels = (0..count)
            .map(|_| [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)])
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite the pixel at (x, y).
    pub fn store(&self, x: u32, y: u32, color: Color) {
        let pixel = &self.pixels[self.index(x, y)];
        for (channel, value) in pixel.iter().zip(color.to_array()) {
            channel.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Read the pixel at (x, y).
    pub fn load(&self, x: u32, y: u32) -> Color {
        let [r, g, b] = &self.pixels[self.index(x, y)];
        Color::new(
            f32::from_bits(r.load(Ordering::Relaxed)),
            f32::from_bits(g.load(Ordering::Relaxed)),
            f32::from_bits(b.load(Ordering::Relaxed)),
        )
    }

    /// Copy the current contents into an image.
    pub fn snapshot(&self) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                image.set(x, y, self.load(x, y));
            }
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_film_is_black() {
        let film = Film::new(4, 3);
        assert_eq!(film.load(3, 2), Color::ZERO);
        assert!(film.snapshot().pixels.iter().all(|&c| c == Color::ZERO));
    }

    #[test]
    fn test_store_and_load() {
        let film = Film::new(4, 3);
        let color = Color::new(0.25, -1.5, 1e9);
        film.store(1, 2, color);
        assert_eq!(film.load(1, 2), color);
        assert_eq!(film.snapshot().get(1, 2), color);
        assert_eq!(film.load(2, 1), Color::ZERO);
    }

    #[test]
    fn test_disjoint_concurrent_writes() {
        let film = Film::new(16, 16);
        thread::scope(|s| {
            for row in 0..16u32 {
                let film = &film;
                s.spawn(move || {
                    for x in 0..16 {
                        film.store(x, row, Color::new(x as f32, row as f32, 1.0));
                    }
                });
            }
        });

        let image = film.snapshot();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(image.get(x, y), Color::new(x as f32, y as f32, 1.0));
            }
        }
    }
}
