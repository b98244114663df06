//! Tile-based work partitioning.
//!
//! Divides the image into tiles that are rendered independently by the
//! worker pool. A tile size of 1 gives one task per pixel.

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate of the tile's top-left corner
    pub y: u32,
    /// Width of the tile in pixels
    pub width: u32,
    /// Height of the tile in pixels
    pub height: u32,
    /// Index of this tile in the render order
    pub index: usize,
}

impl Tile {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Image coordinates of every pixel in the tile, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Default tile size in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 64;

/// Generate tiles for an image, sorted in spiral order from the center.
///
/// Border tiles are clipped to the image. A zero tile size yields no tiles.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    if tile_size == 0 {
        return Vec::new();
    }

    let mut tiles = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let tw = tile_size.min(width - x);
            let th = tile_size.min(height - y);
            tiles.push(Tile::new(x, y, tw, th, tiles.len()));
            x = x.saturating_add(tile_size);
        }
        y = y.saturating_add(tile_size);
    }

    sort_spiral(&mut tiles, width, height);

    // Indices follow render order
    for (i, tile) in tiles.iter_mut().enumerate() {
        tile.index = i;
    }

    tiles
}

/// Sort tiles by distance from the image center.
fn sort_spiral(tiles: &mut [Tile], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |t: &Tile| {
        let dx = t.x as f32 + t.width as f32 / 2.0 - center_x;
        let dy = t.y as f32 + t.height as f32 / 2.0 - center_y;
        dx * dx + dy * dy
    };

    // Stable sort keeps row-major order between equidistant tiles
    tiles.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_covers_exactly(tiles: &[Tile], width: u32, height: u32) {
        let mut seen = HashSet::new();
        for tile in tiles {
            for pixel in tile.pixels() {
                assert!(pixel.0 < width && pixel.1 < height, "{pixel:?} outside image");
                assert!(seen.insert(pixel), "{pixel:?} covered twice");
            }
        }
        assert_eq!(seen.len(), (width * height) as usize);
    }

    #[test]
    fn test_generate_tiles_exact_fit() {
        let tiles = generate_tiles(128, 128, 64);
        assert_eq!(tiles.len(), 4); // 2x2 grid

        let total_pixels: u32 = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
        assert_covers_exactly(&tiles, 128, 128);
    }

    #[test]
    fn test_generate_tiles_partial_fit() {
        let tiles = generate_tiles(100, 70, 64);
        assert_eq!(tiles.len(), 4); // 2x2 grid with clipped borders
        assert_covers_exactly(&tiles, 100, 70);
    }

    #[test]
    fn test_single_pixel_tiles() {
        let tiles = generate_tiles(7, 5, 1);
        assert_eq!(tiles.len(), 35);
        assert!(tiles.iter().all(|t| t.pixel_count() == 1));
        assert_covers_exactly(&tiles, 7, 5);
    }

    #[test]
    fn test_spiral_order() {
        let tiles = generate_tiles(192, 192, 64);
        assert_eq!(tiles.len(), 9); // 3x3 grid

        // First tile should be the center one
        let first = &tiles[0];
        assert_eq!((first.x, first.y), (64, 64));

        // Corners come last
        for tile in &tiles[5..] {
            assert!(tile.x != 64 && tile.y != 64);
        }
    }

    #[test]
    fn test_indices_follow_order() {
        let tiles = generate_tiles(300, 200, 32);
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.index, i);
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(generate_tiles(0, 10, 8).is_empty());
        assert!(generate_tiles(10, 0, 8).is_empty());
        assert!(generate_tiles(10, 10, 0).is_empty());
    }
}
