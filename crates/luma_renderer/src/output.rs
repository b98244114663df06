//! Writing finished images to disk.

use std::fs;
use std::path::Path;

use crate::{ImageBuffer, RenderError, RenderResult};

/// Write interleaved 8-bit RGB bytes with no header.
pub fn write_raw_rgb<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    fs::write(path, image.to_rgb8())?;
    Ok(())
}

/// Write an 8-bit RGB PNG.
pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    image::save_buffer(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )?;
    Ok(())
}

/// Save using the format implied by the file extension: `.png`, or `.raw`
/// (also used when there is no extension).
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => save_png(image, path)?,
        Some("raw") | None => write_raw_rgb(image, path)?,
        Some(other) => return Err(RenderError::UnsupportedFormat(other.to_string())),
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
