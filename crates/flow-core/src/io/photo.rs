use std::path::Path;

use crate::error::{FlowError, Result};

/// Decoded, downsized photo ready for upload as a texture.
#[derive(Clone, Debug)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
    /// Width / height of the original image.
    pub aspect: f64,
}

/// Pixel size of the image at `path`, read from its header.
pub fn photo_dimensions(path: &Path) -> Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}

/// Width / height of the image at `path`, read without decoding pixels.
pub fn photo_aspect(path: &Path) -> Result<f64> {
    let (w, h) = photo_dimensions(path)?;
    aspect_of(w, h)
}

/// Decode the image at `path` and shrink it to fit `max_edge` pixels.
pub fn load_thumbnail(path: &Path, max_edge: u32) -> Result<Thumbnail> {
    let img = image::open(path)?;
    let aspect = aspect_of(img.width(), img.height())?;
    let thumb = if img.width() > max_edge || img.height() > max_edge {
        img.thumbnail(max_edge, max_edge).to_rgba8()
    } else {
        img.to_rgba8()
    };
    Ok(Thumbnail {
        width: thumb.width(),
        height: thumb.height(),
        rgba: thumb.into_raw(),
        aspect,
    })
}

fn aspect_of(width: u32, height: u32) -> Result<f64> {
    if width == 0 || height == 0 {
        return Err(FlowError::InvalidMetadata(format!(
            "degenerate image size {width}x{height}"
        )));
    }
    Ok(width as f64 / height as f64)
}
