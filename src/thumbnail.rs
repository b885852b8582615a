use crate::error::{GalleryError, Result};
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;

/// Edge length of the square box thumbnails must fit in.
pub const THUMBNAIL_SIZE: u32 = 150;

/// A shrunk, PNG-encoded image ready to be served to the browser.
#[derive(Clone, Debug)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Shrink `image` to fit within `max_size` x `max_size`, keeping its aspect
/// ratio, and encode the result as PNG.
///
/// Images already inside the box are left at their original size.
///
/// # Arguments
/// * `image` - Decoded source image
/// * `max_size` - Bounding box edge in pixels
///
/// # Returns
/// * `Result<Thumbnail>` - The encoded thumbnail or an encoding error
pub fn make_thumbnail(image: &DynamicImage, max_size: u32) -> Result<Thumbnail> {
    let (width, height) = image.dimensions();

    let resized = if width > max_size || height > max_size {
        image.thumbnail(max_size, max_size)
    } else {
        image.clone()
    };

    let mut png = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(GalleryError::Encode)?;

    Ok(Thumbnail {
        width: resized.width(),
        height: resized.height(),
        png,
    })
}
