use std::io::Cursor;

use image::io::Reader;
use image::{DynamicImage, ImageError, RgbImage};
use thiserror::Error;

use crate::config::DecodeConfig;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("uploaded file is empty")]
    Empty,

    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("decoded image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    #[error("image is {width}x{height}, more than the {max} pixels allowed")]
    TooManyPixels { width: u32, height: u32, max: u64 },
}

/// Decodes uploaded bytes (PNG/JPEG/BMP/GIF) into an 8-bit RGB image.
///
/// Alpha is dropped, not composited. When enabled in `config`, the EXIF
/// orientation tag is applied so the pixels are upright before any analysis.
/// Images above `config.max_pixels` are refused from their header alone.
pub fn decode_image(bytes: &[u8], config: &DecodeConfig) -> Result<RgbImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let (width, height) = reader(bytes)?.into_dimensions()?;
    if u64::from(width) * u64::from(height) > config.max_pixels {
        return Err(DecodeError::TooManyPixels { width, height, max: config.max_pixels });
    }

    let mut img = reader(bytes)?.decode()?;
    if config.apply_exif_orientation {
        img = apply_orientation(img, read_exif_orientation(bytes));
    }

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroArea { width, height });
    }
    Ok(rgb)
}

fn reader(bytes: &[u8]) -> Result<Reader<Cursor<&[u8]>>, ImageError> {
    Ok(Reader::new(Cursor::new(bytes)).with_guessed_format()?)
}

/// Reads EXIF tag 0x0112 (Orientation). Returns 1 (normal) when the container
/// carries no EXIF block or the tag is absent.
pub fn read_exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let reader = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(r)  => r,
        Err(_) => return 1,
    };

    reader
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

/// Applies an EXIF orientation value.
///
/// 1 = normal, 2 = mirrored, 3 = 180°, 4 = flipped vertically,
/// 5 = mirrored + 90° CW, 6 = 90° CW, 7 = mirrored + 270° CW, 8 = 270° CW.
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
