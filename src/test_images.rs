//! Synthetic images shared by the unit tests.

use image::{Rgb, RgbImage};

/// Light skin tone; inside both the YCrCb and the HSV skin box.
pub const SKIN: Rgb<u8> = Rgb([224, 172, 140]);
/// Saturated blue; outside both boxes.
pub const BLUE: Rgb<u8> = Rgb([40, 70, 190]);

/// Deterministic per-pixel offset in `-12..=12`.
fn grain(x: u32, y: u32) -> i32 {
    let v = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
    let v = v.wrapping_mul(2_654_435_761);
    ((v >> 16) % 25) as i32 - 12
}

fn shift(base: Rgb<u8>, offset: i32) -> Rgb<u8> {
    Rgb(base.0.map(|c| (c as i32 + offset).clamp(0, 255) as u8))
}

/// `base` with the same brightness grain added to all three channels.
/// Chroma stays put, so a skin base stays skin-coloured while the gray
/// image picks up fine texture.
pub fn grainy(width: u32, height: u32, base: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| shift(base, grain(x, y)))
}
