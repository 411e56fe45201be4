//! 8-bit colour-space conversions.
//!
//! These follow the fixed-point conventions of the classic computer-vision
//! toolchain the skin model and gate thresholds were calibrated against:
//! BT.601 luma with 14-bit coefficients, YCrCb with chroma offset 128, and
//! HSV with hue stored in half-degrees (0..180) so it fits a byte.
use image::{GrayImage, Luma, Rgb, RgbImage};

const SHIFT: u32 = 14;
const R2Y: i32 = 4899;
const G2Y: i32 = 9617;
const B2Y: i32 = 1868;
const CR_SCALE: i32 = 11682;
const CB_SCALE: i32 = 9241;
const CHROMA_DELTA: i32 = 128 << SHIFT;

const HSV_SHIFT: u32 = 12;
const HUE_RANGE: i32 = 180;

#[inline]
fn descale(x: i32, n: u32) -> i32 {
    (x + (1 << (n - 1))) >> n
}

#[inline]
fn saturate_u8(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

/// BT.601 luma of one RGB pixel.
#[inline]
pub fn luma(px: [u8; 3]) -> u8 {
    let [r, g, b] = px.map(i32::from);
    saturate_u8(descale(r * R2Y + g * G2Y + b * B2Y, SHIFT))
}

/// RGB → (Y, Cr, Cb).
#[inline]
pub fn rgb_to_ycrcb(px: [u8; 3]) -> [u8; 3] {
    let [r, _, b] = px.map(i32::from);
    let y = i32::from(luma(px));
    let cr = descale((r - y) * CR_SCALE + CHROMA_DELTA, SHIFT);
    let cb = descale((b - y) * CB_SCALE + CHROMA_DELTA, SHIFT);
    [y as u8, saturate_u8(cr), saturate_u8(cb)]
}

/// RGB → (H, S, V) with H in half-degrees.
#[inline]
pub fn rgb_to_hsv(px: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = px.map(i32::from);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = if v == 0 {
        0
    } else {
        let sdiv = ((255 << HSV_SHIFT) as f64 / v as f64).round() as i32;
        descale(diff * sdiv, HSV_SHIFT)
    };

    let h = if diff == 0 {
        0
    } else {
        let raw = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let hdiv = ((HUE_RANGE << HSV_SHIFT) as f64 / (6.0 * diff as f64)).round() as i32;
        let h = descale(raw * hdiv, HSV_SHIFT);
        if h < 0 { h + HUE_RANGE } else { h }
    };

    [saturate_u8(h), saturate_u8(s), v as u8]
}

/// Grayscale copy of an RGB image using BT.601 luma.
pub fn to_gray(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luma(image.get_pixel(x, y).0)])
    })
}

pub fn to_ycrcb(image: &RgbImage) -> RgbImage {
    map_pixels(image, rgb_to_ycrcb)
}

pub fn to_hsv(image: &RgbImage) -> RgbImage {
    map_pixels(image, rgb_to_hsv)
}

fn map_pixels(image: &RgbImage, f: fn([u8; 3]) -> [u8; 3]) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| Rgb(f(image.get_pixel(x, y).0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_primaries() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([255, 0, 0]), 76);
        assert_eq!(luma([0, 255, 0]), 150);
        assert_eq!(luma([0, 0, 255]), 29);
    }

    #[test]
    fn neutral_gray_has_centred_chroma() {
        assert_eq!(rgb_to_ycrcb([90, 90, 90]), [90, 128, 128]);
    }

    #[test]
    fn warm_skin_tone_sits_inside_the_chroma_box() {
        let [_, cr, cb] = rgb_to_ycrcb([224, 172, 140]);
        assert!((133..=173).contains(&cr), "cr = {}", cr);
        assert!((77..=127).contains(&cb), "cb = {}", cb);
    }

    #[test]
    fn hue_uses_half_degrees() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
        // Magenta (300°) wraps through the negative branch.
        assert_eq!(rgb_to_hsv([255, 0, 255])[0], 150);
    }

    #[test]
    fn achromatic_pixels_have_zero_hue_and_saturation() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
    }

    #[test]
    fn warm_skin_tone_hsv() {
        // 22.9° hue, saturation 84/224.
        assert_eq!(rgb_to_hsv([224, 172, 140]), [11, 96, 224]);
    }

    #[test]
    fn gray_image_matches_per_pixel_luma() {
        let img = RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 60) as u8, (y * 60) as u8, 17]));
        let gray = to_gray(&img);
        for (x, y, p) in img.enumerate_pixels() {
            assert_eq!(gray.get_pixel(x, y).0[0], luma(p.0));
        }
    }
}
