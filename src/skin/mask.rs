use image::{GrayImage, Luma, RgbImage};

use crate::config::{ColorBox, SkinConfig};
use crate::imaging::{to_hsv, to_ycrcb};

/// Value of a set cell in a binary mask; unset cells are 0.
pub const FOREGROUND: u8 = 255;

/// Marks every pixel whose three channels all fall inside `bounds`.
pub fn in_range(image: &RgbImage, bounds: &ColorBox) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if bounds.contains(image.get_pixel(x, y).0) { Luma([FOREGROUND]) } else { Luma([0]) }
    })
}

/// Cell-wise AND of two same-sized masks.
pub fn intersect(a: &GrayImage, b: &GrayImage) -> GrayImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0] & b.get_pixel(x, y).0[0]])
    })
}

/// Raw skin-candidate mask: a pixel counts only when both the YCrCb box and
/// the HSV box accept it.
pub fn skin_color_mask(image: &RgbImage, config: &SkinConfig) -> GrayImage {
    let by_chroma = in_range(&to_ycrcb(image), &config.ycrcb);
    let by_hue    = in_range(&to_hsv(image), &config.hsv);
    intersect(&by_chroma, &by_hue)
}

/// Number of set cells.
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const SKIN: Rgb<u8> = Rgb([224, 172, 140]);

    #[test]
    fn skin_tone_passes_both_boxes() {
        let img = RgbImage::from_pixel(3, 3, SKIN);
        let mask = skin_color_mask(&img, &SkinConfig::default());
        assert_eq!(count_foreground(&mask), 9);
    }

    #[test]
    fn blue_and_gray_are_rejected() {
        let img = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([30, 60, 200]) } else { Rgb([128, 128, 128]) });
        let mask = skin_color_mask(&img, &SkinConfig::default());
        assert_eq!(count_foreground(&mask), 0);
    }

    #[test]
    fn both_models_must_agree() {
        // Saturated orange-red: hue 7 passes HSV, but Cr = 231 is far
        // outside the chroma box.
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 60, 0]));
        let config = SkinConfig::default();
        assert_eq!(count_foreground(&in_range(&to_hsv(&img), &config.hsv)), 1);
        assert_eq!(count_foreground(&skin_color_mask(&img, &config)), 0);
    }
}
