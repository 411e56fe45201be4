use image::RgbImage;
use ndarray::{Array4, ArrayView4};

use crate::config::{ChannelOrder, ModelContract};
use crate::imaging::{luma, resize_bilinear};

/// Planes per pixel: three colour channels plus gray.
pub const CHANNELS: usize = 4;

/// One preprocessed sample, laid out NHWC with a batch of one.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInput {
    data: Array4<f32>,
}

impl ModelInput {
    /// `[1, height, width, 4]`.
    pub fn shape(&self) -> [usize; 4] {
        let s = self.data.shape();
        [s[0], s[1], s[2], s[3]]
    }

    pub fn as_array(&self) -> ArrayView4<'_, f32> {
        self.data.view()
    }

    /// Values in row-major NHWC order.
    pub fn to_flat_vec(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Resizes `image` to the contract's input size and packs it as
/// `[colour, colour, colour, gray] / 255`.
///
/// Gray is taken from the resized image, not the original, so it matches the
/// colour planes pixel for pixel.
pub fn build_tensor(image: &RgbImage, contract: &ModelContract) -> ModelInput {
    let (w, h) = (contract.input_width, contract.input_height);
    let resized = resize_bilinear(image, w, h);
    let order = match contract.channel_order {
        ChannelOrder::Rgb => [0, 1, 2],
        ChannelOrder::Bgr => [2, 1, 0],
    };

    let data = Array4::from_shape_fn((1, h as usize, w as usize, CHANNELS), |(_, y, x, c)| {
        let px = resized.get_pixel(x as u32, y as u32).0;
        let v = if c < 3 { px[order[c]] } else { luma(px) };
        f32::from(v) / 255.0
    });
    ModelInput { data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_images::{grainy, SKIN};
    use image::Rgb;

    fn contract(w: u32, h: u32, order: ChannelOrder) -> ModelContract {
        ModelContract { input_width: w, input_height: h, channel_order: order, ..ModelContract::default() }
    }

    #[test]
    fn default_shape_is_224_square() {
        let img = RgbImage::from_pixel(50, 30, SKIN);
        let t = build_tensor(&img, &ModelContract::default());
        assert_eq!(t.shape(), [1, 224, 224, 4]);
        assert_eq!(t.len(), ModelContract::default().input_len());
    }

    #[test]
    fn rgb_then_gray() {
        let img = RgbImage::from_pixel(8, 8, Rgb([255, 0, 51]));
        let t = build_tensor(&img, &contract(4, 4, ChannelOrder::Rgb));
        let a = t.as_array();
        assert_eq!(a[[0, 1, 2, 0]], 1.0);
        assert_eq!(a[[0, 1, 2, 1]], 0.0);
        assert_eq!(a[[0, 1, 2, 2]], 51.0 / 255.0);
        assert_eq!(a[[0, 1, 2, 3]], f32::from(luma([255, 0, 51])) / 255.0);
    }

    #[test]
    fn bgr_swaps_outer_channels() {
        let img = RgbImage::from_pixel(8, 8, Rgb([255, 0, 51]));
        let t = build_tensor(&img, &contract(4, 4, ChannelOrder::Bgr));
        let a = t.as_array();
        assert_eq!(a[[0, 0, 0, 0]], 51.0 / 255.0);
        assert_eq!(a[[0, 0, 0, 2]], 1.0);
        assert_eq!(a[[0, 0, 0, 3]], f32::from(luma([255, 0, 51])) / 255.0);
    }

    #[test]
    fn values_are_normalised() {
        let img = grainy(40, 40, SKIN);
        let t = build_tensor(&img, &contract(16, 16, ChannelOrder::Rgb));
        assert!(t.to_flat_vec().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn flat_layout_is_nhwc() {
        let img = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
        let t = build_tensor(&img, &contract(2, 1, ChannelOrder::Rgb));
        let flat = t.to_flat_vec();
        assert_eq!(flat.len(), 8);
        assert_eq!(&flat[0..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&flat[4..7], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn deterministic_and_idempotent() {
        let img = grainy(97, 61, SKIN);
        let c = contract(32, 32, ChannelOrder::Rgb);
        let first = build_tensor(&img, &c);
        let second = build_tensor(&img, &c);
        assert_eq!(first, second);
        assert_eq!(img, grainy(97, 61, SKIN));
    }
}
