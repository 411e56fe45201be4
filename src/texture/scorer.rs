use image::RgbImage;
use serde::Serialize;

use crate::config::TextureConfig;
use crate::imaging::to_gray;
use crate::texture::lbp::uniform_lbp;

/// Texture descriptor of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureMeasurement {
    /// Sum of the histogram over the configured band.
    pub score: f64,
    pub histogram: Vec<f64>,
}

/// Fraction of `codes` falling in each unit-width bin `0..bins`. Codes at or
/// past `bins` are left out of both the counts and the total. Returns all
/// zeros when nothing lands in range.
pub fn density_histogram(codes: &[u8], bins: usize) -> Vec<f64> {
    let mut counts = vec![0usize; bins];
    for &code in codes {
        if let Some(slot) = counts.get_mut(code as usize) {
            *slot += 1;
        }
    }
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; bins];
    }
    counts.into_iter().map(|c| c as f64 / total as f64).collect()
}

fn band_sum(histogram: &[f64], band: (usize, usize)) -> f64 {
    histogram.iter().skip(band.0).take(band.1 + 1 - band.0).sum()
}

/// Density histogram of the uniform LBP codes of the image's gray plane.
pub fn texture_histogram(image: &RgbImage, config: &TextureConfig) -> Vec<f64> {
    let gray = to_gray(image);
    let codes = uniform_lbp(&gray, config.lbp.points, config.lbp.radius);
    density_histogram(&codes, config.bins)
}

pub fn measure_texture(image: &RgbImage, config: &TextureConfig) -> TextureMeasurement {
    let histogram = texture_histogram(image, config);
    let score = band_sum(&histogram, config.band);
    tracing::debug!(texture_score = score, threshold = config.threshold, "measured skin texture");
    TextureMeasurement { score, histogram }
}

pub fn texture_score(image: &RgbImage, config: &TextureConfig) -> f64 {
    measure_texture(image, config).score
}

/// True when the texture score is strictly above `config.threshold`.
pub fn has_skin_texture(image: &RgbImage, config: &TextureConfig) -> bool {
    texture_score(image, config) > config.threshold
}
