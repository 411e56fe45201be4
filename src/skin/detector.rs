use image::{GrayImage, RgbImage};
use serde::Serialize;

use crate::config::SkinConfig;
use crate::skin::contour::{external_contours, largest_by_area};
use crate::skin::mask::skin_color_mask;
use crate::skin::morphology::{close, open, StructuringElement};

/// What the skin presence detector saw in one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinMeasurement {
    /// Largest external skin region's area over the frame area.
    pub ratio: f64,
    /// Enclosed area of that region, in pixels².
    pub largest_area: f64,
    /// Number of external skin regions after cleanup.
    pub region_count: usize,
}

/// Colour mask closed (to fill gaps inside skin) and then opened (to drop
/// isolated false positives). Closing runs first so real skin regions are not
/// eroded before their gaps are filled.
pub fn skin_mask(image: &RgbImage, config: &SkinConfig) -> GrayImage {
    let m = &config.morphology;
    let element = StructuringElement::ellipse(m.kernel_size);
    let mask = skin_color_mask(image, config);
    let mask = close(&mask, &element, m.close_iterations);
    open(&mask, &element, m.open_iterations)
}

pub fn measure_skin(image: &RgbImage, config: &SkinConfig) -> SkinMeasurement {
    let mask = skin_mask(image, config);
    let contours = external_contours(&mask);
    let frame_area = image.width() as f64 * image.height() as f64;

    let largest_area = largest_by_area(&contours).map(|(_, area)| area).unwrap_or(0.0);
    let ratio = if frame_area > 0.0 { largest_area / frame_area } else { 0.0 };

    let measurement = SkinMeasurement { ratio, largest_area, region_count: contours.len() };
    tracing::debug!(
        skin_ratio = measurement.ratio,
        regions = measurement.region_count,
        threshold = config.area_threshold,
        "measured largest skin region"
    );
    measurement
}

/// True when the largest skin-coloured region covers more than
/// `config.area_threshold` of the frame.
pub fn detect_skin(image: &RgbImage, config: &SkinConfig) -> bool {
    measure_skin(image, config).ratio > config.area_threshold
}
