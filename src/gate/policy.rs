use std::fmt;

use image::RgbImage;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::skin::measure_skin;
use crate::texture::measure_texture;

/// Why an image was turned away before classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum GateRejection {
    /// Largest skin region too small.
    NoSkin { ratio: f64 },
    /// Skin present, but too smooth to carry skin-type information.
    InsufficientTexture { score: f64 },
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateRejection::NoSkin { .. } => write!(f, "no_skin"),
            GateRejection::InsufficientTexture { .. } => write!(f, "insufficient_texture"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Accept { skin_ratio: f64, texture_score: f64 },
    Reject(GateRejection),
}

impl GateDecision {
    pub fn is_accept(&self) -> bool {
        matches!(self, GateDecision::Accept { .. })
    }
}

/// Runs the skin gate and, only if it passes, the texture gate.
pub fn evaluate_gates(image: &RgbImage, config: &PipelineConfig) -> GateDecision {
    let skin_ratio = measure_skin(image, &config.skin).ratio;
    decide(config, skin_ratio, || measure_texture(image, &config.texture).score)
}

/// Applies both thresholds. `texture_score` is only called once the skin
/// gate has passed.
pub(crate) fn decide(
    config: &PipelineConfig,
    skin_ratio: f64,
    texture_score: impl FnOnce() -> f64,
) -> GateDecision {
    if skin_ratio <= config.skin.area_threshold {
        return GateDecision::Reject(GateRejection::NoSkin { ratio: skin_ratio });
    }

    let score = texture_score();
    if score <= config.texture.threshold {
        return GateDecision::Reject(GateRejection::InsufficientTexture { score });
    }

    GateDecision::Accept { skin_ratio, texture_score: score }
}

pub fn accept(image: &RgbImage, config: &PipelineConfig) -> bool {
    evaluate_gates(image, config).is_accept()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_images::{grainy, BLUE, SKIN};

    #[test]
    fn non_skin_is_rejected_even_with_texture() {
        let img = grainy(64, 64, BLUE);
        let decision = evaluate_gates(&img, &PipelineConfig::default());
        assert_eq!(decision, GateDecision::Reject(GateRejection::NoSkin { ratio: 0.0 }));
    }

    #[test]
    fn flat_skin_fails_the_texture_gate() {
        let img = RgbImage::from_pixel(64, 64, SKIN);
        match evaluate_gates(&img, &PipelineConfig::default()) {
            GateDecision::Reject(GateRejection::InsufficientTexture { score }) => assert!(score < 0.08),
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn textured_skin_is_accepted() {
        let img = grainy(64, 64, SKIN);
        match evaluate_gates(&img, &PipelineConfig::default()) {
            GateDecision::Accept { skin_ratio, texture_score } => {
                assert!(skin_ratio > 0.9);
                assert!(texture_score > 0.08);
            }
            other => panic!("unexpected decision {other:?}"),
        }
        assert!(accept(&img, &PipelineConfig::default()));
    }

    #[test]
    fn texture_is_not_measured_without_skin() {
        let config = PipelineConfig::default();
        let decision = decide(&config, 0.01, || panic!("texture measured"));
        assert_eq!(decision, GateDecision::Reject(GateRejection::NoSkin { ratio: 0.01 }));
    }

    #[test]
    fn rejection_names() {
        assert_eq!(GateRejection::NoSkin { ratio: 0.0 }.to_string(), "no_skin");
        assert_eq!(
            GateRejection::InsufficientTexture { score: 0.0 }.to_string(),
            "insufficient_texture"
        );
    }
}
