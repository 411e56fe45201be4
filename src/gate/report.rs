use image::RgbImage;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::gate::policy::{decide, GateDecision};
use crate::skin::{measure_skin, SkinMeasurement};
use crate::texture::{measure_texture, TextureMeasurement};

/// Every gate signal for one image, for offline diagnostics.
///
/// Unlike [`evaluate_gates`](crate::gate::evaluate_gates) this always
/// measures texture, even when the skin gate already rejected the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateReport {
    pub width: u32,
    pub height: u32,
    pub skin: SkinMeasurement,
    pub texture: TextureMeasurement,
    pub decision: GateDecision,
}

pub fn inspect(image: &RgbImage, config: &PipelineConfig) -> GateReport {
    let skin = measure_skin(image, &config.skin);
    let texture = measure_texture(image, &config.texture);
    let decision = decide(config, skin.ratio, || texture.score);
    GateReport { width: image.width(), height: image.height(), skin, texture, decision }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{evaluate_gates, GateRejection};
    use crate::test_images::{grainy, BLUE, SKIN};

    #[test]
    fn report_agrees_with_the_gates() {
        let config = PipelineConfig::default();
        for img in [grainy(48, 48, SKIN), grainy(48, 48, BLUE), RgbImage::from_pixel(48, 48, SKIN)] {
            assert_eq!(inspect(&img, &config).decision, evaluate_gates(&img, &config));
        }
    }

    #[test]
    fn texture_is_reported_even_without_skin() {
        let report = inspect(&grainy(48, 48, BLUE), &PipelineConfig::default());
        assert!(matches!(report.decision, GateDecision::Reject(GateRejection::NoSkin { .. })));
        assert!(report.texture.score > 0.08);
        assert_eq!(report.texture.histogram.len(), 10);
    }

    #[test]
    fn serializes_to_json() {
        let report = inspect(&RgbImage::from_pixel(16, 16, SKIN), &PipelineConfig::default());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["width"], 16);
        assert_eq!(value["decision"]["decision"], "reject");
        assert_eq!(value["decision"]["gate"], "insufficient_texture");
    }
}
