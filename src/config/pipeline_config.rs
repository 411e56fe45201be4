use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read or write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("classifier does not match the pipeline: {0}")]
    ContractMismatch(String),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

// ---------------------------------------------------------------------------
// Model contract
// ---------------------------------------------------------------------------

/// Order of the three colour planes in the model input. Grayscale is always
/// appended as the fourth plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Shape and layout of the tensor the classifier was trained on.
///
/// Stored both in the pipeline config and (optionally) in the model file's
/// metadata, so a model and a config that disagree are caught at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelContract {
    /// Bumped whenever the preprocessing changes in a way that invalidates
    /// previously trained models.
    pub version: u32,
    pub input_width: u32,
    pub input_height: u32,
    pub channel_order: ChannelOrder,
}

impl Default for ModelContract {
    fn default() -> Self {
        ModelContract {
            version: 1,
            input_width: 224,
            input_height: 224,
            channel_order: ChannelOrder::Rgb,
        }
    }
}

impl ModelContract {
    /// Number of values in one input sample: width × height × 4 channels.
    pub fn input_len(&self) -> usize {
        self.input_width as usize * self.input_height as usize * 4
    }
}

// ---------------------------------------------------------------------------
// Skin presence
// ---------------------------------------------------------------------------

/// Inclusive per-channel bounds over an 8-bit three-channel colour space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBox {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorBox {
    pub fn contains(&self, px: [u8; 3]) -> bool {
        (0..3).all(|c| px[c] >= self.lower[c] && px[c] <= self.upper[c])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Side of the elliptical structuring element; must be odd.
    pub kernel_size: u32,
    pub close_iterations: u32,
    pub open_iterations: u32,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        MorphologyConfig { kernel_size: 7, close_iterations: 3, open_iterations: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    /// Box over (Y, Cr, Cb).
    pub ycrcb: ColorBox,
    /// Box over (H, S, V), hue in 8-bit half-degrees (0..180).
    pub hsv: ColorBox,
    pub morphology: MorphologyConfig,
    /// Largest skin region must cover strictly more than this fraction of the frame.
    pub area_threshold: f64,
}

impl Default for SkinConfig {
    fn default() -> Self {
        SkinConfig {
            ycrcb: ColorBox { lower: [0, 133, 77], upper: [255, 173, 127] },
            hsv:   ColorBox { lower: [0, 40, 0],   upper: [25, 255, 255] },
            morphology: MorphologyConfig::default(),
            area_threshold: 0.05,
        }
    }
}

// ---------------------------------------------------------------------------
// Texture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LbpConfig {
    /// Number of circularly symmetric sample points.
    pub points: u32,
    pub radius: f64,
}

impl Default for LbpConfig {
    fn default() -> Self {
        LbpConfig { points: 8, radius: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub lbp: LbpConfig,
    /// Unit-width histogram bins covering codes `0..bins`.
    pub bins: usize,
    /// First and last (inclusive) bin summed into the texture score.
    pub band: (usize, usize),
    /// Score must be strictly greater than this to pass.
    pub threshold: f64,
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig { lbp: LbpConfig::default(), bins: 10, band: (1, 3), threshold: 0.08 }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Rotate/flip according to the EXIF orientation tag before analysis.
    pub apply_exif_orientation: bool,
    /// Largest accepted `width * height`, checked from the header before any
    /// pixel data is decoded.
    pub max_pixels: u64,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig { apply_exif_orientation: true, max_pixels: 50_000_000 }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Every tunable of the gating-and-inference pipeline.
///
/// `PipelineConfig::default()` reproduces the constants the shipped skin-type
/// model was trained and calibrated with; a JSON file only needs to name the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub model: ModelContract,
    /// Class labels in the order of the classifier's output vector.
    pub labels: Vec<String>,
    pub skin: SkinConfig,
    pub texture: TextureConfig,
    pub decode: DecodeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            model: ModelContract::default(),
            labels: vec!["dry".into(), "normal".into(), "oily".into()],
            skin: SkinConfig::default(),
            texture: TextureConfig::default(),
            decode: DecodeConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads and validates a config from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: PipelineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.input_width == 0 || self.model.input_height == 0 {
            return Err(ConfigError::invalid("model", "input size must be non-zero"));
        }
        if self.labels.is_empty() {
            return Err(ConfigError::invalid("labels", "at least one label is required"));
        }
        if self.labels.iter().any(|l| l == crate::pipeline::UNKNOWN_LABEL) {
            return Err(ConfigError::invalid("labels", "`unknown` is reserved for gate rejections"));
        }

        let m = &self.skin.morphology;
        if m.kernel_size == 0 || m.kernel_size % 2 == 0 {
            return Err(ConfigError::invalid(
                "skin.morphology.kernel_size",
                format!("must be a positive odd number, got {}", m.kernel_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.skin.area_threshold) {
            return Err(ConfigError::invalid("skin.area_threshold", "must lie in [0, 1]"));
        }

        if self.decode.max_pixels == 0 {
            return Err(ConfigError::invalid("decode.max_pixels", "must be non-zero"));
        }

        let t = &self.texture;
        if t.lbp.points == 0 || t.lbp.points > 32 {
            return Err(ConfigError::invalid("texture.lbp.points", "must be between 1 and 32"));
        }
        if !(t.lbp.radius > 0.0) {
            return Err(ConfigError::invalid("texture.lbp.radius", "must be positive"));
        }
        if t.bins == 0 {
            return Err(ConfigError::invalid("texture.bins", "must be non-zero"));
        }
        let (first, last) = t.band;
        if first > last || last >= t.bins {
            return Err(ConfigError::invalid(
                "texture.band",
                format!("({}, {}) is not a bin range within 0..{}", first, last, t.bins),
            ));
        }
        if !(0.0..=1.0).contains(&t.threshold) {
            return Err(ConfigError::invalid("texture.threshold", "must lie in [0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calibrated_constants() {
        let c = PipelineConfig::default();
        assert_eq!((c.model.input_width, c.model.input_height), (224, 224));
        assert_eq!(c.labels, vec!["dry", "normal", "oily"]);
        assert_eq!(c.skin.area_threshold, 0.05);
        assert_eq!(c.skin.morphology, MorphologyConfig { kernel_size: 7, close_iterations: 3, open_iterations: 2 });
        assert_eq!(c.texture.lbp, LbpConfig { points: 8, radius: 1.0 });
        assert_eq!(c.texture.band, (1, 3));
        assert_eq!(c.texture.threshold, 0.08);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c: PipelineConfig =
            serde_json::from_str(r#"{ "skin": { "area_threshold": 0.2 } }"#).unwrap();
        assert_eq!(c.skin.area_threshold, 0.2);
        assert_eq!(c.skin.morphology.kernel_size, 7);
        assert_eq!(c.texture, TextureConfig::default());
    }

    #[test]
    fn even_kernel_is_rejected() {
        let mut c = PipelineConfig::default();
        c.skin.morphology.kernel_size = 6;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "skin.morphology.kernel_size", .. })
        ));
    }

    #[test]
    fn band_outside_histogram_is_rejected() {
        let mut c = PipelineConfig::default();
        c.texture.band = (1, 10);
        assert!(c.validate().is_err());
    }

    #[test]
    fn reserved_label_is_rejected() {
        let mut c = PipelineConfig::default();
        c.labels.push("unknown".into());
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_pixel_cap_is_rejected() {
        let mut c = PipelineConfig::default();
        c.decode.max_pixels = 0;
        assert!(matches!(c.validate(), Err(ConfigError::Invalid { field: "decode.max_pixels", .. })));
    }

    #[test]
    fn color_box_bounds_are_inclusive() {
        let b = ColorBox { lower: [0, 133, 77], upper: [255, 173, 127] };
        assert!(b.contains([10, 133, 127]));
        assert!(b.contains([255, 173, 77]));
        assert!(!b.contains([10, 132, 100]));
        assert!(!b.contains([10, 150, 128]));
    }
}
