use std::time::Instant;

use image::RgbImage;

use crate::classifier::SkinClassifier;
use crate::config::{ConfigError, PipelineConfig};
use crate::gate::{evaluate_gates, GateDecision};
use crate::imaging::decode_image;
use crate::pipeline::{PredictError, Prediction};
use crate::tensor::build_tensor;

/// Decode → skin gate → texture gate → tensor → classifier → prediction.
///
/// Holds the configuration and the loaded classifier; both are read-only
/// after construction, so a `Pipeline` can be shared across threads.
pub struct Pipeline<C> {
    config: PipelineConfig,
    classifier: C,
}

impl<C: SkinClassifier> Pipeline<C> {
    /// Validates `config` and checks that `classifier` was built for it.
    pub fn new(config: PipelineConfig, classifier: C) -> Result<Pipeline<C>, ConfigError> {
        config.validate()?;

        if let Some(contract) = classifier.contract() {
            if *contract != config.model {
                return Err(ConfigError::ContractMismatch(format!(
                    "model expects {:?}, config provides {:?}",
                    contract, config.model
                )));
            }
        }
        if let Some(labels) = classifier.labels() {
            if labels != config.labels.as_slice() {
                return Err(ConfigError::ContractMismatch(format!(
                    "model labels {:?} differ from configured labels {:?}",
                    labels, config.labels
                )));
            }
        }
        if let Some(len) = classifier.input_len() {
            if len != config.model.input_len() {
                return Err(ConfigError::ContractMismatch(format!(
                    "model takes {} inputs, a {}x{}x4 tensor has {}",
                    len, config.model.input_width, config.model.input_height, config.model.input_len()
                )));
            }
        }

        Ok(Pipeline { config, classifier })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Full request path: `None` means no file was attached.
    pub fn predict_upload(&self, upload: Option<&[u8]>) -> Result<Prediction, PredictError> {
        let bytes = upload.ok_or(PredictError::MissingInput)?;
        let image = decode_image(bytes, &self.config.decode)?;
        self.predict_image(&image)
    }

    /// Gates `image` and, if it passes both, classifies it. Exactly one
    /// classifier call on acceptance and none on rejection.
    pub fn predict_image(&self, image: &RgbImage) -> Result<Prediction, PredictError> {
        let started = Instant::now();
        let (width, height) = image.dimensions();

        let (skin_ratio, texture_score) = match evaluate_gates(image, &self.config) {
            GateDecision::Reject(rejection) => {
                tracing::info!(
                    width,
                    height,
                    rejection = %rejection,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "image rejected before classification"
                );
                return Ok(Prediction::unknown());
            }
            GateDecision::Accept { skin_ratio, texture_score } => (skin_ratio, texture_score),
        };

        let input = build_tensor(image, &self.config.model);
        let probabilities = self.classifier.predict(&input)?;
        let prediction = Prediction::from_probabilities(&probabilities, &self.config.labels)?;

        tracing::info!(
            width,
            height,
            skin_ratio,
            texture_score,
            label = %prediction.label,
            confidence = prediction.confidence,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classified image"
        );
        Ok(prediction)
    }
}
