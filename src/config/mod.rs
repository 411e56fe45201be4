pub mod pipeline_config;

pub use pipeline_config::{
    ChannelOrder, ColorBox, ConfigError, DecodeConfig, LbpConfig, ModelContract, MorphologyConfig,
    PipelineConfig, SkinConfig, TextureConfig,
};
