pub mod lbp;
pub mod scorer;

pub use lbp::uniform_lbp;
pub use scorer::{
    density_histogram, has_skin_texture, measure_texture, texture_histogram, texture_score,
    TextureMeasurement,
};
