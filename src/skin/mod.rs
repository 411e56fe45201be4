pub mod contour;
pub mod detector;
pub mod mask;
pub mod morphology;

pub use detector::{detect_skin, measure_skin, skin_mask, SkinMeasurement};
pub use morphology::StructuringElement;
