pub mod color;
pub mod decode;
pub mod resize;

pub use color::{luma, rgb_to_hsv, rgb_to_ycrcb, to_gray, to_hsv, to_ycrcb};
pub use decode::{decode_image, DecodeError};
pub use resize::resize_bilinear;
