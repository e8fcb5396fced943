//! Colorimetric grayscale conversion for sRGB images.
//!
//! Input buffers are channel-last: `(height, width)` or
//! `(height, width, channels)`. Luminance is mixed in linear light and
//! re-encoded with the sRGB transfer curve, so the result matches what a
//! standard sRGB grayscale image of the same scene would look like.

pub mod grayscale;
pub mod srgb;

pub use grayscale::{
    BGR_COEFFICIENTS, ChannelOrder, GrayscaleConfig, RGB_COEFFICIENTS, gray_level, is_grayscale,
    to_grayscale,
};
pub use srgb::{linear_to_srgb, srgb_to_linear};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid input image shape {shape:?}, expected (H, W), (H, W, 1) or (H, W, 3)")]
    InvalidShape { shape: Vec<usize> },

    #[error("Input image values must be in the range [0, 255], found {value}")]
    ValueOutOfRange { value: f64 },

    #[error("Invalid channel order {0:?}, must be either 'RGB' or 'BGR'")]
    InvalidChannelOrder(String),
}
