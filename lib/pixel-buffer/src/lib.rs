//! Pixel buffer primitives shared by the color conversion and pixelation crates.
//!
//! Two layouts are in use and they must never be mixed up:
//! - [`ChannelLast`]: `(height, width, channels)`, what decoders produce and
//!   what grayscale conversion consumes.
//! - [`ChannelFirst`]: `(channels, height, width)`, what pixelation consumes.
//!
//! Conversion between them is always explicit.

pub mod layout;
pub mod sample;

pub use layout::{ChannelFirst, ChannelLast};
pub use sample::Sample;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid buffer shape {shape:?}: {expected}")]
    InvalidShape {
        shape: Vec<usize>,
        expected: &'static str,
    },
}
