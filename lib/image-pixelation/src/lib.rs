//! Block-mean pixelation of a rectangular region.
//!
//! Buffers are channel-first: `(channels, height, width)`. Besides the
//! corrupted image, every call returns a known mask and a target buffer that
//! holds the ground truth of the corrupted pixels only.

pub mod pixelate;
pub mod region;

pub use pixelate::{MIN_EXTENT, PixelateConfig, Pixelation, pixelate, pixelate_region};
pub use region::{Block, BlockGrid, Region};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid input image shape {shape:?}, expected (channels, height, width)")]
    InvalidShape { shape: Vec<usize> },

    #[error("{name} must be greater than or equal to {min}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("Pixelated area {region} exceeds input image dimensions {image_width}x{image_height}")]
    RegionOutOfBounds {
        region: Region,
        image_width: usize,
        image_height: usize,
    },
}
