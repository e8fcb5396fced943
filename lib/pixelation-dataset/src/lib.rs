pub mod config;
pub mod dataset;
pub mod io;

pub use config::DatasetConfig;
pub use dataset::{PixelationSample, RandomImagePixelationDataset};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidRange(String),

    #[error("Index {index} out of range for a dataset of {len} images")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Color conversion error: {0}")]
    ColorConversion(#[from] color_conversion::Error),

    #[error("Pixelation error: {0}")]
    Pixelation(#[from] image_pixelation::Error),
}
