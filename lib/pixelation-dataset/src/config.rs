use crate::{Error, Result};
use color_conversion::ChannelOrder;
use derivative::Derivative;
use derive_setters::Setters;
use image_pixelation::MIN_EXTENT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
#[non_exhaustive]
pub struct DatasetConfig {
    /// Root directory, scanned recursively.
    pub image_dir: PathBuf,

    /// Inclusive `(min, max)` of the pixelated region width.
    #[derivative(Default(value = "(4, 32)"))]
    pub width_range: (usize, usize),

    /// Inclusive `(min, max)` of the pixelated region height.
    #[derivative(Default(value = "(4, 32)"))]
    pub height_range: (usize, usize),

    /// Inclusive `(min, max)` of the block size.
    #[derivative(Default(value = "(4, 16)"))]
    pub size_range: (usize, usize),

    /// File extensions to pick up, compared case-insensitively.
    #[derivative(Default(value = "vec![\"jpg\".to_string()]"))]
    pub extensions: Vec<String>,

    /// Seed for the file order shuffle. `None` shuffles non-reproducibly.
    pub shuffle_seed: Option<u64>,

    /// Channel order of decoded pixels. Not read from config files, the
    /// application supplies it from its own grayscale settings.
    #[serde(skip)]
    #[derivative(Default(value = "ChannelOrder::Rgb"))]
    pub channel_order: ChannelOrder,
}

impl DatasetConfig {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_image_dir(image_dir.into())
    }

    pub fn validate(&self) -> Result<()> {
        check_range(self.width_range, "width_range")?;
        check_range(self.height_range, "height_range")?;
        check_range(self.size_range, "size_range")?;
        Ok(())
    }
}

fn check_range((min, max): (usize, usize), name: &str) -> Result<()> {
    if min < MIN_EXTENT {
        return Err(Error::InvalidRange(format!(
            "Minimum value of {name} must be at least {MIN_EXTENT}. Got {min}"
        )));
    }

    if min > max {
        return Err(Error::InvalidRange(format!(
            "Minimum value of {name} must not be greater than maximum value. Got {min} > {max}"
        )));
    }

    Ok(())
}
