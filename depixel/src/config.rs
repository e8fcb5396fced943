use anyhow::{Context, Result};
use color_conversion::ChannelOrder;
use derivative::Derivative;
use pixelation_dataset::DatasetConfig;
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path};

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub grayscale: Grayscale,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
pub struct Grayscale {
    #[serde(default)]
    #[derivative(Default(value = "ChannelOrder::Rgb"))]
    pub channel_order: ChannelOrder,
}

impl AppConfig {
    /// Load `path`, falling back to defaults when no file is given or it does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(text) => toml::from_str::<AppConfig>(&text)
                .with_context(|| format!("parse config file {} failed", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("read config file {} failed", path.display()))
            }
        }
    }
}
