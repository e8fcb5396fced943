use crate::{Error, Result, linear_to_srgb, srgb_to_linear};
use derivative::Derivative;
use derive_setters::Setters;
use ndarray::{Array3, ArrayBase, Axis, Data, Dimension, Ix3};
use pixel_buffer::{ChannelLast, Sample};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Rec. 709 luminance weights for R, G, B.
pub const RGB_COEFFICIENTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Same weights for buffers stored B, G, R.
pub const BGR_COEFFICIENTS: [f32; 3] = [0.0722, 0.7152, 0.2126];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum ChannelOrder {
    #[default]
    #[strum(serialize = "RGB")]
    #[serde(rename = "RGB")]
    Rgb,

    #[strum(serialize = "BGR")]
    #[serde(rename = "BGR")]
    Bgr,
}

impl ChannelOrder {
    /// Parse `"RGB"` or `"BGR"`.
    pub fn parse(order: &str) -> Result<Self> {
        Self::from_str(order).map_err(|_| Error::InvalidChannelOrder(order.to_string()))
    }

    pub fn coefficients(&self) -> [f32; 3] {
        match self {
            Self::Rgb => RGB_COEFFICIENTS,
            Self::Bgr => BGR_COEFFICIENTS,
        }
    }
}

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GrayscaleConfig {
    #[derivative(Default(value = "ChannelOrder::Rgb"))]
    pub channel_order: ChannelOrder,
}

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply<S, D, T>(&self, image: &ArrayBase<S, D>) -> Result<Array3<T>>
    where
        S: Data<Elem = T>,
        D: Dimension,
        T: Sample,
    {
        to_grayscale(image, self.channel_order)
    }
}

/// `(H, W)` and `(H, W, 1)` buffers are already single-channel.
pub fn is_grayscale(shape: &[usize]) -> bool {
    matches!(shape, [_, _] | [_, _, 1])
}

/// Gamma-correct gray level in `[0, 255]` for one pixel given in `[0, 255]`.
pub fn gray_level(pixel: [f32; 3], channel_order: ChannelOrder) -> f32 {
    let coefficients = channel_order.coefficients();
    let linear = pixel.map(|v| srgb_to_linear(v / 255.0));
    let luminance =
        linear[0] * coefficients[0] + linear[1] * coefficients[1] + linear[2] * coefficients[2];

    linear_to_srgb(luminance) * 255.0
}

/// Convert a channel-last image to single-channel `(H, W, 1)` of the same dtype.
///
/// Single-channel input is only reshaped. Three-channel input is mixed in
/// linear light. Integer dtypes are rounded to the nearest value (ties to
/// even), floating dtypes are stored without rounding.
pub fn to_grayscale<S, D, T>(
    image: &ArrayBase<S, D>,
    channel_order: ChannelOrder,
) -> Result<Array3<T>>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Sample,
{
    let shape = image.shape();
    if !is_grayscale(shape) && !matches!(shape, [_, _, 3]) {
        return Err(Error::InvalidShape {
            shape: shape.to_vec(),
        });
    }

    if let Some(value) = image
        .iter()
        .map(|v| v.to_f64())
        .find(|v| !(0.0..=255.0).contains(v))
    {
        return Err(Error::ValueOutOfRange { value });
    }

    if is_grayscale(shape) {
        let gray = ChannelLast::from_dyn(image.view().to_owned().into_dyn()).map_err(|_| {
            Error::InvalidShape {
                shape: shape.to_vec(),
            }
        })?;
        return Ok(gray.into_inner());
    }

    log::debug!(
        "grayscale conversion: {}x{} {channel_order}",
        shape[1],
        shape[0]
    );

    let image = image
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| Error::InvalidShape {
            shape: shape.to_vec(),
        })?;

    let gray = image.map_axis(Axis(2), |pixel| {
        let level = gray_level(
            [pixel[0], pixel[1], pixel[2]].map(|v| v.to_f64() as f32),
            channel_order,
        );

        if T::IS_FLOAT {
            T::from_f64(level as f64)
        } else {
            T::from_f64(level.round_ties_even() as f64)
        }
    });

    Ok(gray.insert_axis(Axis(2)))
}
