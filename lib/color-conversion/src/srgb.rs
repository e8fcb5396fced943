//! sRGB transfer functions (IEC 61966-2-1) on normalized `[0, 1]` values.

const SRGB_LINEAR_THRESHOLD: f32 = 0.04045;
const LINEAR_SRGB_THRESHOLD: f32 = 0.003_130_8;
const LINEAR_SLOPE: f32 = 12.92;
const GAMMA: f32 = 2.4;
const OFFSET: f32 = 0.055;
const SCALE: f32 = 1.055;

/// Remove the display gamma from an sRGB value.
#[inline]
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= SRGB_LINEAR_THRESHOLD {
        value / LINEAR_SLOPE
    } else {
        ((value + OFFSET) / SCALE).powf(GAMMA)
    }
}

/// Re-apply the display gamma to a linear value.
#[inline]
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= LINEAR_SRGB_THRESHOLD {
        LINEAR_SLOPE * value
    } else {
        SCALE * value.powf(1.0 / GAMMA) - OFFSET
    }
}
