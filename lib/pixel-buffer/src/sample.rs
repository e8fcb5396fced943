use std::fmt::Debug;

/// Numeric element type of a pixel buffer.
///
/// Arithmetic on samples always goes through `f64`. Narrowing back follows
/// C cast semantics: integers truncate toward zero and saturate at their
/// bounds, floats are converted directly.
pub trait Sample: Copy + Default + PartialOrd + Debug + Send + Sync + 'static {
    /// `true` for `f32` and `f64`.
    const IS_FLOAT: bool;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;

    fn from_u8(value: u8) -> Self;

    /// Clamp into `[0, 255]` and narrow to `u8`, used when writing 8-bit images.
    fn to_u8_clamped(self) -> u8 {
        self.to_f64().clamp(0.0, 255.0) as u8
    }
}

macro_rules! impl_sample {
    ($($t:ty => $is_float:expr),* $(,)?) => {
        $(
            impl Sample for $t {
                const IS_FLOAT: bool = $is_float;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn from_u8(value: u8) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_sample!(
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
    i8 => false,
    i16 => false,
    i32 => false,
    i64 => false,
    f32 => true,
    f64 => true,
);
