use crate::{BlockGrid, Error, Region, Result};
use derivative::Derivative;
use derive_setters::Setters;
use ndarray::{Array3, ArrayBase, Data, Dimension, Ix3, s};
use pixel_buffer::Sample;

/// Smallest accepted region width, region height and block size.
pub const MIN_EXTENT: usize = 2;

/// Output of a pixelation call. All three buffers have the input's
/// `(channels, height, width)` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixelation<T> {
    /// Input with every block replaced by its per-channel mean.
    pub pixelated: Array3<T>,
    /// `false` exactly where pixels were corrupted.
    pub known: Array3<bool>,
    /// Original values where `known` is `false`, zero elsewhere.
    pub target: Array3<T>,
}

impl<T> Pixelation<T> {
    pub fn into_parts(self) -> (Array3<T>, Array3<bool>, Array3<T>) {
        (self.pixelated, self.known, self.target)
    }
}

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct PixelateConfig {
    #[derivative(Default(value = "Region::new(0, 0, 10, 10)"))]
    pub region: Region,

    #[derivative(Default(value = "10"))]
    pub block_size: usize,
}

impl PixelateConfig {
    pub fn new(region: Region, block_size: usize) -> Self {
        Self { region, block_size }
    }

    pub fn apply<S, D, T>(&self, image: &ArrayBase<S, D>) -> Result<Pixelation<T>>
    where
        S: Data<Elem = T>,
        D: Dimension,
        T: Sample,
    {
        pixelate_region(image, self.region, self.block_size)
    }
}

/// Pixelate `[start_x, start_x + width) x [start_y, start_y + height)` of a
/// channel-first image with blocks of `block_size`.
///
/// Block means are summed in `f64` for every dtype, `f32` included, then cast
/// back to `T`. Integer means truncate toward zero.
pub fn pixelate<S, D, T>(
    image: &ArrayBase<S, D>,
    start_x: usize,
    start_y: usize,
    width: usize,
    height: usize,
    block_size: usize,
) -> Result<Pixelation<T>>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Sample,
{
    pixelate_region(
        image,
        Region::new(start_x, start_y, width, height),
        block_size,
    )
}

pub fn pixelate_region<S, D, T>(
    image: &ArrayBase<S, D>,
    region: Region,
    block_size: usize,
) -> Result<Pixelation<T>>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Sample,
{
    let image = image
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| Error::InvalidShape {
            shape: image.shape().to_vec(),
        })?;

    let (_, image_height, image_width) = image.dim();
    if image_height == 0 || image_width == 0 {
        return Err(Error::InvalidShape {
            shape: image.shape().to_vec(),
        });
    }

    for (name, value) in [
        ("width", region.width),
        ("height", region.height),
        ("block_size", block_size),
    ] {
        if value < MIN_EXTENT {
            return Err(Error::InvalidParameter {
                name,
                value,
                min: MIN_EXTENT,
            });
        }
    }

    if !region.fits_within(image_width, image_height) {
        return Err(Error::RegionOutOfBounds {
            region,
            image_width,
            image_height,
        });
    }

    log::debug!("pixelate region {region} with block size {block_size}");

    let mut pixelated = image.to_owned();
    let mut known = Array3::from_elem(image.raw_dim(), true);
    let mut target = Array3::from_elem(image.raw_dim(), T::default());

    for block in BlockGrid::new(region, block_size) {
        let (x0, x1) = (block.x, block.x + block.width);
        let (y0, y1) = (block.y, block.y + block.height);
        let source = image.slice(s![.., y0..y1, x0..x1]);

        known.slice_mut(s![.., y0..y1, x0..x1]).fill(false);
        target.slice_mut(s![.., y0..y1, x0..x1]).assign(&source);

        let count = block.area() as f64;
        for (channel, values) in source.outer_iter().enumerate() {
            let sum: f64 = values.iter().map(|v| v.to_f64()).sum();
            pixelated
                .slice_mut(s![channel, y0..y1, x0..x1])
                .fill(T::from_f64(sum / count));
        }
    }

    Ok(Pixelation {
        pixelated,
        known,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array4, array};

    fn ramp(channels: usize, height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((channels, height, width), |(c, y, x)| {
            (c * 50 + y * width + x) as u8
        })
    }

    #[test]
    fn test_quadrant_means_u8() {
        let image = Array3::from_shape_fn((1, 4, 4), |(_, y, x)| (y * 4 + x) as u8);
        let result = pixelate(&image, 0, 0, 4, 4, 2).unwrap();

        // Means 2.5, 4.5, 10.5, 12.5 truncate toward zero
        let expected = array![[[2u8, 2, 4, 4], [2, 2, 4, 4], [10, 10, 12, 12], [10, 10, 12, 12]]];
        assert_eq!(result.pixelated, expected);
        assert!(result.known.iter().all(|&k| !k));
        assert_eq!(result.target, image);
    }

    #[test]
    fn test_quadrant_means_f32() {
        let image = Array3::from_shape_fn((1, 4, 4), |(_, y, x)| (y * 4 + x) as f32);
        let result = pixelate(&image, 0, 0, 4, 4, 2).unwrap();

        assert_eq!(result.pixelated[[0, 0, 0]], 2.5);
        assert_eq!(result.pixelated[[0, 1, 3]], 4.5);
        assert_eq!(result.pixelated[[0, 3, 0]], 10.5);
        assert_eq!(result.pixelated[[0, 2, 2]], 12.5);
    }

    #[test]
    fn test_outside_region_untouched() {
        let image = ramp(2, 6, 7);
        let region = Region::new(2, 1, 3, 4);
        let result = pixelate_region(&image, region, 2).unwrap();

        for ((c, y, x), &value) in image.indexed_iter() {
            let inside = (2..5).contains(&x) && (1..5).contains(&y);
            assert_eq!(result.known[[c, y, x]], !inside);
            if inside {
                assert_eq!(result.target[[c, y, x]], value);
            } else {
                assert_eq!(result.pixelated[[c, y, x]], value);
                assert_eq!(result.target[[c, y, x]], 0);
            }
        }
    }

    #[test]
    fn test_channels_are_independent() {
        let image = array![
            [[0u16, 2], [4, 6]],
            [[100, 100], [100, 104]],
        ];
        let result = pixelate(&image, 0, 0, 2, 2, 2).unwrap();

        assert!(result.pixelated.slice(s![0, .., ..]).iter().all(|&v| v == 3));
        assert!(result.pixelated.slice(s![1, .., ..]).iter().all(|&v| v == 101));
    }

    #[test]
    fn test_truncated_block_mean() {
        // Region width 5, block size 3: blocks of width 3 and 2
        let image = Array3::from_shape_fn((1, 2, 5), |(_, y, x)| (y * 10 + x) as f64);
        let result = pixelate(&image, 0, 0, 5, 2, 3).unwrap();

        let left = (0.0 + 1.0 + 2.0 + 10.0 + 11.0 + 12.0) / 6.0;
        let right = (3.0 + 4.0 + 13.0 + 14.0) / 4.0;
        assert_eq!(
            result.pixelated.slice(s![0, .., ..]),
            Array2::from_shape_fn((2, 5), |(_, x)| if x < 3 { left } else { right })
        );
    }

    #[test]
    fn test_no_overflow_in_accumulation() {
        let image = Array3::from_elem((1, 8, 8), 255u8);
        let result = pixelate(&image, 0, 0, 8, 8, 8).unwrap();
        assert!(result.pixelated.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_input_not_mutated() {
        let image = ramp(1, 4, 4);
        let copy = image.clone();
        pixelate(&image, 0, 0, 4, 4, 2).unwrap();
        assert_eq!(image, copy);
    }

    #[test]
    fn test_invalid_shape() {
        let image = Array2::<u8>::zeros((4, 4));
        assert!(matches!(
            pixelate(&image, 0, 0, 2, 2, 2),
            Err(Error::InvalidShape { shape }) if shape == vec![4, 4]
        ));

        let image = Array4::<u8>::zeros((1, 1, 4, 4));
        assert!(matches!(
            pixelate(&image, 0, 0, 2, 2, 2),
            Err(Error::InvalidShape { .. })
        ));

        let image = Array3::<u8>::zeros((1, 0, 4));
        assert!(matches!(
            pixelate(&image, 0, 0, 2, 2, 2),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_invalid_parameters_in_order() {
        let image = ramp(1, 4, 4);

        assert!(matches!(
            pixelate(&image, 0, 0, 1, 1, 1),
            Err(Error::InvalidParameter { name: "width", value: 1, min: 2 })
        ));
        assert!(matches!(
            pixelate(&image, 0, 0, 2, 1, 1),
            Err(Error::InvalidParameter { name: "height", .. })
        ));
        assert!(matches!(
            pixelate(&image, 0, 0, 2, 2, 0),
            Err(Error::InvalidParameter { name: "block_size", value: 0, .. })
        ));
        // Parameter errors win over bounds errors
        assert!(matches!(
            pixelate(&image, 10, 10, 2, 2, 1),
            Err(Error::InvalidParameter { name: "block_size", .. })
        ));
    }

    #[test]
    fn test_region_out_of_bounds() {
        let image = ramp(1, 4, 6);

        assert!(matches!(
            pixelate(&image, 5, 0, 2, 2, 2),
            Err(Error::RegionOutOfBounds { image_width: 6, image_height: 4, .. })
        ));
        assert!(matches!(
            pixelate(&image, 0, 3, 2, 2, 2),
            Err(Error::RegionOutOfBounds { .. })
        ));
        assert!(pixelate(&image, 4, 2, 2, 2, 2).is_ok());
    }

    #[test]
    fn test_config_apply() {
        let image = ramp(1, 4, 4);
        let config = PixelateConfig::default()
            .with_region(Region::new(0, 0, 4, 4))
            .with_block_size(2);
        assert_eq!(
            config.apply(&image).unwrap(),
            pixelate(&image, 0, 0, 4, 4, 2).unwrap()
        );
    }
}
