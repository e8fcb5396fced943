//! Image decode and encode at the dataset boundary.
//!
//! Decoded buffers are channel-last: `(height, width)` for luma sources and
//! `(height, width, 3)` for everything else.

use crate::Result;
use image::{GrayImage, Luma};
use ndarray::{Array2, Array3, ArrayD, ArrayView2};
use pixel_buffer::Sample;
use std::path::Path;

pub fn load_image<T: Sample>(path: impl AsRef<Path>) -> Result<ArrayD<T>> {
    let path = path.as_ref();
    let image = image::open(path)?;
    let (width, height) = (image.width() as usize, image.height() as usize);

    let array = if image.color().channel_count() <= 2 {
        let raw = image.into_luma8().into_raw();
        Array2::from_shape_vec((height, width), raw.into_iter().map(T::from_u8).collect())?
            .into_dyn()
    } else {
        // Alpha is dropped
        let raw = image.into_rgb8().into_raw();
        Array3::from_shape_vec((height, width, 3), raw.into_iter().map(T::from_u8).collect())?
            .into_dyn()
    };

    log::debug!("decoded {} as {:?}", path.display(), array.shape());
    Ok(array)
}

/// Save a `(height, width)` plane as an 8-bit PNG, clamping to `[0, 255]`.
pub fn save_gray<T: Sample>(plane: ArrayView2<'_, T>, path: impl AsRef<Path>) -> Result<()> {
    let (height, width) = plane.dim();
    let image = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([plane[[y as usize, x as usize]].to_u8_clamped()])
    });
    image.save(path.as_ref())?;
    Ok(())
}

/// Save a known mask as an 8-bit PNG: 255 for known pixels, 0 for corrupted.
pub fn save_mask(mask: ArrayView2<'_, bool>, path: impl AsRef<Path>) -> Result<()> {
    let (height, width) = mask.dim();
    let image = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([if mask[[y as usize, x as usize]] { 255 } else { 0 }])
    });
    image.save(path.as_ref())?;
    Ok(())
}
