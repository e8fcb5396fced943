use crate::{DatasetConfig, Error, Result, io};
use image_pixelation::{Region, pixelate_region};
use ndarray::Array3;
use pixel_buffer::{ChannelLast, Sample};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;
use std::{
    ops::Range,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// One training sample. Buffers are channel-first `(1, height, width)`.
#[derive(Debug, Clone)]
pub struct PixelationSample<T> {
    pub pixelated: Array3<T>,
    pub known: Array3<bool>,
    pub target: Array3<T>,
    pub image_file: PathBuf,
    pub region: Region,
    pub block_size: usize,
}

/// Images under a directory, each turned into a grayscale pixelation sample
/// whose geometry depends only on its index.
#[derive(Debug, Clone)]
pub struct RandomImagePixelationDataset {
    config: DatasetConfig,
    image_files: Vec<PathBuf>,
}

impl RandomImagePixelationDataset {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        config.validate()?;

        let mut image_files = scan_images(&config.image_dir, &config.extensions)?;
        image_files.sort();
        match config.shuffle_seed {
            Some(seed) => image_files.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => image_files.shuffle(&mut rand::rng()),
        }

        log::info!(
            "found {} images under {}",
            image_files.len(),
            config.image_dir.display()
        );

        Ok(Self {
            config,
            image_files,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    pub fn image_files(&self) -> &[PathBuf] {
        &self.image_files
    }

    pub fn len(&self) -> usize {
        self.image_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_files.is_empty()
    }

    /// Region and block size for `index` on an image of the given extent.
    ///
    /// The generator is seeded with the index alone, so the draw is the same
    /// on every call and on every thread.
    pub fn sample_geometry(
        &self,
        index: usize,
        image_width: usize,
        image_height: usize,
    ) -> (Region, usize) {
        let mut rng = StdRng::seed_from_u64(index as u64);
        let (width_min, width_max) = self.config.width_range;
        let (height_min, height_max) = self.config.height_range;
        let (size_min, size_max) = self.config.size_range;

        let width = rng.random_range(width_min..=width_max).min(image_width);
        let height = rng.random_range(height_min..=height_max).min(image_height);
        let block_size = rng.random_range(size_min..=size_max);

        let x = rng.random_range(0..=image_width - width);
        let y = rng.random_range(0..=image_height - height);

        (Region::new(x, y, width, height), block_size)
    }

    pub fn get<T: Sample>(&self, index: usize) -> Result<PixelationSample<T>> {
        let image_file = self
            .image_files
            .get(index)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len(),
            })?
            .clone();

        let image = io::load_image::<T>(&image_file)?;
        let gray = ChannelLast::new(color_conversion::to_grayscale(
            &image,
            self.config.channel_order,
        )?);

        let (region, block_size) = self.sample_geometry(index, gray.width(), gray.height());
        let gray = gray.into_channel_first();
        let (pixelated, known, target) =
            pixelate_region(&gray.view(), region, block_size)?.into_parts();

        Ok(PixelationSample {
            pixelated,
            known,
            target,
            image_file,
            region,
            block_size,
        })
    }

    /// Every sample in order, logging and skipping the ones that fail.
    pub fn samples<T: Sample>(&self) -> impl Iterator<Item = PixelationSample<T>> + '_ {
        (0..self.len()).filter_map(move |index| match self.get(index) {
            Ok(sample) => Some(sample),
            Err(e) => {
                log::warn!("Error processing image at index {index}: {e}");
                None
            }
        })
    }

    /// Build the samples of `range` on the rayon pool, results in index order.
    pub fn par_collect<T: Sample>(&self, range: Range<usize>) -> Vec<Result<PixelationSample<T>>> {
        range.into_par_iter().map(|index| self.get(index)).collect()
    }
}

fn scan_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matched = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));

        if matched {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_images(dir: &Path, count: usize) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir.join("nested"))?;
        for i in 0..count {
            let path = if i % 2 == 0 {
                dir.join(format!("{i}.jpg"))
            } else {
                dir.join("nested").join(format!("{i}.JPG"))
            };
            RgbImage::from_fn(40, 30, |x, y| Rgb([(x * 6) as u8, (y * 8) as u8, i as u8]))
                .save_with_format(&path, image::ImageFormat::Jpeg)?;
        }
        std::fs::write(dir.join("notes.txt"), "not an image")?;
        Ok(())
    }

    #[test]
    fn test_scan_recursive_case_insensitive() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_images(dir.path(), 4)?;

        let files = scan_images(dir.path(), &["jpg".to_string()])?;
        assert_eq!(files.len(), 4);
        assert!(files.iter().any(|f| f.ends_with("nested/1.JPG")));
        Ok(())
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_images(dir.path(), 6)?;

        let config = DatasetConfig::new(dir.path()).with_shuffle_seed(Some(7));
        let a = RandomImagePixelationDataset::new(config.clone())?;
        let b = RandomImagePixelationDataset::new(config)?;
        assert_eq!(a.image_files(), b.image_files());
        assert_eq!(a.len(), 6);
        Ok(())
    }

    #[test]
    fn test_geometry_is_deterministic_and_in_bounds() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let dataset = RandomImagePixelationDataset::new(
            DatasetConfig::new(dir.path())
                .with_width_range((2, 50))
                .with_height_range((2, 50))
                .with_size_range((2, 6)),
        )?;
        assert!(dataset.is_empty());

        for index in 0..200 {
            let (region, block_size) = dataset.sample_geometry(index, 20, 12);
            assert_eq!((region, block_size), dataset.sample_geometry(index, 20, 12));
            assert!(region.fits_within(20, 12));
            assert!(region.width >= 2 && region.height >= 2);
            assert!((2..=6).contains(&block_size));
        }
        Ok(())
    }

    #[test]
    fn test_geometry_clamps_to_small_image() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let dataset = RandomImagePixelationDataset::new(
            DatasetConfig::new(dir.path())
                .with_width_range((30, 30))
                .with_height_range((30, 30)),
        )?;

        let (region, _) = dataset.sample_geometry(3, 8, 5);
        assert_eq!(region, Region::new(0, 0, 8, 5));
        Ok(())
    }

    #[test]
    fn test_get_out_of_range() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let dataset = RandomImagePixelationDataset::new(DatasetConfig::new(dir.path()))?;
        assert!(matches!(
            dataset.get::<u8>(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DatasetConfig::new("/tmp").with_width_range((1, 4));
        assert!(matches!(
            RandomImagePixelationDataset::new(config),
            Err(Error::InvalidRange(_))
        ));
    }
}
