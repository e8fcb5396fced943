use crate::config::AppConfig;
use anyhow::{Context, Result, bail};
use color_conversion::{ChannelOrder, GrayscaleConfig};
use image_pixelation::{PixelateConfig, Region};
use ndarray::Axis;
use pixel_buffer::ChannelLast;
use pixelation_dataset::{PixelationSample, RandomImagePixelationDataset, io};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const BATCH_SIZE: usize = 64;

#[derive(Serialize, Debug)]
struct ManifestEntry {
    index: usize,
    image_file: PathBuf,
    region: Region,
    block_size: usize,
    pixelated: String,
    known: String,
    target: String,
}

pub fn generate(
    config: &AppConfig,
    image_dir: Option<PathBuf>,
    output_dir: &Path,
    limit: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let mut dataset_config = config
        .dataset
        .clone()
        .with_channel_order(config.grayscale.channel_order);
    if let Some(image_dir) = image_dir {
        dataset_config.image_dir = image_dir;
    }
    if seed.is_some() {
        dataset_config.shuffle_seed = seed;
    }

    let dataset = RandomImagePixelationDataset::new(dataset_config)
        .context("create pixelation dataset failed")?;
    if dataset.is_empty() {
        bail!("no images found under {}", dataset.config().image_dir.display());
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {} failed", output_dir.display()))?;

    let count = limit.map_or(dataset.len(), |limit| limit.min(dataset.len()));
    let mut manifest = Vec::with_capacity(count);

    for start in (0..count).step_by(BATCH_SIZE) {
        let end = (start + BATCH_SIZE).min(count);
        let batch = dataset.par_collect::<u8>(start..end);

        for (index, sample) in (start..end).zip(batch) {
            match sample {
                Ok(sample) => manifest.push(write_sample(output_dir, index, &sample)?),
                Err(e) => log::warn!("Error processing image at index {index}: {e}"),
            }
        }

        log::info!("processed {end}/{count} images");
    }

    let manifest_path = output_dir.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("write {} failed", manifest_path.display()))?;

    log::info!(
        "wrote {} samples to {} ({} skipped)",
        manifest.len(),
        output_dir.display(),
        count - manifest.len()
    );

    Ok(())
}

fn write_sample(
    output_dir: &Path,
    index: usize,
    sample: &PixelationSample<u8>,
) -> Result<ManifestEntry> {
    let entry = ManifestEntry {
        index,
        image_file: sample.image_file.clone(),
        region: sample.region,
        block_size: sample.block_size,
        pixelated: format!("{index:05}_pixelated.png"),
        known: format!("{index:05}_known.png"),
        target: format!("{index:05}_target.png"),
    };

    io::save_gray(
        sample.pixelated.index_axis(Axis(0), 0),
        output_dir.join(&entry.pixelated),
    )?;
    io::save_mask(
        sample.known.index_axis(Axis(0), 0),
        output_dir.join(&entry.known),
    )?;
    io::save_gray(
        sample.target.index_axis(Axis(0), 0),
        output_dir.join(&entry.target),
    )?;

    log::debug!(
        "sample {index}: {} region {} block {}",
        sample.image_file.display(),
        sample.region,
        sample.block_size
    );

    Ok(entry)
}

pub fn grayscale(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    channel_order: Option<&str>,
) -> Result<()> {
    let channel_order = resolve_channel_order(config, channel_order)?;
    let image = io::load_image::<u8>(input)
        .with_context(|| format!("load {} failed", input.display()))?;

    let gray = GrayscaleConfig::new()
        .with_channel_order(channel_order)
        .apply(&image)?;

    io::save_gray(gray.index_axis(Axis(2), 0), output)
        .with_context(|| format!("save {} failed", output.display()))?;

    log::info!("wrote grayscale {} -> {}", input.display(), output.display());
    Ok(())
}

pub struct PixelateArgs<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub known: Option<&'a Path>,
    pub target: Option<&'a Path>,
    pub region: Region,
    pub block_size: usize,
    pub channel_order: Option<&'a str>,
}

pub fn pixelate(config: &AppConfig, args: PixelateArgs<'_>) -> Result<()> {
    let channel_order = resolve_channel_order(config, args.channel_order)?;
    let image = io::load_image::<u8>(args.input)
        .with_context(|| format!("load {} failed", args.input.display()))?;

    let gray = GrayscaleConfig::new()
        .with_channel_order(channel_order)
        .apply(&image)?;
    let gray = ChannelLast::new(gray).into_channel_first();

    let result = PixelateConfig::new(args.region, args.block_size).apply(&gray.view())?;

    io::save_gray(result.pixelated.index_axis(Axis(0), 0), args.output)
        .with_context(|| format!("save {} failed", args.output.display()))?;
    if let Some(path) = args.known {
        io::save_mask(result.known.index_axis(Axis(0), 0), path)
            .with_context(|| format!("save {} failed", path.display()))?;
    }
    if let Some(path) = args.target {
        io::save_gray(result.target.index_axis(Axis(0), 0), path)
            .with_context(|| format!("save {} failed", path.display()))?;
    }

    log::info!(
        "pixelated {} region {} block {} -> {}",
        args.input.display(),
        args.region,
        args.block_size,
        args.output.display()
    );
    Ok(())
}

fn resolve_channel_order(config: &AppConfig, flag: Option<&str>) -> Result<ChannelOrder> {
    match flag {
        Some(order) => Ok(ChannelOrder::parse(order)?),
        None => Ok(config.grayscale.channel_order),
    }
}
