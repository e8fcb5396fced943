//! Build depixelation training samples from a directory of photos.
//!
//! Each sample is a grayscale image with a randomly placed pixelated region,
//! the mask of pixels that survived, and the ground truth of those that did not.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::AppConfig;
use image_pixelation::Region;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "depixel", version, about = "Generate image depixelation samples")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write pixelated, known-mask and target PNGs for every image in a directory
    Generate {
        /// Overrides `dataset.image_dir` from the config
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,

        #[arg(short, long, value_name = "DIR")]
        output_dir: PathBuf,

        /// Stop after this many images
        #[arg(long)]
        limit: Option<usize>,

        /// Overrides `dataset.shuffle_seed` from the config
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Convert one image to colorimetric grayscale
    Grayscale {
        input: PathBuf,
        output: PathBuf,

        /// RGB or BGR
        #[arg(long)]
        channel_order: Option<String>,
    },

    /// Convert one image to grayscale and pixelate a region of it
    Pixelate {
        input: PathBuf,
        output: PathBuf,

        #[arg(short)]
        x: usize,

        #[arg(short)]
        y: usize,

        #[arg(long)]
        width: usize,

        #[arg(long)]
        height: usize,

        #[arg(long)]
        block_size: usize,

        /// Also write the known mask here
        #[arg(long, value_name = "FILE")]
        known: Option<PathBuf>,

        /// Also write the target here
        #[arg(long, value_name = "FILE")]
        target: Option<PathBuf>,

        /// RGB or BGR
        #[arg(long)]
        channel_order: Option<String>,
    },
}

fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    log::debug!("{config:?}");

    match cli.command {
        Command::Generate {
            image_dir,
            output_dir,
            limit,
            seed,
        } => commands::generate(&config, image_dir, &output_dir, limit, seed),
        Command::Grayscale {
            input,
            output,
            channel_order,
        } => commands::grayscale(&config, &input, &output, channel_order.as_deref()),
        Command::Pixelate {
            input,
            output,
            x,
            y,
            width,
            height,
            block_size,
            known,
            target,
            channel_order,
        } => commands::pixelate(
            &config,
            commands::PixelateArgs {
                input: &input,
                output: &output,
                known: known.as_deref(),
                target: target.as_deref(),
                region: Region::new(x, y, width, height),
                block_size,
                channel_order: channel_order.as_deref(),
            },
        ),
    }
}
