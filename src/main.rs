// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use fontstrip::{pipeline, BlockOrder, Config, Threshold};

/// Render an N64 CI8 font bank from its C source into grayscale and binary strips.
#[derive(Parser, Debug)]
#[command(name = "fontstrip", author, version, about)]
struct Args {
    /// C source file containing `<bank>_fontchartable` and `<bank>_fontbytes`
    input: Option<PathBuf>,

    /// Font bank identifier (defaults to the input file stem)
    #[arg(short, long)]
    bank: Option<String>,

    /// Directory for the output images
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Ink threshold for the binary strip: 0-255, or "median"
    #[arg(short, long)]
    threshold: Option<Threshold>,

    /// Blank columns between glyphs
    #[arg(short, long)]
    gap: Option<usize>,

    /// Texel order inside each 8x2 microblock: linear or odd-row-swapped
    #[arg(long)]
    block_order: Option<BlockOrder>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(input) = self.input {
            config.input = Some(input);
        }
        if let Some(bank) = self.bank {
            config.bank = Some(bank);
        }
        if let Some(out_dir) = self.out_dir {
            config.output_dir = out_dir;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(gap) = self.gap {
            config.gap = gap;
        }
        if let Some(block_order) = self.block_order {
            config.block_order = block_order;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = Args::parse().into_config()?;
    let report = pipeline::run(&config).context("Failed to render font bank")?;

    info!(
        "Bank '{}': {} glyphs, {}x{} -> {} and {}",
        report.bank,
        report.glyph_count,
        report.width,
        report.height,
        report.grayscale_path.display(),
        report.binary_path.display()
    );
    Ok(())
}
