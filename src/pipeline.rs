// src/pipeline.rs

//! One font bank run: source -> de-swizzle -> binarize -> compose -> sink.

use crate::binarize::Binarizer;
use crate::composer::{Canvas, StripComposer};
use crate::config::{Config, BINARY_SUFFIX, GRAYSCALE_SUFFIX};
use crate::error::{Error, Result};
use crate::glyph::Glyph;
use crate::sink::{ImageSink, PngSink};
use crate::source::{ByteStreamSource, CSourceFile};
use crate::swizzle::Deswizzler;
use log::{debug, info};
use std::path::PathBuf;

/// The two strips of a bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strips {
    pub grayscale: Canvas,
    pub binary: Canvas,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub bank: String,
    pub glyph_count: usize,
    pub width: usize,
    pub height: usize,
    pub grayscale_path: PathBuf,
    pub binary_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    deswizzler: Deswizzler,
    binarizer: Binarizer,
    composer: StripComposer,
}

impl Pipeline {
    pub fn new(deswizzler: Deswizzler, binarizer: Binarizer, composer: StripComposer) -> Self {
        Self {
            deswizzler,
            binarizer,
            composer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Deswizzler::new(config.block_order),
            Binarizer::new(config.threshold),
            StripComposer::new(config.gap),
        )
    }

    /// Decodes every glyph in order and composes both strips.
    ///
    /// Any malformed glyph aborts the whole bank.
    pub fn render(&self, glyphs: &[Glyph]) -> Result<Strips> {
        let mut grayscale = Vec::with_capacity(glyphs.len());
        let mut binary = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            let grid = self.deswizzler.decode(glyph)?;
            debug!(
                "Decoded glyph {} ({}x{})",
                glyph.index,
                grid.width(),
                grid.height()
            );
            binary.push(self.binarizer.binarize(&grid));
            grayscale.push(grid);
        }
        Ok(Strips {
            grayscale: self.composer.compose(&grayscale),
            binary: self.composer.compose(&binary),
        })
    }

    /// Reads `bank` from `source` and hands both strips to `sink`.
    pub fn run(
        &self,
        source: &dyn ByteStreamSource,
        bank: &str,
        sink: &mut dyn ImageSink,
    ) -> Result<RunReport> {
        let glyphs = source.glyphs(bank)?;
        if glyphs.is_empty() {
            return Err(Error::source_parse(bank, "font bank has no glyphs"));
        }
        let strips = self.render(&glyphs)?;
        info!(
            "Composed {} glyphs into {}x{} strips",
            glyphs.len(),
            strips.grayscale.width(),
            strips.grayscale.height()
        );

        let grayscale_path = sink.write(
            &strips.grayscale,
            &Config::output_name(bank, GRAYSCALE_SUFFIX),
        )?;
        info!("Saved grayscale strip: {}", grayscale_path.display());
        let binary_path = sink.write(&strips.binary, &Config::output_name(bank, BINARY_SUFFIX))?;
        info!("Saved binary strip: {}", binary_path.display());

        Ok(RunReport {
            bank: bank.to_string(),
            glyph_count: glyphs.len(),
            width: strips.grayscale.width(),
            height: strips.grayscale.height(),
            grayscale_path,
            binary_path,
        })
    }
}

/// Runs the configured bank from its C source into PNG files.
pub fn run(config: &Config) -> Result<RunReport> {
    let input = config.input.as_ref().ok_or_else(|| Error::Config {
        path: PathBuf::new(),
        reason: "no input file given".to_string(),
    })?;
    let bank = config.bank_name().ok_or_else(|| Error::Config {
        path: input.clone(),
        reason: "cannot derive a font bank name from the input path".to_string(),
    })?;
    info!(
        "Decoding bank '{}' from {} (threshold {}, gap {}, block order {})",
        bank,
        input.display(),
        config.threshold,
        config.gap,
        config.block_order
    );

    let source = CSourceFile::new(input);
    let mut sink = PngSink::new(&config.output_dir);
    Pipeline::from_config(config).run(&source, &bank, &mut sink)
}
