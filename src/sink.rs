// src/sink.rs

//! Persisting finished canvases.

use crate::composer::Canvas;
use crate::error::{Error, Result};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Accepts a canvas and stores it under `name`.
pub trait ImageSink {
    /// Returns where the image ended up.
    fn write(&mut self, canvas: &Canvas, name: &str) -> Result<PathBuf>;
}

/// Writes 8-bit grayscale PNGs into a directory.
///
/// Each file is encoded to `<name>.png.tmp` and renamed into place once
/// complete, so a failed run never leaves a truncated `<name>.png`.
#[derive(Debug, Clone)]
pub struct PngSink {
    out_dir: PathBuf,
}

impl PngSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl ImageSink for PngSink {
    fn write(&mut self, canvas: &Canvas, name: &str) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{}.png", name));
        let tmp_path = self.out_dir.join(format!("{}.png.tmp", name));
        let write_err = |source: io::Error| Error::Write {
            path: path.clone(),
            source,
        };

        if canvas.is_empty() {
            return Err(write_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot encode an empty canvas",
            )));
        }
        fs::create_dir_all(&self.out_dir).map_err(write_err)?;

        if let Err(e) = encode_png(canvas, &tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_err(e));
        }
        fs::rename(&tmp_path, &path).map_err(write_err)?;

        debug!(
            "Wrote {}x{} canvas to {}",
            canvas.width(),
            canvas.height(),
            path.display()
        );
        Ok(path)
    }
}

fn encode_png(canvas: &Canvas, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    {
        let mut encoder = png::Encoder::new(&mut out, canvas.width() as u32, canvas.height() as u32);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(io::Error::other)?;
        writer
            .write_image_data(canvas.pixels())
            .map_err(io::Error::other)?;
        writer.finish().map_err(io::Error::other)?;
    }
    out.flush()?;
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}
