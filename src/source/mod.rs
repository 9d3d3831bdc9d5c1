// src/source/mod.rs

//! Where glyph texels come from.
//!
//! The pipeline only sees the `ByteStreamSource` trait. `CSourceFile`
//! reads a generated C font-bank file, `GlyphBank` serves glyphs that are
//! already in memory.

mod chartable;
mod lexer;

pub use chartable::{CharEntry, ENTRY_WORDS, TEXTURE_HEADER};

use crate::error::{Error, Result};
use crate::glyph::Glyph;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Supplies the glyphs of a named font bank in declaration order.
pub trait ByteStreamSource {
    fn glyphs(&self, bank: &str) -> Result<Vec<Glyph>>;
}

/// A font bank held in memory.
#[derive(Debug, Clone)]
pub struct GlyphBank {
    name: String,
    glyphs: Vec<Glyph>,
}

impl GlyphBank {
    pub fn new(name: impl Into<String>, glyphs: Vec<Glyph>) -> Self {
        Self {
            name: name.into(),
            glyphs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ByteStreamSource for GlyphBank {
    fn glyphs(&self, bank: &str) -> Result<Vec<Glyph>> {
        if bank != self.name {
            return Err(Error::source_parse(
                &self.name,
                format!("font bank '{}' not found", bank),
            ));
        }
        Ok(self.glyphs.clone())
    }
}

/// C source text describing one or more font banks.
#[derive(Debug, Clone)]
pub struct CSourceText {
    source_name: String,
    text: String,
}

impl CSourceText {
    /// `source_name` labels errors, typically the file path.
    pub fn new(source_name: impl Into<String>, text: impl AsRef<str>) -> Self {
        Self {
            source_name: source_name.into(),
            text: lexer::strip_comments(text.as_ref()),
        }
    }

    /// The raw character table of `bank`.
    pub fn char_entries(&self, bank: &str) -> Result<Vec<CharEntry>> {
        let words = self.array(&format!("{}_fontchartable", bank))?;
        chartable::parse_entries(&words).map_err(|reason| Error::source_parse(&self.source_name, reason))
    }

    fn array(&self, name: &str) -> Result<Vec<u32>> {
        lexer::array_body(&self.text, name)
            .and_then(lexer::parse_u32_list)
            .map_err(|reason| Error::source_parse(&self.source_name, reason))
    }
}

impl ByteStreamSource for CSourceText {
    fn glyphs(&self, bank: &str) -> Result<Vec<Glyph>> {
        let entries = self.char_entries(bank)?;
        let fontbytes = self.array(&format!("{}_fontbytes", bank))?;
        debug!(
            "Bank '{}': {} table entries, {} texel words",
            bank,
            entries.len(),
            fontbytes.len()
        );

        let glyphs = chartable::extract_glyphs(&entries, &fontbytes)
            .map_err(|reason| Error::source_parse(&self.source_name, reason))?;

        let logical_pixels: usize = entries
            .iter()
            .map(|e| e.width as usize * e.height as usize)
            .sum();
        info!(
            "Found {} characters ({} drawable). Total logical pixels: {}",
            entries.len(),
            glyphs.len(),
            logical_pixels
        );
        Ok(glyphs)
    }
}

/// A C font-bank file on disk, read when glyphs are requested.
#[derive(Debug, Clone)]
pub struct CSourceFile {
    path: PathBuf,
}

impl CSourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<CSourceText> {
        let name = self.path.display().to_string();
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::source_parse(&name, e.to_string()))?;
        Ok(CSourceText::new(name, text))
    }
}

impl ByteStreamSource for CSourceFile {
    fn glyphs(&self, bank: &str) -> Result<Vec<Glyph>> {
        self.load()?.glyphs(bank)
    }
}

#[cfg(test)]
mod tests;
