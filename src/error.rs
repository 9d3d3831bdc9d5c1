// src/error.rs

//! Error taxonomy for a font bank run.
//!
//! Every failure is deterministic for a given input, so nothing here is
//! retried. The binary wraps these in `anyhow` for reporting.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The source text is missing, malformed, or does not describe the bank.
    #[error("cannot read font bank from {source_name}: {reason}")]
    SourceParse { source_name: String, reason: String },

    /// A glyph's texel count disagrees with its declared dimensions.
    #[error("glyph {index}: {width}x{height} needs {} texels, got {actual}", .width * .height)]
    MalformedGlyphData {
        index: usize,
        width: usize,
        height: usize,
        actual: usize,
    },

    /// An output image could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn source_parse(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SourceParse {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
