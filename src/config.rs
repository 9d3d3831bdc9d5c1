// src/config.rs

//! Run configuration for `fontstrip`.
//!
//! A `Config` can be deserialized from a JSON file; every field has a
//! default, so a file only needs the options it changes. Command-line flags
//! are layered on top in `main.rs`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::binarize::Threshold;
use crate::error::{Error, Result};
use crate::swizzle::BlockOrder;

/// Suffix of the raw intensity strip.
pub const GRAYSCALE_SUFFIX: &str = "grayscale";
/// Suffix of the ink mask strip.
pub const BINARY_SUFFIX: &str = "binary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// C source file holding the font bank.
    pub input: Option<PathBuf>,
    /// Directory receiving the two strip images. Created if missing.
    pub output_dir: PathBuf,
    /// Font bank identifier, e.g. `fontBankGothic`.
    /// Defaults to the input file stem.
    pub bank: Option<String>,
    /// Ink classification for the binary strip.
    pub threshold: Threshold,
    /// Empty columns between neighbouring glyphs.
    pub gap: usize,
    /// Texel order inside each 8x2 microblock.
    pub block_order: BlockOrder,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: None,
            output_dir: PathBuf::from("."),
            bank: None,
            threshold: Threshold::default(),
            gap: 0,
            block_order: BlockOrder::default(),
        }
    }
}

impl Config {
    /// Reads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The bank to decode: the explicit name, or the input file stem.
    pub fn bank_name(&self) -> Option<String> {
        self.bank.clone().or_else(|| {
            self.input
                .as_deref()
                .and_then(Path::file_stem)
                .map(|stem| stem.to_string_lossy().into_owned())
        })
    }

    /// Output image name for a strip variant, e.g. `fontBankGothic_binary`.
    pub fn output_name(bank: &str, suffix: &str) -> String {
        format!("{}_{}", bank, suffix)
    }
}
