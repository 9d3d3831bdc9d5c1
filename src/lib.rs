// src/lib.rs

//! `fontstrip` decodes N64 CI8 font banks stored as 8x2 microblocks in C
//! source files and lays every glyph of a bank out as two strip images: the
//! raw intensities and a binarized ink mask.

pub mod binarize;
pub mod composer;
pub mod config;
pub mod error;
pub mod glyph;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod swizzle;

pub use binarize::{Binarizer, Threshold};
pub use composer::{Canvas, StripComposer};
pub use config::Config;
pub use error::{Error, Result};
pub use glyph::{Glyph, PixelGrid};
pub use pipeline::{Pipeline, RunReport, Strips};
pub use sink::{ImageSink, PngSink};
pub use source::{ByteStreamSource, CSourceFile, CSourceText, GlyphBank};
pub use swizzle::{deswizzle, BlockOrder, Deswizzler};
