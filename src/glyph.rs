// src/glyph.rs

//! Defines the `Glyph` type extracted from a font bank and the `PixelGrid`
//! it decodes into.
//!
//! A `Glyph` holds texels exactly as the bank stores them (microblock
//! order). A `PixelGrid` is the linear, row-major view produced by the
//! de-swizzler and consumed by the binarizer and the strip composer.

use std::fmt;

/// Intensity written where no glyph ink exists (gaps, unused rows, mask background).
pub const BACKGROUND: u8 = 0;
/// Intensity of a binarized glyph's ink.
pub const FOREGROUND: u8 = 255;

/// One character bitmap of a font bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Position of the glyph in the bank's character table.
    pub index: usize,
    /// Width in texels covered by `data`.
    pub width: usize,
    /// Height in texels covered by `data`.
    pub height: usize,
    /// Raw CI8 texels in storage order, `width * height` bytes.
    pub data: Vec<u8>,
    /// Width shown in the strip. Never exceeds `width`.
    pub visible_width: usize,
    /// Height shown in the strip. Never exceeds `height`.
    pub visible_height: usize,
}

impl Glyph {
    /// Creates a glyph whose visible size equals its storage size.
    pub fn new(index: usize, width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            index,
            width,
            height,
            data,
            visible_width: width,
            visible_height: height,
        }
    }

    /// Restricts the visible area, e.g. when storage is padded to whole microblocks.
    /// Values larger than the storage size are clamped.
    pub fn with_visible_size(mut self, width: usize, height: usize) -> Self {
        self.visible_width = width.min(self.width);
        self.visible_height = height.min(self.height);
        self
    }
}

/// A linear row-major grid of 8-bit intensities.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelGrid {
    /// A grid filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Wraps existing row-major pixels. Returns `None` if the length does not match.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Writes `value` at `(x, y)`. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Applies `f` to every pixel, keeping the dimensions.
    pub fn map(&self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// The top-left `width` x `height` region. Sizes are clamped to the grid.
    pub fn crop(&self, width: usize, height: usize) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            pixels.extend_from_slice(&self.row(y)[..width]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

// Rows are printed as hex so small grids read well in assertion failures.
impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PixelGrid {}x{}", self.width, self.height)?;
        for y in 0..self.height {
            for (i, p) in self.row(y).iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:02x}", p)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
