// src/composer.rs

//! Lays out decoded glyphs side by side into a single strip canvas.
//!
//! ```text
//!   x = 0        x = w0 + gap          x = w0 + w1 + 2 * gap
//!   +------+     +----------+           +----+
//!   | g0   | gap | g1       |    gap    | g2 |
//!   |      |     |          |           +----+   <- shorter glyphs leave
//!   +------+     |          |                       BACKGROUND below them
//!                +----------+
//! ```
//!
//! The layout depends only on the glyph order and sizes, so composing the
//! same sequence twice gives byte-identical canvases.

use crate::glyph::{PixelGrid, BACKGROUND};

/// A finished strip, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    glyph_offsets: Vec<usize>,
}

impl Canvas {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Left edge of each glyph, in composition order.
    pub fn glyph_offsets(&self) -> &[usize] {
        &self.glyph_offsets
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }
}

/// Horizontal strip layout with a fixed gap between neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripComposer {
    gap: usize,
}

impl StripComposer {
    pub fn new(gap: usize) -> Self {
        Self { gap }
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn compose(&self, grids: &[PixelGrid]) -> Canvas {
        let glyph_offsets: Vec<usize> = grids
            .iter()
            .scan(0usize, |next_x, grid| {
                let x = *next_x;
                *next_x += grid.width() + self.gap;
                Some(x)
            })
            .collect();

        let width = match (grids.last(), glyph_offsets.last()) {
            (Some(last), Some(&x)) => x + last.width(),
            _ => 0,
        };
        let height = grids.iter().map(PixelGrid::height).max().unwrap_or(0);

        let mut pixels = vec![BACKGROUND; width * height];
        for (grid, &x) in grids.iter().zip(&glyph_offsets) {
            blit(&mut pixels, width, grid, x);
        }

        Canvas {
            width,
            height,
            pixels,
            glyph_offsets,
        }
    }
}

/// Copies `src` into the strip with its top-left corner at `(dest_x, 0)`.
fn blit(dest: &mut [u8], dest_width: usize, src: &PixelGrid, dest_x: usize) {
    let copy_width = src.width().min(dest_width.saturating_sub(dest_x));
    for y in 0..src.height() {
        let start = y * dest_width + dest_x;
        if start + copy_width > dest.len() {
            break;
        }
        dest[start..start + copy_width].copy_from_slice(&src.row(y)[..copy_width]);
    }
}
