// src/swizzle.rs

//! De-swizzling of CI8 texels stored in 8x2 microblocks.
//!
//! The bank stores a glyph as a sequence of 16-texel microblocks, visited
//! block-row by block-row and, within a row, left to right:
//!
//! ```text
//!   storage:  [ block 0 ][ block 1 ][ block 2 ] ...
//!
//!   image:    +--------+--------+--------+
//!             |   0    |   1    |   2    |   <- block row 0 (y = 0..2)
//!             +--------+--------+--------+
//!             |   3    |   4    |   5    |   <- block row 1 (y = 2..4)
//!             +--------+--------+--------+
//! ```
//!
//! Inside a block the placement of texel `i` is fixed by a 16-entry table
//! (`BlockOrder`). Positions that fall outside a glyph whose size is not a
//! whole number of blocks are skipped without consuming a byte, so a stream
//! of exactly `width * height` bytes always fills the grid once.

use crate::error::{Error, Result};
use crate::glyph::{Glyph, PixelGrid, BACKGROUND};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MICROBLOCK_WIDTH: usize = 8;
pub const MICROBLOCK_HEIGHT: usize = 2;
pub const TEXELS_PER_MICROBLOCK: usize = MICROBLOCK_WIDTH * MICROBLOCK_HEIGHT;

/// Intra-block texel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockOrder {
    /// Texel `i` lands at `(i % 8, i / 8)`. This is how font banks sit in ROM.
    #[default]
    Linear,
    /// TMEM layout: the odd row has its two 32-bit words exchanged.
    OddRowSwapped,
}

const LINEAR_TABLE: [(u8, u8); TEXELS_PER_MICROBLOCK] = block_table(false);
const ODD_ROW_SWAPPED_TABLE: [(u8, u8); TEXELS_PER_MICROBLOCK] = block_table(true);

const fn block_table(swap_odd_row_words: bool) -> [(u8, u8); TEXELS_PER_MICROBLOCK] {
    let mut table = [(0u8, 0u8); TEXELS_PER_MICROBLOCK];
    let mut i = 0;
    while i < TEXELS_PER_MICROBLOCK {
        let dy = i / MICROBLOCK_WIDTH;
        let mut dx = i % MICROBLOCK_WIDTH;
        if swap_odd_row_words && dy % 2 == 1 {
            dx ^= 4;
        }
        table[i] = (dx as u8, dy as u8);
        i += 1;
    }
    table
}

impl BlockOrder {
    /// `(dx, dy)` inside the microblock for each storage index 0..16.
    pub fn table(self) -> &'static [(u8, u8); TEXELS_PER_MICROBLOCK] {
        match self {
            BlockOrder::Linear => &LINEAR_TABLE,
            BlockOrder::OddRowSwapped => &ODD_ROW_SWAPPED_TABLE,
        }
    }
}

impl fmt::Display for BlockOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockOrder::Linear => f.write_str("linear"),
            BlockOrder::OddRowSwapped => f.write_str("odd-row-swapped"),
        }
    }
}

impl FromStr for BlockOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "linear" => Ok(BlockOrder::Linear),
            "odd-row-swapped" => Ok(BlockOrder::OddRowSwapped),
            other => Err(format!(
                "unknown block order '{}', expected 'linear' or 'odd-row-swapped'",
                other
            )),
        }
    }
}

/// Image coordinates of each stored texel, in storage order.
///
/// Yields exactly `width * height` distinct in-range positions.
pub fn storage_order(
    width: usize,
    height: usize,
    order: BlockOrder,
) -> impl Iterator<Item = (usize, usize)> {
    let table = order.table();
    (0..height)
        .step_by(MICROBLOCK_HEIGHT)
        .flat_map(move |by| {
            (0..width)
                .step_by(MICROBLOCK_WIDTH)
                .map(move |bx| (bx, by))
        })
        .flat_map(move |(bx, by)| {
            table
                .iter()
                .map(move |&(dx, dy)| (bx + dx as usize, by + dy as usize))
        })
        .filter(move |&(x, y)| x < width && y < height)
}

/// Rebuilds the row-major grid of one glyph's texels.
///
/// `index` only labels the error when `data` does not hold exactly
/// `width * height` bytes.
pub fn deswizzle(
    index: usize,
    width: usize,
    height: usize,
    data: &[u8],
    order: BlockOrder,
) -> Result<PixelGrid> {
    if width == 0 || height == 0 || data.len() != width * height {
        return Err(Error::MalformedGlyphData {
            index,
            width,
            height,
            actual: data.len(),
        });
    }

    let mut grid = PixelGrid::filled(width, height, BACKGROUND);
    for ((x, y), &value) in storage_order(width, height, order).zip(data) {
        grid.set(x, y, value);
    }
    Ok(grid)
}

/// Decodes whole glyphs with a fixed block order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deswizzler {
    order: BlockOrder,
}

impl Deswizzler {
    pub fn new(order: BlockOrder) -> Self {
        Self { order }
    }

    /// De-swizzles the glyph's storage and crops it to its visible size.
    pub fn decode(&self, glyph: &Glyph) -> Result<PixelGrid> {
        let grid = deswizzle(glyph.index, glyph.width, glyph.height, &glyph.data, self.order)?;
        Ok(grid.crop(glyph.visible_width, glyph.visible_height))
    }
}
