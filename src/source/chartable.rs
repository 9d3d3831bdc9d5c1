// src/source/chartable.rs

//! Slicing a font bank's texel words into per-glyph storage.
//!
//! A bank is two arrays: `<bank>_fontchartable`, six words per character,
//! and `<bank>_fontbytes`, the texel data those entries point into.

use crate::glyph::Glyph;
use crate::swizzle::{MICROBLOCK_HEIGHT, MICROBLOCK_WIDTH};
use log::{debug, trace};

/// Words per character table entry.
pub const ENTRY_WORDS: usize = 6;

/// Texture header that precedes each glyph's texels in `fontbytes`.
pub const TEXTURE_HEADER: [u8; 8] = [0xB8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

/// One row of the character table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEntry {
    pub index: u32,
    pub baseline: i32,
    pub height: u32,
    pub width: u32,
    pub kerning_index: u32,
    /// Absolute address of the glyph's texture in the original memory map.
    pub image_offset: u32,
}

impl CharEntry {
    fn from_words(words: &[u32]) -> Self {
        CharEntry {
            index: words[0],
            baseline: words[1] as i32,
            height: words[2],
            width: words[3],
            kerning_index: words[4],
            image_offset: words[5],
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Splits the raw table into entries. The length must be a whole number of entries.
pub fn parse_entries(table: &[u32]) -> Result<Vec<CharEntry>, String> {
    if table.len() % ENTRY_WORDS != 0 {
        return Err(format!(
            "character table has {} words, not a multiple of {}",
            table.len(),
            ENTRY_WORDS
        ));
    }
    Ok(table
        .chunks_exact(ENTRY_WORDS)
        .map(CharEntry::from_words)
        .collect())
}

fn round_up(value: usize, multiple: usize) -> usize {
    value.div_ceil(multiple) * multiple
}

/// Builds the storage glyphs of every drawable entry, in table order.
///
/// Offsets are rebased on the first drawable entry. A glyph's words run up
/// to the next entry with a higher offset, or to the end of `fontbytes`.
pub fn extract_glyphs(entries: &[CharEntry], fontbytes: &[u32]) -> Result<Vec<Glyph>, String> {
    let base = entries
        .iter()
        .find(|e| e.is_drawable())
        .map(|e| e.image_offset)
        .ok_or_else(|| "font bank has no drawable glyphs".to_string())?;

    let mut glyphs = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if !entry.is_drawable() {
            debug!("Skipping glyph {} ({}x{})", i, entry.width, entry.height);
            continue;
        }

        let relative = entry
            .image_offset
            .checked_sub(base)
            .ok_or_else(|| format!("glyph {} offset {:#x} is below the bank base {:#x}", i, entry.image_offset, base))?;
        if relative % 4 != 0 {
            return Err(format!("glyph {} offset {:#x} is not word aligned", i, entry.image_offset));
        }
        let start = (relative / 4) as usize;
        let end = entries[i + 1..]
            .iter()
            .find(|next| next.image_offset > entry.image_offset)
            .map(|next| start + ((next.image_offset - entry.image_offset) / 4) as usize)
            .unwrap_or(fontbytes.len());
        if end > fontbytes.len() || start >= end {
            return Err(format!(
                "glyph {} data (words {}..{}) exceeds fontbytes ({} words)",
                i,
                start,
                end,
                fontbytes.len()
            ));
        }

        let bytes: Vec<u8> = fontbytes[start..end]
            .iter()
            .flat_map(|word| word.to_be_bytes())
            .collect();
        let texel_start = bytes
            .windows(TEXTURE_HEADER.len())
            .position(|w| w == TEXTURE_HEADER)
            .unwrap_or(0)
            + TEXTURE_HEADER.len();

        let width = entry.width as usize;
        let height = entry.height as usize;
        let storage_width = round_up(width, MICROBLOCK_WIDTH);
        let storage_height = round_up(height, MICROBLOCK_HEIGHT);
        let needed = storage_width * storage_height;
        let available = bytes.len().saturating_sub(texel_start);
        if available < needed {
            return Err(format!(
                "glyph {} ({}x{}) needs {} texel bytes, found {}",
                i, width, height, needed, available
            ));
        }
        trace!(
            "glyph {}: words {}..{}, texels at byte {}, storage {}x{}",
            i,
            start,
            end,
            texel_start,
            storage_width,
            storage_height
        );

        let data = bytes[texel_start..texel_start + needed].to_vec();
        glyphs.push(Glyph::new(i, storage_width, storage_height, data).with_visible_size(width, height));
    }
    Ok(glyphs)
}
