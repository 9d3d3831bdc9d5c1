// src/source/tests.rs

use super::*;
use test_log::test;

const BASE: u32 = 0x8010_0000;
const HEADER_WORDS: [u32; 2] = [0xB800_0000, 0x0000_0000];

fn words_of(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|c| {
            let mut w = [0u8; 4];
            w[..c.len()].copy_from_slice(c);
            u32::from_be_bytes(w)
        })
        .collect()
}

fn hex_list(words: &[u32]) -> String {
    words
        .iter()
        .map(|w| format!("0x{:08x}", w))
        .collect::<Vec<_>>()
        .join(", ")
}

fn c_file(bank: &str, entries: &[[u32; 6]], fontbytes: &[u32]) -> String {
    let table: Vec<u32> = entries.iter().flatten().copied().collect();
    format!(
        "#include <ultra64.h>\n\n/* generated */\nu32 {bank}_fontchartable[] = \n{{\n    {}\n}};\n\nu32 {bank}_fontbytes[] = \n{{\n    {}\n}};\n",
        hex_list(&table),
        hex_list(fontbytes),
    )
}

fn texels(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}

/// Two 8x2 glyphs, each preceded by a texture header.
fn two_glyph_bank() -> (String, Vec<u8>, Vec<u8>) {
    let a = texels(16, 0x10);
    let b = texels(16, 0x80);
    let mut fontbytes = HEADER_WORDS.to_vec();
    fontbytes.extend(words_of(&a));
    fontbytes.extend(HEADER_WORDS);
    fontbytes.extend(words_of(&b));
    let entries = [
        [0x21, 0, 2, 8, 0, BASE],
        [0x22, 0, 2, 8, 0, BASE + 24],
    ];
    (c_file("fontBankTest", &entries, &fontbytes), a, b)
}

#[test]
fn test_parses_glyphs_in_table_order() {
    let (text, a, b) = two_glyph_bank();
    let glyphs = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0], Glyph::new(0, 8, 2, a));
    assert_eq!(glyphs[1], Glyph::new(1, 8, 2, b));
}

#[test]
fn test_char_entries_expose_metadata() {
    let (text, _, _) = two_glyph_bank();
    let entries = CSourceText::new("test.c", text).char_entries("fontBankTest").unwrap();
    assert_eq!(
        entries[1],
        CharEntry {
            index: 0x22,
            baseline: 0,
            height: 2,
            width: 8,
            kerning_index: 0,
            image_offset: BASE + 24,
        }
    );
}

#[test]
fn test_empty_entries_are_skipped() {
    let a = texels(16, 1);
    let b = texels(16, 100);
    let mut fontbytes = HEADER_WORDS.to_vec();
    fontbytes.extend(words_of(&a));
    fontbytes.extend(HEADER_WORDS);
    fontbytes.extend(words_of(&b));
    let entries = [
        [0x20, 0, 0, 0, 0, 0],
        [0x21, 0, 2, 8, 0, BASE],
        [0x20, 0, 0, 0, 0, 0],
        [0x22, 0, 2, 8, 0, BASE + 24],
    ];
    let text = c_file("fontBankTest", &entries, &fontbytes);
    let glyphs = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!((glyphs[0].index, &glyphs[0].data), (1, &a));
    assert_eq!((glyphs[1].index, &glyphs[1].data), (3, &b));
}

#[test]
fn test_odd_sizes_are_padded_to_whole_blocks() {
    let stored = texels(8 * 4, 0);
    let mut fontbytes = HEADER_WORDS.to_vec();
    fontbytes.extend(words_of(&stored));
    let entries = [[0x41, 0, 3, 6, 0, BASE]];
    let text = c_file("fontBankTest", &entries, &fontbytes);
    let glyphs = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap();
    let glyph = &glyphs[0];
    assert_eq!((glyph.width, glyph.height), (8, 4));
    assert_eq!((glyph.visible_width, glyph.visible_height), (6, 3));
    assert_eq!(glyph.data, stored);
}

#[test]
fn test_trailing_alignment_words_are_ignored() {
    let a = texels(16, 5);
    let mut fontbytes = HEADER_WORDS.to_vec();
    fontbytes.extend(words_of(&a));
    fontbytes.extend([0xdead_beef, 0xdead_beef]);
    let entries = [[0x21, 0, 2, 8, 0, BASE]];
    let text = c_file("fontBankTest", &entries, &fontbytes);
    let glyphs = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap();
    assert_eq!(glyphs[0].data, a);
}

#[test]
fn test_missing_header_skips_first_eight_bytes() {
    let a = texels(16, 7);
    let mut fontbytes = vec![0x1111_1111, 0x2222_2222];
    fontbytes.extend(words_of(&a));
    let entries = [[0x21, 0, 2, 8, 0, BASE]];
    let text = c_file("fontBankTest", &entries, &fontbytes);
    let glyphs = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap();
    assert_eq!(glyphs[0].data, a);
}

#[test]
fn test_comments_do_not_confuse_markers() {
    let (text, a, _) = two_glyph_bank();
    let text = format!(
        "// u32 fontBankTest_fontbytes[] = {{ 0x1 }};\n/* u32 fontBankTest_fontchartable[] = {{ 1 }}; */\n{}",
        text
    );
    let glyphs = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap();
    assert_eq!(glyphs[0].data, a);
}

#[test]
fn test_short_texel_data_is_a_parse_error() {
    let mut fontbytes = HEADER_WORDS.to_vec();
    fontbytes.extend(words_of(&texels(12, 0)));
    let entries = [[0x21, 0, 2, 8, 0, BASE]];
    let text = c_file("fontBankTest", &entries, &fontbytes);
    let err = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap_err();
    assert!(matches!(err, Error::SourceParse { .. }), "{err}");
    assert!(err.to_string().contains("needs 16 texel bytes"), "{err}");
}

#[test]
fn test_offset_past_fontbytes_is_a_parse_error() {
    let (_, a, _) = two_glyph_bank();
    let mut fontbytes = HEADER_WORDS.to_vec();
    fontbytes.extend(words_of(&a));
    let entries = [
        [0x21, 0, 2, 8, 0, BASE],
        [0x22, 0, 2, 8, 0, BASE + 0x400],
        [0x23, 0, 2, 8, 0, BASE + 0x800],
    ];
    let text = c_file("fontBankTest", &entries, &fontbytes);
    let err = CSourceText::new("test.c", text).glyphs("fontBankTest").unwrap_err();
    assert!(err.to_string().contains("exceeds fontbytes"), "{err}");
}

#[test]
fn test_unknown_bank_is_a_parse_error() {
    let (text, _, _) = two_glyph_bank();
    let err = CSourceText::new("test.c", text).glyphs("fontBankOther").unwrap_err();
    assert!(matches!(err, Error::SourceParse { .. }));
    assert!(err.to_string().contains("fontBankOther_fontchartable"), "{err}");
}

#[test]
fn test_partial_table_entry_is_a_parse_error() {
    let text = "u32 b_fontchartable[] = { 1, 2, 3 };\nu32 b_fontbytes[] = { 0 };";
    let err = CSourceText::new("test.c", text).glyphs("b").unwrap_err();
    assert!(err.to_string().contains("not a multiple of 6"), "{err}");
}

#[test]
fn test_bank_without_drawable_glyphs_is_a_parse_error() {
    let text = "u32 b_fontchartable[] = { 0x20, 0, 0, 0, 0, 0 };\nu32 b_fontbytes[] = { 0 };";
    let err = CSourceText::new("test.c", text).glyphs("b").unwrap_err();
    assert!(err.to_string().contains("no drawable glyphs"), "{err}");
}

#[test]
fn test_missing_file_is_a_parse_error() {
    let source = CSourceFile::new("/nonexistent/fontBankGothic.c");
    let err = source.glyphs("fontBankGothic").unwrap_err();
    assert!(matches!(err, Error::SourceParse { .. }));
    assert!(err.to_string().contains("/nonexistent/fontBankGothic.c"));
}

#[test]
fn test_glyph_bank_serves_only_its_own_name() {
    let bank = GlyphBank::new("mem", vec![Glyph::new(0, 8, 2, vec![0; 16])]);
    assert_eq!(bank.glyphs("mem").unwrap().len(), 1);
    assert!(matches!(bank.glyphs("other"), Err(Error::SourceParse { .. })));
}
