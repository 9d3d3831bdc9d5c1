// src/binarize.rs

//! Turns a grayscale glyph grid into a two-level ink mask.

use crate::glyph::{PixelGrid, BACKGROUND, FOREGROUND};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default cut-off for `Threshold::Fixed`: the midpoint of the CI8 range.
/// The font's ink indices sit in the upper half and its fringe in the lower half.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// How a pixel is classified as ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Threshold {
    /// `value >= T` is ink.
    Fixed(u8),
    /// Per glyph: ink is anything strictly above the median of its non-zero pixels.
    Median,
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Fixed(DEFAULT_THRESHOLD)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Fixed(t) => write!(f, "{}", t),
            Threshold::Median => f.write_str("median"),
        }
    }
}

impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("median") {
            return Ok(Threshold::Median);
        }
        s.parse::<u8>().map(Threshold::Fixed).map_err(|_| {
            format!(
                "invalid threshold '{}': expected 0-255 or 'median'",
                s
            )
        })
    }
}

/// Pixel-local binarization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binarizer {
    threshold: Threshold,
}

impl Binarizer {
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn binarize(&self, grid: &PixelGrid) -> PixelGrid {
        match self.threshold {
            Threshold::Fixed(t) => grid.map(|p| if p >= t { FOREGROUND } else { BACKGROUND }),
            Threshold::Median => {
                let mut ink: Vec<u8> = grid.pixels().iter().copied().filter(|&p| p > 0).collect();
                if ink.is_empty() {
                    return grid.map(|_| BACKGROUND);
                }
                ink.sort_unstable();
                // Twice the median, so even-length sets compare exactly.
                let lo = ink[(ink.len() - 1) / 2] as u16;
                let hi = ink[ink.len() / 2] as u16;
                let doubled_median = lo + hi;
                grid.map(|p| {
                    if 2 * p as u16 > doubled_median {
                        FOREGROUND
                    } else {
                        BACKGROUND
                    }
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn grid(pixels: &[u8]) -> PixelGrid {
        PixelGrid::from_pixels(pixels.len(), 1, pixels.to_vec()).unwrap()
    }

    #[test]
    fn test_fixed_threshold_is_inclusive() {
        let out = Binarizer::new(Threshold::Fixed(128)).binarize(&grid(&[0, 127, 128, 255]));
        assert_eq!(out.pixels(), &[BACKGROUND, BACKGROUND, FOREGROUND, FOREGROUND]);
    }

    #[test]
    fn test_default_is_fixed_midpoint() {
        assert_eq!(Binarizer::default().threshold(), Threshold::Fixed(DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_binary_input_is_unchanged() {
        let mask = grid(&[BACKGROUND, FOREGROUND, FOREGROUND, BACKGROUND]);
        for t in [1, 64, 128, 255] {
            let out = Binarizer::new(Threshold::Fixed(t)).binarize(&mask);
            assert_eq!(out, mask, "threshold {}", t);
        }
        let out = Binarizer::new(Threshold::Median).binarize(&mask);
        assert_eq!(out.pixels(), &[BACKGROUND; 4]);
    }

    #[test]
    fn test_fixed_preserves_dimensions() {
        let src = PixelGrid::filled(6, 12, 200);
        let out = Binarizer::default().binarize(&src);
        assert_eq!((out.width(), out.height()), (6, 12));
        assert!(out.pixels().iter().all(|&p| p == FOREGROUND));
    }

    #[test]
    fn test_median_odd_count() {
        // Non-zero pixels 10, 20, 30: median 20, strictly greater is ink.
        let out = Binarizer::new(Threshold::Median).binarize(&grid(&[0, 10, 20, 30]));
        assert_eq!(out.pixels(), &[BACKGROUND, BACKGROUND, BACKGROUND, FOREGROUND]);
    }

    #[test]
    fn test_median_even_count_uses_midpoint() {
        // Non-zero pixels 10, 20, 30, 40: median 25.
        let out = Binarizer::new(Threshold::Median).binarize(&grid(&[10, 20, 30, 40, 0]));
        assert_eq!(
            out.pixels(),
            &[BACKGROUND, BACKGROUND, FOREGROUND, FOREGROUND, BACKGROUND]
        );
    }

    #[test]
    fn test_median_of_blank_glyph_is_blank() {
        let out = Binarizer::new(Threshold::Median).binarize(&grid(&[0, 0, 0]));
        assert_eq!(out.pixels(), &[BACKGROUND; 3]);
    }

    #[test]
    fn test_threshold_from_str() {
        assert_eq!("200".parse::<Threshold>(), Ok(Threshold::Fixed(200)));
        assert_eq!("Median".parse::<Threshold>(), Ok(Threshold::Median));
        assert!("256".parse::<Threshold>().is_err());
        assert!("high".parse::<Threshold>().is_err());
    }

    #[test]
    fn test_threshold_serde_shape() {
        let fixed: Threshold = serde_json::from_str(r#"{"fixed": 90}"#).unwrap();
        assert_eq!(fixed, Threshold::Fixed(90));
        let median: Threshold = serde_json::from_str(r#""median""#).unwrap();
        assert_eq!(median, Threshold::Median);
    }
}
