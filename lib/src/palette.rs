//! Glyph palettes for luminance-bucketed text rendering
//!
//! A palette is an ordered glyph sequence, darkest first. Glyph `i` of a
//! palette with `len` glyphs covers luminance `[i*256/len, (i+1)*256/len)`.

use std::fmt;

/// Default glyph ramp, 10 levels from darkest (`@`) to brightest (space)
pub const DEFAULT_GLYPHS: &str = "@%#*+=-:. ";

/// Text input that restores the default palette
pub const RESET_SENTINEL: &str = "0";

/// Ordered, non-empty sequence of glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetPalette {
    glyphs: Vec<char>,
}

impl Default for CharsetPalette {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_GLYPHS.chars().collect(),
        }
    }
}

impl CharsetPalette {
    /// Build a palette from user text, one glyph per character
    ///
    /// Control characters (line breaks, tabs) are dropped so every glyph
    /// occupies exactly one cell. Returns `None` when nothing is left.
    pub fn new(text: &str) -> Option<Self> {
        let glyphs: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if glyphs.is_empty() {
            None
        } else {
            Some(Self { glyphs })
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Bucket index for a luminance value
    ///
    /// `luminance * len / 256` with integer division, always in `[0, len - 1]`.
    #[inline]
    pub fn bucket(&self, luminance: u8) -> usize {
        luminance as usize * self.glyphs.len() / 256
    }

    /// Glyph for a luminance value
    #[inline]
    pub fn glyph(&self, luminance: u8) -> char {
        self.glyphs[self.bucket(luminance)]
    }
}

impl fmt::Display for CharsetPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.glyphs.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// What a line of palette text asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteInput {
    /// The reset sentinel: go back to [`DEFAULT_GLYPHS`]
    Reset,
    /// Replace the active palette wholesale
    Replace(CharsetPalette),
    /// Nothing usable; keep the active palette
    Empty,
}

impl PaletteInput {
    /// Classify user text. Spaces are significant; control characters are not.
    pub fn parse(text: &str) -> Self {
        if text.trim_matches(char::is_control) == RESET_SENTINEL {
            return PaletteInput::Reset;
        }
        match CharsetPalette::new(text) {
            Some(palette) => PaletteInput::Replace(palette),
            None => PaletteInput::Empty,
        }
    }

    /// Resolve against the palette currently in effect
    pub fn apply(self, current: &CharsetPalette) -> CharsetPalette {
        match self {
            PaletteInput::Reset => CharsetPalette::default(),
            PaletteInput::Replace(palette) => palette,
            PaletteInput::Empty => current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_palette_has_ten_glyphs() {
        let palette = CharsetPalette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.to_string(), DEFAULT_GLYPHS);
    }

    #[test]
    fn test_glyph_darkest() {
        assert_eq!(CharsetPalette::default().glyph(0), '@');
    }

    #[test]
    fn test_glyph_brightest() {
        assert_eq!(CharsetPalette::default().glyph(255), ' ');
    }

    #[test]
    fn test_glyph_mid_gray() {
        // 128 * 10 / 256 = 5
        assert_eq!(CharsetPalette::default().glyph(128), '=');
    }

    #[test]
    fn test_single_glyph_palette() {
        let palette = CharsetPalette::new("#").unwrap();
        assert_eq!(palette.glyph(0), '#');
        assert_eq!(palette.glyph(255), '#');
    }

    #[test]
    fn test_multibyte_glyphs_count_as_one() {
        let palette = CharsetPalette::new("█▓▒░ ").unwrap();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.glyph(0), '█');
        assert_eq!(palette.glyph(255), ' ');
    }

    #[test]
    fn test_empty_text_is_not_a_palette() {
        assert!(CharsetPalette::new("").is_none());
    }

    #[test]
    fn test_parse_reset_sentinel() {
        assert_eq!(PaletteInput::parse("0"), PaletteInput::Reset);
    }

    #[test]
    fn test_parse_zero_inside_longer_text_is_a_palette() {
        let input = PaletteInput::parse("10");
        assert_eq!(input, PaletteInput::Replace(CharsetPalette::new("10").unwrap()));
    }

    #[test]
    fn test_parse_whitespace_is_a_palette() {
        assert!(matches!(PaletteInput::parse(" "), PaletteInput::Replace(_)));
    }

    #[test]
    fn test_line_breaks_are_not_glyphs() {
        let palette = CharsetPalette::new("#\r\n.\t:").unwrap();
        assert_eq!(palette.glyphs(), &['#', '.', ':']);
    }

    #[test]
    fn test_parse_only_line_breaks_is_empty() {
        assert_eq!(PaletteInput::parse("\n\r\n"), PaletteInput::Empty);
        assert_eq!(PaletteInput::parse("0\n"), PaletteInput::Reset);
    }

    #[test]
    fn test_apply_empty_keeps_current() {
        let current = CharsetPalette::new("ab").unwrap();
        assert_eq!(PaletteInput::parse("").apply(&current), current);
    }

    #[test]
    fn test_apply_reset_restores_default() {
        let current = CharsetPalette::new("ab").unwrap();
        assert_eq!(PaletteInput::Reset.apply(&current), CharsetPalette::default());
    }

    proptest! {
        #[test]
        fn prop_bucket_in_range(text in "\\PC{1,64}", luminance in any::<u8>()) {
            let palette = CharsetPalette::new(&text).unwrap();
            let bucket = palette.bucket(luminance);
            prop_assert!(bucket < palette.len());
            prop_assert_eq!(bucket, luminance as usize * palette.len() / 256);
        }

        #[test]
        fn prop_glyphs_are_printable(text in "(\\PC|\n|\r|\t){1,32}") {
            if let Some(palette) = CharsetPalette::new(&text) {
                prop_assert!(palette.glyphs().iter().all(|c| !c.is_control()));
            }
        }
    }
}
