use crate::config::TransformConfig;
use crate::filters::calculate_luminance;
use crate::palette::CharsetPalette;
use image::{DynamicImage, GenericImageView, imageops};
use rayon::prelude::*;

/// Text art produced by [`render_ascii`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiArt {
    /// Rows joined by `\n`, no trailing newline
    pub text: String,
    /// Glyphs per row
    pub columns: u32,
    /// Rows actually emitted
    pub rows: u32,
    /// Rows were dropped to stay within the character budget
    pub truncated: bool,
}

impl AsciiArt {
    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Rows of the glyph grid for an image of `width x height` rendered `columns` wide
///
/// `round(columns * height / width * glyph_aspect)`, at least 1. The aspect factor
/// compensates for glyph cells being taller than wide.
pub fn grid_rows(width: u32, height: u32, columns: u32, glyph_aspect: f32) -> u32 {
    let ratio = height as f64 / width as f64;
    let rows = (columns as f64 * ratio * glyph_aspect as f64).round();
    (rows as u32).max(1)
}

/// Maximum rows of `columns` glyphs (plus a line break each) that fit in `char_budget`
///
/// One row's worth of characters is held back from the budget.
pub fn max_rows(columns: u32, char_budget: usize) -> usize {
    let row_cost = columns as usize + 1;
    char_budget.saturating_sub(row_cost) / row_cost
}

/// Render an image as luminance-bucketed text art
///
/// Pipeline:
/// 1. Extract BT.601 luminance
/// 2. Resize to `target_width` columns and [`grid_rows`] rows
/// 3. Map each pixel to `palette[luminance * len / 256]`
/// 4. Emit at most [`max_rows`] rows, dropping the rest
///
/// When rows will be dropped, the source is cropped to the part that feeds
/// the kept rows before resizing.
///
/// # Arguments
/// * `img` - Input image, left untouched
/// * `target_width` - Glyphs per row, at least 1
/// * `palette` - Glyph ramp, darkest first
/// * `config` - Supplies `glyph_aspect` and `char_budget`
///
/// # Returns
/// The rendered [`AsciiArt`]; `truncated` is set when rows were dropped
pub fn render_ascii(
    img: &DynamicImage,
    target_width: u32,
    palette: &CharsetPalette,
    config: &TransformConfig,
) -> AsciiArt {
    assert!(target_width >= 1, "target_width must be at least 1");

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return AsciiArt {
            text: String::new(),
            columns: target_width,
            rows: 0,
            truncated: false,
        };
    }

    let rows = grid_rows(width, height, target_width, config.glyph_aspect);
    let emitted = (rows as usize).min(max_rows(target_width, config.char_budget));
    let truncated = emitted < rows as usize;

    // Only the top of the source feeds rows that survive the budget
    let lines: Vec<String> = if emitted == 0 {
        Vec::new()
    } else {
        let kept_height = if truncated {
            (height as u64 * emitted as u64).div_ceil(rows as u64) as u32
        } else {
            height
        };
        let source = img.crop_imm(0, 0, width, kept_height.clamp(1, height));

        // Step 1: Extract luminance
        let lum = calculate_luminance(&source);

        // Step 2: Resize to the glyph grid
        let grid = imageops::resize(
            &lum,
            target_width,
            emitted as u32,
            imageops::FilterType::Lanczos3,
        );

        // Step 3: Map rows to glyphs
        grid.as_raw()
            .par_chunks(target_width as usize)
            .map(|row| row.iter().map(|&l| palette.glyph(l)).collect())
            .collect()
    };

    if truncated {
        log::debug!(
            "ascii output truncated: {} of {} rows kept ({} columns, budget {})",
            emitted,
            rows,
            target_width,
            config.char_budget
        );
    }

    AsciiArt {
        text: lines.join("\n"),
        columns: target_width,
        rows: emitted as u32,
        truncated,
    }
}
