//! Text measurement and centered label drawing.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Default label font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Vertical gap between the symbol and the first text line.
pub const TEXT_MARGIN: u32 = 5;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Compute the line height for the given font and scale.
pub fn line_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Draw centered text on an existing RGBA image.
pub fn draw_centered_text<F: Font>(
    img: &mut RgbaImage,
    font: &F,
    scale: PxScale,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let text_width = measure_text_width(font, scale, text) as i32;
    let x = ((img.width() as i32) - text_width).max(0) / 2;
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Space needed below a symbol to hold `lines` of text.
pub fn text_block_height<F: Font>(font: &F, scale: PxScale, lines: &[&str]) -> u32 {
    if lines.is_empty() {
        return 0;
    }
    TEXT_MARGIN * 2 + line_height(font, scale) * lines.len() as u32
}

/// Widest of `lines` in pixels.
pub fn widest_line<F: Font>(font: &F, scale: PxScale, lines: &[&str]) -> u32 {
    lines
        .iter()
        .map(|line| measure_text_width(font, scale, line))
        .max()
        .unwrap_or(0)
}

/// Replace spaces so a label survives as a single token.
pub fn sanitize_label(label: &str) -> String {
    label.replace(' ', "_")
}
