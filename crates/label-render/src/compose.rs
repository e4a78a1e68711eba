//! Image composition: borders, pasting, and stacking text under a symbol.

use ab_glyph::{Font, PxScale};
use image::{DynamicImage, GrayImage, Rgba, RgbaImage};

use crate::text::{self, BLACK, TEXT_MARGIN};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Surround `img` with a white border of `border` pixels on every side.
pub fn add_border(img: &DynamicImage, border: u32) -> DynamicImage {
    if border == 0 {
        return img.clone();
    }
    let mut out = RgbaImage::from_pixel(
        img.width() + border * 2,
        img.height() + border * 2,
        WHITE,
    );
    paste(&mut out, img, border, border);
    DynamicImage::ImageRgba8(out)
}

/// Copy `top` onto `base` at the given position, clipping at the edges.
///
/// Fully transparent pixels are skipped; everything else replaces the base.
pub fn paste(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    for (dx, dy, pixel) in top_rgba.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() && pixel[3] > 0 {
            base.put_pixel(target_x, target_y, *pixel);
        }
    }
}

/// Append centered text lines below a symbol image.
///
/// The output is widened when a line is wider than the symbol; the symbol
/// stays horizontally centered.
pub fn stack_text<F: Font>(
    symbol: &GrayImage,
    lines: &[&str],
    font: &F,
    scale: PxScale,
) -> DynamicImage {
    let symbol = DynamicImage::ImageLuma8(symbol.clone());
    if lines.is_empty() {
        return symbol;
    }

    let text_width = text::widest_line(font, scale, lines) + TEXT_MARGIN * 2;
    let width = symbol.width().max(text_width);
    let block_height = text::text_block_height(font, scale, lines);
    let lh = text::line_height(font, scale);

    let mut out = RgbaImage::from_pixel(width, symbol.height() + block_height, WHITE);
    paste(&mut out, &symbol, (width - symbol.width()) / 2, 0);

    let mut y = (symbol.height() + TEXT_MARGIN) as i32;
    for line in lines {
        text::draw_centered_text(&mut out, font, scale, y, line, BLACK);
        y += lh as i32;
    }

    DynamicImage::ImageRgba8(out)
}
