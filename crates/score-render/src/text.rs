//! Text measurement and boxed text rendering.
//!
//! The layouts work in fixed-size boxes, so text is auto-fitted: the
//! font scale shrinks until every line of the string fits the box.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Largest font size tried when auto-fitting.
pub const MAX_FONT_SIZE: f32 = 30.0;

/// Smallest font size auto-fitting will shrink to.
pub const MIN_FONT_SIZE: f32 = 8.0;

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Horizontal alignment inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
}

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> u32 {
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
pub fn line_height(font: &FontRef<'_>, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Find the largest scale (capped at `max_size`) at which every line of
/// `text` fits inside `width` x `height`.
pub fn fit_scale(font: &FontRef<'_>, text: &str, width: u32, height: u32, max_size: f32) -> PxScale {
    let lines: Vec<&str> = text.lines().collect();
    let line_count = lines.len().max(1) as u32;

    let mut size = max_size.min(MAX_FONT_SIZE);
    while size > MIN_FONT_SIZE {
        let scale = PxScale::from(size);
        let widest = lines
            .iter()
            .map(|l| measure_text_width(font, scale, l))
            .max()
            .unwrap_or(0);
        let total_height = line_height(font, scale) * line_count;

        if widest <= width && total_height <= height {
            break;
        }
        size -= 1.0;
    }

    PxScale::from(size.max(MIN_FONT_SIZE))
}

/// Render `text` into a transparent box of the given size, auto-fitted
/// and aligned. Multi-line strings are stacked top to bottom.
pub fn text_box(
    font: &FontRef<'_>,
    text: &str,
    size: (u32, u32),
    halign: HAlign,
    valign: VAlign,
    max_size: f32,
    margin: u32,
) -> RgbaImage {
    let (box_w, box_h) = size;
    let mut img = RgbaImage::new(box_w, box_h);

    let inner_w = box_w.saturating_sub(margin * 2).max(1);
    let inner_h = box_h.saturating_sub(margin * 2).max(1);
    let scale = fit_scale(font, text, inner_w, inner_h, max_size);
    let lh = line_height(font, scale);

    let lines: Vec<&str> = text.lines().collect();
    let total_height = lh * lines.len().max(1) as u32;

    let mut y = match valign {
        VAlign::Top => margin as i32,
        VAlign::Middle => (margin + inner_h.saturating_sub(total_height) / 2) as i32,
    };

    for line in lines {
        let text_width = measure_text_width(font, scale, line);
        let x = match halign {
            HAlign::Left => margin as i32,
            HAlign::Center => (margin + inner_w.saturating_sub(text_width) / 2) as i32,
            HAlign::Right => (margin + inner_w.saturating_sub(text_width)) as i32,
        };
        draw_text_mut(&mut img, TEXT_COLOR, x, y, scale, font, line);
        y += lh as i32;
    }

    img
}
