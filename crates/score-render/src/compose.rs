//! Image composition — alpha-composited pasting of layout elements.

use image::{DynamicImage, RgbaImage};

/// Overlay `top` image onto `base` at the given position.
///
/// The `top` image is alpha-composited over the base. Pixels falling
/// outside the base are ignored.
pub fn overlay(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    for (dx, dy, pixel) in top_rgba.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

/// Resize `img` to exactly `size`, then overlay it onto `base`.
pub fn overlay_sized(base: &mut RgbaImage, img: &DynamicImage, size: (u32, u32), x: u32, y: u32) {
    let resized = img.resize_exact(size.0, size.1, image::imageops::FilterType::Lanczos3);
    overlay(base, &resized, x, y);
}

fn blend_pixel(bg: &image::Rgba<u8>, fg: &image::Rgba<u8>, alpha: f32) -> image::Rgba<u8> {
    let inv = 1.0 - alpha;
    image::Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}
