//! Built-in placeholder imagery.
//!
//! Used whenever the image cache cannot resolve a portrait or badge,
//! so a render task always has something to paste.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut};

use crate::{CARD_OVERLAY_SIZE, PORTRAIT_SIZE};

const SILHOUETTE: Rgba<u8> = Rgba([150, 150, 150, 255]);
const BACKDROP: Rgba<u8> = Rgba([60, 60, 60, 255]);
const YELLOW: Rgba<u8> = Rgba([240, 200, 20, 255]);
const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);

/// Generic head-and-shoulders silhouette used when no player image is
/// available.
pub fn unknown_player() -> DynamicImage {
    let (w, h) = PORTRAIT_SIZE;
    let mut img = RgbaImage::from_pixel(w, h, BACKDROP);

    let cx = (w / 2) as i32;
    let head_r = (w / 5) as i32;
    draw_filled_circle_mut(&mut img, (cx, (h / 3) as i32), head_r, SILHOUETTE);
    draw_filled_ellipse_mut(
        &mut img,
        (cx, h as i32),
        (w / 2) as i32 - 4,
        (h / 3) as i32,
        SILHOUETTE,
    );

    DynamicImage::ImageRgba8(img)
}

/// Solid yellow card marker pasted over a portrait corner.
pub fn yellow_card() -> DynamicImage {
    card(YELLOW)
}

/// Solid red card marker pasted over a portrait corner.
pub fn red_card() -> DynamicImage {
    card(RED)
}

fn card(color: Rgba<u8>) -> DynamicImage {
    let (w, h) = CARD_OVERLAY_SIZE;
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, color))
}
