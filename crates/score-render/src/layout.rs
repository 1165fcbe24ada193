//! The two notification layouts.
//!
//! Goal and card events get a player-centric layout (portrait left,
//! score detail right); status changes and simple alerts get a
//! scoreboard layout (badges and score line). Geometry is fixed so the
//! overlay skin can position the image without measuring it.

use ab_glyph::FontRef;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::compose::{overlay, overlay_sized};
use crate::placeholder;
use crate::text::{HAlign, VAlign, text_box};
use crate::{
    BADGE_SIZE, CARD_OVERLAY_SIZE, DETAIL_SIZE, HEADING_SIZE, MATCHTIME_SIZE, NOTIFICATION_SIZE,
    PORTRAIT_SIZE,
};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);
const HEADING_MAX_PT: f32 = 18.0;
const DETAIL_MAX_PT: f32 = 20.0;
const MATCHTIME_MAX_PT: f32 = 25.0;

/// Card marker pasted over the portrait corner for booking events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOverlay {
    Yellow,
    Red,
}

/// Everything a layout needs, already resolved by the render worker.
/// Missing imagery is substituted with placeholders here.
#[derive(Debug, Default)]
pub struct LayoutInput<'a> {
    pub title: &'a str,
    pub home_team: &'a str,
    pub away_team: &'a str,
    pub home_score: u32,
    pub away_score: u32,
    pub match_time: &'a str,
    pub portrait: Option<&'a DynamicImage>,
    pub home_badge: Option<&'a DynamicImage>,
    pub away_badge: Option<&'a DynamicImage>,
    pub card: Option<CardOverlay>,
}

fn base_image() -> RgbaImage {
    RgbaImage::from_pixel(NOTIFICATION_SIZE.0, NOTIFICATION_SIZE.1, BACKGROUND)
}

/// Player-centric layout: heading, portrait (with optional card
/// marker), per-team score lines and the match time.
pub fn player_layout(font: &FontRef<'_>, input: &LayoutInput<'_>) -> RgbaImage {
    let mut base = base_image();

    let heading = text_box(
        font,
        input.title,
        HEADING_SIZE,
        HAlign::Center,
        VAlign::Middle,
        HEADING_MAX_PT,
        0,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(heading), 0, 0);

    let fallback;
    let portrait = match input.portrait {
        Some(p) => p,
        None => {
            fallback = placeholder::unknown_player();
            &fallback
        }
    };
    overlay_sized(&mut base, portrait, PORTRAIT_SIZE, 5, 25);

    if let Some(card) = input.card {
        let marker = match card {
            CardOverlay::Yellow => placeholder::yellow_card(),
            CardOverlay::Red => placeholder::red_card(),
        };
        // bottom-right corner of the portrait
        let x = 5 + PORTRAIT_SIZE.0 - CARD_OVERLAY_SIZE.0;
        let y = 25 + PORTRAIT_SIZE.1 - CARD_OVERLAY_SIZE.1;
        overlay(&mut base, &marker, x, y);
    }

    let score_detail = format!(
        "{}: {}\n{}: {}",
        input.home_team, input.home_score, input.away_team, input.away_score
    );
    let detail = text_box(
        font,
        &score_detail,
        DETAIL_SIZE,
        HAlign::Right,
        VAlign::Middle,
        DETAIL_MAX_PT,
        0,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(detail), 90, 25);

    let time_line = format!("Time: {}", input.match_time);
    let time = text_box(
        font,
        &time_line,
        MATCHTIME_SIZE,
        HAlign::Right,
        VAlign::Middle,
        MATCHTIME_MAX_PT,
        0,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(time), 90, 80);

    base
}

/// Scoreboard layout: heading between the team badges, team names
/// either side of the score.
pub fn scoreboard_layout(font: &FontRef<'_>, input: &LayoutInput<'_>) -> RgbaImage {
    let mut base = base_image();

    let heading = text_box(
        font,
        input.title,
        (180, 20),
        HAlign::Center,
        VAlign::Middle,
        HEADING_MAX_PT,
        0,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(heading), 85, 0);

    // Badges only appear as a pair; one lone badge reads as a mistake.
    if let (Some(home), Some(away)) = (input.home_badge, input.away_badge) {
        overlay_sized(&mut base, home, BADGE_SIZE, 40, 5);
        overlay_sized(&mut base, away, BADGE_SIZE, 270, 5);
    }

    let home = text_box(
        font,
        input.home_team,
        (130, 40),
        HAlign::Right,
        VAlign::Middle,
        DETAIL_MAX_PT,
        5,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(home), 0, 45);

    let away = text_box(
        font,
        input.away_team,
        (130, 40),
        HAlign::Left,
        VAlign::Middle,
        DETAIL_MAX_PT,
        5,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(away), 220, 45);

    let score_line = format!("{} - {}", input.home_score, input.away_score);
    let score = text_box(
        font,
        &score_line,
        (90, 40),
        HAlign::Center,
        VAlign::Middle,
        DETAIL_MAX_PT,
        0,
    );
    overlay(&mut base, &DynamicImage::ImageRgba8(score), 130, 45);

    base
}
