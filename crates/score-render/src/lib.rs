//! Notification bitmap composition for live score alerts.
//!
//! Produces the fixed-size images shown by the advanced notification
//! overlay: a player-centric layout for goal and card events, and a
//! scoreboard layout for status changes and simple alerts.

pub mod compose;
pub mod layout;
pub mod placeholder;
pub mod text;

pub use layout::{CardOverlay, LayoutInput, player_layout, scoreboard_layout};

/// Size of a finished notification image. The overlay surface assumes
/// this size, so changing it means updating the overlay as well.
pub const NOTIFICATION_SIZE: (u32, u32) = (350, 100);

/// Size of the heading strip across the top of a notification.
pub const HEADING_SIZE: (u32, u32) = (350, 20);

/// Size of a player portrait / cutout.
pub const PORTRAIT_SIZE: (u32, u32) = (75, 75);

/// Size of the match-time strip in the player layout.
pub const MATCHTIME_SIZE: (u32, u32) = (225, 20);

/// Size of the score detail block in the player layout.
pub const DETAIL_SIZE: (u32, u32) = (225, 60);

/// Size of the card overlay pasted onto a portrait.
pub const CARD_OVERLAY_SIZE: (u32, u32) = (20, 26);

/// Size of a team badge in the scoreboard layout.
pub const BADGE_SIZE: (u32, u32) = (40, 40);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("font data could not be parsed")]
    InvalidFont,
}

/// Parse raw TTF/OTF bytes into a font usable by the layout functions.
pub fn load_font(bytes: &[u8]) -> Result<ab_glyph::FontRef<'_>, RenderError> {
    ab_glyph::FontRef::try_from_slice(bytes).map_err(|_| RenderError::InvalidFont)
}
