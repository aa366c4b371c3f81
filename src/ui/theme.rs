// CustView - ui/theme.rs
//
// Colours, column widths and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{AddedBy, AvatarRef};
use egui::Color32;

/// Layout constants.
pub const ROW_HEIGHT: f32 = 34.0;
pub const HEADER_HEIGHT: f32 = 24.0;
pub const AVATAR_SIZE: f32 = 24.0;
pub const SEARCH_BOX_WIDTH: f32 = 320.0;

/// Column widths (points), in header order.
pub const COL_ID: f32 = 80.0;
pub const COL_NAME: f32 = 230.0;
pub const COL_SCORE: f32 = 64.0;
pub const COL_EMAIL: f32 = 250.0;
pub const COL_LAST_MESSAGE: f32 = 150.0;
pub const COL_ADDED_BY: f32 = 90.0;

/// Apply the dark or light visuals and the configured body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
            body.size = font_size;
        }
        if let Some(button) = style.text_styles.get_mut(&egui::TextStyle::Button) {
            button.size = font_size;
        }
    });
}

/// Badge colour for the "Added By" column.
pub fn added_by_colour(added_by: AddedBy) -> Color32 {
    match added_by {
        AddedBy::Admin => Color32::from_rgb(59, 130, 246),   // Blue 500
        AddedBy::System => Color32::from_rgb(107, 114, 128), // Gray 500
        AddedBy::Sales1 => Color32::from_rgb(16, 185, 129),  // Emerald 500
        AddedBy::Sales2 => Color32::from_rgb(245, 158, 11),  // Amber 500
    }
}

/// Placeholder fill for an avatar handle. Stable per handle.
pub fn avatar_colour(avatar: AvatarRef) -> Color32 {
    let h = avatar
        .key()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let [r, g, b, _] = h.to_le_bytes();
    // Keep the fill mid-tone so white initials stay readable.
    Color32::from_rgb(64 + r / 2, 64 + g / 2, 64 + b / 2)
}

/// Score colour: red below 40, amber below 70, green otherwise.
pub fn score_colour(score: u8) -> Color32 {
    match score {
        0..=39 => Color32::from_rgb(239, 68, 68),
        40..=69 => Color32::from_rgb(234, 179, 8),
        _ => Color32::from_rgb(34, 197, 94),
    }
}
