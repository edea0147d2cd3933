//! Theme constants for the Hex GUI

use egui::Color32;

use crate::Side;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(236, 226, 205);
pub const CELL_FILL: Color32 = Color32::from_rgb(214, 196, 160);
pub const CELL_OUTLINE: Color32 = Color32::from_rgb(90, 70, 45);
pub const LABEL: Color32 = Color32::from_rgb(90, 70, 45);

// Stone colors
pub const RED_STONE: Color32 = Color32::from_rgb(205, 55, 50);
pub const RED_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(240, 120, 110);
pub const BLUE_STONE: Color32 = Color32::from_rgb(45, 95, 200);
pub const BLUE_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(120, 160, 240);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(250, 250, 250);
pub const ROUTE_MARKER: Color32 = Color32::from_rgb(255, 180, 50);

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 100)
}

pub fn stone_color(side: Side) -> Color32 {
    match side {
        Side::Red => RED_STONE,
        Side::Blue => BLUE_STONE,
    }
}

pub fn stone_highlight(side: Side) -> Color32 {
    match side {
        Side::Red => RED_STONE_HIGHLIGHT,
        Side::Blue => BLUE_STONE_HIGHLIGHT,
    }
}

pub fn stone_preview(side: Side) -> Color32 {
    match side {
        Side::Red => Color32::from_rgba_unmultiplied(205, 55, 50, 90),
        Side::Blue => Color32::from_rgba_unmultiplied(45, 95, 200, 90),
    }
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 40.0;
pub const STONE_RADIUS_RATIO: f32 = 0.62;
pub const CELL_OUTLINE_WIDTH: f32 = 1.0;
pub const EDGE_BAR_WIDTH: f32 = 6.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
