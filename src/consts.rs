// Points per millimetre (1 inch = 72 pt = 25.4 mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

#[inline]
pub const fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// A4 landscape, in millimetres
pub const A4_LANDSCAPE_WIDTH_MM: f32 = 297.0;
pub const A4_LANDSCAPE_HEIGHT_MM: f32 = 210.0;

// Business card size (55mm x 91mm, portrait)
pub const CARD_WIDTH_MM: f32 = 55.0;
pub const CARD_HEIGHT_MM: f32 = 91.0;

// Grid layout: 5x2 cards per page
pub const CARDS_PER_ROW: usize = 5;
pub const CARDS_PER_COL: usize = 2;

pub const MARGIN_X_MM: f32 = 11.0;
pub const MARGIN_Y_MM: f32 = 14.0;
pub const PADDING_MM: f32 = 0.0;

// The duplex printer shifts everything left by about 3mm.
pub const PRINTER_OFFSET_MM: f32 = 3.0;

pub const TEXT_FONT: &str = "Consolas";
pub const BINARY_FONT: &str = "Lucida Console";

pub const BORDER_WIDTH: f32 = 24.0;
pub const UNDERLINE_WIDTH: f32 = 0.15;
// Underlines run from 10mm to 45mm inside the card.
pub const UNDERLINE_START_MM: f32 = 10.0;
pub const UNDERLINE_END_MM: f32 = 45.0;
