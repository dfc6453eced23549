use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    A4_LANDSCAPE_HEIGHT_MM, A4_LANDSCAPE_WIDTH_MM, CARD_HEIGHT_MM, CARD_WIDTH_MM, CARDS_PER_COL,
    CARDS_PER_ROW, MARGIN_X_MM, MARGIN_Y_MM, PADDING_MM, PRINTER_OFFSET_MM, mm_to_pt,
};
use crate::error::{Error, Result};

/// Which side of the duplex sheet a page prints on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Back,
}

impl Face {
    /// Even pages are fronts, odd pages are backs.
    pub fn of_page(page_index: usize) -> Self {
        if page_index % 2 == 0 {
            Face::Front
        } else {
            Face::Back
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Front => f.write_str("front"),
            Face::Back => f.write_str("back"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

/// RGB colour, each channel in `0.0..=1.0`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const ROYAL_BLUE: Color = Color::rgb(0.254902, 0.411765, 0.882353);
    pub const VIOLET: Color = Color::rgb(0.933333, 0.509804, 0.933333);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn a4_landscape() -> Self {
        Self {
            width: mm_to_pt(A4_LANDSCAPE_WIDTH_MM),
            height: mm_to_pt(A4_LANDSCAPE_HEIGHT_MM),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::a4_landscape()
    }
}

/// Card grid of one page. Lengths are in points.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
    pub card_width: f32,
    pub card_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub padding: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            columns: CARDS_PER_ROW,
            rows: CARDS_PER_COL,
            card_width: mm_to_pt(CARD_WIDTH_MM),
            card_height: mm_to_pt(CARD_HEIGHT_MM),
            margin_x: mm_to_pt(MARGIN_X_MM),
            margin_y: mm_to_pt(MARGIN_Y_MM),
            padding: mm_to_pt(PADDING_MM),
        }
    }
}

impl GridGeometry {
    /// Cards on one page. Only meaningful once `validate` has passed.
    pub fn cards_per_page(&self) -> usize {
        self.columns * self.rows
    }

    pub fn validate(&self) -> Result<()> {
        match self.columns.checked_mul(self.rows) {
            Some(0) => Err(Error::Config(format!(
                "grid must hold at least one card, got {}x{}",
                self.columns, self.rows
            ))),
            Some(_) => Ok(()),
            None => Err(Error::Config(format!(
                "grid {}x{} holds more cards than can be counted",
                self.columns, self.rows
            ))),
        }
    }

    /// Placement of the `index`th card. Callers must have validated the grid.
    pub fn placement(&self, index: usize) -> PlacementRecord {
        let per_page = self.cards_per_page();
        let page_index = index / per_page;
        let slot_in_page = index % per_page;
        PlacementRecord {
            index,
            page_index,
            slot_in_page,
            column: slot_in_page % self.columns,
            row: slot_in_page / self.columns,
            face: Face::of_page(page_index),
        }
    }

    pub fn is_last_slot(&self, slot_in_page: usize) -> bool {
        slot_in_page + 1 == self.cards_per_page()
    }

    pub fn page_count(&self, cards: usize) -> usize {
        cards.div_ceil(self.cards_per_page())
    }
}

/// Page, grid and printer correction for one run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub page: PageSize,
    pub grid: GridGeometry,
    /// Constant horizontal correction for the printer's feed bias.
    pub printer_offset: f32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            page: PageSize::default(),
            grid: GridGeometry::default(),
            printer_offset: mm_to_pt(PRINTER_OFFSET_MM),
        }
    }
}

impl SheetLayout {
    /// Lower-left corner of the card described by `placement`.
    pub fn card_origin(&self, placement: &PlacementRecord) -> Point {
        let g = &self.grid;
        let x = g.margin_x + placement.column as f32 * (g.card_width + g.padding) + self.printer_offset;
        let y = self.page.height - (g.margin_y + (placement.row + 1) as f32 * (g.card_height + g.padding));
        Point::new(x, y)
    }

    pub fn card_rect(&self, placement: &PlacementRecord) -> Rect {
        Rect {
            origin: self.card_origin(placement),
            width: self.grid.card_width,
            height: self.grid.card_height,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementRecord {
    pub index: usize,
    pub page_index: usize,
    pub slot_in_page: usize,
    pub column: usize,
    pub row: usize,
    pub face: Face,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BitWidth {
    /// 8 digits, grouped "xxxx xxxx"
    Byte,
    /// 4 digits, spaced "x x x x"
    Nibble,
}

impl BitWidth {
    pub fn max_value(self) -> u8 {
        match self {
            BitWidth::Byte => u8::MAX,
            BitWidth::Nibble => 0x0F,
        }
    }

    /// Width of the formatted binary text, separators included.
    pub fn text_len(self) -> usize {
        match self {
            BitWidth::Byte => 9,
            BitWidth::Nibble => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn five_by_two() -> GridGeometry {
        GridGeometry {
            columns: 5,
            rows: 2,
            ..GridGeometry::default()
        }
    }

    #[rstest]
    #[case(0, 0, 0, 0, 0, Face::Front)]
    #[case(4, 0, 4, 0, 4, Face::Front)]
    #[case(5, 0, 5, 1, 0, Face::Front)]
    #[case(9, 0, 9, 1, 4, Face::Front)]
    #[case(10, 1, 0, 0, 0, Face::Back)]
    #[case(27, 2, 7, 1, 2, Face::Front)]
    #[case(39, 3, 9, 1, 4, Face::Back)]
    fn placement_arithmetic(
        #[case] index: usize,
        #[case] page_index: usize,
        #[case] slot_in_page: usize,
        #[case] row: usize,
        #[case] column: usize,
        #[case] face: Face,
    ) {
        assert_eq!(
            five_by_two().placement(index),
            PlacementRecord {
                index,
                page_index,
                slot_in_page,
                column,
                row,
                face,
            }
        );
    }

    #[test]
    fn empty_grid_is_rejected() {
        let grid = GridGeometry {
            columns: 0,
            ..GridGeometry::default()
        };
        assert!(matches!(grid.validate(), Err(Error::Config(_))));
        assert!(five_by_two().validate().is_ok());
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let grid = GridGeometry {
            columns: 1 << (usize::BITS - 2),
            rows: 4,
            ..GridGeometry::default()
        };
        assert!(matches!(grid.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn page_count_rounds_up() {
        let grid = five_by_two();
        assert_eq!(grid.page_count(0), 0);
        assert_eq!(grid.page_count(10), 1);
        assert_eq!(grid.page_count(13), 2);
        assert_eq!(grid.page_count(20), 2);
    }

    #[test]
    fn origin_includes_printer_offset_and_flips_y() {
        let layout = SheetLayout::default();
        let first = layout.card_origin(&layout.grid.placement(0));
        assert!((first.x - mm_to_pt(14.0)).abs() < 1e-3);
        assert!((first.y - (layout.page.height - mm_to_pt(14.0 + 91.0))).abs() < 1e-3);

        let below = layout.card_origin(&layout.grid.placement(6));
        assert!((below.x - mm_to_pt(14.0 + 55.0)).abs() < 1e-3);
        assert!((below.y - (layout.page.height - mm_to_pt(14.0 + 182.0))).abs() < 1e-3);
    }
}
