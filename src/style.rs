use serde::{Deserialize, Serialize};

use crate::consts::{
    BINARY_FONT, BORDER_WIDTH, TEXT_FONT, UNDERLINE_END_MM, UNDERLINE_START_MM, UNDERLINE_WIDTH,
    mm_to_pt,
};
use crate::types::{BitWidth, Color, Face};

/// The two sheets this tool prints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// 8-bit ASCII cards, symbol on the front.
    #[default]
    Ascii,
    /// 4-bit hex digit cards, digit on both faces.
    Hex,
}

// p1 front 5x2, then the mirrored p1 back for duplex printing, and so on
const ASCII_PRESET: [&str; 40] = [
    "09", "0A", "0D", "1B", "20", "22", "25", "30", "33", "2F",
    "20", "1B", "0D", "0A", "09", "2F", "33", "30", "25", "22",
    "2B", "40", "41", "44", "50", "5C", "60", "66", "7A", "7F",
    "50", "44", "41", "40", "2B", "7F", "7A", "66", "60", "5C",
];

const HEX_PRESET: [&str; 60] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "A",
    "5", "4", "3", "2", "1", "A", "9", "8", "7", "6",
    "B", "C", "D", "E", "F", "B", "C", "D", "E", "F",
    "F", "E", "D", "C", "B", "F", "E", "D", "C", "B",
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "A",
    "5", "4", "3", "2", "1", "A", "9", "8", "7", "6",
];

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Ascii => "ascii",
            Variant::Hex => "hex",
        }
    }

    pub fn bit_width(self) -> BitWidth {
        match self {
            Variant::Ascii => BitWidth::Byte,
            Variant::Hex => BitWidth::Nibble,
        }
    }

    pub fn preset(self) -> &'static [&'static str] {
        match self {
            Variant::Ascii => &ASCII_PRESET,
            Variant::Hex => &HEX_PRESET,
        }
    }

    pub fn default_output(self) -> String {
        format!("karuta-{}.pdf", self.name())
    }

    pub fn style(self) -> CardStyle {
        match self {
            Variant::Ascii => CardStyle::ascii(),
            Variant::Hex => CardStyle::hex(),
        }
    }
}

/// A font, size and position relative to the card's top-left corner.
/// `dy` is measured downward from the top edge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextSlot {
    pub font: String,
    pub size: f32,
    pub dx: f32,
    pub dy: f32,
}

impl TextSlot {
    fn mm(font: &str, size: f32, dx_mm: f32, dy_mm: f32) -> Self {
        Self {
            font: font.to_string(),
            size,
            dx: mm_to_pt(dx_mm),
            dy: mm_to_pt(dy_mm),
        }
    }
}

/// Symbol sizes are picked by the length of the symbol text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SymbolTiers {
    pub single: TextSlot,
    pub double: TextSlot,
    pub long: TextSlot,
}

impl SymbolTiers {
    pub fn for_symbol(&self, symbol: &str) -> &TextSlot {
        match symbol.chars().count() {
            0 | 1 => &self.single,
            2 => &self.double,
            _ => &self.long,
        }
    }
}

/// What the big text in the middle of a front card shows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FrontValue {
    Symbol(SymbolTiers),
    Hex(TextSlot),
}

/// Every visual choice for one variant's cards. Lengths are in points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub border_color: Color,
    pub border_width: f32,
    pub decimal: TextSlot,
    pub back_hex: TextSlot,
    pub front_value: FrontValue,
    pub binary: TextSlot,
    pub underline_color: Color,
    pub underline_width: f32,
    pub underline_start: f32,
    pub underline_end: f32,
    pub underline_front_dy: f32,
    pub underline_back_dy: f32,
}

impl CardStyle {
    pub fn ascii() -> Self {
        Self {
            border_color: Color::ROYAL_BLUE,
            decimal: TextSlot::mm(TEXT_FONT, 28.0, 21.0, 23.0),
            back_hex: TextSlot::mm(TEXT_FONT, 96.0, 9.0, 58.0),
            front_value: FrontValue::Symbol(SymbolTiers {
                single: TextSlot::mm(TEXT_FONT, 144.0, 14.0, 61.0),
                double: TextSlot::mm(TEXT_FONT, 60.0, 17.0, 53.0),
                long: TextSlot::mm(TEXT_FONT, 60.0, 10.0, 53.0),
            }),
            binary: TextSlot::mm(BINARY_FONT, 18.0, 10.0, 78.0),
            underline_front_dy: mm_to_pt(75.0),
            underline_back_dy: mm_to_pt(63.0),
            ..Self::base()
        }
    }

    pub fn hex() -> Self {
        let digit = TextSlot::mm(TEXT_FONT, 166.0, 11.0, 65.0);
        Self {
            border_color: Color::VIOLET,
            decimal: TextSlot::mm(TEXT_FONT, 28.0, 21.0, 17.0),
            back_hex: digit.clone(),
            front_value: FrontValue::Hex(digit),
            binary: TextSlot::mm(BINARY_FONT, 20.0, 12.0, 81.0),
            underline_front_dy: mm_to_pt(75.0),
            underline_back_dy: mm_to_pt(71.0),
            ..Self::base()
        }
    }

    fn base() -> Self {
        let blank = TextSlot::mm(TEXT_FONT, 12.0, 0.0, 0.0);
        Self {
            border_color: Color::BLACK,
            border_width: BORDER_WIDTH,
            decimal: blank.clone(),
            back_hex: blank.clone(),
            front_value: FrontValue::Hex(blank.clone()),
            binary: blank,
            underline_color: Color::BLACK,
            underline_width: UNDERLINE_WIDTH,
            underline_start: mm_to_pt(UNDERLINE_START_MM),
            underline_end: mm_to_pt(UNDERLINE_END_MM),
            underline_front_dy: 0.0,
            underline_back_dy: 0.0,
        }
    }

    /// True when front cards print the symbol, so every value needs one.
    pub fn needs_symbols(&self) -> bool {
        matches!(self.front_value, FrontValue::Symbol(_))
    }

    pub fn underline_dy(&self, face: Face) -> f32 {
        match face {
            Face::Front => self.underline_front_dy,
            Face::Back => self.underline_back_dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_tiers_follow_length() {
        let CardStyle {
            front_value: FrontValue::Symbol(tiers),
            ..
        } = CardStyle::ascii()
        else {
            panic!("ascii cards show symbols");
        };
        assert_eq!(tiers.for_symbol("A").size, 144.0);
        assert_eq!(tiers.for_symbol("LF").dx, mm_to_pt(17.0));
        assert_eq!(tiers.for_symbol("ESC").dx, mm_to_pt(10.0));
        assert_eq!(tiers.for_symbol("ESC").size, 60.0);
    }

    #[test]
    fn only_ascii_needs_symbols() {
        assert!(Variant::Ascii.style().needs_symbols());
        assert!(!Variant::Hex.style().needs_symbols());
    }

    #[test]
    fn presets_fill_whole_duplex_sheets() {
        for variant in [Variant::Ascii, Variant::Hex] {
            assert_eq!(variant.preset().len() % 20, 0, "{variant:?}");
        }
    }
}
