use std::borrow::Cow;

use serde::Serialize;

use crate::types::BitWidth;

/// Short names for the control characters that have no glyph of their own.
/// Any other value falls back to its printable ASCII character.
pub const SYMBOL_TABLE: [(u8, &str); 7] = [
    (0x00, "NUL"),
    (0x09, "TAB"),
    (0x0A, "LF"),
    (0x0D, "CR"),
    (0x1B, "ESC"),
    (0x20, "SP"),
    (0x7F, "DEL"),
];

pub fn symbol_for(value: u8) -> Option<Cow<'static, str>> {
    if let Some((_, name)) = SYMBOL_TABLE.iter().find(|(code, _)| *code == value) {
        return Some(Cow::Borrowed(*name));
    }
    value
        .is_ascii_graphic()
        .then(|| Cow::Owned(char::from(value).to_string()))
}

/// The four synchronized texts printed for one byte value.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ValueRepresentation {
    pub value: u8,
    pub decimal_text: String,
    pub hex_text: String,
    pub binary_text: String,
    pub symbol_text: Option<Cow<'static, str>>,
}

impl ValueRepresentation {
    /// Parses `hex` and derives every text. With `require_symbol`, values
    /// without a symbol are rejected instead of leaving `symbol_text` empty.
    pub fn parse(hex: &str, width: BitWidth, require_symbol: bool) -> Result<Self, &'static str> {
        let value = parse_hex(hex)?;
        if value > width.max_value() {
            return Err("value does not fit the card's bit width");
        }
        let symbol_text = symbol_for(value);
        if require_symbol && symbol_text.is_none() {
            return Err("value has no printable symbol");
        }
        Ok(Self {
            value,
            decimal_text: format!("{value:>2}"),
            hex_text: hex.to_string(),
            binary_text: binary_text(value, width),
            symbol_text,
        })
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol_text.as_deref()
    }
}

fn parse_hex(hex: &str) -> Result<u8, &'static str> {
    // from_str_radix accepts a leading '+', the deck format does not
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err("not a hexadecimal number");
    }
    u8::from_str_radix(hex, 16).map_err(|_| "value is larger than one byte")
}

pub fn binary_text(value: u8, width: BitWidth) -> String {
    match width {
        BitWidth::Byte => {
            let digits = format!("{value:08b}");
            format!("{} {}", &digits[..4], &digits[4..])
        }
        BitWidth::Nibble => {
            let digits = format!("{:04b}", value & 0x0F);
            let spaced: Vec<String> = digits.chars().map(String::from).collect();
            spaced.join(" ")
        }
    }
}
