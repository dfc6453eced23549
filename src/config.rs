use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{
    CARD_HEIGHT_MM, CARD_WIDTH_MM, CARDS_PER_COL, CARDS_PER_ROW, MARGIN_X_MM, MARGIN_Y_MM,
    PADDING_MM, PRINTER_OFFSET_MM, mm_to_pt,
};
use crate::error::{Error, Result};
use crate::parser::parse_deck;
use crate::planner::ValueSequence;
use crate::style::Variant;
use crate::types::{GridGeometry, PageSize, SheetLayout};

/// Run configuration, usually read from a TOML file.
///
/// ```toml
/// variant = "hex"
/// output = "digits.pdf"
///
/// [grid]
/// columns = 5
/// rows = 2
/// printer_offset = 3.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub variant: Variant,
    /// Defaults to `karuta-<variant>.pdf`.
    pub output: Option<PathBuf>,
    /// Card order; replaces the variant's preset.
    pub values: Option<Vec<String>>,
    /// Deck file with the card order, used when `values` is absent.
    pub deck: Option<PathBuf>,
    pub grid: GridConfig,
}

/// Grid measurements in millimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub card_width: f32,
    pub card_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub padding: f32,
    pub printer_offset: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: CARDS_PER_ROW,
            rows: CARDS_PER_COL,
            card_width: CARD_WIDTH_MM,
            card_height: CARD_HEIGHT_MM,
            margin_x: MARGIN_X_MM,
            margin_y: MARGIN_Y_MM,
            padding: PADDING_MM,
            printer_offset: PRINTER_OFFSET_MM,
        }
    }
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: Config = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file. Relative `deck` paths resolve against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading config from {}", path.display());
        let mut config = Self::from_toml(&std::fs::read_to_string(path)?)?;
        if let (Some(deck), Some(dir)) = (&config.deck, path.parent()) {
            if deck.is_relative() {
                config.deck = Some(dir.join(deck));
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.values.is_some() && self.deck.is_some() {
            return Err(Error::Config("set either `values` or `deck`, not both".into()));
        }
        let g = &self.grid;
        let lengths = [
            g.card_width,
            g.card_height,
            g.margin_x,
            g.margin_y,
            g.padding,
        ];
        if lengths.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::Config("grid lengths must be non-negative".into()));
        }
        // may be negative to shift the other way
        if !g.printer_offset.is_finite() {
            return Err(Error::Config("printer offset must be a finite number".into()));
        }
        self.layout().grid.validate()
    }

    pub fn layout(&self) -> SheetLayout {
        let g = &self.grid;
        SheetLayout {
            page: PageSize::a4_landscape(),
            grid: GridGeometry {
                columns: g.columns,
                rows: g.rows,
                card_width: mm_to_pt(g.card_width),
                card_height: mm_to_pt(g.card_height),
                margin_x: mm_to_pt(g.margin_x),
                margin_y: mm_to_pt(g.margin_y),
                padding: mm_to_pt(g.padding),
            },
            printer_offset: mm_to_pt(g.printer_offset),
        }
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.variant.default_output()))
    }

    /// The card order: inline values, then the deck file, then the preset.
    pub fn sequence(&self) -> Result<ValueSequence> {
        if let Some(values) = &self.values {
            return Ok(ValueSequence::new(values.iter().cloned()));
        }
        if let Some(deck) = &self.deck {
            return parse_deck(&std::fs::read_to_string(deck)?);
        }
        Ok(ValueSequence::preset(self.variant))
    }
}
