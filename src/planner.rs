use log::debug;
use serde::Serialize;

use crate::card::ValueRepresentation;
use crate::error::{Error, Result};
use crate::style::Variant;
use crate::types::{PlacementRecord, Point, SheetLayout};

/// Ordered hex codes to print, one card per entry. Repeats are meaningful:
/// the same code shows up once per physical face.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueSequence(Vec<String>);

impl ValueSequence {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    pub fn preset(variant: Variant) -> Self {
        Self::new(variant.preset().iter().copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Where a card goes and what it says.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlannedCard {
    pub placement: PlacementRecord,
    /// Lower-left corner of the card on its page, in points.
    pub origin: Point,
    pub value: ValueRepresentation,
}

pub struct SequencePlanner<'a> {
    layout: &'a SheetLayout,
    variant: Variant,
}

impl<'a> SequencePlanner<'a> {
    pub fn new(layout: &'a SheetLayout, variant: Variant) -> Self {
        Self { layout, variant }
    }

    /// Plans every card up front. Nothing is returned unless every value is
    /// valid, so a bad code never produces a half-printed sheet.
    pub fn plan(&self, sequence: &ValueSequence) -> Result<Vec<PlannedCard>> {
        self.layout.grid.validate()?;
        let width = self.variant.bit_width();
        let require_symbol = self.variant.style().needs_symbols();

        let cards = sequence
            .iter()
            .enumerate()
            .map(|(index, hex)| {
                let value = ValueRepresentation::parse(hex, width, require_symbol).map_err(|reason| {
                    Error::InvalidValue {
                        index,
                        value: hex.to_string(),
                        reason,
                    }
                })?;
                let placement = self.layout.grid.placement(index);
                Ok(PlannedCard {
                    origin: self.layout.card_origin(&placement),
                    placement,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "planned {} {} cards over {} pages",
            cards.len(),
            self.variant.name(),
            self.layout.grid.page_count(cards.len())
        );
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::types::{Face, GridGeometry};

    fn layout(columns: usize, rows: usize) -> SheetLayout {
        SheetLayout {
            grid: GridGeometry {
                columns,
                rows,
                ..GridGeometry::default()
            },
            ..SheetLayout::default()
        }
    }

    #[test]
    fn first_sheet_of_ascii_preset() {
        let layout = layout(5, 2);
        let sequence = ValueSequence::new(Variant::Ascii.preset()[..20].iter().copied());
        let cards = SequencePlanner::new(&layout, Variant::Ascii).plan(&sequence).unwrap();

        assert_eq!(cards.len(), 20);
        assert_eq!(layout.grid.page_count(cards.len()), 2);

        let first = &cards[0];
        assert_eq!((first.placement.page_index, first.placement.row, first.placement.column), (0, 0, 0));
        assert_eq!(first.placement.face, Face::Front);
        assert_eq!(first.value.decimal_text, " 9");
        assert_eq!(first.value.symbol(), Some("TAB"));
        assert_eq!(first.value.binary_text, "0000 1001");

        let back = &cards[10];
        assert_eq!((back.placement.page_index, back.placement.row, back.placement.column), (1, 0, 0));
        assert_eq!(back.placement.face, Face::Back);
        assert_eq!(back.value.hex_text, "20");
    }

    #[test]
    fn invalid_value_reports_its_position() {
        let layout = layout(5, 2);
        let sequence = ValueSequence::new(["41", "42", "zz", "01"]);
        let err = SequencePlanner::new(&layout, Variant::Ascii).plan(&sequence).unwrap_err();
        match err {
            Error::InvalidValue { index, value, .. } => {
                assert_eq!(index, 2);
                assert_eq!(value, "zz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unprintable_value_fails_only_where_symbols_are_drawn() {
        let layout = layout(5, 2);
        let sequence = ValueSequence::new(["1"]);
        assert!(SequencePlanner::new(&layout, Variant::Ascii).plan(&sequence).is_err());
        assert!(SequencePlanner::new(&layout, Variant::Hex).plan(&sequence).is_ok());
    }

    #[test]
    fn empty_grid_fails_before_planning() {
        let layout = layout(0, 2);
        let err = SequencePlanner::new(&layout, Variant::Ascii)
            .plan(&ValueSequence::preset(Variant::Ascii))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn planning_is_deterministic() {
        let layout = layout(5, 2);
        let planner = SequencePlanner::new(&layout, Variant::Hex);
        let sequence = ValueSequence::preset(Variant::Hex);
        assert_eq!(planner.plan(&sequence).unwrap(), planner.plan(&sequence).unwrap());
    }

    proptest! {
        #[test]
        fn placements_reconstruct_index(columns in 1usize..8, rows in 1usize..8, len in 0usize..120) {
            let layout = layout(columns, rows);
            let sequence = ValueSequence::new(std::iter::repeat_n("41", len));
            let cards = SequencePlanner::new(&layout, Variant::Ascii).plan(&sequence).unwrap();
            let per_page = columns * rows;
            for (i, card) in cards.iter().enumerate() {
                let p = card.placement;
                prop_assert_eq!(p.index, i);
                prop_assert_eq!(p.page_index * per_page + p.slot_in_page, i);
                prop_assert_eq!(p.row * columns + p.column, p.slot_in_page);
                prop_assert_eq!(p.face, Face::of_page(p.page_index));
            }
        }
    }
}
