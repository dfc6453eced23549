//! Print-ready double-sided card sheets for byte values.
//!
//! Every card shows one value four ways (decimal, hex, binary and its ASCII
//! symbol). Cards are laid out on a fixed grid; even pages are fronts and
//! odd pages are the matching backs for duplex printing.
//!
//! [`SequencePlanner`] turns the card order into placed cards, and
//! [`RenderDriver`] draws them onto a [`DrawingSurface`].

pub mod card;
pub mod config;
pub mod consts;
pub mod error;
pub mod parser;
pub mod planner;
pub mod render;
pub mod style;
pub mod surface;
pub mod types;

pub use card::ValueRepresentation;
pub use config::Config;
pub use error::{Error, Result};
pub use planner::{PlannedCard, SequencePlanner, ValueSequence};
pub use render::RenderDriver;
pub use style::{CardStyle, Variant};
pub use surface::{DrawingSurface, PdfSurface, RecordingSurface};
pub use types::{Face, GridGeometry, PlacementRecord, SheetLayout};

/// Plans `sequence` and renders it onto `surface`. Every value is checked
/// before the first draw call.
pub fn render_sheet<S: DrawingSurface>(
    layout: &SheetLayout,
    variant: Variant,
    sequence: &ValueSequence,
    surface: S,
) -> Result<S::Output> {
    let cards = SequencePlanner::new(layout, variant).plan(sequence)?;
    let style = variant.style();
    let output = RenderDriver::new(&style, layout).render(&cards, surface)?;
    Ok(output)
}
