use log::{debug, info};

use crate::planner::PlannedCard;
use crate::style::{CardStyle, FrontValue, TextSlot};
use crate::surface::{DrawingSurface, SurfaceError};
use crate::types::{Face, Point, SheetLayout};

/// Walks planned cards in order and turns each into surface calls. The
/// layout must be the one the cards were planned with.
pub struct RenderDriver<'a> {
    style: &'a CardStyle,
    layout: &'a SheetLayout,
}

impl<'a> RenderDriver<'a> {
    pub fn new(style: &'a CardStyle, layout: &'a SheetLayout) -> Self {
        Self { style, layout }
    }

    /// Draws every card, breaks pages after each page's last slot and
    /// finalizes the surface. Surface errors are returned as they came.
    pub fn render<S: DrawingSurface>(
        &self,
        cards: &[PlannedCard],
        mut surface: S,
    ) -> Result<S::Output, SurfaceError> {
        info!("rendering {} cards", cards.len());
        let mut breaks = 0;

        let grid = &self.layout.grid;
        for card in cards {
            self.draw_card(card, &mut surface)?;
            if grid.is_last_slot(card.placement.slot_in_page) {
                debug!("page {} full", card.placement.page_index);
                surface.page_break()?;
                breaks += 1;
            }
        }

        // a sheet that ended mid-page still needs that page closed
        if let Some(last) = cards.last() {
            if !grid.is_last_slot(last.placement.slot_in_page) {
                debug!("page {} partial", last.placement.page_index);
                surface.page_break()?;
                breaks += 1;
            }
        }

        info!("emitted {breaks} pages");
        surface.finalize()
    }

    fn draw_card<S: DrawingSurface>(&self, card: &PlannedCard, surface: &mut S) -> Result<(), SurfaceError> {
        let style = self.style;
        let rect = self.layout.card_rect(&card.placement);
        // text offsets are measured down from the card's top edge
        let top = rect.origin.offset(0.0, rect.height);
        let value = &card.value;
        let face = card.placement.face;

        match face {
            Face::Front => {
                surface.set_stroke_style(style.border_color, style.border_width)?;
                surface.draw_rectangle(rect)?;
                match &style.front_value {
                    FrontValue::Symbol(tiers) => {
                        let symbol = value.symbol().unwrap_or(&value.hex_text);
                        draw_slot(surface, top, tiers.for_symbol(symbol), symbol)?;
                    }
                    FrontValue::Hex(slot) => draw_slot(surface, top, slot, &value.hex_text)?,
                }
            }
            Face::Back => {
                draw_slot(surface, top, &style.decimal, &value.decimal_text)?;
                draw_slot(surface, top, &style.back_hex, &value.hex_text)?;
                draw_slot(surface, top, &style.binary, &value.binary_text)?;
            }
        }

        let dy = style.underline_dy(face);
        surface.set_stroke_style(style.underline_color, style.underline_width)?;
        surface.draw_line(
            top.offset(style.underline_start, -dy),
            top.offset(style.underline_end, -dy),
        )
    }
}

fn draw_slot<S: DrawingSurface>(surface: &mut S, top: Point, slot: &TextSlot, text: &str) -> Result<(), SurfaceError> {
    surface.set_font(&slot.font, slot.size)?;
    surface.draw_text(top.offset(slot.dx, -slot.dy), text)
}
