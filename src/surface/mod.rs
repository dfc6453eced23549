mod pdf;
mod record;

pub use pdf::PdfSurface;
pub use record::{DrawCall, RecordingSurface};

use thiserror::Error;

use crate::types::{Color, Point, Rect};

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("text drawn before any font was selected")]
    NoFont,

    #[error("text {0:?} cannot be encoded for this document")]
    Unencodable(String),

    #[error("failed to format document: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),

    #[error("surface rejected {0}")]
    Rejected(String),
}

/// The page-description sink cards are drawn onto. Coordinates are points
/// with the origin at the lower-left of the page.
///
/// `finalize` consumes the surface, so a render pass releases it once.
pub trait DrawingSurface {
    type Output;

    fn set_stroke_style(&mut self, color: Color, width: f32) -> Result<(), SurfaceError>;
    fn draw_rectangle(&mut self, rect: Rect) -> Result<(), SurfaceError>;
    fn set_font(&mut self, name: &str, size: f32) -> Result<(), SurfaceError>;
    fn draw_text(&mut self, at: Point, text: &str) -> Result<(), SurfaceError>;
    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), SurfaceError>;
    /// Ends the current page; the next draw starts a fresh one.
    fn page_break(&mut self) -> Result<(), SurfaceError>;
    fn finalize(self) -> Result<Self::Output, SurfaceError>;
}
