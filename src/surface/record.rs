use serde::Serialize;

use super::{DrawingSurface, SurfaceError};
use crate::types::{Color, Point, Rect};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    StrokeStyle { color: Color, width: f32 },
    Rectangle(Rect),
    Font { name: String, size: f32 },
    Text { at: Point, text: String },
    Line { from: Point, to: Point },
    PageBreak,
}

/// Keeps every call in order instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the call after `calls` successful ones.
    pub fn failing_after(calls: usize) -> Self {
        Self {
            calls: Vec::new(),
            fail_after: Some(calls),
        }
    }

    fn push(&mut self, call: DrawCall) -> Result<(), SurfaceError> {
        if self.fail_after == Some(self.calls.len()) {
            return Err(SurfaceError::Rejected(format!("{call:?}")));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    type Output = Vec<DrawCall>;

    fn set_stroke_style(&mut self, color: Color, width: f32) -> Result<(), SurfaceError> {
        self.push(DrawCall::StrokeStyle { color, width })
    }

    fn draw_rectangle(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.push(DrawCall::Rectangle(rect))
    }

    fn set_font(&mut self, name: &str, size: f32) -> Result<(), SurfaceError> {
        self.push(DrawCall::Font {
            name: name.to_string(),
            size,
        })
    }

    fn draw_text(&mut self, at: Point, text: &str) -> Result<(), SurfaceError> {
        self.push(DrawCall::Text {
            at,
            text: text.to_string(),
        })
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), SurfaceError> {
        self.push(DrawCall::Line { from, to })
    }

    fn page_break(&mut self) -> Result<(), SurfaceError> {
        self.push(DrawCall::PageBreak)
    }

    fn finalize(self) -> Result<Vec<DrawCall>, SurfaceError> {
        Ok(self.calls)
    }
}
