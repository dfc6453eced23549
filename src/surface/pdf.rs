use std::fmt::Write;
use std::path::PathBuf;

use bytes::{Bytes, BytesMut};
use log::{debug, info, warn};

use super::{DrawingSurface, SurfaceError};
use crate::types::{Color, PageSize, Point, Rect};

const STANDARD_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Symbol",
    "ZapfDingbats",
];

// Monospaced faces the cards were designed with; Courier is the closest
// font every viewer has without embedding.
fn base_font(name: &str) -> &'static str {
    if let Some(font) = STANDARD_FONTS.iter().find(|font| **font == name) {
        return *font;
    }
    match name {
        "Consolas" | "Lucida Console" => "Courier",
        other => {
            warn!("font {other:?} is not a standard PDF font, using Courier");
            "Courier"
        }
    }
}

struct FontResource {
    name: String,
    base: &'static str,
}

/// Minimal PDF 1.4 writer. Pages are buffered in memory and the file is only
/// written by `finalize`.
pub struct PdfSurface {
    page: PageSize,
    path: Option<PathBuf>,
    fonts: Vec<FontResource>,
    current_font: Option<(usize, f32)>,
    content: BytesMut,
    pages: Vec<Bytes>,
}

impl PdfSurface {
    pub fn new(page: PageSize, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::in_memory(page)
        }
    }

    /// A surface whose document is only returned, never written.
    pub fn in_memory(page: PageSize) -> Self {
        Self {
            page,
            path: None,
            fonts: Vec::new(),
            current_font: None,
            content: BytesMut::new(),
            pages: Vec::new(),
        }
    }

    fn font_resource(&mut self, name: &str) -> usize {
        if let Some(idx) = self.fonts.iter().position(|f| f.name == name) {
            return idx;
        }
        self.fonts.push(FontResource {
            name: name.to_string(),
            base: base_font(name),
        });
        self.fonts.len() - 1
    }

    fn document(&self) -> Result<Bytes, SurfaceError> {
        let mut out = BytesMut::with_capacity(4096 + self.pages.iter().map(Bytes::len).sum::<usize>());
        let mut offsets: Vec<usize> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        // objects: 1 catalog, 2 page tree, then fonts, then (page, content) pairs
        let first_font = 3;
        let first_page = first_font + self.fonts.len();
        let page_ids: Vec<usize> = (0..self.pages.len()).map(|k| first_page + 2 * k).collect();

        begin_object(&mut out, &mut offsets)?;
        out.write_str("<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        begin_object(&mut out, &mut offsets)?;
        out.write_str("<< /Type /Pages /Kids [")?;
        for id in &page_ids {
            write!(out, " {id} 0 R")?;
        }
        write!(out, " ] /Count {} >>\nendobj\n", page_ids.len())?;

        for font in &self.fonts {
            begin_object(&mut out, &mut offsets)?;
            write!(
                out,
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                font.base
            )?;
        }

        let mut resources = String::from("<< /Font <<");
        for idx in 0..self.fonts.len() {
            write!(resources, " /F{} {} 0 R", idx + 1, first_font + idx)?;
        }
        resources.push_str(" >> >>");

        for (content, id) in self.pages.iter().zip(&page_ids) {
            begin_object(&mut out, &mut offsets)?;
            write!(
                out,
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources {resources} /Contents {} 0 R >>\nendobj\n",
                num(self.page.width),
                num(self.page.height),
                id + 1
            )?;

            begin_object(&mut out, &mut offsets)?;
            write!(out, "<< /Length {} >>\nstream\n", content.len())?;
            out.extend_from_slice(content);
            out.write_str("\nendstream\nendobj\n")?;
        }

        let xref = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)?;
        for offset in &offsets {
            write!(out, "{offset:010} 00000 n \n")?;
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            offsets.len() + 1
        )?;
        Ok(out.freeze())
    }
}

fn begin_object(out: &mut BytesMut, offsets: &mut Vec<usize>) -> std::fmt::Result {
    offsets.push(out.len());
    write!(out, "{} 0 obj\n", offsets.len())
}

fn num(value: f32) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_text(text: &str) -> Result<String, SurfaceError> {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            _ => return Err(SurfaceError::Unencodable(text.to_string())),
        }
    }
    Ok(escaped)
}

impl DrawingSurface for PdfSurface {
    type Output = Bytes;

    fn set_stroke_style(&mut self, color: Color, width: f32) -> Result<(), SurfaceError> {
        writeln!(
            self.content,
            "{} {} {} RG {} w",
            num(color.r),
            num(color.g),
            num(color.b),
            num(width)
        )?;
        Ok(())
    }

    fn draw_rectangle(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        writeln!(
            self.content,
            "{} {} {} {} re S",
            num(rect.origin.x),
            num(rect.origin.y),
            num(rect.width),
            num(rect.height)
        )?;
        Ok(())
    }

    fn set_font(&mut self, name: &str, size: f32) -> Result<(), SurfaceError> {
        let idx = self.font_resource(name);
        self.current_font = Some((idx, size));
        Ok(())
    }

    fn draw_text(&mut self, at: Point, text: &str) -> Result<(), SurfaceError> {
        let (idx, size) = self.current_font.ok_or(SurfaceError::NoFont)?;
        let escaped = escape_text(text)?;
        writeln!(
            self.content,
            "BT /F{} {} Tf {} {} Td ({escaped}) Tj ET",
            idx + 1,
            num(size),
            num(at.x),
            num(at.y)
        )?;
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), SurfaceError> {
        writeln!(
            self.content,
            "{} {} m {} {} l S",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        )?;
        Ok(())
    }

    fn page_break(&mut self) -> Result<(), SurfaceError> {
        self.pages.push(self.content.split().freeze());
        // graphics state does not carry over to the next page
        self.current_font = None;
        debug!("closed page {}", self.pages.len());
        Ok(())
    }

    fn finalize(mut self) -> Result<Bytes, SurfaceError> {
        if !self.content.is_empty() || self.pages.is_empty() {
            self.page_break()?;
        }
        let document = self.document()?;
        if let Some(path) = &self.path {
            std::fs::write(path, &document)?;
            info!("wrote {} pages ({} bytes) to {}", self.pages.len(), document.len(), path.display());
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(doc: &Bytes) -> String {
        String::from_utf8_lossy(doc).into_owned()
    }

    fn two_page_document() -> Bytes {
        let mut pdf = PdfSurface::in_memory(PageSize::a4_landscape());
        pdf.set_stroke_style(Color::ROYAL_BLUE, 24.0).unwrap();
        pdf.draw_rectangle(Rect {
            origin: Point::new(10.0, 20.0),
            width: 100.0,
            height: 200.0,
        })
        .unwrap();
        pdf.page_break().unwrap();
        pdf.set_font("Consolas", 28.0).unwrap();
        pdf.draw_text(Point::new(5.0, 6.5), "(\\)").unwrap();
        pdf.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        pdf.page_break().unwrap();
        pdf.finalize().unwrap()
    }

    #[test]
    fn document_structure() {
        let doc = text(&two_page_document());
        assert!(doc.starts_with("%PDF-1.4\n"));
        assert!(doc.ends_with("%%EOF\n"));
        assert!(doc.contains("/Count 2"));
        assert!(doc.contains("/BaseFont /Courier"));
        assert!(doc.contains("0.255 0.412 0.882 RG 24 w"));
        assert!(doc.contains("10 20 100 200 re S"));
        assert!(doc.contains("BT /F1 28 Tf 5 6.5 Td (\\(\\\\\\)) Tj ET"));
        assert!(doc.contains("0 0 m 1 1 l S"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let doc = two_page_document();
        let body = text(&doc);
        let start: usize = body
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(doc[start..].starts_with(b"xref\n"));

        let table = String::from_utf8(doc[start..].to_vec()).unwrap();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();
        // catalog, pages, one font, two (page, content) pairs
        assert_eq!(entries.len(), 7);
        for (i, offset) in entries.iter().enumerate() {
            assert!(doc[*offset..].starts_with(format!("{} 0 obj\n", i + 1).as_bytes()));
        }
    }

    #[test]
    fn trailing_content_becomes_last_page() {
        let mut pdf = PdfSurface::in_memory(PageSize::a4_landscape());
        pdf.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        let doc = text(&pdf.finalize().unwrap());
        assert!(doc.contains("/Count 1"));
    }

    #[test]
    fn text_needs_a_font_after_each_page() {
        let mut pdf = PdfSurface::in_memory(PageSize::a4_landscape());
        assert!(matches!(pdf.draw_text(Point::default(), "A"), Err(SurfaceError::NoFont)));
        pdf.set_font("Courier", 10.0).unwrap();
        pdf.draw_text(Point::default(), "A").unwrap();
        pdf.page_break().unwrap();
        assert!(matches!(pdf.draw_text(Point::default(), "A"), Err(SurfaceError::NoFont)));
    }

    #[test]
    fn non_ascii_text_is_rejected() {
        let mut pdf = PdfSurface::in_memory(PageSize::a4_landscape());
        pdf.set_font("Courier", 10.0).unwrap();
        assert!(matches!(
            pdf.draw_text(Point::default(), "\u{7f}"),
            Err(SurfaceError::Unencodable(_))
        ));
    }

    #[test]
    fn file_is_written_only_on_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.pdf");
        let mut pdf = PdfSurface::new(PageSize::a4_landscape(), &path);
        pdf.set_stroke_style(Color::BLACK, 1.0).unwrap();
        pdf.page_break().unwrap();
        assert!(!path.exists());

        let doc = pdf.finalize().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), doc.to_vec());
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(24.0), "24");
        assert_eq!(num(0.15), "0.15");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(155.25), "155.25");
    }
}
