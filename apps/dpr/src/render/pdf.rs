//! PDF rendering with the base-14 Helvetica faces.
//!
//! Blocks flow top to bottom; a block that does not fit the remaining space
//! starts a new page. Tables are drawn as grids with the emphasized cells
//! shaded and set in bold. Text is wrapped with the static metric tables.

use std::path::Path;

use oxidize_pdf::{Color, Document as PdfDocument, Font, Page};
use tracing::debug;

use super::{Renderer, ANSWER_MARKER};
use crate::errors::DprError;
use crate::generation::assembler::{Block, Document};
use crate::layout::{default_page_config, get_metrics, wrap_text, FontFace, PageConfig};
use crate::outline::{Table, TextStyle};

const ANSWER_INDENT_PT: f64 = 15.0;
const CELL_PAD_X_PT: f64 = 3.0;
const CELL_PAD_Y_PT: f64 = 2.0;
const GRID_LINE_WIDTH: f64 = 0.5;
const SHADE_GRAY: f64 = 0.83;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
    Right,
}

/// Font, size, leading and spacing for a paragraph style.
#[derive(Debug, Clone, Copy)]
struct ParagraphStyle {
    face: FontFace,
    size: f64,
    leading: f64,
    space_before: f64,
    space_after: f64,
    align: Align,
}

fn paragraph_style(style: TextStyle) -> ParagraphStyle {
    let (face, size, leading, space_before, space_after, align) = match style {
        TextStyle::PageHeader => (FontFace::Regular, 8.0, 10.0, 0.0, 1.0, Align::Right),
        TextStyle::Title => (FontFace::Bold, 13.0, 14.0, 1.0, 3.0, Align::Center),
        TextStyle::Heading => (FontFace::Bold, 11.0, 12.0, 1.0, 2.0, Align::Left),
        TextStyle::SubHeading => (FontFace::Bold, 10.0, 11.0, 1.0, 2.0, Align::Left),
        TextStyle::Body => (FontFace::Regular, 9.0, 10.0, 0.0, 1.0, Align::Left),
        TextStyle::Centered => (FontFace::Regular, 9.0, 10.0, 0.0, 1.0, Align::Center),
    };
    ParagraphStyle {
        face,
        size,
        leading,
        space_before,
        space_after,
        align,
    }
}

const ANSWER_STYLE: ParagraphStyle = ParagraphStyle {
    face: FontFace::Oblique,
    size: 9.0,
    leading: 10.0,
    space_before: 0.0,
    space_after: 1.0,
    align: Align::Left,
};

fn pdf_font(face: FontFace) -> Font {
    match face {
        FontFace::Regular => Font::Helvetica,
        FontFace::Bold => Font::HelveticaBold,
        FontFace::Oblique => Font::HelveticaOblique,
    }
}

/// Maps text onto what the standard-font encoding can show.
fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '→' => out.push_str("->"),
            '₹' => out.push_str("Rs."),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            '–' | '—' => out.push('-'),
            '•' => out.push('*'),
            '\t' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// PdfRenderer
// ────────────────────────────────────────────────────────────────────────────

pub struct PdfRenderer {
    config: PageConfig,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            config: default_page_config(),
        }
    }
}

impl Renderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &Document, path: &Path) -> Result<(), DprError> {
        let mut writer = PageWriter::new(&self.config);
        for block in &document.blocks {
            writer.block(block)?;
        }
        let pages = writer.pages();

        let mut pdf = PdfDocument::new();
        pdf.set_title(&document.title);
        pdf.set_author(&document.author);
        for page in pages {
            pdf.add_page(page);
        }
        pdf.save(path).map_err(|e| DprError::Render(e.to_string()))?;
        debug!("Rendered PDF to {}", path.display());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

struct PageWriter<'a> {
    config: &'a PageConfig,
    done: Vec<Page>,
    page: Page,
    /// Top of the free area, measured from the bottom edge.
    y: f64,
}

impl<'a> PageWriter<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            done: Vec::new(),
            page: Page::a4(),
            y: config.top_pt(),
        }
    }

    fn pages(mut self) -> Vec<Page> {
        self.done.push(self.page);
        self.done
    }

    fn new_page(&mut self) {
        let finished = std::mem::replace(&mut self.page, Page::a4());
        self.done.push(finished);
        self.y = self.config.top_pt();
    }

    /// Starts a new page unless `height` still fits. A fresh page always
    /// accepts the block, even one taller than the page.
    fn ensure_space(&mut self, height: f64) {
        let fresh = (self.y - self.config.top_pt()).abs() < f64::EPSILON;
        if !fresh && self.y - height < self.config.margin_bottom_pt {
            self.new_page();
        }
    }

    fn block(&mut self, block: &Block) -> Result<(), DprError> {
        match block {
            Block::Paragraph { text, style } => self.paragraph(text, paragraph_style(*style), 0.0),
            Block::Answer(text) => {
                self.paragraph(&format!("{ANSWER_MARKER}{text}"), ANSWER_STYLE, ANSWER_INDENT_PT)
            }
            Block::Table(table) => self.table(table),
            Block::Spacer(points) => {
                self.y -= points;
                Ok(())
            }
        }
    }

    fn paragraph(&mut self, text: &str, style: ParagraphStyle, indent: f64) -> Result<(), DprError> {
        let text = pdf_safe(text);
        let metrics = get_metrics(style.face);
        let width = self.config.text_width_pt() - indent;
        let lines = wrap_text(&text, metrics, style.size, width);

        self.y -= style.space_before;
        for line in &lines {
            self.ensure_space(style.leading);
            let line_width = metrics.width_pt(line, style.size);
            let left = self.config.margin_left_pt + indent;
            let x = match style.align {
                Align::Left => left,
                Align::Center => left + (width - line_width).max(0.0) / 2.0,
                Align::Right => left + (width - line_width).max(0.0),
            };
            let baseline = self.y - style.size;
            self.write(style.face, style.size, x, baseline, line)?;
            self.y -= style.leading;
        }
        self.y -= style.space_after;
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<(), DprError> {
        let size = table.font_size;
        let leading = size + 1.5;

        for (r, row) in table.rows.iter().enumerate() {
            let wrapped: Vec<Vec<String>> = row
                .iter()
                .zip(&table.column_widths)
                .enumerate()
                .map(|(c, (cell, width))| {
                    let face = cell_face(table, r, c);
                    wrap_text(
                        &pdf_safe(cell.text()),
                        get_metrics(face),
                        size,
                        width - 2.0 * CELL_PAD_X_PT,
                    )
                })
                .collect();

            let max_lines = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
            let height = max_lines as f64 * leading + 2.0 * CELL_PAD_Y_PT;
            self.ensure_space(height);

            let top = self.y;
            let mut x = self.config.margin_left_pt;
            for (c, width) in table.column_widths.iter().enumerate() {
                if table.is_shaded(r, c) {
                    self.page
                        .graphics()
                        .set_fill_color(Color::gray(SHADE_GRAY))
                        .rect(x, top - height, *width, height)
                        .fill()
                        .set_fill_color(Color::black());
                }
                self.page
                    .graphics()
                    .set_stroke_color(Color::black())
                    .set_line_width(GRID_LINE_WIDTH)
                    .rect(x, top - height, *width, height)
                    .stroke();

                let face = cell_face(table, r, c);
                let lines = wrapped.get(c).map(Vec::as_slice).unwrap_or_default();
                for (i, line) in lines.iter().enumerate() {
                    let baseline = top - CELL_PAD_Y_PT - size - i as f64 * leading;
                    self.write(face, size, x + CELL_PAD_X_PT, baseline, line)?;
                }
                x += width;
            }
            self.y = top - height;
        }
        Ok(())
    }

    fn write(&mut self, face: FontFace, size: f64, x: f64, y: f64, text: &str) -> Result<(), DprError> {
        if text.is_empty() {
            return Ok(());
        }
        self.page
            .text()
            .set_font(pdf_font(face), size)
            .at(x, y)
            .write(text)
            .map(|_| ())
            .map_err(|e| DprError::Render(e.to_string()))
    }
}

fn cell_face(table: &Table, row: usize, column: usize) -> FontFace {
    if table.is_emphasized(row, column) {
        FontFace::Bold
    } else {
        FontFace::Regular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::assembler::assemble;
    use crate::matching::FieldMatcher;
    use crate::models::input::ProjectInput;
    use crate::outline::annexure3;

    #[test]
    fn test_pdf_safe_replaces_non_ascii() {
        assert_eq!(pdf_safe("→ ₹50 – “ok”"), "-> Rs.50 - \"ok\"");
        assert_eq!(pdf_safe("café"), "caf?");
    }

    #[test]
    fn test_long_document_breaks_pages() {
        let config = default_page_config();
        let mut writer = PageWriter::new(&config);
        for _ in 0..200 {
            writer
                .block(&Block::Paragraph {
                    text: "Management Set-up".to_string(),
                    style: TextStyle::Body,
                })
                .unwrap();
        }
        // 200 lines of 11pt each need three A4 pages.
        assert_eq!(writer.pages().len(), 3);
    }

    #[test]
    fn test_renders_full_annexure() {
        let input = ProjectInput {
            project_name: "Textile CFC".to_string(),
            candidate_name: "Acme SPV".to_string(),
            address: "Pune".to_string(),
            fields: Default::default(),
        };
        let run = assemble(annexure3(), &input, &FieldMatcher::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dpr.pdf");
        PdfRenderer::default().render(&run.document, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
