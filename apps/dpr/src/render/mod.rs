//! Rendering: turns an assembled `Document` into a file.
//!
//! `PdfRenderer` is the default. `TextRenderer` writes the same content as
//! UTF-8 text, which is handy for review and for tests.

use std::path::Path;

use clap::ValueEnum;

pub mod pdf;
pub mod text;

use crate::errors::DprError;
use crate::generation::assembler::Document;

pub use pdf::PdfRenderer;
pub use text::TextRenderer;

/// Prefix printed before an answer under a narrative slot.
pub const ANSWER_MARKER: &str = "→ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pdf,
    Text,
}

/// Writes a document to a path. The caller owns file placement; the renderer
/// only produces bytes at the path it is given.
pub trait Renderer {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, document: &Document, path: &Path) -> Result<(), DprError>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Pdf => Box::new(PdfRenderer::default()),
        OutputFormat::Text => Box::new(TextRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_extensions() {
        assert_eq!(renderer_for(OutputFormat::Pdf).extension(), "pdf");
        assert_eq!(renderer_for(OutputFormat::Text).extension(), "txt");
    }
}
