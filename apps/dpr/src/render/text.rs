use std::path::Path;

use super::{Renderer, ANSWER_MARKER};
use crate::errors::DprError;
use crate::generation::assembler::{Block, Document};
use crate::outline::{Table, TextStyle};

/// Plain UTF-8 rendering: one paragraph per line, tables as pipe-separated rows.
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_string(&self, document: &Document) -> String {
        let mut out = String::new();
        for block in &document.blocks {
            match block {
                Block::Paragraph { text, style } => {
                    if matches!(style, TextStyle::Heading) && !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(text);
                    out.push('\n');
                    if matches!(style, TextStyle::Title) {
                        out.push_str(&"=".repeat(text.chars().count()));
                        out.push('\n');
                    }
                }
                Block::Answer(text) => {
                    out.push_str("    ");
                    out.push_str(ANSWER_MARKER);
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Table(table) => {
                    out.push('\n');
                    write_table(&mut out, table);
                    out.push('\n');
                }
                Block::Spacer(_) => {}
            }
        }
        out
    }
}

fn write_table(out: &mut String, table: &Table) {
    for (idx, row) in table.rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|c| c.text().split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
        if idx == 0 && table.is_shaded(0, 1) {
            out.push('|');
            out.push_str(&"---|".repeat(row.len()));
            out.push('\n');
        }
    }
}

impl Renderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &Document, path: &Path) -> Result<(), DprError> {
        std::fs::write(path, self.render_string(document))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{Cell, Emphasis};

    fn document(blocks: Vec<Block>) -> Document {
        Document {
            title: "DPR - Test".to_string(),
            author: "SPV".to_string(),
            blocks,
        }
    }

    #[test]
    fn test_answer_marker_and_indent() {
        let doc = document(vec![
            Block::Paragraph {
                text: "(iii) Technology".to_string(),
                style: TextStyle::Body,
            },
            Block::Answer("Air-jet looms".to_string()),
        ]);
        assert_eq!(
            TextRenderer.render_string(&doc),
            "(iii) Technology\n    → Air-jet looms\n"
        );
    }

    #[test]
    fn test_table_rows_with_header_rule() {
        let table = Table::new(&[1.0, 1.0], 8.5, Emphasis::FirstRow)
            .header(&["Description", "Compliance"])
            .row(vec![Cell::label("c. Implementation Period"), Cell::Value("18 months".into())]);
        let text = TextRenderer.render_string(&document(vec![Block::Table(table)]));
        assert_eq!(
            text,
            "\n| Description | Compliance |\n|---|---|\n| c. Implementation Period | 18 months |\n\n"
        );
    }

    #[test]
    fn test_title_is_underlined() {
        let doc = document(vec![Block::Paragraph {
            text: "Annexure-3".to_string(),
            style: TextStyle::Title,
        }]);
        assert_eq!(TextRenderer.render_string(&doc), "Annexure-3\n==========\n");
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let doc = document(vec![Block::Paragraph {
            text: "21. Conclusion".to_string(),
            style: TextStyle::Heading,
        }]);
        TextRenderer.render(&doc, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "21. Conclusion\n");
    }
}
