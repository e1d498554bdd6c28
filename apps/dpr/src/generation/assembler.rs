//! Document assembly: walks the outline in order and fills slots from the
//! candidate pool.
//!
//! Narrative slots get the matcher once; a bound value is printed as an answer
//! beneath the text. Table cells are visited row-major; label cells are slots,
//! and a binding writes into the cells to its right. Written cells are never
//! visited as slots. The pool is threaded by value so each candidate is
//! consumed at most once across the whole document.

use serde::Serialize;

use crate::matching::pool::CandidatePool;
use crate::matching::{spread, Binding, FieldMatcher, MatchPass, Slot};
use crate::models::input::ProjectInput;
use crate::outline::{Cell, OutlineItem, Table, TextStyle};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Renderer input: the outline with every slot resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { text: String, style: TextStyle },
    /// A value bound to the narrative slot just before it.
    Answer(String),
    Table(Table),
    Spacer(f64),
}

/// One binding, kept for the run report and the debug log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub slot: String,
    pub key: String,
    pub score: u32,
    pub exact: bool,
}

impl MatchRecord {
    fn new(slot: &str, binding: &Binding) -> Self {
        Self {
            slot: slot.to_string(),
            key: binding.key.clone(),
            score: binding.score,
            exact: binding.pass == MatchPass::Exact,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub document: Document,
    pub pool: CandidatePool,
    pub matches: Vec<MatchRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

pub fn assemble(outline: Vec<OutlineItem>, input: &ProjectInput, matcher: &FieldMatcher) -> Assembly {
    let mut pool = CandidatePool::from_fields(&input.fields);
    let mut blocks = Vec::with_capacity(outline.len());
    let mut matches = Vec::new();

    for item in outline {
        match item {
            OutlineItem::Slot { text, style } => {
                let (next, binding) = matcher.resolve(pool, &Slot::paragraph(&text));
                pool = next;
                blocks.push(Block::Paragraph {
                    text: text.clone(),
                    style,
                });
                if let Some(binding) = binding {
                    matches.push(MatchRecord::new(&text, &binding));
                    blocks.push(Block::Answer(binding.value.display_text()));
                }
            }
            OutlineItem::Text { text, style } => blocks.push(Block::Paragraph { text, style }),
            OutlineItem::Table(table) => {
                let (filled, next) = fill_table(table, pool, input, matcher, &mut matches);
                pool = next;
                blocks.push(Block::Table(filled));
            }
            OutlineItem::Spacer(points) => blocks.push(Block::Spacer(points)),
        }
    }

    Assembly {
        document: Document {
            title: format!("DPR - {}", input.project_name.trim()),
            author: input.candidate_name.trim().to_string(),
            blocks,
        },
        pool,
        matches,
    }
}

fn fill_table(
    mut table: Table,
    mut pool: CandidatePool,
    input: &ProjectInput,
    matcher: &FieldMatcher,
    matches: &mut Vec<MatchRecord>,
) -> (Table, CandidatePool) {
    for row in table.rows.iter_mut() {
        let width = row.len();
        for column in 0..width {
            if row[column] == Cell::Applicant {
                row[column] = Cell::Fixed(input.name_and_address());
                continue;
            }
            let Cell::Label(label) = &row[column] else {
                continue;
            };
            let label = label.clone();

            let (next, binding) = matcher.resolve(pool, &Slot::table_cell(&label, column, width));
            pool = next;
            let Some(binding) = binding else {
                continue;
            };

            for (target, text) in spread(&binding.value, column, width) {
                if row[target].is_writable() {
                    row[target] = Cell::Value(text);
                }
            }
            matches.push(MatchRecord::new(&label, &binding));
        }
    }
    (table, pool)
}
