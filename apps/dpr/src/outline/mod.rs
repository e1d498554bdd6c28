//! The document outline: an ordered list of narrative items and table
//! skeletons. The outline is static data; the assembler walks it and fills
//! slots from the candidate pool.

pub mod annexure3;

pub use annexure3::annexure3;

pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Small running header at the top of the first page.
    PageHeader,
    Title,
    Heading,
    SubHeading,
    Body,
    Centered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutlineItem {
    /// Narrative text that can receive an answer printed beneath it.
    Slot { text: String, style: TextStyle },
    /// Narrative text that never receives an answer.
    Text { text: String, style: TextStyle },
    Table(Table),
    /// Vertical gap in points.
    Spacer(f64),
}

/// A table cell. Only `Label` cells are slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Row label; a slot.
    Label(String),
    /// Header text, serial numbers, fixed criteria. Never a slot, never overwritten.
    Fixed(String),
    /// Guidance text shown until a binding overwrites it. Never a slot.
    Placeholder(String),
    /// Filled with the applicant's name and address at assembly time.
    Applicant,
    /// Written by a binding.
    Value(String),
    Empty,
}

impl Cell {
    pub fn label(text: &str) -> Self {
        Cell::Label(text.to_string())
    }

    pub fn fixed(text: &str) -> Self {
        Cell::Fixed(text.to_string())
    }

    pub fn placeholder(text: &str) -> Self {
        Cell::Placeholder(text.to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            Cell::Label(s) | Cell::Fixed(s) | Cell::Placeholder(s) | Cell::Value(s) => s,
            Cell::Applicant | Cell::Empty => "",
        }
    }

    /// Whether a binding may write into this cell.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Cell::Fixed(_) | Cell::Applicant)
    }
}

/// Which cells of a table are shaded and set in bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    FirstRow,
    FirstColumn,
    /// Header row plus a bold totals row.
    FirstAndLastRow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in points.
    pub column_widths: Vec<f64>,
    pub font_size: f64,
    pub emphasis: Emphasis,
}

impl Table {
    pub fn new(column_widths_in: &[f64], font_size: f64, emphasis: Emphasis) -> Self {
        Self {
            rows: Vec::new(),
            column_widths: column_widths_in.iter().map(|w| w * POINTS_PER_INCH).collect(),
            font_size,
            emphasis,
        }
    }

    /// Appends a header row of fixed text.
    pub fn header(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|c| Cell::fixed(c)).collect());
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn is_emphasized(&self, row: usize, column: usize) -> bool {
        let last = self.rows.len().saturating_sub(1);
        match self.emphasis {
            Emphasis::FirstRow => row == 0,
            Emphasis::FirstColumn => column == 0,
            Emphasis::FirstAndLastRow => row == 0 || row == last,
        }
    }

    pub fn is_shaded(&self, row: usize, column: usize) -> bool {
        match self.emphasis {
            Emphasis::FirstColumn => column == 0,
            Emphasis::FirstRow | Emphasis::FirstAndLastRow => row == 0,
        }
    }
}
