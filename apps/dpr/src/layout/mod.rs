// Page geometry, font metrics and line wrapping for the PDF renderer.

pub mod font_metrics;
pub mod wrap;

pub use font_metrics::{default_page_config, get_metrics, FontFace, PageConfig};
pub use wrap::wrap_text;
