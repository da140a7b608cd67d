//! Empty table cell normalization.

use crate::document::ReportDocument;

use tracing::debug;

/// One-shot pass filling whitespace-only data cells with a placeholder.
pub struct EmptyCellNormalizer;

impl EmptyCellNormalizer {
    /// Replace every blank body cell with `placeholder`.
    ///
    /// Header cells are not touched. Returns the number of cells changed;
    /// a second pass with a non-blank placeholder changes nothing.
    pub fn initialize(document: &mut ReportDocument, placeholder: &str) -> usize {
        let mut filled = 0;
        for table in &mut document.tables {
            for row in &mut table.rows {
                for cell in &mut row.cells {
                    if cell.text.trim().is_empty() {
                        cell.text = placeholder.to_string();
                        filled += 1;
                    }
                }
            }
        }
        debug!(cells = filled, "Empty cells normalized");
        filled
    }
}
