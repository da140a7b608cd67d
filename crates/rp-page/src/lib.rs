//! Interactive affordances for static HTML report pages.
//!
//! A report generator produces a [`ReportDocument`]; this crate attaches the
//! page behaviors to it and renders the result.
//!
//! # Behaviors
//!
//! - **Collapsible toggles**: each section trigger carries a right/down
//!   indicator that follows its expanded attribute
//! - **Empty-cell normalization**: whitespace-only data cells read `None`
//! - **Sortable columns**: clicking a date or string header re-orders the
//!   table body, resets sibling headers and renumbers the row-index column
//!
//! Behaviors never fail: a missing indicator, unknown table or unreadable
//! attribute turns the interaction into a no-op.
//!
//! # Example
//!
//! ```
//! use rp_page::{ColumnRef, PageConfig, ReportDocument, ReportPage, SortKind, SortableTable};
//!
//! let mut table = SortableTable::new("namespaces")
//!     .with_index_column("#")
//!     .with_sortable_column("Name", SortKind::String)
//!     .with_sortable_column("Latest change", SortKind::Date);
//! table.push_row(["openshift", "2023-01-05"]);
//! table.push_row(["default", "2021-06-01"]);
//!
//! let mut document = ReportDocument::new();
//! document.push_table(table);
//!
//! let mut page = ReportPage::new(document, PageConfig::default()).unwrap();
//! page.load();
//! page.click_header(ColumnRef::new("namespaces", 1));
//!
//! let table = &page.document().tables[0];
//! assert_eq!(table.column_texts(1), vec!["default", "openshift"]);
//! assert_eq!(table.index_values(), vec!["1", "2"]);
//! ```

pub mod collapsible;
pub mod config;
pub mod document;
pub mod error;
pub mod glyph;
pub mod normalize;
pub mod page;
pub mod render;
pub mod sortable;

pub use collapsible::{AriaExpandedDriver, CollapseDriver, CollapsibleToggle};
pub use config::{MarkupConfig, PageConfig};
pub use document::{
    Cell, CollapsibleSection, ColumnRef, HeaderCell, ReportDocument, Row, SectionId,
    SortableColumn, SortableTable, TableId,
};
pub use error::{PageError, Result};
pub use glyph::{Glyph, GlyphAsset, GlyphRegistry};
pub use normalize::EmptyCellNormalizer;
pub use page::{EventOutcome, LoadSummary, PageEvent, ReportPage};
pub use render::PageRenderer;
pub use sortable::{
    comparator, indicator_for, SortDirection, SortKind, SortOutcome, SortState,
    SortableTableColumn,
};
