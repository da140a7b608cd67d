//! Report document model.
//!
//! A [`ReportDocument`] is produced by the report generator before any
//! behavior runs. Behaviors never add or remove sections, tables, rows or
//! cells; they only change attributes, cell text, indicators and row order.

use crate::error::{PageError, Result};
use crate::glyph::Glyph;
use crate::sortable::{SortKind, SortState};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of a collapsible section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        SectionId(id.to_string())
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl From<&str> for TableId {
    fn from(id: &str) -> Self {
        TableId(id.to_string())
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a sortable column header: owning table plus header position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Owning table.
    pub table: TableId,
    /// Header position within the table's header row.
    pub column: usize,
}

impl ColumnRef {
    /// Create a column handle.
    pub fn new(table: impl Into<TableId>, column: usize) -> Self {
        Self {
            table: table.into(),
            column,
        }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.table, self.column)
    }
}

/// A collapsible report section and its trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollapsibleSection {
    /// Section identifier.
    pub id: SectionId,
    /// Trigger label.
    pub label: String,
    /// Raw expanded attribute text, owned by the collapse framework.
    #[serde(default)]
    pub expanded: Option<String>,
    /// Indicator glyph attached to the trigger.
    #[serde(default)]
    pub indicator: Option<Glyph>,
    /// Tables rendered inside the section body.
    #[serde(default)]
    pub tables: Vec<TableId>,
}

impl CollapsibleSection {
    /// Create a collapsed section.
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: Some("false".to_string()),
            indicator: None,
            tables: Vec::new(),
        }
    }

    /// Place a table inside the section body.
    pub fn with_table(mut self, table: impl Into<TableId>) -> Self {
        self.tables.push(table.into());
        self
    }

    /// Parse the expanded attribute as a JSON boolean.
    ///
    /// Missing or non-boolean text yields `None`.
    pub fn is_expanded(&self) -> Option<bool> {
        let raw = self.expanded.as_deref()?;
        serde_json::from_str::<bool>(raw.trim()).ok()
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    /// Text content.
    pub text: String,
}

impl Cell {
    /// Create a cell with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A body row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    /// Cells in header order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cell texts.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Cell::new).collect(),
        }
    }

    /// Text of a cell; missing cells read as empty.
    pub fn text(&self, column: usize) -> &str {
        self.cells
            .get(column)
            .map(|c| c.text.as_str())
            .unwrap_or("")
    }

    /// Overwrite a cell's text. Returns false when the cell does not exist.
    pub fn set_text(&mut self, column: usize, text: impl Into<String>) -> bool {
        match self.cells.get_mut(column) {
            Some(cell) => {
                cell.text = text.into();
                true
            }
            None => false,
        }
    }
}

/// Sort behavior attached to a header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableColumn {
    /// Value type of the column.
    pub kind: SortKind,
    /// Current sort state.
    #[serde(default)]
    pub state: SortState,
    /// Indicator glyph attached to the header.
    #[serde(default)]
    pub indicator: Option<Glyph>,
    /// Owning table, set when the column is initialized.
    #[serde(default)]
    pub owner: Option<TableId>,
}

impl SortableColumn {
    /// Create an uninitialized sortable column.
    pub fn new(kind: SortKind) -> Self {
        Self {
            kind,
            state: SortState::Unsorted,
            indicator: None,
            owner: None,
        }
    }

    /// Markup `sorted` attribute value.
    pub fn sorted(&self) -> bool {
        self.state.sorted()
    }
}

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    /// Header label.
    pub label: String,
    /// Sort behavior, for sortable columns.
    #[serde(default)]
    pub sort: Option<SortableColumn>,
}

impl HeaderCell {
    /// Plain, non-sortable header.
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sort: None,
        }
    }

    /// Sortable header of the given kind.
    pub fn sortable(label: impl Into<String>, kind: SortKind) -> Self {
        Self {
            label: label.into(),
            sort: Some(SortableColumn::new(kind)),
        }
    }
}

/// A report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableTable {
    /// Table identifier.
    pub id: TableId,
    /// Header row.
    pub headers: Vec<HeaderCell>,
    /// Position of the reserved row-index column, if any.
    #[serde(default)]
    pub index_column: Option<usize>,
    /// Body rows in display order.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl SortableTable {
    /// Create an empty table.
    pub fn new(id: impl Into<TableId>) -> Self {
        Self {
            id: id.into(),
            headers: Vec::new(),
            index_column: None,
            rows: Vec::new(),
        }
    }

    /// Append the reserved row-index column header.
    pub fn with_index_column(mut self, label: impl Into<String>) -> Self {
        self.index_column = Some(self.headers.len());
        self.headers.push(HeaderCell::plain(label));
        self
    }

    /// Append a non-sortable column header.
    pub fn with_column(mut self, label: impl Into<String>) -> Self {
        self.headers.push(HeaderCell::plain(label));
        self
    }

    /// Append a sortable column header.
    pub fn with_sortable_column(mut self, label: impl Into<String>, kind: SortKind) -> Self {
        self.headers.push(HeaderCell::sortable(label, kind));
        self
    }

    /// Append a row of data cells.
    ///
    /// The index cell is generated: pass only the data cells and the current
    /// 1-based position is inserted at the index column.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Row::new(cells);
        if let Some(index) = self.index_column {
            let position = (self.rows.len() + 1).to_string();
            let at = index.min(row.cells.len());
            row.cells.insert(at, Cell::new(position));
        }
        self.rows.push(row);
    }

    /// Positions of the sortable headers.
    pub fn sortable_columns(&self) -> impl Iterator<Item = (usize, &SortableColumn)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.sort.as_ref().map(|s| (i, s)))
    }

    /// Sort behavior of a header, if sortable.
    pub fn sortable(&self, column: usize) -> Option<&SortableColumn> {
        self.headers.get(column)?.sort.as_ref()
    }

    /// Column currently holding an applied sort.
    pub fn active_column(&self) -> Option<usize> {
        self.sortable_columns()
            .find(|(_, s)| s.state != SortState::Unsorted)
            .map(|(i, _)| i)
    }

    /// Texts of one column in row order.
    pub fn column_texts(&self, column: usize) -> Vec<&str> {
        self.rows.iter().map(|r| r.text(column)).collect()
    }

    /// Texts of the index column in row order; empty without an index column.
    pub fn index_values(&self) -> Vec<&str> {
        match self.index_column {
            Some(index) => self.column_texts(index),
            None => Vec::new(),
        }
    }

    /// Rewrite the index column as 1, 2, 3, ... in current row order.
    pub fn renumber(&mut self) {
        let Some(index) = self.index_column else {
            return;
        };
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.set_text(index, (position + 1).to_string());
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(index) = self.index_column {
            if index >= self.headers.len() {
                return Err(PageError::InvalidDocument(format!(
                    "table '{}': index column {} outside header row of {}",
                    self.id,
                    index,
                    self.headers.len()
                )));
            }
            if self.headers[index].sort.is_some() {
                return Err(PageError::InvalidDocument(format!(
                    "table '{}': index column {} must not be sortable",
                    self.id, index
                )));
            }
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.cells.len() != self.headers.len() {
                return Err(PageError::InvalidDocument(format!(
                    "table '{}': row {} has {} cells, header row has {}",
                    self.id,
                    i + 1,
                    row.cells.len(),
                    self.headers.len()
                )));
            }
        }
        Ok(())
    }
}

/// The rendered report page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Collapsible sections in page order.
    #[serde(default)]
    pub sections: Vec<CollapsibleSection>,
    /// Tables in page order.
    #[serde(default)]
    pub tables: Vec<SortableTable>,
}

impl ReportDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a section.
    pub fn push_section(&mut self, section: CollapsibleSection) {
        self.sections.push(section);
    }

    /// Append a table.
    pub fn push_table(&mut self, table: SortableTable) {
        self.tables.push(table);
    }

    /// Look up a section by id.
    pub fn section(&self, id: &SectionId) -> Option<&CollapsibleSection> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Look up a section by id, mutably.
    pub fn section_mut(&mut self, id: &SectionId) -> Option<&mut CollapsibleSection> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }

    /// Look up a table by id.
    pub fn table(&self, id: &TableId) -> Option<&SortableTable> {
        self.tables.iter().find(|t| &t.id == id)
    }

    /// Look up a table by id, mutably.
    pub fn table_mut(&mut self, id: &TableId) -> Option<&mut SortableTable> {
        self.tables.iter_mut().find(|t| &t.id == id)
    }

    /// Handles of every sortable column in the document.
    pub fn column_refs(&self) -> Vec<ColumnRef> {
        self.tables
            .iter()
            .flat_map(|t| {
                t.sortable_columns()
                    .map(move |(i, _)| ColumnRef::new(t.id.clone(), i))
            })
            .collect()
    }

    /// Check structural consistency.
    pub fn validate(&self) -> Result<()> {
        let mut section_ids = HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(&section.id) {
                return Err(PageError::InvalidDocument(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
        }

        let mut table_ids = HashSet::new();
        for table in &self.tables {
            if !table_ids.insert(&table.id) {
                return Err(PageError::InvalidDocument(format!(
                    "duplicate table id '{}'",
                    table.id
                )));
            }
            table.validate()?;
        }

        for section in &self.sections {
            for table in &section.tables {
                if !table_ids.contains(table) {
                    return Err(PageError::InvalidDocument(format!(
                        "section '{}' references unknown table '{}'",
                        section.id, table
                    )));
                }
            }
        }

        Ok(())
    }
}
