//! Sortable table columns.
//!
//! Each sortable header toggles its table's row order between ascending and
//! descending. Activating one column resets every sibling column in the same
//! table, and the reserved index column is renumbered after every sort.
//!
//! The `sorted` markup attribute is derived from [`SortState`]: it is `true`
//! only while ascending order is applied, so the next activation of that
//! column sorts descending and every other state sorts ascending.

use crate::config::PageConfig;
use crate::document::{ColumnRef, ReportDocument, Row, SortableTable};
use crate::glyph::Glyph;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Value type of a sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Calendar date/time values.
    Date,
    /// Text compared lexicographically, ignoring case.
    String,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// State a column is left in after sorting in this direction.
    pub fn applied_state(self) -> SortState {
        match self {
            SortDirection::Ascending => SortState::AscendingApplied,
            SortDirection::Descending => SortState::DescendingApplied,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Per-column sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortState {
    /// Ready; the next activation sorts ascending.
    #[default]
    Unsorted,
    /// Rows are in ascending order by this column.
    AscendingApplied,
    /// Rows are in descending order by this column.
    DescendingApplied,
}

impl SortState {
    /// Markup `sorted` attribute value.
    pub fn sorted(self) -> bool {
        matches!(self, SortState::AscendingApplied)
    }

    /// Direction the next activation will sort in.
    pub fn next_direction(self) -> SortDirection {
        if self.sorted() {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Indicator shown on a sortable header for a state.
///
/// The ready and ascending-applied states share the down glyph.
pub fn indicator_for(state: SortState) -> Glyph {
    match state {
        SortState::Unsorted | SortState::AscendingApplied => Glyph::Down,
        SortState::DescendingApplied => Glyph::Up,
    }
}

/// Parse cell text as a date/time.
///
/// Accepts RFC 3339, the `2006-01-02 15:04:05 -0700 MST` form (zone name
/// may also be numeric, as in `-0300 -03`), naive
/// date-times with a space or `T` separator, and bare dates. Offsets are
/// normalized to UTC.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    // Trailing zone abbreviation carries no information beyond the offset.
    let stamped = match text.rsplit_once(' ') {
        Some((stamp, zone)) if is_zone_abbreviation(zone) => stamp,
        _ => text,
    };
    if let Ok(dt) = DateTime::parse_from_str(stamped, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Zone name printed after the numeric offset: `UTC`, `CEST`, or a numeric
/// stand-in like `-03` / `+0530` for zones without a letter abbreviation.
fn is_zone_abbreviation(zone: &str) -> bool {
    if !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return true;
    }
    match zone.strip_prefix(['+', '-']) {
        Some(digits) => {
            matches!(digits.len(), 2 | 4) && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Case-insensitive lexicographic comparison.
///
/// Ties on folded text put lowercase before uppercase, then fall back to code
/// point order so distinct strings never compare equal. There is no accent
/// folding or locale table: `É` folds to `é` and sorts after `z`.
pub fn collate(a: &str, b: &str) -> Ordering {
    let case_rank = |c: char| u8::from(c.is_uppercase());

    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn compare_dates(a: &str, b: &str, direction: SortDirection) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (None, None) => Ordering::Equal,
        // Unparseable dates trail valid ones in both directions.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Row comparator for a column of the given kind.
pub fn comparator(
    kind: SortKind,
    direction: SortDirection,
    column: usize,
) -> impl Fn(&Row, &Row) -> Ordering {
    move |a: &Row, b: &Row| match kind {
        SortKind::Date => compare_dates(a.text(column), b.text(column), direction),
        SortKind::String => {
            direction.apply(collate(a.text(column).trim(), b.text(column).trim()))
        }
    }
}

/// Result of a column activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// Activated column.
    pub column: ColumnRef,
    /// Direction the rows were sorted in.
    pub direction: SortDirection,
    /// State the column was left in.
    pub state: SortState,
    /// Number of rows reordered.
    pub rows: usize,
}

/// Click-driven sorting for sortable column headers.
pub struct SortableTableColumn;

impl SortableTableColumn {
    /// Attach the ready indicator and owner reference to each sortable header.
    ///
    /// Returns handles for the initialized columns; a table without sortable
    /// headers yields none and is left untouched.
    pub fn initialize(table: &mut SortableTable) -> Vec<ColumnRef> {
        let id = table.id.clone();
        let mut handles = Vec::new();

        for (position, header) in table.headers.iter_mut().enumerate() {
            if let Some(sort) = header.sort.as_mut() {
                sort.state = SortState::Unsorted;
                sort.indicator = Some(indicator_for(SortState::Unsorted));
                sort.owner = Some(id.clone());
                handles.push(ColumnRef::new(id.clone(), position));
            }
        }

        debug!(table = %id, columns = handles.len(), "Sortable columns initialized");
        handles
    }

    /// Handle an activation of a sortable header.
    ///
    /// Unknown tables, non-sortable headers and headers that were never
    /// initialized are ignored.
    pub fn on_activate(
        document: &mut ReportDocument,
        column: &ColumnRef,
        config: &PageConfig,
    ) -> Option<SortOutcome> {
        let Some(table) = document.table_mut(&column.table) else {
            debug!(column = %column, "Activation for unknown table ignored");
            return None;
        };
        let Some(sortable) = table.sortable(column.column) else {
            debug!(column = %column, "Activation for non-sortable header ignored");
            return None;
        };
        if sortable.owner.as_ref() != Some(&table.id) {
            debug!(column = %column, "Activation for uninitialized header ignored");
            return None;
        }

        let kind = sortable.kind;
        let direction = sortable.state.next_direction();
        let state = direction.applied_state();

        table.rows.sort_by(comparator(kind, direction, column.column));

        for (position, header) in table.headers.iter_mut().enumerate() {
            let Some(sort) = header.sort.as_mut() else {
                continue;
            };
            if position == column.column {
                sort.state = state;
                if sort.indicator.is_some() {
                    sort.indicator = Some(indicator_for(state));
                }
            } else {
                sort.state = SortState::Unsorted;
                if config.reset_sibling_indicators && sort.indicator.is_some() {
                    sort.indicator = Some(indicator_for(SortState::Unsorted));
                }
            }
        }

        table.renumber();

        info!(
            column = %column,
            direction = %direction,
            rows = table.rows.len(),
            "Table sorted"
        );

        Some(SortOutcome {
            column: column.clone(),
            direction,
            state,
            rows: table.rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TableId;

    fn names_table(names: &[&str]) -> SortableTable {
        let mut table = SortableTable::new("t")
            .with_index_column("#")
            .with_sortable_column("Name", SortKind::String)
            .with_sortable_column("Changed", SortKind::Date);
        for name in names {
            table.push_row([*name, "2020-01-01"]);
        }
        table
    }

    fn document_with(table: SortableTable) -> (ReportDocument, Vec<ColumnRef>) {
        let mut doc = ReportDocument::new();
        doc.push_table(table);
        let handles = SortableTableColumn::initialize(&mut doc.tables[0]);
        (doc, handles)
    }

    #[test]
    fn test_state_transitions() {
        assert!(!SortState::Unsorted.sorted());
        assert!(SortState::AscendingApplied.sorted());
        assert!(!SortState::DescendingApplied.sorted());

        assert_eq!(SortState::Unsorted.next_direction(), SortDirection::Ascending);
        assert_eq!(
            SortState::AscendingApplied.next_direction(),
            SortDirection::Descending
        );
        assert_eq!(
            SortState::DescendingApplied.next_direction(),
            SortDirection::Ascending
        );
    }

    #[test]
    fn test_indicator_for() {
        assert_eq!(indicator_for(SortState::Unsorted), Glyph::Down);
        assert_eq!(indicator_for(SortState::AscendingApplied), Glyph::Down);
        assert_eq!(indicator_for(SortState::DescendingApplied), Glyph::Up);
    }

    #[test]
    fn test_collate_ignores_case() {
        let mut names = vec!["Charlie", "alice", "Bob"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_collate_lowercase_first_on_ties() {
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("abc", "abc"), Ordering::Equal);
        assert_eq!(collate("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_parse_date_formats() {
        let day = NaiveDate::from_ymd_opt(2019, 7, 22).unwrap();
        let noon = day.and_hms_opt(12, 0, 0).unwrap();

        assert_eq!(parse_date("2019-07-22"), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_date("2019/07/22"), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_date(" 2019-07-22 12:00:00 "), Some(noon));
        assert_eq!(parse_date("2019-07-22T12:00:00"), Some(noon));
        assert_eq!(parse_date("2019-07-22T14:00:00+02:00"), Some(noon));
        assert_eq!(parse_date("2019-07-22 12:00:00 +0000 UTC"), Some(noon));
        assert_eq!(parse_date("2019-07-22 14:00:00.5 +0200 CEST").map(|d| d.date()), Some(day));
        assert_eq!(parse_date("2019-07-22 09:00:00 -0300 -03"), Some(noon));
        assert_eq!(parse_date("2019-07-22 17:30:00 +0530 +0530"), Some(noon));
    }

    #[test]
    fn test_zone_abbreviation_forms() {
        assert!(is_zone_abbreviation("UTC"));
        assert!(is_zone_abbreviation("-03"));
        assert!(is_zone_abbreviation("+0530"));
        assert!(!is_zone_abbreviation("-3"));
        assert!(!is_zone_abbreviation("+053"));
        assert!(!is_zone_abbreviation("12:00:00"));
        assert!(!is_zone_abbreviation(""));
    }

    #[test]
    fn test_numeric_zone_dates_sort_chronologically() {
        let mut rows: Vec<Row> = [
            "2020-01-01 00:00:00 +0000 UTC",
            "2019-07-22 14:23:11 -0300 -03",
            "2018-01-01 10:00:00 -0300 -03",
        ]
        .iter()
        .map(|d| Row::new([*d]))
        .collect();

        rows.sort_by(comparator(SortKind::Date, SortDirection::Ascending, 0));
        let order: Vec<&str> = rows.iter().map(|r| r.text(0)).collect();
        assert_eq!(
            order,
            vec![
                "2018-01-01 10:00:00 -0300 -03",
                "2019-07-22 14:23:11 -0300 -03",
                "2020-01-01 00:00:00 +0000 UTC"
            ]
        );
    }

    #[test]
    fn test_collate_has_no_accent_folding() {
        let mut names = vec!["Zed", "Émile", "alice"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["alice", "Zed", "Émile"]);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("None"), None);
        assert_eq!(parse_date("2019-13-45"), None);
    }

    #[test]
    fn test_invalid_dates_trail_in_both_directions() {
        let rows: Vec<Row> = ["bogus", "2021-01-01", "", "2020-01-01"]
            .iter()
            .map(|d| Row::new([*d]))
            .collect();

        let mut asc = rows.clone();
        asc.sort_by(comparator(SortKind::Date, SortDirection::Ascending, 0));
        let asc: Vec<&str> = asc.iter().map(|r| r.text(0)).collect();
        assert_eq!(asc, vec!["2020-01-01", "2021-01-01", "bogus", ""]);

        let mut desc = rows;
        desc.sort_by(comparator(SortKind::Date, SortDirection::Descending, 0));
        let desc: Vec<&str> = desc.iter().map(|r| r.text(0)).collect();
        assert_eq!(desc, vec!["2021-01-01", "2020-01-01", "bogus", ""]);
    }

    #[test]
    fn test_string_comparator_is_stable_on_ties() {
        let mut rows = vec![Row::new(["b", "1"]), Row::new(["a", "2"]), Row::new(["b", "3"])];
        rows.sort_by(comparator(SortKind::String, SortDirection::Descending, 0));
        let order: Vec<&str> = rows.iter().map(|r| r.text(1)).collect();
        assert_eq!(order, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_initialize_sets_ready_state() {
        let (doc, handles) = document_with(names_table(&["b", "a"]));
        assert_eq!(handles, vec![ColumnRef::new("t", 1), ColumnRef::new("t", 2)]);
        for (_, sort) in doc.tables[0].sortable_columns() {
            assert_eq!(sort.state, SortState::Unsorted);
            assert_eq!(sort.indicator, Some(Glyph::Down));
            assert_eq!(sort.owner, Some(TableId::from("t")));
        }
    }

    #[test]
    fn test_initialize_without_sortable_columns() {
        let mut table = SortableTable::new("plain").with_column("A");
        table.push_row(["x"]);
        let before = table.clone();
        assert!(SortableTableColumn::initialize(&mut table).is_empty());
        assert_eq!(table, before);
    }

    #[test]
    fn test_activation_ignores_unknown_targets() {
        let config = PageConfig::default();
        let (mut doc, _) = document_with(names_table(&["b", "a"]));

        assert!(SortableTableColumn::on_activate(&mut doc, &ColumnRef::new("nope", 1), &config).is_none());
        // Index column is not sortable.
        assert!(SortableTableColumn::on_activate(&mut doc, &ColumnRef::new("t", 0), &config).is_none());
        assert!(SortableTableColumn::on_activate(&mut doc, &ColumnRef::new("t", 9), &config).is_none());
        assert_eq!(doc.tables[0].column_texts(1), vec!["b", "a"]);
    }

    #[test]
    fn test_activation_requires_initialization() {
        let config = PageConfig::default();
        let mut doc = ReportDocument::new();
        doc.push_table(names_table(&["b", "a"]));

        let outcome = SortableTableColumn::on_activate(&mut doc, &ColumnRef::new("t", 1), &config);
        assert!(outcome.is_none());
        assert_eq!(doc.tables[0].column_texts(1), vec!["b", "a"]);
    }

    #[test]
    fn test_single_row_stays_in_place() {
        let config = PageConfig::default();
        let (mut doc, handles) = document_with(names_table(&["only"]));

        let outcome = SortableTableColumn::on_activate(&mut doc, &handles[0], &config).unwrap();
        assert_eq!(outcome.rows, 1);
        assert_eq!(doc.tables[0].column_texts(1), vec!["only"]);
        assert_eq!(doc.tables[0].index_values(), vec!["1"]);
    }

    #[test]
    fn test_sibling_indicator_kept_by_default() {
        let config = PageConfig::default();
        let (mut doc, handles) = document_with(names_table(&["b", "a"]));

        SortableTableColumn::on_activate(&mut doc, &handles[0], &config);
        SortableTableColumn::on_activate(&mut doc, &handles[0], &config);
        assert_eq!(doc.tables[0].sortable(1).unwrap().indicator, Some(Glyph::Up));

        SortableTableColumn::on_activate(&mut doc, &handles[1], &config);
        let name = doc.tables[0].sortable(1).unwrap();
        assert_eq!(name.state, SortState::Unsorted);
        assert_eq!(name.indicator, Some(Glyph::Up));
    }

    #[test]
    fn test_sibling_indicator_reset_when_configured() {
        let config = PageConfig::default().with_reset_sibling_indicators(true);
        let (mut doc, handles) = document_with(names_table(&["b", "a"]));

        SortableTableColumn::on_activate(&mut doc, &handles[0], &config);
        SortableTableColumn::on_activate(&mut doc, &handles[0], &config);
        SortableTableColumn::on_activate(&mut doc, &handles[1], &config);

        let name = doc.tables[0].sortable(1).unwrap();
        assert_eq!(name.state, SortState::Unsorted);
        assert_eq!(name.indicator, Some(Glyph::Down));
    }

    #[test]
    fn test_missing_indicator_left_absent() {
        let config = PageConfig::default();
        let (mut doc, handles) = document_with(names_table(&["b", "a"]));
        if let Some(sort) = doc.tables[0].headers[1].sort.as_mut() {
            sort.indicator = None;
        }

        let outcome = SortableTableColumn::on_activate(&mut doc, &handles[0], &config).unwrap();
        assert_eq!(outcome.state, SortState::AscendingApplied);
        assert_eq!(doc.tables[0].sortable(1).unwrap().indicator, None);
        assert_eq!(doc.tables[0].column_texts(1), vec!["a", "b"]);
    }
}
