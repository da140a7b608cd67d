//! Fuzz target for click sequences on a two-column sortable table.
//!
//! After every click the index column must read 1..=N and at most one
//! column may report `sorted = true`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rp_page::{ColumnRef, PageConfig, ReportDocument, ReportPage, SortKind, SortableTable};

#[derive(Debug, Arbitrary)]
struct Input {
    rows: Vec<(String, String)>,
    clicks: Vec<bool>,
}

fuzz_target!(|input: Input| {
    let mut table = SortableTable::new("t")
        .with_index_column("#")
        .with_sortable_column("Name", SortKind::String)
        .with_sortable_column("Changed", SortKind::Date);
    for (name, changed) in input.rows.iter().take(64) {
        table.push_row([name.as_str(), changed.as_str()]);
    }
    let mut doc = ReportDocument::new();
    doc.push_table(table);

    let Ok(mut page) = ReportPage::new(doc, PageConfig::default()) else {
        return;
    };
    page.load();

    for date_column in input.clicks.into_iter().take(32) {
        let column = if date_column { 2 } else { 1 };
        page.click_header(ColumnRef::new("t", column));

        let table = &page.document().tables[0];
        let expected: Vec<String> = (1..=table.rows.len()).map(|i| i.to_string()).collect();
        assert_eq!(table.index_values(), expected);
        assert!(table.sortable_columns().filter(|(_, s)| s.sorted()).count() <= 1);
    }
});
