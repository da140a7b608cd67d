//! Fuzz target for report document loading.
//!
//! Arbitrary JSON must either be rejected or load, initialize and render
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rp_page::{PageConfig, ReportPage};

fuzz_target!(|data: &str| {
    let Ok(mut page) = ReportPage::from_json(data, PageConfig::default()) else {
        return;
    };
    page.load();
    for column in page.columns().to_vec() {
        page.click_header(column);
    }
    let _ = page.render();
});
