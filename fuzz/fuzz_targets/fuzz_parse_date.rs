//! Fuzz target for date cell parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rp_page::sortable::parse_date;

fuzz_target!(|data: &str| {
    // Unparseable text yields None, never a panic
    let _ = parse_date(data);
});
