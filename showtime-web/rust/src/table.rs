use chrono::Utc;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use base::{DispatchTable, TimeTransform};

/// One row of the legend the page shows next to the player.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TableEntry {
    pub code: u32,
    pub id: &'static str,
    pub title: &'static str,
}

fn table_entries(table: &DispatchTable) -> Vec<TableEntry> {
    table
        .iter()
        .map(|(code, record)| TableEntry {
            code: code.value(),
            id: record.external_id,
            title: record.title,
        })
        .collect()
}

/// The key codes the trailer keys program responds to, in key code
/// order.
#[wasm_bindgen]
pub fn trailer_table() -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(&table_entries(&DispatchTable::fast_and_furious()))
        .map_err(|e| e.to_string())
}

/// The displayed instant, in milliseconds since the Unix epoch, for
/// callers which want to format it themselves.
#[wasm_bindgen]
pub fn transformed_now_millis() -> f64 {
    let millis = TimeTransform::local().transform_millis(Utc::now().timestamp_millis());
    // Displayed times stay far below 2^53 ms, where f64 is exact.
    millis as f64
}

#[test]
fn test_table_entries() {
    let entries = table_entries(&DispatchTable::fast_and_furious());
    assert_eq!(entries.len(), 11);
    assert_eq!(
        entries[4],
        TableEntry {
            code: 116,
            id: "mw2AqdB5EVA",
            title: "Fast Five"
        }
    );
}
