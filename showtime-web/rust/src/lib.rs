#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod clock;
mod dom;
mod keys;
mod table;

use tracing::{event, Level};
use wasm_bindgen::prelude::*;

pub use clock::{mount_clock, unmount_clock, BrowserInterval, BrowserTimer};
pub use dom::DomError;
pub use keys::{install_trailer_keys, uninstall_trailer_keys};
pub use table::{trailer_table, transformed_now_millis, TableEntry};

fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, panics
    // are reported with `console.error` rather than as an opaque
    // "unreachable executed".
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_panic_hook();
    Ok(())
}

fn try_log_level_from_str(log_level: &str) -> Result<Level, String> {
    match log_level {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        invalid => Err(format!("invalid log level '{invalid}'")),
    }
}

#[wasm_bindgen]
pub fn init(log_level: &str) -> Result<(), JsValue> {
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(try_log_level_from_str(log_level)?)
            .build(),
    );
    event!(
        Level::INFO,
        "init: tracing initialised (max level is {log_level})"
    );
    Ok(())
}

#[test]
fn test_log_levels() {
    assert_eq!(try_log_level_from_str("debug"), Ok(Level::DEBUG));
    assert_eq!(try_log_level_from_str("warn"), Ok(Level::WARN));
    assert!(try_log_level_from_str("loud").is_err());
    assert!(try_log_level_from_str("WARN").is_err());
    assert!(try_log_level_from_str("3").is_err());
}
