//! Binds the trailer keys program to the document's `keydown` events.
use std::cell::RefCell;

use tracing::{event, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, KeyboardEvent};

use base::{DispatchTable, KeyCode};
use pages::{RegionUpdate, TrailerPage, EMBED_REGION, MESSAGE_REGION, TITLE_REGION};

use crate::dom::{apply_region_update, document, element_by_id, DomError};

/// Older browsers report the code in `which` and leave `keyCode`
/// zero.
fn key_code_of(key_code: u32, which: u32) -> KeyCode {
    KeyCode::new(if key_code != 0 { key_code } else { which })
}

struct TrailerKeys {
    document: Document,
    listener: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Drop for TrailerKeys {
    fn drop(&mut self) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("keydown", self.listener.as_ref().unchecked_ref())
        {
            event!(
                Level::ERROR,
                "failed to remove keydown listener: {}",
                DomError::from(e)
            );
        }
    }
}

thread_local! {
    static TRAILER_KEYS: RefCell<Option<TrailerKeys>> = const { RefCell::new(None) };
}

fn on_key_down(doc: &Document, page: &RefCell<TrailerPage>, ev: &KeyboardEvent) {
    let code = key_code_of(ev.key_code(), ev.which());
    let (dispatch, updates) = page.borrow_mut().press(code);
    if dispatch.suppresses_default() {
        ev.prevent_default();
    }
    for update in &updates {
        if let Err(e) = apply_region_update(doc, update) {
            event!(Level::ERROR, "key code {code}: failed to apply {update:?}: {e}");
        }
    }
}

/// A new page starts out not spinning, but an earlier listener may
/// have left the player spinning.  These bring the DOM into line.
fn resync_updates(page: &TrailerPage) -> Vec<RegionUpdate> {
    vec![RegionUpdate::SetSpinning {
        spinning: page.session().spinning(),
    }]
}

/// Starts listening for key presses.  Installing again replaces the
/// previous listener (and starts a fresh session).
#[wasm_bindgen]
pub fn install_trailer_keys() -> Result<(), JsValue> {
    let doc = document()?;
    for id in [TITLE_REGION, EMBED_REGION, MESSAGE_REGION] {
        element_by_id(&doc, id)?;
    }
    let page = TrailerPage::new(DispatchTable::fast_and_furious());
    for update in &resync_updates(&page) {
        apply_region_update(&doc, update)?;
    }
    let page = RefCell::new(page);
    let handler_doc = doc.clone();
    let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        on_key_down(&handler_doc, &page, &ev);
    });
    doc.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
        .map_err(DomError::from)?;
    let previous = TRAILER_KEYS.with(|keys| {
        keys.borrow_mut().replace(TrailerKeys {
            document: doc,
            listener,
        })
    });
    if previous.is_some() {
        event!(Level::INFO, "install_trailer_keys: replacing previous listener");
    }
    drop(previous);
    event!(Level::INFO, "install_trailer_keys: listening for key presses");
    Ok(())
}

#[wasm_bindgen]
pub fn uninstall_trailer_keys() {
    let keys = TRAILER_KEYS.with(|keys| keys.borrow_mut().take());
    if keys.is_some() {
        event!(Level::INFO, "uninstall_trailer_keys: no longer listening");
    }
    drop(keys);
}

#[test]
fn test_key_code_falls_back_to_which() {
    assert_eq!(key_code_of(116, 116), KeyCode::new(116));
    assert_eq!(key_code_of(0, 32), KeyCode::new(32));
    assert_eq!(key_code_of(0, 0), KeyCode::new(0));
}

#[test]
fn test_fresh_page_stops_the_spin() {
    let mut page = TrailerPage::new(DispatchTable::fast_and_furious());
    assert_eq!(
        resync_updates(&page),
        vec![RegionUpdate::SetSpinning { spinning: false }]
    );
    let (dispatch, _) = page.press(KeyCode::new(32));
    assert!(dispatch.suppresses_default());
    assert_eq!(
        resync_updates(&page),
        vec![RegionUpdate::SetSpinning { spinning: true }]
    );
}
