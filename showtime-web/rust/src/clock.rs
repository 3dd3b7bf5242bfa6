//! The accelerated clock, drawn into a container element and ticked
//! by `window.setInterval`.
use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use js_sys::Function;
use tracing::{event, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use base::{ClockFace, TimeTransform};
use pages::{ClockComponent, MountedClock, SystemWallClock, Timer};

use crate::dom::{create_element, document, element_by_id, window, DomError};

const HEADER_TEXT: &str = "whattimeisitrightnow.scav";

/// `setInterval` takes a delay in whole milliseconds as a 32-bit
/// signed integer.
fn interval_millis(period: Duration) -> i32 {
    i32::try_from(period.as_millis()).unwrap_or(i32::MAX)
}

/// A [`Timer`] backed by the browser's `setInterval`.
#[derive(Debug, Clone)]
pub struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    pub fn new(window: Window) -> BrowserTimer {
        BrowserTimer { window }
    }
}

/// A running browser interval.  The callback must stay alive for as
/// long as the interval does, so it is kept here.
pub struct BrowserInterval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Debug for BrowserInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserInterval").field("id", &self.id).finish()
    }
}

impl Timer for BrowserTimer {
    type Handle = BrowserInterval;
    type Error = DomError;

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<BrowserInterval, DomError> {
        let callback = Closure::wrap(callback);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref::<Function>(),
                interval_millis(period),
            )?;
        Ok(BrowserInterval {
            id,
            _callback: callback,
        })
    }

    fn clear_interval(&self, handle: BrowserInterval) {
        self.window.clear_interval_with_handle(handle.id);
    }
}

/// The six elements whose text changes on every tick.
struct ClockElements {
    day: Element,
    month: Element,
    year: Element,
    hour: Element,
    minutes: Element,
    seconds: Element,
}

impl ClockElements {
    fn build(doc: &Document, container: &Element) -> Result<ClockElements, DomError> {
        container.set_inner_html("");

        let header = create_element(doc, "header", "header", None)?;
        let title = create_element(doc, "h1", "", Some(HEADER_TEXT))?;
        header.append_child(&title)?;
        container.append_child(&header)?;

        let clock = create_element(doc, "div", "clock", None)?;
        let date_row = create_element(doc, "div", "date_row", None)?;
        let time_row = create_element(doc, "div", "time_row", None)?;
        let elements = ClockElements {
            day: create_element(doc, "span", "date-tile date", None)?,
            month: create_element(doc, "span", "date-tile month", None)?,
            year: create_element(doc, "span", "date-tile year", None)?,
            hour: create_element(doc, "span", "hour", None)?,
            minutes: create_element(doc, "span", "minutes", None)?,
            seconds: create_element(doc, "span", "seconds", None)?,
        };
        for el in [&elements.day, &elements.month, &elements.year] {
            date_row.append_child(el)?;
        }
        for el in [&elements.hour, &elements.minutes, &elements.seconds] {
            time_row.append_child(el)?;
        }
        clock.append_child(&date_row)?;
        clock.append_child(&time_row)?;
        container.append_child(&clock)?;
        Ok(elements)
    }

    fn show(&self, face: &ClockFace) {
        self.day.set_text_content(Some(face.day.to_string().as_str()));
        self.month.set_text_content(Some(face.month));
        self.year.set_text_content(Some(face.year.to_string().as_str()));
        self.hour.set_text_content(Some(face.hour.as_str()));
        self.minutes.set_text_content(Some(face.minute.as_str()));
        self.seconds.set_text_content(Some(face.second.as_str()));
    }
}

thread_local! {
    static CLOCK: RefCell<Option<MountedClock<BrowserTimer>>> = const { RefCell::new(None) };
}

/// Draws the clock inside the element `container_id` and starts it
/// ticking.  Any clock already mounted is unmounted first.
#[wasm_bindgen]
pub fn mount_clock(container_id: &str) -> Result<(), JsValue> {
    unmount_clock();
    let doc = document()?;
    let container = element_by_id(&doc, container_id)?;
    let elements = ClockElements::build(&doc, &container)?;
    let mounted = ClockComponent::new(TimeTransform::local(), SystemWallClock).mount(
        BrowserTimer::new(window()?),
        move |face: &ClockFace| elements.show(face),
    )?;
    CLOCK.with(|clock| *clock.borrow_mut() = Some(mounted));
    event!(Level::INFO, "mount_clock: clock mounted in #{container_id}");
    Ok(())
}

/// Stops the clock.  It is fine to call this when no clock is
/// mounted.
#[wasm_bindgen]
pub fn unmount_clock() {
    let mounted = CLOCK.with(|clock| clock.borrow_mut().take());
    if let Some(mounted) = mounted {
        mounted.unmount();
    }
}

#[test]
fn test_interval_millis() {
    assert_eq!(interval_millis(Duration::from_millis(100)), 100);
    assert_eq!(interval_millis(Duration::from_micros(1500)), 1);
    assert_eq!(interval_millis(Duration::from_secs(u64::MAX)), i32::MAX);
}
