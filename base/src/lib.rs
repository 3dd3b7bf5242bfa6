//! The `base` crate defines the data which is useful to every front
//! end of the two programs in this workspace: the table which maps
//! key codes to movie trailers, and the fixed transform which turns
//! real time into the accelerated time shown by the clock.
//!
//! Nothing in here touches a DOM, a terminal or a timer.  Those
//! belong to the `pages` crate and the front ends.

mod calendar;
mod dispatch;
mod keys;
mod timewarp;

pub mod collections;

pub use calendar::{pad2, ClockFace, ClockSample, MONTHS};
pub use dispatch::{
    DispatchTable, DisplayRecord, TableError, EMBED_ALLOW, EMBED_HEIGHT, EMBED_URL_PREFIX,
    EMBED_URL_SUFFIX, EMBED_WIDTH,
};
pub use keys::{KeyCode, KeyCodeParseError, TOGGLE_SPIN};
pub use timewarp::{TimeTransform, EPOCH_DATE, ORIGIN_DATE, SCALE_FACTOR};
