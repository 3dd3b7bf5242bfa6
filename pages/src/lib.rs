//! This crate implements the two programs of this workspace as state
//! machines which don't know how they are displayed.
//!
//! The trailer keys program turns key presses into changes of a
//! [`Session`]; the front end asks for the [`RegionUpdate`]s which
//! bring its display up to date with the session's [`PageView`].
//!
//! The clock program is a [`ClockComponent`] which, once mounted on
//! a [`Timer`], samples a [`WallClock`] periodically and hands each
//! [`base::ClockFace`] to a render callback.  Unmounting (or dropping
//! the [`MountedClock`]) cancels the timer.
#![crate_name = "pages"]

mod clock;
mod event;
mod manual;
mod timer;
mod trailers;
mod wallclock;

pub use clock::{ClockComponent, MountedClock, SAMPLE_INTERVAL};
pub use event::{Dispatch, RegionUpdate};
pub use manual::{IntervalId, ManualTimer};
pub use timer::{PeriodicTask, Timer, MIN_PERIOD};
pub use trailers::{
    EmbedView, PageView, Session, TrailerPage, EMBED_REGION, HIDDEN_CLASS, MESSAGE_REGION,
    SPIN_CLASS, TITLE_REGION,
};
pub use wallclock::{SystemWallClock, VirtualWallClock, WallClock};
