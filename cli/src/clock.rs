//! Runs the accelerated clock in a terminal.
//!
//! The clock is mounted on a [`ManualTimer`], and we drive that
//! timer from real elapsed time: sleep until the next tick is due,
//! then advance the timer to the time which has actually passed.
//! Faces are queued by the render callback and printed from the main
//! loop, so output errors can be propagated.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{event, Level};

use base::{ClockFace, ClockSample, TimeTransform};
use pages::{ClockComponent, ManualTimer, SystemWallClock};

use crate::output::TerminalWriter;
use crate::sleep::MinimalSleeper;

pub(crate) struct ClockOptions {
    /// Stop after this many renders.
    pub(crate) renders: Option<usize>,
    pub(crate) interval: Duration,
    /// Render this real instant once, instead of running.
    pub(crate) at: Option<DateTime<Utc>>,
}

pub(crate) fn parse_instant(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|t| t.with_timezone(&Utc))
}

fn limit_reached(limit: Option<usize>, rendered: usize) -> bool {
    limit.is_some_and(|limit| rendered >= limit)
}

pub(crate) fn run_clock(
    options: &ClockOptions,
    out: &mut TerminalWriter,
) -> Result<(), Box<dyn Error>> {
    let transform = TimeTransform::local();
    if let Some(at) = options.at {
        let face = ClockSample::at(at).face(&transform);
        out.write_face(&face)?;
        return Ok(());
    }

    let timer = ManualTimer::new();
    let pending: Rc<RefCell<VecDeque<ClockFace>>> = Rc::new(RefCell::new(VecDeque::new()));
    let sink = Rc::clone(&pending);
    let mounted = ClockComponent::new(transform, SystemWallClock)
        .with_interval(options.interval)
        .mount(timer.clone(), move |face: &ClockFace| {
            sink.borrow_mut().push_back(face.clone());
        })?;

    let mut sleeper = MinimalSleeper::new(Duration::from_millis(5));
    let started = Instant::now();
    let mut rendered: usize = 0;
    'running: loop {
        let faces: Vec<ClockFace> = pending.borrow_mut().drain(..).collect();
        for face in faces {
            if limit_reached(options.renders, rendered) {
                break 'running;
            }
            out.write_face(&face)?;
            rendered += 1;
        }
        if limit_reached(options.renders, rendered) {
            break 'running;
        }
        let wait = timer
            .next_due()
            .map_or(options.interval, |due| due.saturating_sub(timer.now()));
        sleeper.sleep(&wait);
        timer.advance_to(started.elapsed());
    }
    event!(Level::INFO, "Rendered {rendered} clock faces, unmounting");
    mounted.unmount();
    Ok(())
}

#[test]
fn test_parse_instant() {
    let t = parse_instant("2022-05-05T00:00:00+02:00").expect("valid RFC 3339");
    assert_eq!(t.to_rfc3339(), "2022-05-04T22:00:00+00:00");
    assert!(parse_instant("yesterday").is_err());
}

#[test]
fn test_limit_is_checked_before_rendering() {
    assert!(limit_reached(Some(0), 0));
    assert!(!limit_reached(Some(3), 2));
    assert!(limit_reached(Some(3), 3));
    assert!(!limit_reached(None, usize::MAX));
}
