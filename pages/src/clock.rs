//! The accelerated clock component.
//!
//! [`ClockComponent::mount`] renders once straight away, then starts
//! a [`PeriodicTask`] which samples the wall clock every
//! [`SAMPLE_INTERVAL`] and renders again.  The task belongs to the
//! returned [`MountedClock`]; unmounting it, or simply dropping it,
//! clears the interval, after which the render callback is never
//! called again.
use std::time::Duration;

use chrono::TimeZone;
use tracing::{event, Level};

use base::{ClockFace, ClockSample, TimeTransform};

use super::timer::{PeriodicTask, Timer};
use super::wallclock::WallClock;

pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ClockComponent<Tz: TimeZone, W: WallClock> {
    transform: TimeTransform<Tz>,
    wall: W,
    interval: Duration,
}

impl<Tz, W> ClockComponent<Tz, W>
where
    Tz: TimeZone + 'static,
    W: WallClock + 'static,
{
    pub fn new(transform: TimeTransform<Tz>, wall: W) -> ClockComponent<Tz, W> {
        ClockComponent {
            transform,
            wall,
            interval: SAMPLE_INTERVAL,
        }
    }

    /// Overrides the sampling period (the terminal front end uses a
    /// slower one).
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> ClockComponent<Tz, W> {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn sample(&self) -> ClockSample {
        ClockSample::at(self.wall.now())
    }

    /// Samples the wall clock and works out what the face shows.
    #[must_use]
    pub fn face(&self) -> ClockFace {
        self.sample().face(&self.transform)
    }

    /// # Errors
    ///
    /// Fails if the timer cannot start the sampling interval.  In
    /// that case the initial render has still happened.
    pub fn mount<T, R>(self, timer: T, mut render: R) -> Result<MountedClock<T>, T::Error>
    where
        T: Timer,
        R: FnMut(&ClockFace) + 'static,
    {
        render(&self.face());
        let interval = self.interval;
        let task = PeriodicTask::start(timer, interval, move || {
            let face = self.face();
            event!(Level::TRACE, "clock tick: {face}");
            render(&face);
        })?;
        event!(
            Level::DEBUG,
            "clock mounted, sampling every {:?}",
            task.period()
        );
        Ok(MountedClock { task })
    }
}

/// A clock which is on display.
#[derive(Debug)]
pub struct MountedClock<T: Timer> {
    task: PeriodicTask<T>,
}

impl<T: Timer> MountedClock<T> {
    pub fn is_ticking(&self) -> bool {
        self.task.is_running()
    }

    pub fn unmount(self) {
        event!(Level::DEBUG, "clock unmounted");
        self.task.stop();
    }
}
