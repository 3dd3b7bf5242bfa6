//! Sources of "real" time for the clock.
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{event, Level};

use super::manual::ManualTimer;

/// WallClock is where the clock component reads the current real
/// time from on each tick.
pub trait WallClock {
    fn now(&self) -> DateTime<Utc>;
}

/// The host's real-time clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A wall clock which reads `start` plus however much virtual time
/// has passed on a [`ManualTimer`].  With this, a clock mounted on
/// that timer sees exactly the instants at which it ticks.
#[derive(Debug, Clone)]
pub struct VirtualWallClock {
    start: DateTime<Utc>,
    timer: ManualTimer,
}

impl VirtualWallClock {
    pub fn new(start: DateTime<Utc>, timer: ManualTimer) -> VirtualWallClock {
        VirtualWallClock { start, timer }
    }
}

impl WallClock for VirtualWallClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.timer.now();
        match TimeDelta::from_std(elapsed)
            .ok()
            .and_then(|delta| self.start.checked_add_signed(delta))
        {
            Some(t) => t,
            None => {
                event!(
                    Level::WARN,
                    "VirtualWallClock: {elapsed:?} after {} is out of range",
                    self.start
                );
                DateTime::<Utc>::MAX_UTC
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn virtual_clock_follows_the_timer() {
        let timer = ManualTimer::new();
        let start = DateTime::<Utc>::from_timestamp(1_651_708_800, 0).expect("valid timestamp");
        let clock = VirtualWallClock::new(start, timer.clone());
        assert_eq!(clock.now(), start);
        timer.advance(Duration::from_millis(1500));
        assert_eq!(clock.now(), start + TimeDelta::milliseconds(1500));
    }

    #[test]
    fn system_clock_is_plausible() {
        // 2020-01-01T00:00:00Z
        let floor = DateTime::<Utc>::from_timestamp(1_577_836_800, 0).expect("valid timestamp");
        assert!(SystemWallClock.now() > floor);
    }
}
