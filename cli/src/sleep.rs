use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::{event, Level};

/// MinimalSleeper provides a facility for periodically sleeping such
/// that on average we sleep for the requested amount of time, even
/// though we don't necessarily sleep on every call.  The idea is to
/// be efficient in the use of system calls.
///
/// If the operating system lets us oversleep, the excess is credited
/// against later requests.
#[derive(Debug)]
pub(crate) struct MinimalSleeper {
    /// Minimum period for which we will try to sleep.
    min_sleep: Duration,

    /// Sleep requested but not yet taken.
    owed: Duration,

    /// Sleep taken beyond what was requested.
    credit: Duration,

    total_cumulative_sleep: Duration,
}

impl MinimalSleeper {
    pub(crate) fn new(min_sleep: Duration) -> MinimalSleeper {
        MinimalSleeper {
            min_sleep,
            owed: Duration::ZERO,
            credit: Duration::ZERO,
            total_cumulative_sleep: Duration::ZERO,
        }
    }

    fn really_sleep(&mut self) {
        let then = Instant::now();
        event!(Level::TRACE, "MinimalSleeper: sleeping for {:?}", self.owed);
        sleep(self.owed);
        let slept_for = then.elapsed();
        self.total_cumulative_sleep += slept_for;
        match slept_for.checked_sub(self.owed) {
            Some(excess) => {
                self.credit += excess;
                self.owed = Duration::ZERO;
            }
            None => {
                self.owed -= slept_for;
            }
        }
        event!(
            Level::TRACE,
            "MinimalSleeper: actually slept for {slept_for:?}, owed={:?}, credit={:?}",
            self.owed,
            self.credit
        );
    }

    /// Records a request to sleep for `duration`, sleeping only once
    /// enough has built up.
    pub(crate) fn sleep(&mut self, duration: &Duration) {
        let mut wanted = *duration;
        let used_credit = wanted.min(self.credit);
        self.credit -= used_credit;
        wanted -= used_credit;
        self.owed += wanted;
        if self.owed > self.min_sleep {
            self.really_sleep();
        }
    }

    #[cfg(test)]
    fn owed(&self) -> Duration {
        self.owed
    }
}

impl Drop for MinimalSleeper {
    fn drop(&mut self) {
        event!(
            Level::DEBUG,
            "MinimalSleeper: drop: total cumulative sleep is {:?}",
            self.total_cumulative_sleep
        );
    }
}

#[test]
fn test_short_requests_accumulate() {
    let mut s = MinimalSleeper::new(Duration::from_secs(3600));
    s.sleep(&Duration::from_millis(1));
    s.sleep(&Duration::from_millis(2));
    assert_eq!(s.owed(), Duration::from_millis(3));
}

#[test]
fn test_long_request_sleeps() {
    let mut s = MinimalSleeper::new(Duration::from_millis(1));
    let then = Instant::now();
    s.sleep(&Duration::from_millis(5));
    assert!(then.elapsed() >= Duration::from_millis(5));
    assert_eq!(s.owed(), Duration::ZERO);
}
