//! Periodic tasks.
//!
//! A [`Timer`] is anything which can call a function repeatedly at a
//! fixed period: the browser's `setInterval`, or the deterministic
//! [`crate::ManualTimer`].  Callers don't use the timer directly.
//! Instead they hold a [`PeriodicTask`], which starts the interval
//! when it is created and clears it exactly once, when it is stopped
//! or dropped.
use std::error::Error;
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use tracing::{event, Level};

/// Periods shorter than this are rounded up to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

pub trait Timer {
    type Handle: Debug;
    type Error: Error + 'static;

    /// Arranges for `callback` to be called every `period`, starting
    /// one period from now.
    ///
    /// # Errors
    ///
    /// Fails if the underlying timer facility refuses the request.
    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, Self::Error>;

    /// Stops an interval.  Once this returns the callback will not
    /// be called again.
    fn clear_interval(&self, handle: Self::Handle);
}

/// A running interval, owned.  The interval is cleared when this is
/// dropped.
pub struct PeriodicTask<T: Timer> {
    timer: T,
    period: Duration,
    handle: Option<T::Handle>,
}

impl<T: Timer> PeriodicTask<T> {
    /// # Errors
    ///
    /// Fails if `timer` cannot start the interval.
    pub fn start<F>(timer: T, period: Duration, tick: F) -> Result<PeriodicTask<T>, T::Error>
    where
        F: FnMut() + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let handle = timer.set_interval(period, Box::new(tick))?;
        event!(
            Level::DEBUG,
            "PeriodicTask: started interval {handle:?} with period {period:?}"
        );
        Ok(PeriodicTask {
            timer,
            period,
            handle: Some(handle),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            event!(Level::DEBUG, "PeriodicTask: clearing interval {handle:?}");
            self.timer.clear_interval(handle);
        }
    }
}

impl<T: Timer> Drop for PeriodicTask<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: Timer> Debug for PeriodicTask<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("period", &self.period)
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::ManualTimer;

    fn counting_task(
        timer: &ManualTimer,
        period: Duration,
    ) -> (PeriodicTask<ManualTimer>, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let task = PeriodicTask::start(timer.clone(), period, move || c.set(c.get() + 1))
            .expect("manual timer never refuses");
        (task, count)
    }

    #[test]
    fn task_runs_until_stopped() {
        let timer = ManualTimer::new();
        let (task, count) = counting_task(&timer, Duration::from_millis(100));
        assert!(task.is_running());
        assert_eq!(timer.active_intervals(), 1);
        timer.advance(Duration::from_millis(350));
        assert_eq!(count.get(), 3);
        task.stop();
        assert_eq!(timer.active_intervals(), 0);
        timer.advance(Duration::from_secs(5));
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn dropping_the_task_clears_the_interval() {
        let timer = ManualTimer::new();
        let count = {
            let (_task, count) = counting_task(&timer, Duration::from_millis(10));
            timer.advance(Duration::from_millis(10));
            count
        };
        assert_eq!(count.get(), 1);
        assert_eq!(timer.active_intervals(), 0);
        timer.advance(Duration::from_millis(100));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn zero_period_is_rounded_up() {
        let timer = ManualTimer::new();
        let (task, count) = counting_task(&timer, Duration::ZERO);
        assert_eq!(task.period(), MIN_PERIOD);
        timer.advance(Duration::from_millis(5));
        assert_eq!(count.get(), 5);
    }
}
