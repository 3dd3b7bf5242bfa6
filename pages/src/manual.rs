//! A timer which runs on virtual time.
//!
//! Nothing happens until someone calls [`ManualTimer::advance`].
//! Tests use this to step the clock precisely; the command-line front
//! end advances it by the real time which has passed.
//!
//! Callbacks run one at a time, in order of due time (ties go to the
//! interval created first).  A callback may start or clear intervals,
//! including its own.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;
use std::time::Duration;

use tracing::{event, Level};

use base::collections::pq::KeyedReversePriorityQueue;

use super::timer::{Timer, MIN_PERIOD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalId(u64);

impl Display for IntervalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Interval {
    period: Duration,
    // None while the callback is running.
    callback: Option<Box<dyn FnMut()>>,
}

#[derive(Default)]
struct Schedule {
    now: Duration,
    next_id: u64,
    due: KeyedReversePriorityQueue<IntervalId, (Duration, IntervalId)>,
    intervals: BTreeMap<IntervalId, Interval>,
}

impl Schedule {
    /// Pops the next interval due no later than `limit`, reschedules
    /// it and hands back its callback.
    fn take_due(&mut self, limit: Duration) -> Option<(IntervalId, Option<Box<dyn FnMut()>>)> {
        let (id, due) = match self.due.peek() {
            Some((id, (due, _))) if *due <= limit => (*id, *due),
            _ => return None,
        };
        self.now = due;
        match self.intervals.get_mut(&id) {
            Some(interval) => {
                let next = due + interval.period;
                self.due.push(id, (next, id));
                Some((id, interval.callback.take()))
            }
            None => {
                // Cleared intervals are removed from both maps, so
                // this should not happen.
                event!(
                    Level::WARN,
                    "ManualTimer: interval {id} was due at {due:?} but no longer exists"
                );
                self.due.remove(&id);
                Some((id, None))
            }
        }
    }
}

/// Cheap to clone; clones share the same schedule.
#[derive(Clone, Default)]
pub struct ManualTimer {
    schedule: Rc<RefCell<Schedule>>,
}

impl ManualTimer {
    pub fn new() -> ManualTimer {
        ManualTimer::default()
    }

    /// Virtual time elapsed since the timer was created.
    pub fn now(&self) -> Duration {
        self.schedule.borrow().now
    }

    pub fn active_intervals(&self) -> usize {
        self.schedule.borrow().intervals.len()
    }

    /// The time at which the next callback is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.schedule.borrow().due.peek().map(|(_, (due, _))| *due)
    }

    /// Moves virtual time forward by `interval`, running every
    /// callback which falls due.  Returns the number of callbacks
    /// run.
    pub fn advance(&self, interval: Duration) -> usize {
        let target = self.now() + interval;
        self.advance_to(target)
    }

    /// Like [`ManualTimer::advance`], but to an absolute virtual time.
    /// Time never moves backward; an earlier `target` runs nothing.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            // The borrow must end before the callback runs, since the
            // callback may use this timer.
            let next = self.schedule.borrow_mut().take_due(target);
            let Some((id, callback)) = next else {
                break;
            };
            let Some(mut callback) = callback else {
                continue;
            };
            event!(Level::TRACE, "ManualTimer: running interval {id}");
            callback();
            fired += 1;
            let orphan = {
                let mut schedule = self.schedule.borrow_mut();
                match schedule.intervals.get_mut(&id) {
                    Some(interval) => {
                        interval.callback = Some(callback);
                        None
                    }
                    // The callback cleared its own interval.
                    None => Some(callback),
                }
            };
            drop(orphan);
        }
        let mut schedule = self.schedule.borrow_mut();
        if schedule.now < target {
            schedule.now = target;
        }
        fired
    }
}

impl Timer for ManualTimer {
    type Handle = IntervalId;
    type Error = Infallible;

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<IntervalId, Infallible> {
        let mut schedule = self.schedule.borrow_mut();
        let id = IntervalId(schedule.next_id);
        schedule.next_id += 1;
        let period = period.max(MIN_PERIOD);
        let due = schedule.now + period;
        schedule.due.push(id, (due, id));
        schedule.intervals.insert(
            id,
            Interval {
                period,
                callback: Some(callback),
            },
        );
        Ok(id)
    }

    fn clear_interval(&self, handle: IntervalId) {
        // Dropping the callback may run arbitrary destructors (which
        // may use this timer), so do it after the borrow ends.
        let removed = {
            let mut schedule = self.schedule.borrow_mut();
            schedule.due.remove(&handle);
            schedule.intervals.remove(&handle)
        };
        if removed.is_none() {
            event!(
                Level::DEBUG,
                "ManualTimer: interval {handle} was already cleared"
            );
        }
        drop(removed);
    }
}

impl Debug for ManualTimer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.schedule.try_borrow() {
            Ok(schedule) => f
                .debug_struct("ManualTimer")
                .field("now", &schedule.now)
                .field("due", &schedule.due)
                .finish(),
            Err(_) => f.write_str("ManualTimer { <busy> }"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<(&'static str, Duration)>>>, ManualTimer) {
        (Rc::new(RefCell::new(Vec::new())), ManualTimer::new())
    }

    fn log_to(
        log: &Rc<RefCell<Vec<(&'static str, Duration)>>>,
        timer: &ManualTimer,
        name: &'static str,
    ) -> Box<dyn FnMut()> {
        let log = Rc::clone(log);
        let timer = timer.clone();
        Box::new(move || log.borrow_mut().push((name, timer.now())))
    }

    #[test]
    fn nothing_runs_without_advancing() {
        let (log, timer) = recorder();
        timer
            .set_interval(Duration::from_millis(100), log_to(&log, &timer, "a"))
            .unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(timer.next_due(), Some(Duration::from_millis(100)));
        assert_eq!(timer.advance(Duration::from_millis(99)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(*log.borrow(), vec![("a", Duration::from_millis(100))]);
    }

    #[test]
    fn callbacks_run_in_due_order() {
        let (log, timer) = recorder();
        timer
            .set_interval(Duration::from_millis(30), log_to(&log, &timer, "slow"))
            .unwrap();
        timer
            .set_interval(Duration::from_millis(20), log_to(&log, &timer, "fast"))
            .unwrap();
        assert_eq!(timer.advance(Duration::from_millis(60)), 5);
        let ms = Duration::from_millis;
        assert_eq!(
            *log.borrow(),
            vec![
                ("fast", ms(20)),
                ("slow", ms(30)),
                ("fast", ms(40)),
                // Both due at 60ms: the older interval goes first.
                ("slow", ms(60)),
                ("fast", ms(60)),
            ]
        );
        assert_eq!(timer.now(), ms(60));
    }

    #[test]
    fn callback_may_clear_its_own_interval() {
        let timer = ManualTimer::new();
        let count = Rc::new(RefCell::new(0));
        let own_id: Rc<RefCell<Option<IntervalId>>> = Rc::new(RefCell::new(None));
        let id = {
            let timer2 = timer.clone();
            let count = Rc::clone(&count);
            let own_id = Rc::clone(&own_id);
            timer
                .set_interval(
                    Duration::from_millis(10),
                    Box::new(move || {
                        *count.borrow_mut() += 1;
                        if let Some(id) = own_id.borrow_mut().take() {
                            timer2.clear_interval(id);
                        }
                    }),
                )
                .unwrap()
        };
        *own_id.borrow_mut() = Some(id);
        assert_eq!(timer.advance(Duration::from_millis(100)), 1);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(timer.active_intervals(), 0);
        assert_eq!(timer.next_due(), None);
    }

    #[test]
    fn cleared_intervals_never_fire() {
        let (log, timer) = recorder();
        let a = timer
            .set_interval(Duration::from_millis(10), log_to(&log, &timer, "a"))
            .unwrap();
        timer.clear_interval(a);
        // Clearing twice is harmless.
        timer.clear_interval(a);
        assert_eq!(timer.advance(Duration::from_secs(1)), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(timer.now(), Duration::from_secs(1));
    }

    #[test]
    fn time_does_not_go_backward() {
        let timer = ManualTimer::new();
        timer.advance(Duration::from_millis(500));
        assert_eq!(timer.advance_to(Duration::from_millis(100)), 0);
        assert_eq!(timer.now(), Duration::from_millis(500));
    }

    #[test]
    fn intervals_start_from_the_current_time() {
        let (log, timer) = recorder();
        timer.advance(Duration::from_millis(1000));
        timer
            .set_interval(Duration::from_millis(100), log_to(&log, &timer, "late"))
            .unwrap();
        timer.advance(Duration::from_millis(200));
        assert_eq!(
            *log.borrow(),
            vec![
                ("late", Duration::from_millis(1100)),
                ("late", Duration::from_millis(1200))
            ]
        );
    }
}
