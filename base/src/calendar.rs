//! Breaking a displayed instant down into the fields the clock face
//! shows.
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::Serialize;

use super::timewarp::TimeTransform;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-pads values below 10 to two digits.  Larger values are
/// rendered in full.
#[must_use]
pub fn pad2(n: u32) -> String {
    if n < 10 {
        format!("0{n}")
    } else {
        n.to_string()
    }
}

/// One reading of the real clock.  A new sample is taken on every
/// tick and the previous one is thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    pub real_time: DateTime<Utc>,
}

impl ClockSample {
    pub fn at(real_time: DateTime<Utc>) -> ClockSample {
        ClockSample { real_time }
    }

    pub fn transformed<Tz: TimeZone>(&self, transform: &TimeTransform<Tz>) -> DateTime<Tz> {
        transform.transform(&self.real_time)
    }

    #[must_use]
    pub fn face<Tz: TimeZone>(&self, transform: &TimeTransform<Tz>) -> ClockFace {
        ClockFace::of(&self.transformed(transform))
    }
}

/// The text of each field on the clock face.  Day and year are not
/// padded; hours run 0-23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockFace {
    pub day: u32,
    pub month: &'static str,
    pub year: i32,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

impl ClockFace {
    /// Uses the calendar of `t`'s own time zone.
    pub fn of<Tz: TimeZone>(t: &DateTime<Tz>) -> ClockFace {
        ClockFace {
            day: t.day(),
            month: MONTHS[t.month0() as usize],
            year: t.year(),
            hour: pad2(t.hour()),
            minute: pad2(t.minute()),
            second: pad2(t.second()),
        }
    }
}

impl Display for ClockFace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}:{}:{}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta};

    #[test]
    fn single_digits_are_padded() {
        for n in 0..10 {
            let s = pad2(n);
            assert_eq!(s.len(), 2);
            assert!(s.starts_with('0'));
            assert_eq!(s[1..].parse::<u32>(), Ok(n));
        }
    }

    #[test]
    fn larger_values_pass_through() {
        assert_eq!(pad2(10), "10");
        assert_eq!(pad2(23), "23");
        assert_eq!(pad2(59), "59");
        assert_eq!(pad2(123), "123");
    }

    #[test]
    fn sample_at_epoch_shows_origin() {
        let tt = TimeTransform::in_zone(Utc);
        let sample = ClockSample::at(*tt.epoch());
        let face = sample.face(&tt);
        assert_eq!(face, ClockFace::of(tt.origin()));
        assert_eq!(face.to_string(), "1 January 2012 00:00:00");
    }

    #[test]
    fn sample_at_epoch_shows_origin_in_any_zone() {
        for hours in [-11, -5, 0, 3, 9, 13] {
            let zone = FixedOffset::east_opt(hours * 3600).expect("valid offset");
            let tt = TimeTransform::in_zone(zone);
            let sample = ClockSample::at(tt.epoch().with_timezone(&Utc));
            assert_eq!(sample.face(&tt).to_string(), "1 January 2012 00:00:00");
        }
    }

    #[test]
    fn fields_follow_the_calendar() {
        let tt = TimeTransform::in_zone(Utc);
        // 1h 2m 3.5s after the epoch, the shown time is 96 times
        // further on: 99h 17m 36s, i.e. 5 January 2012 03:17:36.
        let real = *tt.epoch() + TimeDelta::milliseconds(3_723_500);
        let face = ClockSample::at(real).face(&tt);
        assert_eq!(face.day, 5);
        assert_eq!(face.month, "January");
        assert_eq!(face.year, 2012);
        assert_eq!(face.hour, "03");
        assert_eq!(face.minute, "17");
        assert_eq!(face.second, "36");
    }

    #[test]
    fn month_names_are_indexed_from_zero() {
        let tt = TimeTransform::in_zone(Utc);
        // 31 displayed days is 7h 45m of real time.
        let real = *tt.epoch() + TimeDelta::minutes(7 * 60 + 45);
        assert_eq!(ClockSample::at(real).face(&tt).month, "February");
    }
}
