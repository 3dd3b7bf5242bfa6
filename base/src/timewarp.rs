//! The accelerated clock shows a time which runs 96 times faster
//! than real time.  Real midnight at the start of 5 May 2022 maps
//! onto midnight at the start of 1 January 2012, and every real
//! millisecond after (or before) that is 96 displayed milliseconds.
//!
//! Both reference instants are midnights on the local calendar, so
//! they depend on the time zone in which the clock is shown.  A
//! [`TimeTransform`] is therefore built for a particular zone; in
//! production that is [`chrono::Local`].
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

/// Real-time reference instant (local midnight).
pub const EPOCH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2022, 5, 5) {
    Some(d) => d,
    None => panic!("EPOCH_DATE is not a valid date"),
};

/// The displayed instant which corresponds to [`EPOCH_DATE`].
pub const ORIGIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2012, 1, 1) {
    Some(d) => d,
    None => panic!("ORIGIN_DATE is not a valid date"),
};

/// Displayed milliseconds per real millisecond.
pub const SCALE_FACTOR: i64 = 96;

/// Resolves local midnight on `date`.
///
/// When midnight falls in a daylight-saving gap it does not exist;
/// like a browser, we move forward to the first local time which
/// does.  When it is ambiguous we take the earlier instant.
fn local_midnight<Tz: TimeZone>(zone: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight: NaiveDateTime = date.and_time(NaiveTime::MIN);
    if let Some(t) = zone.from_local_datetime(&midnight).earliest() {
        return t;
    }
    // Gaps are never longer than a few hours, and always start on
    // a quarter hour.
    (1..=16)
        .find_map(|quarter| {
            zone.from_local_datetime(&(midnight + TimeDelta::minutes(15 * quarter)))
                .earliest()
        })
        .unwrap_or_else(|| zone.from_utc_datetime(&midnight))
}

/// The affine map `origin + (t - epoch) * scale`.
#[derive(Debug, Clone)]
pub struct TimeTransform<Tz: TimeZone> {
    zone: Tz,
    epoch: DateTime<Tz>,
    origin: DateTime<Tz>,
    scale: i64,
}

impl TimeTransform<Local> {
    /// The transform as seen from the host's local time zone.
    pub fn local() -> TimeTransform<Local> {
        TimeTransform::in_zone(Local)
    }
}

impl<Tz: TimeZone> TimeTransform<Tz> {
    pub fn in_zone(zone: Tz) -> TimeTransform<Tz> {
        let epoch = local_midnight(&zone, EPOCH_DATE);
        let origin = local_midnight(&zone, ORIGIN_DATE);
        TimeTransform {
            zone,
            epoch,
            origin,
            scale: SCALE_FACTOR,
        }
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    pub fn epoch(&self) -> &DateTime<Tz> {
        &self.epoch
    }

    pub fn origin(&self) -> &DateTime<Tz> {
        &self.origin
    }

    pub fn scale_factor(&self) -> i64 {
        self.scale
    }

    /// Transforms a timestamp in milliseconds since the Unix epoch.
    ///
    /// This is total.  Far outside any sensible range the
    /// arithmetic saturates rather than overflowing.
    #[must_use]
    pub fn transform_millis(&self, real_millis: i64) -> i64 {
        let since_epoch = real_millis.saturating_sub(self.epoch.timestamp_millis());
        self.origin
            .timestamp_millis()
            .saturating_add(since_epoch.saturating_mul(self.scale))
    }

    /// Transforms an instant.  Results beyond the range chrono can
    /// represent are clamped to its minimum or maximum instant.
    #[must_use]
    pub fn transform<Z: TimeZone>(&self, real: &DateTime<Z>) -> DateTime<Tz> {
        let millis = self.transform_millis(real.timestamp_millis());
        let utc = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
        utc.with_timezone(&self.zone)
    }
}
