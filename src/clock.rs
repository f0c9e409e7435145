use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;

/// Source of "now" for the stores.
/// Streaks and the weekly histogram work on local calendar days.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn now_millis(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the device's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually driven clock, for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        FixedClock { now: Mutex::new(now) }
    }

    /// Clock at noon of the given date
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(Self::new)
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// Histogram slot for a date: 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}
