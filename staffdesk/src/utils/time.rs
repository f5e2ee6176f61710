use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Source of "now" for every date-sensitive operation.
pub trait Clock: Send + Sync {
    /// Returns the current instant in the configured timezone.
    fn now(&self) -> DateTime<Tz>;

    /// Returns today's calendar date in the configured timezone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Returns the wall-clock time truncated to whole seconds.
    fn time_of_day(&self) -> NaiveTime {
        let t = self.now().time();
        t.with_nanosecond(0).unwrap_or(t)
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}

/// Wall clock in a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        now_in_timezone(&self.tz)
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    /// Pins the clock to `hh:mm:ss` local time on `date` in `tz`.
    ///
    /// Returns `None` when the wall time does not exist in `tz` (DST gap).
    pub fn at(tz: Tz, date: NaiveDate, hour: u32, min: u32, sec: u32) -> Option<Self> {
        let naive = date.and_hms_opt(hour, min, sec)?;
        tz.from_local_datetime(&naive).earliest().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns the Monday..=Sunday window containing `date`.
pub fn week_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(date.weekday().num_days_from_monday());
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}
