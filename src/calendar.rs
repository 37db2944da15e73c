//! Calendar primitives façade (spec §4.2).
//!
//! A thin wrapper around `chrono`'s proleptic Gregorian calendar. Every
//! [`Instant`] is a naive (timezone-free) date and time, since the engine's
//! non-goals exclude timezone arithmetic and DST handling.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Day of the week, Monday-first, matching the teacher's `Day` enum ordering.
#[must_use]
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum Weekday {
    Mon = 0,
    Tue = 1,
    Wed = 2,
    Thu = 3,
    Fri = 4,
    Sat = 5,
    Sun = 6,
}

impl Weekday {
    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }

    const fn from_chrono(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// A calendar instant: a naive Gregorian date plus a time of day.
#[must_use]
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Instant(NaiveDateTime);

/// A relative shift to apply to an [`Instant`] (spec §4.2 `add_delta`).
/// Month/year components are applied first and clamp the day-of-month if it
/// doesn't exist in the target month; everything else is an exact duration.
#[must_use]
#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone)]
pub struct Delta {
    pub years: i32,
    pub months: i32,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Delta {
    #[must_use]
    pub fn years(n: i32) -> Self {
        Self { years: n, ..Self::default() }
    }

    #[must_use]
    pub fn months(n: i32) -> Self {
        Self { months: n, ..Self::default() }
    }

    #[must_use]
    pub fn weeks(n: i64) -> Self {
        Self { weeks: n, ..Self::default() }
    }

    #[must_use]
    pub fn days(n: i64) -> Self {
        Self { days: n, ..Self::default() }
    }

    #[must_use]
    pub fn hours(n: i64) -> Self {
        Self { hours: n, ..Self::default() }
    }

    #[must_use]
    pub fn minutes(n: i64) -> Self {
        Self { minutes: n, ..Self::default() }
    }

    #[must_use]
    pub fn seconds(n: i64) -> Self {
        Self { seconds: n, ..Self::default() }
    }
}

/// Number of days in `y-m`, clamping `m` into `1..=12` first.
fn days_in_month(y: i32, m: u32) -> u32 {
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    let first = NaiveDate::from_ymd_opt(y, m, 1).expect("valid month");
    next.map_or(31, |n| (n - first).num_days() as u32)
}

impl Instant {
    /// Constructs a date, with `m == -1` / `d == -1` meaning "last month of
    /// year" / "last day of month" respectively (spec §4.2).
    pub fn make_date(y: i32, m: i32, d: i32, h: u32, mi: u32, s: u32) -> Result<Self> {
        if y < 1 {
            return Err(Error::OutOfRange(format!("year {y} is before 0001-01-01")));
        }
        let m = if m == -1 { 12 } else { m };
        if !(1..=12).contains(&m) {
            return Err(Error::OutOfRange(format!("invalid month {m}")));
        }
        let m = m as u32;
        let last = days_in_month(y, m);
        let d = if d == -1 { last as i32 } else { d };
        if d < 1 || d as u32 > last {
            return Err(Error::OutOfRange(format!("invalid day {d} for {y}-{m:02}")));
        }
        let date = NaiveDate::from_ymd_opt(y, m, d as u32)
            .ok_or_else(|| Error::OutOfRange(format!("invalid date {y}-{m:02}-{d:02}")))?;
        let time = NaiveTime::from_hms_opt(h, mi, s)
            .ok_or_else(|| Error::OutOfRange(format!("invalid time {h}:{mi}:{s}")))?;
        Ok(Self(NaiveDateTime::new(date, time)))
    }

    #[must_use]
    pub fn from_ymd(y: i32, m: u32, d: u32) -> Result<Self> {
        Self::make_date(y, m as i32, d as i32, 0, 0, 0)
    }

    /// Proleptic Gregorian day number, with `0001-01-01 == 1`.
    #[must_use]
    pub fn absolute_day(self) -> i64 {
        i64::from(self.0.date().num_days_from_ce())
    }

    /// Absolute day as a fractional value, the time of day as the fractional
    /// part (spec §4.7 frequency guessing from sub-day gaps).
    #[must_use]
    pub fn absolute_day_frac(self) -> f64 {
        let secs = f64::from(self.hour()) * 3600.0 + f64::from(self.minute()) * 60.0 + f64::from(self.second());
        self.absolute_day() as f64 + secs / 86400.0
    }

    pub fn from_absolute_day(v: i64) -> Result<Self> {
        let days = i32::try_from(v)
            .map_err(|_| Error::OutOfRange(format!("absolute day {v} out of range")))?;
        let date = NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or_else(|| Error::OutOfRange(format!("absolute day {v} out of range")))?;
        Ok(Self(NaiveDateTime::new(date, NaiveTime::MIN)))
    }

    #[must_use]
    pub fn add_delta(self, delta: Delta) -> Self {
        let mut date = self.0.date();
        if delta.years != 0 || delta.months != 0 {
            let day = date.day();
            let total_months = date.month0() as i32 + delta.months + delta.years * 12;
            let y = date.year() + total_months.div_euclid(12);
            let m = total_months.rem_euclid(12) as u32 + 1;
            let clamped_day = day.min(days_in_month(y, m));
            date = NaiveDate::from_ymd_opt(y, m, clamped_day).expect("clamped day is valid");
        }
        let extra = chrono::Duration::weeks(delta.weeks)
            + chrono::Duration::days(delta.days)
            + chrono::Duration::hours(delta.hours)
            + chrono::Duration::minutes(delta.minutes)
            + chrono::Duration::seconds(delta.seconds);
        Self(NaiveDateTime::new(date, self.0.time()) + extra)
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    #[must_use]
    pub fn second(self) -> u32 {
        self.0.second()
    }

    #[must_use]
    pub fn day_of_week(self) -> Weekday {
        Weekday::from_chrono(self.0.weekday())
    }

    #[must_use]
    pub fn day_of_year(self) -> u32 {
        self.0.ordinal()
    }

    /// ISO-8601 week number.
    #[must_use]
    pub fn week_of_year(self) -> u32 {
        self.0.iso_week().week()
    }

    #[must_use]
    pub fn quarter(self) -> u32 {
        (self.month() - 1) / 3 + 1
    }

    #[must_use]
    pub fn format(self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// Best-effort ISO-ish parser (spec §4.2 `parse_iso`): tries a handful of
    /// common layouts rather than a single rigid one, since string
    /// construction is only a convenience entry point (§1 non-goals).
    pub fn parse_iso(s: &str) -> Result<Self> {
        let s = s.trim();
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(dt));
            }
        }
        for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d-%b-%Y", "%d-%b-%y"] {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Ok(Self(NaiveDateTime::new(date, NaiveTime::MIN)));
            }
        }
        // Fall through to chrono's own error for a reasonable message.
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(Self).map_err(Error::from)
    }
}

impl std::ops::Sub for Instant {
    type Output = chrono::Duration;

    fn sub(self, rhs: Self) -> chrono::Duration {
        self.0.signed_duration_since(rhs.0)
    }
}

impl From<NaiveDate> for Instant {
    fn from(date: NaiveDate) -> Self {
        Self(NaiveDateTime::new(date, NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(dt: NaiveDateTime) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
