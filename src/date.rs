//! The [`Date`] value type (spec §4.5): an immutable `(freq, ordinal)` pair
//! with frequency-safe arithmetic and comparison.

use std::cmp::Ordering;
use std::fmt;

use auto_ops::impl_op_ex;
use serde::{Deserialize, Serialize};

use crate::calendar::Instant;
use crate::codec;
use crate::error::{Error, Result};
use crate::freq::Frequency;

/// A single instant tagged with the [`Frequency`] it was sampled at.
///
/// Two dates only compare or subtract meaningfully when they share a
/// frequency; see [`Date::try_cmp`] and the `Sub<Date>` impl, both of which
/// return [`Error::FrequencyMismatch`] rather than silently comparing raw
/// ordinals across incompatible grids.
#[must_use]
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct Date {
    freq: Frequency,
    ordinal: i64,
}

impl Date {
    pub const fn new(freq: Frequency, ordinal: i64) -> Self {
        Self { freq, ordinal }
    }

    #[must_use]
    pub const fn freq(self) -> Frequency {
        self.freq
    }

    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self.ordinal
    }

    pub fn from_instant(freq: Frequency, instant: Instant) -> Result<Self> {
        let truncated = codec::truncate(freq, instant)?;
        Ok(Self::new(freq, codec::encode(freq, truncated)?))
    }

    /// Builds a date from calendar fields, per the per-frequency
    /// required-field table: coarser frequencies need fewer fields, and
    /// missing ones are [`Error::InsufficientDate`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        freq: Frequency,
        year: Option<i32>,
        quarter: Option<u32>,
        month: Option<u32>,
        day: Option<u32>,
        hour: Option<u32>,
        minute: Option<u32>,
        second: Option<u32>,
    ) -> Result<Self> {
        let year = year.ok_or(Error::InsufficientDate)?;
        let need = |f: Option<u32>| f.ok_or(Error::InsufficientDate);
        let instant = match freq {
            Frequency::Annual => Instant::make_date(year, -1, -1, 0, 0, 0)?,
            Frequency::Quarterly => {
                let q = need(quarter)?;
                Instant::make_date(year, (q * 3) as i32, -1, 0, 0, 0)?
            }
            Frequency::Monthly => {
                let m = need(month)?;
                Instant::make_date(year, m as i32, -1, 0, 0, 0)?
            }
            Frequency::Weekly | Frequency::Business | Frequency::Daily | Frequency::Undefined => {
                Instant::from_ymd(year, need(month)?, need(day)?)?
            }
            Frequency::Hourly => {
                Instant::make_date(year, need(month)? as i32, need(day)? as i32, need(hour)?, 0, 0)?
            }
            Frequency::Minutely => Instant::make_date(
                year,
                need(month)? as i32,
                need(day)? as i32,
                need(hour)?,
                need(minute)?,
                0,
            )?,
            Frequency::Secondly => Instant::make_date(
                year,
                need(month)? as i32,
                need(day)? as i32,
                need(hour)?,
                need(minute)?,
                need(second)?,
            )?,
        };
        Self::from_instant(freq, instant)
    }

    /// Parses a calendar string and truncates it to `freq` (spec §4.2
    /// `parse_iso` feeding spec §4.5 construction).
    pub fn parse(freq: Frequency, s: &str) -> Result<Self> {
        Self::from_instant(freq, Instant::parse_iso(s)?)
    }

    /// Today's date at `freq`, using the local system clock.
    pub fn today(freq: Frequency) -> Result<Self> {
        Self::from_instant(freq, chrono::Local::now().naive_local().into())
    }

    fn to_instant(self) -> Result<Instant> {
        codec::decode(self.freq, self.ordinal)
    }

    pub fn year(self) -> Result<i32> {
        Ok(self.to_instant()?.year())
    }

    pub fn quarter(self) -> Result<u32> {
        Ok(self.to_instant()?.quarter())
    }

    pub fn month(self) -> Result<u32> {
        Ok(self.to_instant()?.month())
    }

    pub fn day(self) -> Result<u32> {
        Ok(self.to_instant()?.day())
    }

    pub fn day_of_week(self) -> Result<crate::calendar::Weekday> {
        Ok(self.to_instant()?.day_of_week())
    }

    pub fn day_of_year(self) -> Result<u32> {
        Ok(self.to_instant()?.day_of_year())
    }

    pub fn week(self) -> Result<u32> {
        Ok(self.to_instant()?.week_of_year())
    }

    pub fn hour(self) -> Result<u32> {
        Ok(self.to_instant()?.hour())
    }

    pub fn minute(self) -> Result<u32> {
        Ok(self.to_instant()?.minute())
    }

    pub fn second(self) -> Result<u32> {
        Ok(self.to_instant()?.second())
    }

    /// Converts this date to `to`, picking the [`crate::convert::Relation`]
    /// edge when `to` is finer. Errors (rather than returning the raw `None`
    /// the pointwise converter can produce) when the conversion is
    /// ill-defined, since a `Date` has nowhere else to put that outcome.
    pub fn asfreq(self, to: Frequency, relation: crate::convert::Relation) -> Result<Self> {
        let value = crate::convert::asfreq(self.ordinal, self.freq, to, relation)?
            .ok_or_else(|| Error::OutOfRange(format!("{self} has no representation at {to}")))?;
        Ok(Self::new(to, value))
    }

    /// Fallible ordering: only dates sharing a frequency can be compared.
    pub fn try_cmp(self, other: Self) -> Result<Ordering> {
        if self.freq != other.freq {
            return Err(Error::mismatch(self.freq, other.freq));
        }
        Ok(self.ordinal.cmp(&other.ordinal))
    }

    fn default_format(self) -> &'static str {
        match self.freq {
            Frequency::Annual => "%Y",
            Frequency::Quarterly => "%YQ%q",
            Frequency::Monthly => "%b-%Y",
            Frequency::Weekly => "%YW%V",
            Frequency::Business | Frequency::Daily | Frequency::Undefined => "%d-%b-%y",
            Frequency::Hourly => "%d-%b-%Y %H:00",
            Frequency::Minutely => "%d-%b-%Y %H:%M",
            Frequency::Secondly => "%d-%b-%Y %H:%M:%S",
        }
    }

    /// Formats this date, with `%q` expanding to the one-digit quarter
    /// number before the rest of `fmt` is handed to the calendar formatter.
    pub fn format(self, fmt: &str) -> Result<String> {
        let instant = self.to_instant()?;
        let fmt = fmt.replace("%q", &instant.quarter().to_string());
        Ok(instant.format(&fmt))
    }
}

impl std::ops::Sub for Date {
    type Output = Result<i64>;

    fn sub(self, rhs: Self) -> Result<i64> {
        if self.freq != rhs.freq {
            return Err(Error::mismatch(self.freq, rhs.freq));
        }
        Ok(self.ordinal - rhs.ordinal)
    }
}

impl_op_ex!(+ |d: &Date, n: &i64| -> Date { Date::new(d.freq, d.ordinal + n) });
impl_op_ex!(-|d: &Date, n: &i64| -> Date { Date::new(d.freq, d.ordinal - n) });

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format(self.default_format()) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "<invalid {} date, ordinal {}>", self.freq, self.ordinal),
        }
    }
}
