//! The ordinal codec (spec §4.3): pure `encode`/`decode`/`truncate` functions
//! between a [`Frequency`]-tagged calendar [`Instant`] and its canonical
//! `i64` ordinal.

use crate::calendar::Instant;
use crate::error::{Error, Result};
use crate::freq::Frequency;

/// The epoch that hourly/minutely/secondly ordinals are counted from, one
/// unit before `1970-01-01T00:00:00` (spec §3 "Origins").
fn epoch() -> Instant {
    Instant::from_ymd(1970, 1, 1).expect("epoch is a valid date")
}

fn hourly_origin() -> Instant {
    epoch().add_delta(crate::calendar::Delta::hours(-1))
}

fn minutely_origin() -> Instant {
    epoch().add_delta(crate::calendar::Delta::minutes(-1))
}

fn secondly_origin() -> Instant {
    epoch().add_delta(crate::calendar::Delta::seconds(-1))
}

/// Advances `d` (an absolute-day count) to the absolute day of the Sunday
/// ending its ISO week: `d + (7 - d mod 7) mod 7` (DESIGN.md weekly anchor).
fn advance_to_week_end(d: i64) -> i64 {
    d + (7 - d.rem_euclid(7)).rem_euclid(7)
}

/// Encodes a calendar instant as its canonical ordinal at `freq`.
///
/// Callers must ensure `instant` is not a weekend before encoding at [`Frequency::Business`];
/// see [`truncate`], which enforces this for the truncating path.
pub fn encode(freq: Frequency, instant: Instant) -> Result<i64> {
    let v = match freq {
        Frequency::Annual => i64::from(instant.year()),
        Frequency::Quarterly => {
            i64::from(instant.year() - 1) * 4 + i64::from((instant.month() - 1) / 3) + 1
        }
        Frequency::Monthly => i64::from(instant.year() - 1) * 12 + i64::from(instant.month()),
        Frequency::Weekly => advance_to_week_end(instant.absolute_day()) / 7,
        Frequency::Business => {
            if instant.day_of_week().is_weekend() {
                return Err(Error::InvalidWeekend(instant.to_string()));
            }
            let d = instant.absolute_day();
            let w = d / 7;
            d - 2 * w
        }
        Frequency::Daily | Frequency::Undefined => instant.absolute_day(),
        Frequency::Hourly => (instant - hourly_origin()).num_hours(),
        Frequency::Minutely => (instant - minutely_origin()).num_minutes(),
        Frequency::Secondly => (instant - secondly_origin()).num_seconds(),
    };
    Ok(v)
}

/// Decodes an ordinal at `freq` back to its canonical calendar instant.
pub fn decode(freq: Frequency, value: i64) -> Result<Instant> {
    match freq {
        Frequency::Annual => {
            let year = i32::try_from(value)
                .map_err(|_| Error::OutOfRange(format!("year {value} out of range")))?;
            Instant::make_date(year, -1, -1, 0, 0, 0)
        }
        Frequency::Quarterly => {
            let year = (value - 1).div_euclid(4) + 1;
            let quarter = value - (year - 1) * 4;
            let year = i32::try_from(year)
                .map_err(|_| Error::OutOfRange(format!("year {year} out of range")))?;
            Instant::make_date(year, (quarter * 3) as i32, -1, 0, 0, 0)
        }
        Frequency::Monthly => {
            let year = (value - 1).div_euclid(12) + 1;
            let month = value - (year - 1) * 12;
            let year = i32::try_from(year)
                .map_err(|_| Error::OutOfRange(format!("year {year} out of range")))?;
            Instant::make_date(year, month as i32, -1, 0, 0, 0)
        }
        Frequency::Weekly => Instant::from_absolute_day(value * 7),
        Frequency::Business => {
            let vp = (value - 1).div_euclid(5);
            Instant::from_absolute_day(value + vp * 7 - vp * 5)
        }
        Frequency::Daily | Frequency::Undefined => Instant::from_absolute_day(value),
        Frequency::Hourly => Ok(hourly_origin().add_delta(crate::calendar::Delta::hours(value))),
        Frequency::Minutely => {
            Ok(minutely_origin().add_delta(crate::calendar::Delta::minutes(value)))
        }
        Frequency::Secondly => {
            Ok(secondly_origin().add_delta(crate::calendar::Delta::seconds(value)))
        }
    }
}

/// Projects `instant` to the canonical representative of its period at
/// `freq`. Equivalent to `decode(encode(freq, instant))` but expressed
/// directly, since computing it that way doubles the work for no benefit.
pub fn truncate(freq: Frequency, instant: Instant) -> Result<Instant> {
    match freq {
        Frequency::Annual => Instant::make_date(instant.year(), -1, -1, 0, 0, 0),
        Frequency::Quarterly => {
            Instant::make_date(instant.year(), (instant.quarter() * 3) as i32, -1, 0, 0, 0)
        }
        Frequency::Monthly => Instant::make_date(instant.year(), instant.month() as i32, -1, 0, 0, 0),
        Frequency::Weekly => Instant::from_absolute_day(advance_to_week_end(instant.absolute_day())),
        Frequency::Business => {
            if instant.day_of_week().is_weekend() {
                return Err(Error::InvalidWeekend(instant.to_string()));
            }
            Instant::from_ymd(instant.year(), instant.month(), instant.day())
        }
        Frequency::Daily | Frequency::Undefined => {
            Instant::from_ymd(instant.year(), instant.month(), instant.day())
        }
        Frequency::Hourly => Instant::make_date(
            instant.year(),
            instant.month() as i32,
            instant.day() as i32,
            instant.hour(),
            0,
            0,
        ),
        Frequency::Minutely => Instant::make_date(
            instant.year(),
            instant.month() as i32,
            instant.day() as i32,
            instant.hour(),
            instant.minute(),
            0,
        ),
        Frequency::Secondly => Ok(instant),
    }
}
