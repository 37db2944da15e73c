//! Building a [`DateArray`] from heterogeneous input (spec §2.7 / §4.7).
//!
//! Replaces the original implementation's runtime type introspection with
//! an explicit classifier enum ([`InputKind`]): callers (or the string/date
//! parsers that feed them) decide up front which shape a list of inputs is,
//! rather than the constructor guessing from `isinstance` checks.

use crate::calendar::Instant;
use crate::convert::Relation;
use crate::date::Date;
use crate::error::{Error, Result};
use crate::freq::Frequency;
use crate::guess::guess_freq;
use crate::seq::array::DateArray;

/// The shape of a `date_array` input list (§9 Design Notes).
#[derive(Debug, Clone)]
pub enum InputKind {
    /// Already-encoded ordinals. If `freq` is absent, these are treated as
    /// the raw step sequence `guess_freq` examines directly.
    RawOrdinals(Vec<i64>),
    /// ISO-ish strings, parsed via [`Instant::parse_iso`].
    Strings(Vec<String>),
    /// External calendar instants, truncated to `freq` once known.
    CalendarInstants(Vec<Instant>),
    /// Dates, possibly at mixed frequencies, reconciled onto one.
    Dates(Vec<Date>),
    /// An existing array, just passed through (or reprojected with `asfreq`).
    Array(DateArray),
}

/// Where a `date_array` call gets its ordinals from: an input list, or an
/// arithmetic progression described by a start, and an end or a length.
#[derive(Debug, Clone)]
pub enum DateArraySource {
    List(InputKind),
    Range { start: Date, end: Option<Date>, length: Option<usize> },
}

fn guess_from_instants(instants: &[Instant]) -> Frequency {
    let days: Vec<f64> = instants.iter().map(|i| i.absolute_day_frac()).collect();
    guess_freq(&days)
}

/// Builds a [`DateArray`] from a list of dates, reconciling them onto one
/// frequency: `freq` if given, otherwise the first date's own frequency.
/// Dates at other frequencies are reprojected with [`Relation::After`],
/// matching the teacher's general "widen, don't silently truncate" instinct
/// for this kind of ambiguous conversion.
fn from_dates(dates: Vec<Date>, freq: Option<Frequency>) -> Result<DateArray> {
    let Some(first) = dates.first() else {
        return Ok(DateArray::new(freq.ok_or(Error::InsufficientDate)?, Vec::new()));
    };
    let target = freq.unwrap_or_else(|| first.freq());
    let ordinals = dates
        .iter()
        .map(|d| {
            if d.freq() == target {
                Ok(d.ordinal())
            } else {
                crate::convert::asfreq(d.ordinal(), d.freq(), target, Relation::After)?
                    .ok_or_else(|| Error::OutOfRange(format!("{d} has no representation at {target}")))
            }
        })
        .collect::<Result<Vec<i64>>>()?;
    Ok(DateArray::new(target, ordinals))
}

fn from_instants(instants: Vec<Instant>, freq: Option<Frequency>) -> Result<DateArray> {
    if instants.is_empty() {
        return Ok(DateArray::new(freq.ok_or(Error::InsufficientDate)?, Vec::new()));
    }
    let target = freq.unwrap_or_else(|| guess_from_instants(&instants));
    let ordinals =
        instants.iter().map(|&i| Date::from_instant(target, i).map(Date::ordinal)).collect::<Result<Vec<i64>>>()?;
    Ok(DateArray::new(target, ordinals))
}

/// Builds a [`DateArray`] from a classified input list (spec §4.7 step 1-2).
pub fn date_array_fromlist(input: InputKind, freq: Option<Frequency>) -> Result<DateArray> {
    match input {
        InputKind::Array(arr) => match freq {
            Some(f) if f != arr.freq() => arr.asfreq(f, Relation::After),
            _ => Ok(arr),
        },
        InputKind::Dates(dates) => from_dates(dates, freq),
        InputKind::RawOrdinals(values) => {
            let target = freq.unwrap_or_else(|| {
                let days: Vec<f64> = values.iter().map(|&v| v as f64).collect();
                guess_freq(&days)
            });
            Ok(DateArray::new(target, values))
        }
        InputKind::Strings(strings) => {
            let instants = strings.iter().map(|s| Instant::parse_iso(s)).collect::<Result<Vec<Instant>>>()?;
            from_instants(instants, freq)
        }
        InputKind::CalendarInstants(instants) => from_instants(instants, freq),
    }
}

/// Builds a [`DateArray`] as the arithmetic progression starting at `start`,
/// per spec §4.7 step 3: either `length` elements, or up to `end` (inclusive
/// when `include_last`).
pub fn date_array_fromrange(
    start: Date,
    end: Option<Date>,
    length: Option<usize>,
    include_last: bool,
) -> Result<DateArray> {
    let length = match (end, length) {
        (Some(end), _) => {
            if end.freq() != start.freq() {
                return Err(Error::mismatch(start.freq(), end.freq()));
            }
            let span = end.ordinal() - start.ordinal() + i64::from(include_last);
            if span < 0 {
                return Err(Error::OutOfRange(format!("{end} precedes {start}")));
            }
            usize::try_from(span).map_err(|_| Error::OutOfRange(format!("range {start}..{end} too large")))?
        }
        (None, Some(length)) => length,
        (None, None) => return Err(Error::InsufficientDate),
    };
    let base = start.ordinal();
    let ordinals = (0..length as i64).map(|i| base + i).collect();
    Ok(DateArray::new(start.freq(), ordinals))
}

/// Top-level `date_array` constructor (spec §4.7): dispatches to
/// [`date_array_fromlist`] or [`date_array_fromrange`] depending on which of
/// `source`'s variants was supplied.
pub fn date_array(source: DateArraySource, include_last: bool, freq: Option<Frequency>) -> Result<DateArray> {
    match source {
        DateArraySource::List(input) => date_array_fromlist(input, freq),
        DateArraySource::Range { start, end, length } => date_array_fromrange(start, end, length, include_last),
    }
}
