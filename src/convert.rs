//! Frequency conversion (spec §4.4): reinterpreting an ordinal at one
//! [`Frequency`] as an ordinal at another, under a [`Relation`] that picks
//! which edge of the coarser period to use when converting to a finer one.

use crate::calendar::{Delta, Instant};
use crate::codec;
use crate::error::{Error, Result};
use crate::freq::Frequency;

/// Which edge of a half-open period an [`asfreq`] conversion should land on
/// when the target frequency is finer than the source.
#[must_use]
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Relation {
    /// The start of the period: its earliest finer-grained instant.
    Before,
    /// The end of the period: its latest finer-grained instant. This is also
    /// what [`codec::decode`] itself returns, so converting to a coarser or
    /// equal frequency is insensitive to the relation.
    After,
}

impl std::str::FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let first = s.chars().next().ok_or_else(|| Error::InvalidRelation(s.to_owned()))?;
        match first.to_ascii_lowercase() {
            'b' => Ok(Relation::Before),
            'a' => Ok(Relation::After),
            _ => Err(Error::InvalidRelation(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Before => write!(f, "B"),
            Relation::After => write!(f, "A"),
        }
    }
}

/// The first finer-grained instant of the period that `end` (the canonical,
/// latest instant of its period at `freq`) belongs to.
fn period_start(freq: Frequency, end: Instant) -> Result<Instant> {
    match freq {
        Frequency::Annual => Instant::from_ymd(end.year(), 1, 1),
        Frequency::Quarterly => {
            let first_month = end.quarter() * 3 - 2;
            Instant::from_ymd(end.year(), first_month, 1)
        }
        Frequency::Monthly => Instant::from_ymd(end.year(), end.month(), 1),
        Frequency::Weekly => Ok(end.add_delta(Delta::days(-6))),
        Frequency::Business
        | Frequency::Daily
        | Frequency::Undefined
        | Frequency::Hourly
        | Frequency::Minutely
        | Frequency::Secondly => Ok(end),
    }
}

/// Turns the domain errors a conversion step can hit (a weekend landing, an
/// out-of-range instant) into `None`, per spec §4.4 "ill-defined conversions
/// return none"; any other error (a genuine bug) still propagates.
fn domain<T>(r: Result<T>) -> Result<Option<T>> {
    match r {
        Ok(v) => Ok(Some(v)),
        Err(Error::OutOfRange(_) | Error::InvalidWeekend(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Converts `value`, an ordinal at `from`, to its ordinal at `to`, or `None`
/// if the conversion is ill-defined (spec §4.4).
///
/// Decodes `value` to its canonical calendar instant, picks the
/// [`Relation`]-selected edge of that period, then truncates and re-encodes
/// at `to`. When `to` is coarser than or equal to `from` the relation has no
/// effect, since truncation collapses both edges onto the same period.
pub fn asfreq(value: i64, from: Frequency, to: Frequency, relation: Relation) -> Result<Option<i64>> {
    if from == to {
        return Ok(Some(value));
    }
    let Some(end) = domain(codec::decode(from, value))? else { return Ok(None) };
    let instant = match relation {
        Relation::Before => {
            let Some(start) = domain(period_start(from, end))? else { return Ok(None) };
            start
        }
        Relation::After => end,
    };
    let Some(truncated) = domain(codec::truncate(to, instant))? else { return Ok(None) };
    domain(codec::encode(to, truncated))
}
