//! A typed-frequency date and date-array engine for time-series analytics.
//!
//! [`Frequency`] tags every [`Date`] and [`seq::array::DateArray`] with one
//! of a closed set of sampling frequencies; [`codec`] and [`convert`]
//! implement the ordinal codec and cross-frequency conversion those types
//! are built on.

pub mod calendar;
pub mod codec;
pub mod construct;
pub mod convert;
pub mod date;
pub mod error;
pub mod freq;
pub mod guess;
pub mod seq;

pub use crate::construct::{date_array, date_array_fromlist, date_array_fromrange, DateArraySource, InputKind};
pub use crate::convert::{asfreq, Relation};
pub use crate::date::Date;
pub use crate::error::{Error, Result};
pub use crate::freq::{Frequency, TypeClass};
pub use crate::guess::guess_freq;
pub use crate::seq::array::{ArithResult, DateArray, DateOperand};

/// Either a single [`Date`] or a [`DateArray`], for the free-function
/// accessors below that mirror the original library's module-level
/// functions accepting either (its `_frommethod` adapter).
#[derive(Debug, Clone)]
pub enum DateLike {
    Single(Date),
    Array(DateArray),
}

impl DateLike {
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, DateLike::Single(_))
    }

    #[must_use]
    pub const fn is_date_array(&self) -> bool {
        matches!(self, DateLike::Array(_))
    }
}

#[must_use]
pub const fn is_date(v: &DateLike) -> bool {
    v.is_date()
}

#[must_use]
pub const fn is_date_array(v: &DateLike) -> bool {
    v.is_date_array()
}

/// Either a scalar component (from a [`Date`]) or a vector of them (from a
/// [`DateArray`]), returned by the free-function accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component<T> {
    Scalar(T),
    Vec(Vec<T>),
}

fn component<T>(
    v: &DateLike,
    single: impl Fn(Date) -> Result<T>,
    many: impl Fn(&DateArray) -> Result<Vec<T>>,
) -> Result<Component<T>> {
    match v {
        DateLike::Single(d) => single(*d).map(Component::Scalar),
        DateLike::Array(a) => many(a).map(Component::Vec),
    }
}

pub fn year(v: &DateLike) -> Result<Component<i32>> {
    component(v, Date::year, DateArray::year)
}

pub fn quarter(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::quarter, DateArray::quarter)
}

pub fn month(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::month, DateArray::month)
}

pub fn day(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::day, DateArray::day)
}

pub fn day_of_week(v: &DateLike) -> Result<Component<calendar::Weekday>> {
    component(v, Date::day_of_week, DateArray::day_of_week)
}

pub fn day_of_year(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::day_of_year, DateArray::day_of_year)
}

pub fn week(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::week, DateArray::week)
}

pub fn hour(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::hour, DateArray::hour)
}

pub fn minute(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::minute, DateArray::minute)
}

pub fn second(v: &DateLike) -> Result<Component<u32>> {
    component(v, Date::second, DateArray::second)
}

// Array-flavoured aliases for the accessors above (spec §6 "array aliases"):
// same dispatch, named the way a `DateArray`-only caller reaches for them.
pub use self::year as years;
pub use self::quarter as quarters;
pub use self::month as months;
pub use self::day as days;
pub use self::day_of_week as weekdays;
pub use self::day_of_year as yeardays;
pub use self::week as weeks;
pub use self::hour as hours;
pub use self::minute as minutes;
pub use self::second as seconds;

/// Today's date at `freq`, using the local system clock (spec §4.8).
pub fn today(freq: Frequency) -> Result<Date> {
    Date::today(freq)
}

/// Alias for [`today`], reading better once a frequency is spelled out next
/// to it (`thisday(Frequency::Business)`).
pub fn thisday(freq: Frequency) -> Result<Date> {
    Date::today(freq)
}

/// The most recently completed business day, given the hour/minute a
/// trading day is considered to end. Steps back a day if today hasn't
/// reached that cutoff yet or falls on a weekend, then off the weekend.
pub fn prevbusday(day_end_hour: u32, day_end_min: u32) -> Result<Date> {
    let now = calendar::Instant::from(chrono::Local::now().naive_local());
    let before_cutoff = (now.hour(), now.minute()) < (day_end_hour, day_end_min);
    let mut instant = now;
    if before_cutoff || instant.day_of_week().is_weekend() {
        instant = instant.add_delta(calendar::Delta::days(-1));
    }
    while instant.day_of_week().is_weekend() {
        instant = instant.add_delta(calendar::Delta::days(-1));
    }
    Date::from_instant(Frequency::Business, instant)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn component_dispatches_by_variant() {
        let single = DateLike::Single(
            Date::from_fields(Frequency::Monthly, Some(2004), None, Some(9), None, None, None, None)
                .unwrap(),
        );
        assert!(is_date(&single));
        assert!(!is_date_array(&single));
        assert_eq!(month(&single).unwrap(), Component::Scalar(9));

        let arr = DateArray::new(
            Frequency::Monthly,
            vec![codec::encode(
                Frequency::Monthly,
                calendar::Instant::from_ymd(2004, 9, 1).unwrap(),
            )
            .unwrap()],
        );
        let array_like = DateLike::Array(arr);
        assert!(is_date_array(&array_like));
        assert_eq!(month(&array_like).unwrap(), Component::Vec(vec![9]));
    }

    #[test]
    fn plural_array_aliases_match_singular() {
        let arr = DateArray::new(
            Frequency::Monthly,
            vec![codec::encode(Frequency::Monthly, calendar::Instant::from_ymd(2004, 9, 1).unwrap()).unwrap()],
        );
        let array_like = DateLike::Array(arr);
        assert_eq!(months(&array_like).unwrap(), month(&array_like).unwrap());
        assert_eq!(years(&array_like).unwrap(), year(&array_like).unwrap());
    }
}
