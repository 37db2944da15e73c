//! [`DateArray`] (spec §4.6): a homogeneous, frequency-tagged sequence of
//! ordinals, with the lazily-cached properties `scikits.timeseries` stored
//! eagerly on construction but which only cost anything once asked for.

use serde::{Deserialize, Serialize};

use crate::calendar::Weekday;
use crate::codec;
use crate::convert::{self, Relation};
use crate::date::Date;
use crate::error::{Error, Result};
use crate::freq::Frequency;
use crate::seq::inner::Cache;

/// A sequence of ordinals sharing one [`Frequency`].
///
/// Equality and hashing are structural (`freq` and the ordinal buffer); the
/// cache never participates since it is pure derived data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateArray {
    freq: Frequency,
    ordinals: Vec<i64>,
    #[serde(skip)]
    cache: Cache,
}

impl PartialEq for DateArray {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.ordinals == other.ordinals
    }
}

impl Eq for DateArray {}

/// Right-pads every string to the character width of the first, per spec
/// §4.6 "widths are uniform (size of the first element's formatted string)".
fn pad_uniform(strings: &mut [String]) {
    let Some(width) = strings.first().map(|s| s.chars().count()) else { return };
    for s in strings {
        let len = s.chars().count();
        if len < width {
            *s = format!("{s:>width$}");
        }
    }
}

/// The right-hand side of a [`DateArray`] arithmetic or comparison op. Every
/// method on [`DateArray`] that accepts one enforces frequency-safety before
/// touching the ordinals (spec §4.6 "tagged operand overlay").
#[derive(Debug, Clone, Copy)]
pub enum DateOperand<'a> {
    Scalar(i64),
    Date(Date),
    Array(&'a DateArray),
}

/// The result of a [`DateArray`] arithmetic op: a shifted array for a scalar
/// shift, or elementwise ordinal differences against a date-typed operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithResult {
    Array(DateArray),
    Diffs(Vec<i64>),
}

impl DateArray {
    pub fn new(freq: Frequency, ordinals: Vec<i64>) -> Self {
        Self { freq, ordinals, cache: Cache::default() }
    }

    pub fn from_dates(freq: Frequency, dates: &[Date]) -> Result<Self> {
        let mut ordinals = Vec::with_capacity(dates.len());
        for date in dates {
            if date.freq() != freq {
                return Err(Error::mismatch(freq, date.freq()));
            }
            ordinals.push(date.ordinal());
        }
        Ok(Self::new(freq, ordinals))
    }

    #[must_use]
    pub const fn freq(&self) -> Frequency {
        self.freq
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// Raw ordinal buffer (spec §4.6 `tovalue`).
    #[must_use]
    pub fn tovalue(&self) -> &[i64] {
        &self.ordinals
    }

    /// Each element re-decoded and its absolute-day returned, memoised.
    pub fn toordinal(&self) -> Result<&[f64]> {
        self.cache.toordinal(|| {
            self.ordinals
                .iter()
                .map(|&v| Ok(codec::decode(self.freq, v)?.absolute_day() as f64))
                .collect()
        })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Date> {
        self.ordinals.get(index).map(|&v| Date::new(self.freq, v))
    }

    /// Every element formatted with its frequency's default pattern, padded
    /// to the width of the first formatted element, memoised.
    pub fn tostring(&self) -> Result<&[String]> {
        self.cache.tostring(|| {
            let mut out: Vec<String> =
                self.ordinals.iter().map(|&v| Ok(Date::new(self.freq, v).to_string())).collect::<Result<_>>()?;
            pad_uniform(&mut out);
            Ok(out)
        })
    }

    /// Every element formatted with `fmt` (spec §4.5 `%q` extension
    /// included), padded to the width of the first formatted element. Not
    /// memoised since `fmt` varies per call.
    pub fn tostring_fmt(&self, fmt: &str) -> Result<Vec<String>> {
        let mut out: Vec<String> =
            self.ordinals.iter().map(|&v| Date::new(self.freq, v).format(fmt)).collect::<Result<_>>()?;
        pad_uniform(&mut out);
        Ok(out)
    }

    /// Converts every element to `to`, per [`crate::convert::asfreq`]. Errors
    /// if any element has no representation at `to`, for the same reason
    /// [`Date::asfreq`] does: a dense ordinal buffer has nowhere to record a
    /// per-element `None`.
    pub fn asfreq(&self, to: Frequency, relation: Relation) -> Result<Self> {
        let converted: Result<Vec<i64>> = self
            .ordinals
            .iter()
            .map(|&v| {
                convert::asfreq(v, self.freq, to, relation)?.ok_or_else(|| {
                    Error::OutOfRange(format!("ordinal {v} at {:?} has no representation at {to:?}", self.freq))
                })
            })
            .collect();
        Ok(Self::new(to, converted?))
    }

    /// Index of `needle` in this array, or `None` if absent. When the array
    /// [`Self::isvalid`] (full, no duplicates — hence densely sorted) the
    /// offset is taken directly from `needle`'s ordinal in constant time;
    /// otherwise this falls back to a linear scan (spec §4.6).
    pub fn date_to_index(&self, needle: Date) -> Result<Option<usize>> {
        if needle.freq() != self.freq {
            return Err(Error::mismatch(self.freq, needle.freq()));
        }
        if self.isvalid() {
            return Ok(self.ordinals.first().and_then(|&first| {
                let offset = needle.ordinal() - first;
                (offset >= 0 && (offset as usize) < self.ordinals.len()).then_some(offset as usize)
            }));
        }
        Ok(self.ordinals.iter().position(|&v| v == needle.ordinal()))
    }

    /// Index of each of `needles` in this array, `None` per entry not found.
    pub fn find_dates(&self, needles: &[Date]) -> Result<Vec<Option<usize>>> {
        needles.iter().map(|&d| self.date_to_index(d)).collect()
    }

    /// First differences between consecutive ordinals.
    #[must_use]
    pub fn get_steps(&self) -> &[i64] {
        self.cache.steps(&self.ordinals)
    }

    /// True when every step is exactly one frequency unit: no gaps.
    #[must_use]
    pub fn isfull(&self) -> bool {
        self.ordinals.len() < 2 || self.cache.is_full(&self.ordinals)
    }

    #[must_use]
    pub fn has_duplicated_dates(&self) -> bool {
        self.cache.has_duplicated(&self.ordinals)
    }

    /// The complement of [`Self::isfull`]: there's at least one gap.
    #[must_use]
    pub fn has_missing_dates(&self) -> bool {
        !self.isfull()
    }

    /// Full (no gaps) and no duplicates.
    #[must_use]
    pub fn isvalid(&self) -> bool {
        self.isfull() && !self.has_duplicated_dates()
    }

    fn component<T>(&self, f: impl Fn(Date) -> Result<T>) -> Result<Vec<T>> {
        self.ordinals.iter().map(|&v| f(Date::new(self.freq, v))).collect()
    }

    pub fn year(&self) -> Result<Vec<i32>> {
        self.component(Date::year)
    }

    pub fn quarter(&self) -> Result<Vec<u32>> {
        self.component(Date::quarter)
    }

    pub fn month(&self) -> Result<Vec<u32>> {
        self.component(Date::month)
    }

    pub fn day(&self) -> Result<Vec<u32>> {
        self.component(Date::day)
    }

    pub fn day_of_week(&self) -> Result<Vec<Weekday>> {
        self.component(Date::day_of_week)
    }

    pub fn day_of_year(&self) -> Result<Vec<u32>> {
        self.component(Date::day_of_year)
    }

    pub fn week(&self) -> Result<Vec<u32>> {
        self.component(Date::week)
    }

    pub fn hour(&self) -> Result<Vec<u32>> {
        self.component(Date::hour)
    }

    pub fn minute(&self) -> Result<Vec<u32>> {
        self.component(Date::minute)
    }

    pub fn second(&self) -> Result<Vec<u32>> {
        self.component(Date::second)
    }

    // Plural aliases (spec §6 "array aliases"): same dispatch, named the way
    // a caller reaching for a vectorised accessor on an array spells it.
    pub fn years(&self) -> Result<Vec<i32>> {
        self.year()
    }

    pub fn quarters(&self) -> Result<Vec<u32>> {
        self.quarter()
    }

    pub fn months(&self) -> Result<Vec<u32>> {
        self.month()
    }

    pub fn days(&self) -> Result<Vec<u32>> {
        self.day()
    }

    pub fn weekdays(&self) -> Result<Vec<Weekday>> {
        self.day_of_week()
    }

    pub fn yeardays(&self) -> Result<Vec<u32>> {
        self.day_of_year()
    }

    pub fn weeks(&self) -> Result<Vec<u32>> {
        self.week()
    }

    pub fn hours(&self) -> Result<Vec<u32>> {
        self.hour()
    }

    pub fn minutes(&self) -> Result<Vec<u32>> {
        self.minute()
    }

    pub fn seconds(&self) -> Result<Vec<u32>> {
        self.second()
    }

    fn check_same_len(&self, other: &DateArray) -> Result<()> {
        if self.ordinals.len() != other.ordinals.len() {
            return Err(Error::ArithmeticDateError(format!(
                "length mismatch: {} vs {}",
                self.ordinals.len(),
                other.ordinals.len()
            )));
        }
        Ok(())
    }

    /// Only a scalar shift is a meaningful addition; adding a date or array
    /// to a date array has no calendar interpretation.
    pub fn add(&self, rhs: DateOperand) -> Result<ArithResult> {
        match rhs {
            DateOperand::Scalar(n) => {
                Ok(ArithResult::Array(Self::new(self.freq, self.ordinals.iter().map(|v| v + n).collect())))
            }
            DateOperand::Date(_) | DateOperand::Array(_) => {
                Err(Error::ArithmeticDateError("cannot add a date to a date array".to_owned()))
            }
        }
    }

    /// A scalar shifts every element; a `Date` or another `DateArray`
    /// produces elementwise ordinal differences, both frequency-checked.
    pub fn sub(&self, rhs: DateOperand) -> Result<ArithResult> {
        match rhs {
            DateOperand::Scalar(n) => {
                Ok(ArithResult::Array(Self::new(self.freq, self.ordinals.iter().map(|v| v - n).collect())))
            }
            DateOperand::Date(d) => {
                if d.freq() != self.freq {
                    return Err(Error::mismatch(self.freq, d.freq()));
                }
                Ok(ArithResult::Diffs(self.ordinals.iter().map(|v| v - d.ordinal()).collect()))
            }
            DateOperand::Array(other) => {
                if other.freq != self.freq {
                    return Err(Error::mismatch(self.freq, other.freq));
                }
                self.check_same_len(other)?;
                Ok(ArithResult::Diffs(
                    self.ordinals.iter().zip(&other.ordinals).map(|(a, b)| a - b).collect(),
                ))
            }
        }
    }

    fn compare(&self, rhs: DateOperand, op: impl Fn(i64, i64) -> bool) -> Result<Vec<bool>> {
        match rhs {
            DateOperand::Scalar(n) => Ok(self.ordinals.iter().map(|&v| op(v, n)).collect()),
            DateOperand::Date(d) => {
                if d.freq() != self.freq {
                    return Err(Error::mismatch(self.freq, d.freq()));
                }
                Ok(self.ordinals.iter().map(|&v| op(v, d.ordinal())).collect())
            }
            DateOperand::Array(other) => {
                if other.freq != self.freq {
                    return Err(Error::mismatch(self.freq, other.freq));
                }
                self.check_same_len(other)?;
                Ok(self.ordinals.iter().zip(&other.ordinals).map(|(&a, &b)| op(a, b)).collect())
            }
        }
    }

    pub fn eq_op(&self, rhs: DateOperand) -> Result<Vec<bool>> {
        self.compare(rhs, |a, b| a == b)
    }

    pub fn ne_op(&self, rhs: DateOperand) -> Result<Vec<bool>> {
        self.compare(rhs, |a, b| a != b)
    }

    pub fn lt_op(&self, rhs: DateOperand) -> Result<Vec<bool>> {
        self.compare(rhs, |a, b| a < b)
    }

    pub fn le_op(&self, rhs: DateOperand) -> Result<Vec<bool>> {
        self.compare(rhs, |a, b| a <= b)
    }

    pub fn gt_op(&self, rhs: DateOperand) -> Result<Vec<bool>> {
        self.compare(rhs, |a, b| a > b)
    }

    pub fn ge_op(&self, rhs: DateOperand) -> Result<Vec<bool>> {
        self.compare(rhs, |a, b| a >= b)
    }

    /// Elementwise check against the missing-value sentinel (`i64::MIN`),
    /// mirroring the masked-array "NaN date" concept this engine has no
    /// mask type for.
    #[must_use]
    pub fn is_nan(&self) -> Vec<bool> {
        self.ordinals.iter().map(|&v| v == i64::MIN).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::codec::encode;
    use crate::calendar::Instant;

    fn daily(days: &[(i32, u32, u32)]) -> DateArray {
        let ordinals = days
            .iter()
            .map(|&(y, m, d)| encode(Frequency::Daily, Instant::from_ymd(y, m, d).unwrap()).unwrap())
            .collect();
        DateArray::new(Frequency::Daily, ordinals)
    }

    #[test]
    fn isfull_detects_gap() {
        let full = daily(&[(2020, 1, 1), (2020, 1, 2), (2020, 1, 3)]);
        assert!(full.isfull());
        let gapped = daily(&[(2020, 1, 1), (2020, 1, 3)]);
        assert!(!gapped.isfull());
    }

    #[test]
    fn has_duplicated_dates_detects_repeats() {
        let arr = daily(&[(2020, 1, 1), (2020, 1, 1), (2020, 1, 3)]);
        assert!(arr.has_duplicated_dates());
        assert!(!arr.isvalid());
    }

    #[test]
    fn date_to_index_requires_matching_freq() {
        let arr = daily(&[(2020, 1, 1), (2020, 1, 2)]);
        let monthly = Date::from_fields(Frequency::Monthly, Some(2020), None, Some(1), None, None, None, None)
            .unwrap();
        assert!(arr.date_to_index(monthly).is_err());

        let daily_date =
            Date::from_fields(Frequency::Daily, Some(2020), None, Some(1), Some(2), None, None, None)
                .unwrap();
        assert_eq!(arr.date_to_index(daily_date).unwrap(), Some(1));
    }

    #[test]
    fn sub_scalar_shifts_array() {
        let arr = daily(&[(2020, 1, 5), (2020, 1, 6)]);
        let ArithResult::Array(shifted) = arr.sub(DateOperand::Scalar(2)).unwrap() else {
            panic!("expected array result");
        };
        assert_eq!(shifted.tovalue(), &[arr.tovalue()[0] - 2, arr.tovalue()[1] - 2]);
    }

    #[test]
    fn sub_date_gives_diffs() {
        let arr = daily(&[(2020, 1, 5), (2020, 1, 10)]);
        let anchor =
            Date::from_fields(Frequency::Daily, Some(2020), None, Some(1), Some(5), None, None, None)
                .unwrap();
        let ArithResult::Diffs(diffs) = arr.sub(DateOperand::Date(anchor)).unwrap() else {
            panic!("expected diffs result");
        };
        assert_eq!(diffs, vec![0, 5]);
    }

    #[test]
    fn comparisons_against_raw_integer_are_permitted() {
        let arr = daily(&[(2020, 1, 1), (2020, 1, 2), (2020, 1, 3)]);
        let threshold = arr.tovalue()[1];
        assert_eq!(arr.lt_op(DateOperand::Scalar(threshold)).unwrap(), vec![true, false, false]);
        assert_eq!(arr.ge_op(DateOperand::Scalar(threshold)).unwrap(), vec![false, true, true]);
    }

    #[test]
    fn has_missing_dates_mirrors_isfull() {
        let full = daily(&[(2020, 1, 1), (2020, 1, 2), (2020, 1, 3)]);
        assert!(!full.has_missing_dates());
        let gapped = daily(&[(2020, 1, 1), (2020, 1, 3)]);
        assert!(gapped.has_missing_dates());
    }

    #[test]
    fn isvalid_requires_fullness_not_just_sortedness() {
        let sorted_but_gapped = DateArray::new(Frequency::Daily, vec![10, 12, 14]);
        assert!(!sorted_but_gapped.isvalid());
        assert_eq!(sorted_but_gapped.date_to_index(Date::new(Frequency::Daily, 12)).unwrap(), Some(1));
        assert_eq!(sorted_but_gapped.date_to_index(Date::new(Frequency::Daily, 14)).unwrap(), Some(2));
        assert_eq!(sorted_but_gapped.date_to_index(Date::new(Frequency::Daily, 13)).unwrap(), None);
    }

    #[test]
    fn comparisons_reject_mismatched_frequency() {
        let arr = daily(&[(2020, 1, 1)]);
        let monthly = Date::from_fields(Frequency::Monthly, Some(2020), None, Some(1), None, None, None, None)
            .unwrap();
        assert!(arr.eq_op(DateOperand::Date(monthly)).is_err());
    }

    #[test]
    fn is_nan_flags_sentinel() {
        let arr = DateArray::new(Frequency::Daily, vec![1, i64::MIN, 3]);
        assert_eq!(arr.is_nan(), vec![false, true, false]);
    }
}
