use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

use crate::error::{Error, Result};

/// The type class a [`Frequency`] belongs to, per the frequency registry (spec §4.1).
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum TypeClass {
    /// Annual through weekly: whole calendar periods.
    Date,
    /// Hourly through secondly: sub-day instants.
    Time,
    /// The undefined sentinel, its own class.
    Undefined,
}

/// Closed set of sampling frequencies a [`crate::date::Date`] or
/// [`crate::seq::array::DateArray`] can be tagged with.
///
/// `EnumString` gives case-insensitive parsing of the canonical tags
/// themselves (`"a"`, `"Q"`, ...); [`Frequency::normalize`] additionally
/// accepts the longer aliases listed in spec §4.1.
#[must_use]
#[derive(
    Debug,
    Eq,
    PartialEq,
    Hash,
    Copy,
    Clone,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Frequency {
    #[strum(serialize = "A")]
    Annual,
    #[strum(serialize = "Q")]
    Quarterly,
    #[strum(serialize = "M")]
    Monthly,
    #[strum(serialize = "W")]
    Weekly,
    #[strum(serialize = "B")]
    Business,
    #[strum(serialize = "D")]
    Daily,
    #[strum(serialize = "H")]
    Hourly,
    #[strum(serialize = "T")]
    Minutely,
    #[strum(serialize = "S")]
    Secondly,
    #[strum(serialize = "U")]
    Undefined,
}

impl Frequency {
    /// Canonical single-letter tag, as used in ordinal-encoding formulas.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Frequency::Annual => 'A',
            Frequency::Quarterly => 'Q',
            Frequency::Monthly => 'M',
            Frequency::Weekly => 'W',
            Frequency::Business => 'B',
            Frequency::Daily => 'D',
            Frequency::Hourly => 'H',
            Frequency::Minutely => 'T',
            Frequency::Secondly => 'S',
            Frequency::Undefined => 'U',
        }
    }

    #[must_use]
    pub const fn type_class(self) -> TypeClass {
        match self {
            Frequency::Annual
            | Frequency::Quarterly
            | Frequency::Monthly
            | Frequency::Weekly
            | Frequency::Business
            | Frequency::Daily => TypeClass::Date,
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => TypeClass::Time,
            Frequency::Undefined => TypeClass::Undefined,
        }
    }

    /// Accepts any of the closed list of aliases from spec §4.1: the
    /// canonical tag, a full English name, or a case-insensitive first-letter
    /// match against one of those names.
    pub fn normalize(tag_or_alias: &str) -> Result<Self> {
        let s = tag_or_alias.trim();
        if s.is_empty() {
            return Err(Error::InvalidFrequency(tag_or_alias.to_owned()));
        }
        if let Ok(freq) = Frequency::from_str(s) {
            return Ok(freq);
        }
        let lower = s.to_ascii_lowercase();
        let freq = match lower.as_str() {
            "annual" | "yearly" | "year" | "years" | "y" => Frequency::Annual,
            "quarterly" | "quarter" | "quarters" => Frequency::Quarterly,
            "monthly" | "month" | "months" => Frequency::Monthly,
            "weekly" | "week" | "weeks" => Frequency::Weekly,
            "business" | "businessday" | "business_day" | "bday" => Frequency::Business,
            "daily" | "day" | "days" => Frequency::Daily,
            "hourly" | "hour" | "hours" => Frequency::Hourly,
            "minutely" | "minute" | "minutes" | "min" => Frequency::Minutely,
            "secondly" | "second" | "seconds" | "sec" => Frequency::Secondly,
            "undefined" | "none" => Frequency::Undefined,
            _ => return Err(Error::InvalidFrequency(tag_or_alias.to_owned())),
        };
        Ok(freq)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_canonical_tags() {
        assert_eq!(Frequency::normalize("A").unwrap(), Frequency::Annual);
        assert_eq!(Frequency::normalize("b").unwrap(), Frequency::Business);
        assert_eq!(Frequency::normalize("H").unwrap(), Frequency::Hourly);
    }

    #[test]
    fn normalize_aliases_case_insensitive() {
        assert_eq!(Frequency::normalize("Annual").unwrap(), Frequency::Annual);
        assert_eq!(Frequency::normalize("YEARLY").unwrap(), Frequency::Annual);
        assert_eq!(Frequency::normalize("Business").unwrap(), Frequency::Business);
        assert_eq!(Frequency::normalize("hour").unwrap(), Frequency::Hourly);
    }

    #[test]
    fn normalize_unknown_tag_fails() {
        assert!(Frequency::normalize("zz").is_err());
        assert!(Frequency::normalize("").is_err());
    }

    #[test]
    fn type_class_mapping() {
        assert_eq!(Frequency::Annual.type_class(), TypeClass::Date);
        assert_eq!(Frequency::Weekly.type_class(), TypeClass::Date);
        assert_eq!(Frequency::Hourly.type_class(), TypeClass::Time);
        assert_eq!(Frequency::Secondly.type_class(), TypeClass::Time);
        assert_eq!(Frequency::Undefined.type_class(), TypeClass::Undefined);
    }

    #[test]
    fn display_round_trips_through_tag() {
        for freq in [
            Frequency::Annual,
            Frequency::Quarterly,
            Frequency::Monthly,
            Frequency::Weekly,
            Frequency::Business,
            Frequency::Daily,
            Frequency::Hourly,
            Frequency::Minutely,
            Frequency::Secondly,
            Frequency::Undefined,
        ] {
            assert_eq!(freq.to_string(), freq.tag().to_string());
        }
    }
}
