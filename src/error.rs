use std::num::ParseIntError;

use thiserror::Error;

use crate::freq::Frequency;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("insufficient fields to construct a date at this frequency")]
    InsufficientDate,

    #[error("frequency mismatch: {lhs} <> {rhs}")]
    FrequencyMismatch { lhs: Frequency, rhs: Frequency },

    #[error("arithmetic not supported on dates: {0}")]
    ArithmeticDateError(String),

    #[error("{0} falls on a weekend, not a valid business day")]
    InvalidWeekend(String),

    #[error("invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("invalid relation: {0}, expected one starting with 'b' or 'a'")]
    InvalidRelation(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error(transparent)]
    ChronoParse(#[from] chrono::ParseError),

    #[error(transparent)]
    IntParse(#[from] ParseIntError),

    #[error(transparent)]
    StrumParse(#[from] strum::ParseError),
}

impl Error {
    pub fn mismatch(lhs: Frequency, rhs: Frequency) -> Self {
        Self::FrequencyMismatch { lhs, rhs }
    }
}
