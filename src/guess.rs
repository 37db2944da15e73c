//! Frequency guessing (spec §4.7): classifies a sequence of day values
//! (absolute day, with the time of day as a fractional remainder) by the
//! spread of their sorted first differences.

use crate::freq::Frequency;

const EPS: f64 = 1e-6;

fn approx(x: f64, target: f64) -> bool {
    (x - target).abs() < EPS
}

/// Guesses the sampling frequency of `days`, a slice of day values (not
/// necessarily sorted or deduplicated; fractional values encode a sub-day
/// time of day). Falls back to [`Frequency::Undefined`], logging a warning,
/// when the spread of gaps doesn't match a known pattern.
#[must_use]
pub fn guess_freq(days: &[f64]) -> Frequency {
    let mut sorted: Vec<f64> = days.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("day value is never NaN"));
    sorted.dedup_by(|a, b| approx(*a, *b));

    if sorted.len() < 2 {
        log::warn!("guess_freq: fewer than two distinct dates, falling back to Undefined");
        return Frequency::Undefined;
    }

    let mut diffs: Vec<f64> = sorted.windows(2).map(|w| w[1] - w[0]).collect();
    diffs.sort_by(|a, b| a.partial_cmp(b).expect("day gap is never NaN"));
    let lo = diffs[0];
    let hi = diffs[diffs.len() - 1];

    let freq = if approx(lo, 1.0) && approx(hi, 1.0) {
        Frequency::Daily
    } else if approx(lo, 1.0) && approx(hi, 3.0) {
        Frequency::Business
    } else if lo > 3.0 && approx(hi, 7.0) {
        Frequency::Weekly
    } else if (28.0..=31.0).contains(&lo) && hi <= 31.0 {
        Frequency::Monthly
    } else if (90.0..=92.0).contains(&lo) && hi <= 92.0 {
        Frequency::Quarterly
    } else if (365.0..=366.0).contains(&lo) {
        Frequency::Annual
    } else if approx(lo * 24.0, 1.0) && approx(hi * 24.0, 1.0) {
        Frequency::Hourly
    } else if approx(lo * 1440.0, 1.0) && approx(hi * 1440.0, 1.0) {
        Frequency::Minutely
    } else if approx(lo * 86400.0, 1.0) && approx(hi * 86400.0, 1.0) {
        Frequency::Secondly
    } else {
        log::warn!("guess_freq: gaps between {lo} and {hi} days match no known frequency");
        Frequency::Undefined
    };
    freq
}
