//! Lazily-computed, memoized properties of a [`super::array::DateArray`]'s
//! ordinal buffer. Split out from `array.rs` so the cache's invalidation
//! story (there isn't one; a `DateArray` is immutable) stays in one place.

use std::cell::OnceCell;

use crate::error::Result;

#[derive(Debug, Default, Clone)]
pub(crate) struct Cache {
    steps: OnceCell<Vec<i64>>,
    is_full: OnceCell<bool>,
    has_duplicated: OnceCell<bool>,
    tostr: OnceCell<Vec<String>>,
    toord: OnceCell<Vec<f64>>,
}

impl Cache {
    pub(crate) fn steps(&self, ordinals: &[i64]) -> &[i64] {
        self.steps.get_or_init(|| ordinals.windows(2).map(|w| w[1] - w[0]).collect())
    }

    pub(crate) fn is_full(&self, ordinals: &[i64]) -> bool {
        *self.is_full.get_or_init(|| self.steps(ordinals).iter().all(|&s| s == 1))
    }

    pub(crate) fn has_duplicated(&self, ordinals: &[i64]) -> bool {
        *self.has_duplicated.get_or_init(|| {
            let mut seen: Vec<i64> = ordinals.to_vec();
            seen.sort_unstable();
            seen.windows(2).any(|w| w[0] == w[1])
        })
    }

    /// Single-visit fallible memoisation: `compute` runs at most once, the
    /// first time this slot is asked for, and every caller after that sees
    /// the same materialised slice (spec §3 "optional materialisations").
    pub(crate) fn tostring(&self, compute: impl FnOnce() -> Result<Vec<String>>) -> Result<&[String]> {
        if self.tostr.get().is_none() {
            let v = compute()?;
            let _ = self.tostr.set(v);
        }
        Ok(self.tostr.get().expect("just populated"))
    }

    pub(crate) fn toordinal(&self, compute: impl FnOnce() -> Result<Vec<f64>>) -> Result<&[f64]> {
        if self.toord.get().is_none() {
            let v = compute()?;
            let _ = self.toord.set(v);
        }
        Ok(self.toord.get().expect("just populated"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn steps_memoizes_first_differences() {
        let cache = Cache::default();
        assert_eq!(cache.steps(&[1, 2, 4, 7]), &[1, 2, 3]);
        assert_eq!(cache.steps(&[1, 2, 4, 7]), &[1, 2, 3]);
    }

    #[test]
    fn is_full_detects_gaps() {
        let cache = Cache::default();
        assert!(cache.is_full(&[1, 2, 3, 4]));
        let cache = Cache::default();
        assert!(!cache.is_full(&[1, 2, 4]));
    }

    #[test]
    fn has_duplicated_ignores_order() {
        let cache = Cache::default();
        assert!(cache.has_duplicated(&[3, 1, 3]));
        let cache = Cache::default();
        assert!(!cache.has_duplicated(&[3, 1, 2]));
    }
}
