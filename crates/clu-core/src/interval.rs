//! Half-open token or character spans.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A token or character span. `end` is exclusive.
///
/// Deserialization does not check `start <= end`; the resolver validates
/// every interval it reads through [`Interval::new`] or
/// [`Interval::validate`] so that the failure can name the offending
/// mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    /// Build an interval, rejecting `end < start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvertedInterval`] when `end < start`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        Self { start, end }.validate()
    }

    /// An empty interval anchored at `at`.
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Check the `start <= end` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvertedInterval`] when `end < start`.
    pub fn validate(self) -> Result<Self> {
        if self.end < self.start {
            return Err(Error::InvertedInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self)
    }

    /// Number of positions covered.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// `start <= index <= end`. The upper bound is inclusive, so the
    /// position just past the span still counts as contained.
    #[must_use]
    pub const fn contains_index(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// `true` if `other` lies entirely within this interval.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// `start <= index < end`.
    #[must_use]
    pub const fn overlaps_index(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// `true` if the two spans share at least one position. Equivalent
    /// non-empty intervals always overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        (other.start <= self.start && self.start < other.end)
            || (self.start <= other.start && other.start < self.end)
    }

    /// The span as a `Range`, for slicing parallel token arrays.
    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_bounds() {
        let err = Interval::new(5, 3).expect_err("inverted interval must fail");
        assert!(matches!(err, Error::InvertedInterval { start: 5, end: 3 }));
        assert!(err.is_validation());
    }

    #[test]
    fn empty_interval_is_valid() {
        let iv = Interval::new(2, 2).expect("empty interval is valid");
        assert!(iv.is_empty());
        assert_eq!(iv.size(), 0);
    }

    #[test]
    fn contains_index_is_inclusive_of_end() {
        let iv = Interval { start: 1, end: 3 };
        assert!(iv.contains_index(1));
        assert!(iv.contains_index(3));
        assert!(!iv.contains_index(4));
        assert!(!iv.contains_index(0));
    }

    #[test]
    fn overlaps_index_is_exclusive_of_end() {
        let iv = Interval { start: 1, end: 3 };
        assert!(iv.overlaps_index(2));
        assert!(!iv.overlaps_index(3));
    }

    #[test]
    fn interval_containment() {
        let outer = Interval { start: 0, end: 10 };
        let inner = Interval { start: 2, end: 5 };
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn interval_overlap_is_symmetric() {
        let a = Interval { start: 0, end: 4 };
        let b = Interval { start: 3, end: 6 };
        let c = Interval { start: 4, end: 6 };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let iv: Interval =
            serde_json::from_str(r#"{"start": 3, "end": 7}"#).expect("valid interval json");
        assert_eq!(iv, Interval { start: 3, end: 7 });
        assert_eq!(iv.range(), 3..7);
    }
}
