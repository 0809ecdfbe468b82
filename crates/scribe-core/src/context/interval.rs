//! Line intervals for partial-file context
//!
//! Interval paths use the form `path:1-5,7-10`. Line numbers are 1-based and
//! inclusive on both ends.

use serde::{Deserialize, Serialize};

/// A 1-based, inclusive range of lines within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    /// First line of the interval
    pub start: u32,
    /// Last line of the interval
    pub end: u32,
}

impl Interval {
    /// Create a new interval
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Check whether two intervals share at least one line
    pub fn intersects(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Check whether this interval contains a line
    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parse a comma-separated interval list like `1-5,7-10`
///
/// A bare number `n` is shorthand for `n-n`. Returns an empty vector when
/// any part fails to parse or describes an empty range.
pub fn parse_intervals(spec: &str) -> Vec<Interval> {
    let mut intervals = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        let parsed = match part.split_once('-') {
            Some((start, end)) => start
                .parse::<u32>()
                .ok()
                .zip(end.parse::<u32>().ok())
                .map(|(start, end)| Interval::new(start, end)),
            None => part.parse::<u32>().ok().map(|n| Interval::new(n, n)),
        };

        match parsed {
            Some(interval) if interval.start >= 1 && interval.start <= interval.end => {
                intervals.push(interval)
            }
            _ => return Vec::new(),
        }
    }

    intervals
}
