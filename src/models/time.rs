//! Wall-clock time on the 24-hour wheel.
//!
//! Railway diagrams span one operating day and wrap around midnight:
//! a train departing 23:50 and arriving 00:10 ran for twenty minutes,
//! not minus twenty-three hours. [`ClockTime`] therefore stores seconds
//! of day and does all arithmetic modulo 24 h.
//!
//! # Ordering
//! There is no total order on a wheel. The canonical comparator
//! [`ClockTime::wheel_before`] uses the half-wheel rule: `a` is before
//! `b` iff the forward distance `a → b` is strictly positive and
//! strictly less than 12 h. Equal times (and the exact 12 h antipode)
//! compare "not before".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds in one day.
pub const SECS_PER_DAY: i64 = 24 * 3600;

/// Half of the wheel, the boundary of [`ClockTime::wheel_before`].
pub const HALF_DAY_SECS: i64 = SECS_PER_DAY / 2;

/// A wall-clock time of day with wraparound arithmetic.
///
/// Internally seconds in `0..86_400`. Construction normalizes any
/// out-of-range input onto the wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Creates a time from seconds since midnight, wrapping onto the wheel.
    pub fn from_secs(secs: i64) -> Self {
        Self(secs.rem_euclid(SECS_PER_DAY) as u32)
    }

    /// Creates a time from hours, minutes, and seconds.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        Self::from_secs(hour as i64 * 3600 + minute as i64 * 60 + second as i64)
    }

    /// Seconds since midnight, in `0..86_400`.
    #[inline]
    pub fn seconds(&self) -> i64 {
        self.0 as i64
    }

    /// Adds (or, when negative, subtracts) seconds, wrapping past midnight.
    #[inline]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self::from_secs(self.seconds() + secs)
    }

    /// Forward distance from `self` to `other` on the wheel, in `0..86_400`.
    ///
    /// Always non-negative: going from 23:50 to 00:10 is 1200 s, and
    /// going from 00:10 to 23:50 is 85 200 s.
    #[inline]
    pub fn seconds_to(&self, other: ClockTime) -> i64 {
        (other.seconds() - self.seconds()).rem_euclid(SECS_PER_DAY)
    }

    /// Canonical wheel ordering: is `self` strictly before `other`?
    ///
    /// True iff the forward distance `self → other` is strictly positive
    /// and strictly less than 12 h. Equal times are "not before", which
    /// routes an exactly-coincident conflict onto the left-conflict
    /// resolution path (pushed by the full gap).
    #[inline]
    pub fn wheel_before(&self, other: ClockTime) -> bool {
        let d = self.seconds_to(other);
        d > 0 && d < HALF_DAY_SECS
    }

    /// Hours, minutes, and seconds of day.
    pub fn hms(&self) -> (u32, u32, u32) {
        (self.0 / 3600, self.0 % 3600 / 60, self.0 % 60)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

/// Whether two wheel ranges intersect, with open endpoints.
///
/// Each range is given as a start plus a forward length in seconds
/// (`0..86_400`). Ranges that merely touch at an endpoint do not
/// intersect, so a span ending exactly when a maintenance window begins
/// is legal.
pub fn ranges_intersect_open(a_start: ClockTime, a_len: i64, b_start: ClockTime, b_len: i64) -> bool {
    if a_len <= 0 || b_len <= 0 {
        return false;
    }
    let rel = a_start.seconds_to(b_start);
    rel < a_len || rel + b_len > SECS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs_wraps() {
        assert_eq!(ClockTime::from_secs(0).seconds(), 0);
        assert_eq!(ClockTime::from_secs(SECS_PER_DAY).seconds(), 0);
        assert_eq!(ClockTime::from_secs(-60).seconds(), SECS_PER_DAY - 60);
        assert_eq!(ClockTime::from_secs(SECS_PER_DAY + 30).seconds(), 30);
    }

    #[test]
    fn test_add_secs_across_midnight() {
        let t = ClockTime::from_hms(23, 50, 0);
        assert_eq!(t.add_secs(1200), ClockTime::from_hms(0, 10, 0));
        assert_eq!(t.add_secs(-3600), ClockTime::from_hms(22, 50, 0));
    }

    #[test]
    fn test_seconds_to_is_forward_distance() {
        let a = ClockTime::from_hms(23, 50, 0);
        let b = ClockTime::from_hms(0, 10, 0);
        assert_eq!(a.seconds_to(b), 1200);
        assert_eq!(b.seconds_to(a), SECS_PER_DAY - 1200);
        assert_eq!(a.seconds_to(a), 0);
    }

    #[test]
    fn test_wheel_before() {
        let a = ClockTime::from_hms(23, 50, 0);
        let b = ClockTime::from_hms(0, 10, 0);
        assert!(a.wheel_before(b)); // crosses midnight, still "before"
        assert!(!b.wheel_before(a));
        assert!(!a.wheel_before(a)); // equal times are not before

        // The exact antipode is "not before" in either direction.
        let noon = ClockTime::from_hms(12, 0, 0);
        let midnight = ClockTime::from_hms(0, 0, 0);
        assert!(!midnight.wheel_before(noon));
        assert!(!noon.wheel_before(midnight));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ClockTime::from_hms(6, 5, 4).to_string(), "06:05:04");
        assert_eq!(ClockTime::from_hms(0, 0, 0).to_string(), "00:00:00");
    }

    #[test]
    fn test_ranges_intersect_open() {
        let t = |m| ClockTime::from_hms(0, m, 0);
        // [05:00, 15:00] vs [10:00, 20:00): overlap
        assert!(ranges_intersect_open(t(5), 600, t(10), 600));
        // Touching endpoints do not intersect
        assert!(!ranges_intersect_open(t(20), 600, t(10), 600));
        assert!(!ranges_intersect_open(t(0), 600, t(10), 600));
        // Second range wraps around past the first range's start
        let late = ClockTime::from_hms(23, 55, 0);
        assert!(ranges_intersect_open(t(2), 300, late, 600));
        // Empty ranges never intersect
        assert!(!ranges_intersect_open(t(5), 0, t(5), 600));
    }
}
