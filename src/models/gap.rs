//! Minimum-separation ("gap") rules between station events.
//!
//! The required separation between two events at a station depends on
//! the ordered pair of their kinds — an arrival following a departure
//! needs a different margin than two departures — and on whether the
//! line is single- or double-track.
//!
//! The table must be total over every ordered kind pair the search can
//! construct. [`GapConstraints::uniform`] builds a total table and
//! [`GapConstraints::with_gap`] overrides individual entries, so
//! totality holds by construction; a hole can only be introduced by
//! deserializing a hand-edited table, which
//! [`validate_inputs`](crate::validation::validate_inputs) reports
//! before painting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::event::EventKind;

/// An ordered pair of event kinds: the earlier event on the wheel, then
/// the later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GapKind {
    /// Kind of the earlier event.
    pub earlier: EventKind,
    /// Kind of the later event.
    pub later: EventKind,
}

impl GapKind {
    /// Creates an ordered pair.
    pub fn between(earlier: EventKind, later: EventKind) -> Self {
        Self { earlier, later }
    }
}

/// The minimum-separation table, in seconds, plus the track mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapConstraints {
    single_line: bool,
    table: HashMap<GapKind, i64>,
}

impl GapConstraints {
    /// Creates a total table with the same separation for every kind pair.
    pub fn uniform(single_line: bool, secs: i64) -> Self {
        let mut table = HashMap::new();
        for earlier in EventKind::ALL {
            for later in EventKind::ALL {
                table.insert(GapKind::between(earlier, later), secs);
            }
        }
        Self { single_line, table }
    }

    /// Overrides the separation for one ordered kind pair.
    pub fn with_gap(mut self, kind: GapKind, secs: i64) -> Self {
        self.table.insert(kind, secs);
        self
    }

    /// Whether the line runs both directions on one track.
    #[inline]
    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Minimum separation for an ordered kind pair.
    ///
    /// # Panics
    /// If the table has no entry for `kind`. A missing entry is a caller
    /// configuration error, not a runtime case — run
    /// [`validate_inputs`](crate::validation::validate_inputs) on
    /// externally sourced tables.
    pub fn at(&self, kind: GapKind) -> i64 {
        *self
            .table
            .get(&kind)
            .unwrap_or_else(|| panic!("gap constraint table has no entry for {kind:?}"))
    }

    /// Separation for a kind pair, if present.
    pub fn get(&self, kind: GapKind) -> Option<i64> {
        self.table.get(&kind).copied()
    }

    /// Whether every ordered kind pair has an entry.
    pub fn is_total(&self) -> bool {
        EventKind::ALL.iter().all(|&earlier| {
            EventKind::ALL
                .iter()
                .all(|&later| self.table.contains_key(&GapKind::between(earlier, later)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_is_total() {
        let c = GapConstraints::uniform(false, 120);
        assert!(c.is_total());
        assert!(!c.is_single_line());
        assert_eq!(
            c.at(GapKind::between(EventKind::Arrive, EventKind::SettledPass)),
            120
        );
    }

    #[test]
    fn test_override_single_pair() {
        let c = GapConstraints::uniform(true, 120)
            .with_gap(GapKind::between(EventKind::Depart, EventKind::Depart), 300);
        assert!(c.is_single_line());
        assert_eq!(c.at(GapKind::between(EventKind::Depart, EventKind::Depart)), 300);
        assert_eq!(c.at(GapKind::between(EventKind::Depart, EventKind::Arrive)), 120);
        assert!(c.is_total());
    }

    #[test]
    fn test_ordered_pairs_are_distinct() {
        let c = GapConstraints::uniform(false, 60)
            .with_gap(GapKind::between(EventKind::Arrive, EventKind::Depart), 90);
        assert_eq!(c.at(GapKind::between(EventKind::Arrive, EventKind::Depart)), 90);
        assert_eq!(c.at(GapKind::between(EventKind::Depart, EventKind::Arrive)), 60);
    }
}
