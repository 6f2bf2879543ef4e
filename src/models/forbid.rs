//! Maintenance windows ("forbids").
//!
//! A forbid closes intervals to traffic for a daily time range, e.g. a
//! possession for track work. Windows are half-open `[begin, end)` on
//! the 24-hour wheel; a run that merely touches a window endpoint is
//! legal, any open intersection is not.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::railway::{Direction, RailInterval, StationId};
use super::time::{ranges_intersect_open, ClockTime};

/// The closed time range of one interval under a forbid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbidNode {
    /// Window start (inclusive).
    pub begin: ClockTime,
    /// Window end (exclusive).
    pub end: ClockTime,
}

impl ForbidNode {
    /// Creates a window `[begin, end)`.
    pub fn new(begin: ClockTime, end: ClockTime) -> Self {
        Self { begin, end }
    }

    /// Window length in seconds (forward on the wheel).
    #[inline]
    pub fn window_secs(&self) -> i64 {
        self.begin.seconds_to(self.end)
    }

    /// Whether an occupation span `[start, start + len_secs]` intersects
    /// this window, open-interval on the wheel.
    pub fn intersects_span(&self, start: ClockTime, len_secs: i64) -> bool {
        ranges_intersect_open(start, len_secs, self.begin, self.window_secs())
    }
}

/// A named set of maintenance windows over a railway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forbid {
    /// Forbid name (e.g. the possession schedule it came from).
    pub name: String,
    nodes: HashMap<(StationId, Direction), ForbidNode>,
}

impl Forbid {
    /// Creates an empty forbid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: HashMap::new(),
        }
    }

    /// Sets the window on the interval leaving `from` in `dir`.
    pub fn with_node(mut self, from: StationId, dir: Direction, node: ForbidNode) -> Self {
        self.nodes.insert((from, dir), node);
        self
    }

    /// The window on an interval, if one is configured.
    pub fn node(&self, interval: RailInterval) -> Option<&ForbidNode> {
        self.nodes.get(&(interval.from, interval.dir))
    }

    /// Iterates all configured windows.
    pub fn nodes(&self) -> impl Iterator<Item = (&(StationId, Direction), &ForbidNode)> {
        self.nodes.iter()
    }
}
