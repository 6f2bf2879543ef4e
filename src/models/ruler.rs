//! Running-time rulers.
//!
//! A ruler is a named running-time profile: for each directed interval
//! it records the pure transit seconds plus the extra seconds incurred
//! by a standing start and by braking to a stop at the far end.
//!
//! A missing node means the ruler has no data for that interval. The
//! path search treats this as a normal place to stop generating — not
//! an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::railway::{Direction, RailInterval, StationId};

/// Per-interval timing components of a ruler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulerNode {
    /// Extra seconds when departing from a standing start.
    pub start_secs: i64,
    /// Pure transit seconds through the interval.
    pub run_secs: i64,
    /// Extra seconds when braking to a stop at the far end.
    pub stop_secs: i64,
}

impl RulerNode {
    /// Creates a node from its three components.
    pub fn new(start_secs: i64, run_secs: i64, stop_secs: i64) -> Self {
        Self {
            start_secs,
            run_secs,
            stop_secs,
        }
    }
}

/// A named running-time profile over a railway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruler {
    /// Profile name.
    pub name: String,
    nodes: HashMap<(StationId, Direction), RulerNode>,
}

impl Ruler {
    /// Creates an empty ruler.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: HashMap::new(),
        }
    }

    /// Sets the node of the interval leaving `from` in `dir`.
    pub fn with_node(mut self, from: StationId, dir: Direction, node: RulerNode) -> Self {
        self.nodes.insert((from, dir), node);
        self
    }

    /// Timing data for an interval; `None` when the ruler has no data there.
    pub fn node(&self, interval: RailInterval) -> Option<&RulerNode> {
        self.nodes.get(&(interval.from, interval.dir))
    }
}
