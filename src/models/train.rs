//! The train timetable under construction.
//!
//! A train is an ordered sequence of station visits. During a paint the
//! timetable doubles as the search's backtracking stack: the painter
//! appends a visit on each tentative advance and pops it again when the
//! hop fails, so mutation is tail-only by design.

use serde::{Deserialize, Serialize};

use super::railway::StationId;
use super::time::ClockTime;

/// Stable handle of a committed train in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(pub usize);

/// One timed visit of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainVisit {
    /// Visited station.
    pub station: StationId,
    /// Arrival time.
    pub arrive: ClockTime,
    /// Departure time.
    pub depart: ClockTime,
    /// Whether the stop is operationally real (scheduled stop, origin,
    /// or termination) rather than a technical pass or conflict dodge.
    pub business: bool,
}

impl TrainVisit {
    /// Creates a visit.
    pub fn new(station: StationId, arrive: ClockTime, depart: ClockTime, business: bool) -> Self {
        Self {
            station,
            arrive,
            depart,
            business,
        }
    }

    /// Whether the train stands still here (dwell, or a flagged stop).
    #[inline]
    pub fn is_stop(&self) -> bool {
        self.arrive != self.depart || self.business
    }
}

/// A train and its ordered timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    /// Train name (reporting number).
    pub name: String,
    visits: Vec<TrainVisit>,
    /// Station where this train originates, if marked.
    pub starting: Option<StationId>,
    /// Station where this train terminates, if marked.
    pub terminal: Option<StationId>,
}

impl Train {
    /// Creates a train with an empty timetable.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visits: Vec::new(),
            starting: None,
            terminal: None,
        }
    }

    /// The timetable in visiting order.
    pub fn visits(&self) -> &[TrainVisit] {
        &self.visits
    }

    /// Number of visits.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Whether the timetable is empty.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Appends a visit at the tail.
    pub fn push_visit(&mut self, visit: TrainVisit) {
        self.visits.push(visit);
    }

    /// Removes and returns the tail visit.
    pub fn pop_visit(&mut self) -> Option<TrainVisit> {
        self.visits.pop()
    }

    /// Mutable tail visit, if any.
    pub fn last_visit_mut(&mut self) -> Option<&mut TrainVisit> {
        self.visits.last_mut()
    }

    /// Mutable head visit, if any.
    pub fn first_visit_mut(&mut self) -> Option<&mut TrainVisit> {
        self.visits.first_mut()
    }

    /// The visit at a station, if the train calls there.
    pub fn visit_at(&self, station: StationId) -> Option<&TrainVisit> {
        self.visits.iter().find(|v| v.station == station)
    }

    /// Marks the train as originating at `station`.
    pub fn set_starting(&mut self, station: StationId) {
        self.starting = Some(station);
    }

    /// Marks the train as terminating at `station`.
    pub fn set_terminal(&mut self, station: StationId) {
        self.terminal = Some(station);
    }
}
