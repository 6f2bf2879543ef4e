//! Railway topology: stations, travel direction, and intervals.
//!
//! A railway is an ordered chain of stations. Stations live in an arena
//! owned by the [`Railway`] and are addressed everywhere else by
//! [`StationId`] — diagnostic log entries and conflict reports store
//! ids, never owning references, and stay valid as long as the railway
//! does.
//!
//! An [`RailInterval`] is a directed edge between two adjacent stations.
//! [`Direction::Down`] walks the station chain forward (increasing
//! mileage), [`Direction::Up`] walks it backward.

use serde::{Deserialize, Serialize};

use super::event::EventSide;

/// Stable handle of a station in a [`Railway`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub usize);

/// Travel direction along the station chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing mileage (forward through the station vector).
    Down,
    /// Decreasing mileage.
    Up,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }

    /// Side of a station a train in this direction departs from.
    #[inline]
    pub fn latter_side(&self) -> EventSide {
        match self {
            Direction::Down => EventSide::Post,
            Direction::Up => EventSide::Pre,
        }
    }

    /// Side of a station a train in this direction arrives at.
    #[inline]
    pub fn former_side(&self) -> EventSide {
        self.opposite().latter_side()
    }
}

/// A station on the railway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Display name.
    pub name: String,
}

/// A directed edge between two adjacent stations.
///
/// Cheap `Copy` handle; resolved against the owning [`Railway`].
/// `(from, dir)` identifies the interval for ruler and forbid lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RailInterval {
    /// Origin station.
    pub from: StationId,
    /// Destination station (adjacent to `from` in `dir`).
    pub to: StationId,
    /// Travel direction.
    pub dir: Direction,
}

/// An ordered chain of stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Railway {
    /// Railway name.
    pub name: String,
    stations: Vec<Station>,
}

impl Railway {
    /// Creates an empty railway.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stations: Vec::new(),
        }
    }

    /// Appends a station to the end of the chain.
    pub fn with_station(mut self, name: impl Into<String>) -> Self {
        self.stations.push(Station { name: name.into() });
        self
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Whether `id` addresses a station on this railway.
    pub fn contains(&self, id: StationId) -> bool {
        id.0 < self.stations.len()
    }

    /// The station behind a handle.
    ///
    /// # Panics
    /// If `id` is not from this railway.
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    /// The display name behind a handle, or a placeholder for foreign ids.
    pub fn station_name(&self, id: StationId) -> &str {
        self.stations
            .get(id.0)
            .map(|s| s.name.as_str())
            .unwrap_or("?")
    }

    /// Looks a station up by name.
    pub fn station_by_name(&self, name: &str) -> Option<StationId> {
        self.stations
            .iter()
            .position(|s| s.name == name)
            .map(StationId)
    }

    /// The outgoing interval of a station in a direction, if any.
    ///
    /// Returns `None` at the end of the chain.
    pub fn dir_next_interval(&self, from: StationId, dir: Direction) -> Option<RailInterval> {
        let to = match dir {
            Direction::Down => from.0.checked_add(1).filter(|&i| i < self.stations.len()),
            Direction::Up => from.0.checked_sub(1),
        }?;
        Some(RailInterval {
            from,
            to: StationId(to),
            dir,
        })
    }

    /// The interval following `interval` in its direction, if any.
    pub fn next_interval(&self, interval: RailInterval) -> Option<RailInterval> {
        self.dir_next_interval(interval.to, interval.dir)
    }

    /// Whether `later` comes at or after `earlier` when traveling in `dir`.
    pub fn is_ordered(&self, earlier: StationId, later: StationId, dir: Direction) -> bool {
        match dir {
            Direction::Down => earlier.0 <= later.0,
            Direction::Up => earlier.0 >= later.0,
        }
    }
}
