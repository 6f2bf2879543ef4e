//! Scheduled station events.
//!
//! An event is one timed touch of a station: an arrival, a departure,
//! or a settled pass-through. Events are both the candidates the path
//! search tests and the committed facts other trains have already
//! placed on the diagram.

use serde::{Deserialize, Serialize};

use super::railway::Direction;
use super::time::ClockTime;

/// What a station event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Arrival at a station (the train stops).
    Arrive,
    /// Departure from a station (after a stop).
    Depart,
    /// Passing through without stopping.
    SettledPass,
}

impl EventKind {
    /// All kinds, for building total gap tables.
    pub const ALL: [EventKind; 3] = [EventKind::Arrive, EventKind::Depart, EventKind::SettledPass];

    /// Kind of the event that leaves a station: a [`Depart`](EventKind::Depart)
    /// when the train stood there, a [`SettledPass`](EventKind::SettledPass)
    /// when it runs through.
    #[inline]
    pub fn leaving(stop: bool) -> EventKind {
        if stop {
            EventKind::Depart
        } else {
            EventKind::SettledPass
        }
    }
}

/// Which end of a station an event touches, in mileage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSide {
    /// The lower-mileage end.
    Pre,
    /// The higher-mileage end.
    Post,
}

/// A timed event at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationEvent {
    /// Wall-clock time of the event.
    pub time: ClockTime,
    /// Event kind.
    pub kind: EventKind,
    /// Station end the event touches.
    pub side: EventSide,
    /// Travel direction of the train producing the event.
    pub dir: Direction,
}

impl StationEvent {
    /// Creates an event.
    pub fn new(time: ClockTime, kind: EventKind, side: EventSide, dir: Direction) -> Self {
        Self {
            time,
            kind,
            side,
            dir,
        }
    }
}
