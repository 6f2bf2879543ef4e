//! Conflict-query structures derived from committed trains.
//!
//! A [`RailAxis`] is a read-only snapshot built per paint: every
//! committed visit contributes timed events to its station's axis, and
//! every committed hop contributes an occupation record to its
//! interval. The path search asks two questions of it:
//!
//! - [`RailAxis::conflict_event`] — does a candidate station event sit
//!   closer to a committed event than the gap rules allow?
//! - [`RailAxis::interval_conflicted`] — would a candidate run through
//!   an interval cross (same direction) or meet (opposite direction,
//!   single line) a committed run?
//!
//! Conflicting events are reported by value with the owning train's
//! handle, so reports stay usable after the borrow of the axis ends.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{
    ClockTime, Direction, EventKind, GapConstraints, GapKind, RailInterval, StationEvent,
    StationId, TrainId,
};

/// A committed event together with the train that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedEvent {
    /// Owning train.
    pub train: TrainId,
    /// The event itself.
    pub event: StationEvent,
}

/// One committed run through an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalOccupation {
    /// Occupying train.
    pub train: TrainId,
    /// Its travel direction.
    pub dir: Direction,
    /// Time it enters the interval (leaves the origin station).
    pub enter: ClockTime,
    /// Time it exits the interval (reaches the far station).
    pub exit: ClockTime,
    /// Kind of the entry event (depart or settled pass).
    pub enter_kind: EventKind,
    /// Kind of the exit event (arrive or settled pass).
    pub exit_kind: EventKind,
}

impl IntervalOccupation {
    /// Occupation length in seconds.
    #[inline]
    pub fn duration_secs(&self) -> i64 {
        self.enter.seconds_to(self.exit)
    }
}

/// Classification of an interval conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// The candidate run is clear.
    NoConflict,
    /// The conflicting occupation enters first; the candidate's arrival
    /// is pinned to the reported event's time.
    LeftConflict,
    /// The conflicting occupation bounds the candidate from the right;
    /// the candidate's departure is pinned to the reported event's time.
    RightConflict,
    /// Same track, identical timing, no usable boundary; resolved by a
    /// minimal nudge.
    InlineConflict,
}

/// Result of an interval conflict query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Conflict classification.
    pub kind: ConflictKind,
    /// The committed event bounding the resolution, when one exists.
    pub event: Option<CommittedEvent>,
}

impl ConflictReport {
    /// A clear report.
    pub fn none() -> Self {
        Self {
            kind: ConflictKind::NoConflict,
            event: None,
        }
    }

    /// Whether the report carries a conflict.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        self.kind != ConflictKind::NoConflict
    }
}

/// Committed events at one station, in build order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationAxis {
    events: Vec<CommittedEvent>,
}

impl StationAxis {
    /// Adds a committed event.
    pub fn push(&mut self, event: CommittedEvent) {
        self.events.push(event);
    }

    /// Committed events in build order.
    pub fn events(&self) -> &[CommittedEvent] {
        &self.events
    }

    /// Nearest committed event violating the gap rules against `candidate`.
    ///
    /// On a double line only events running the candidate's direction
    /// constrain it (opposing traffic uses the other track); on a single
    /// line every event does. Distance ties keep the earliest-committed
    /// event, which keeps repeated queries deterministic.
    pub fn conflict_event(
        &self,
        candidate: &StationEvent,
        constraints: &GapConstraints,
    ) -> Option<CommittedEvent> {
        let mut nearest: Option<(i64, CommittedEvent)> = None;
        for committed in &self.events {
            if !constraints.is_single_line() && committed.event.dir != candidate.dir {
                continue;
            }
            let forward = candidate.time.seconds_to(committed.event.time);
            let backward = committed.event.time.seconds_to(candidate.time);
            let required = if candidate.time.wheel_before(committed.event.time) {
                forward < constraints.at(GapKind::between(candidate.kind, committed.event.kind))
            } else {
                backward < constraints.at(GapKind::between(committed.event.kind, candidate.kind))
            };
            if required {
                let distance = forward.min(backward);
                if nearest.map_or(true, |(best, _)| distance < best) {
                    nearest = Some((distance, *committed));
                }
            }
        }
        nearest.map(|(_, committed)| committed)
    }
}

/// The full conflict-query snapshot for one railway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RailAxis {
    stations: HashMap<StationId, StationAxis>,
    intervals: HashMap<(StationId, Direction), Vec<IntervalOccupation>>,
}

impl RailAxis {
    /// Creates an empty axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a committed event at a station.
    pub fn push_event(&mut self, station: StationId, event: CommittedEvent) {
        self.stations.entry(station).or_default().push(event);
    }

    /// Adds a committed occupation of the interval leaving `from` in `dir`.
    pub fn push_occupation(
        &mut self,
        from: StationId,
        dir: Direction,
        occupation: IntervalOccupation,
    ) {
        self.intervals.entry((from, dir)).or_default().push(occupation);
    }

    /// The axis of one station, if any events are committed there.
    pub fn station(&self, station: StationId) -> Option<&StationAxis> {
        self.stations.get(&station)
    }

    /// Nearest gap-violating committed event at a station, if any.
    pub fn conflict_event(
        &self,
        station: StationId,
        candidate: &StationEvent,
        constraints: &GapConstraints,
    ) -> Option<CommittedEvent> {
        self.stations
            .get(&station)?
            .conflict_event(candidate, constraints)
    }

    /// Tests a candidate run `[start, start + duration_secs]` through an
    /// interval against committed occupations.
    ///
    /// Same-direction runs conflict when their diagram lines would cross
    /// (the orders at entry and exit differ, strictly on both ends) or
    /// coincide exactly; opposite-direction runs conflict on a single
    /// line whenever the spans overlap, open-interval on the wheel.
    pub fn interval_conflicted(
        &self,
        interval: RailInterval,
        start: ClockTime,
        duration_secs: i64,
        single_line: bool,
    ) -> ConflictReport {
        let end = start.add_secs(duration_secs);

        if let Some(occupations) = self.intervals.get(&(interval.from, interval.dir)) {
            for occ in occupations {
                if start == occ.enter && end == occ.exit {
                    return ConflictReport {
                        kind: ConflictKind::InlineConflict,
                        event: Some(occ.entry_event()),
                    };
                }
                if occ.enter.wheel_before(start) && end.wheel_before(occ.exit) {
                    // The committed run leads; it would be overtaken mid-interval.
                    return ConflictReport {
                        kind: ConflictKind::LeftConflict,
                        event: Some(occ.exit_event()),
                    };
                }
                if start.wheel_before(occ.enter) && occ.exit.wheel_before(end) {
                    // The committed run would catch up and pass mid-interval.
                    return ConflictReport {
                        kind: ConflictKind::RightConflict,
                        event: Some(occ.entry_event()),
                    };
                }
            }
        }

        if single_line {
            if let Some(occupations) = self.intervals.get(&(interval.to, interval.dir.opposite())) {
                for occ in occupations {
                    let overlaps = crate::models::time::ranges_intersect_open(
                        start,
                        duration_secs,
                        occ.enter,
                        occ.duration_secs(),
                    );
                    if overlaps {
                        // Opposing traffic: wait until it clears the interval.
                        return ConflictReport {
                            kind: ConflictKind::RightConflict,
                            event: Some(occ.exit_event()),
                        };
                    }
                }
            }
        }

        ConflictReport::none()
    }
}

impl IntervalOccupation {
    /// The committed event at this occupation's entry point.
    fn entry_event(&self) -> CommittedEvent {
        CommittedEvent {
            train: self.train,
            event: StationEvent::new(self.enter, self.enter_kind, self.dir.latter_side(), self.dir),
        }
    }

    /// The committed event at this occupation's exit point.
    fn exit_event(&self) -> CommittedEvent {
        CommittedEvent {
            train: self.train,
            event: StationEvent::new(self.exit, self.exit_kind, self.dir.former_side(), self.dir),
        }
    }
}
