//! The diagram: a railway plus the trains already drawn on it.
//!
//! The diagram owns the committed timetables and derives the
//! conflict-query snapshot ([`RailAxis`]) the path search runs against.
//! A train's events are only published here once its whole path
//! succeeded — the search never mutates the diagram mid-attempt, so a
//! failed paint leaves the diagram untouched.

mod axis;

pub use axis::{
    CommittedEvent, ConflictKind, ConflictReport, IntervalOccupation, RailAxis, StationAxis,
};

use serde::{Deserialize, Serialize};

use crate::models::{Direction, EventKind, Railway, StationEvent, Train, TrainId};

/// A committed train and the direction it runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittedTrain {
    /// The timetable.
    pub train: Train,
    /// Travel direction along the railway.
    pub dir: Direction,
}

/// A railway with its committed trains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagram {
    /// The railway the trains run on.
    pub railway: Railway,
    trains: Vec<CommittedTrain>,
}

impl Diagram {
    /// Creates a diagram with no trains.
    pub fn new(railway: Railway) -> Self {
        Self {
            railway,
            trains: Vec::new(),
        }
    }

    /// Publishes a finished train onto the diagram.
    pub fn commit(&mut self, train: Train, dir: Direction) -> TrainId {
        self.trains.push(CommittedTrain { train, dir });
        TrainId(self.trains.len() - 1)
    }

    /// A committed train by handle.
    pub fn train(&self, id: TrainId) -> Option<&CommittedTrain> {
        self.trains.get(id.0)
    }

    /// A committed train's name, or a placeholder for foreign handles.
    pub fn train_name(&self, id: TrainId) -> &str {
        self.trains
            .get(id.0)
            .map(|c| c.train.name.as_str())
            .unwrap_or("?")
    }

    /// All committed trains in commit order.
    pub fn trains(&self) -> impl Iterator<Item = (TrainId, &CommittedTrain)> {
        self.trains
            .iter()
            .enumerate()
            .map(|(idx, c)| (TrainId(idx), c))
    }

    /// Number of committed trains.
    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    /// Derives the conflict-query snapshot from the committed trains.
    ///
    /// Every stopping visit contributes an arrival and a departure event
    /// (origin and termination visits only the half that exists); every
    /// passing visit contributes a single settled-pass event. Every hop
    /// between consecutive visits contributes an interval occupation.
    pub fn build_axis(&self) -> RailAxis {
        let mut axis = RailAxis::new();
        for (id, committed) in self.trains() {
            let dir = committed.dir;
            let visits = committed.train.visits();
            for (idx, visit) in visits.iter().enumerate() {
                let starts_here = idx == 0 && committed.train.starting == Some(visit.station);
                let ends_here =
                    idx + 1 == visits.len() && committed.train.terminal == Some(visit.station);
                if visit.is_stop() {
                    if !starts_here {
                        axis.push_event(
                            visit.station,
                            CommittedEvent {
                                train: id,
                                event: StationEvent::new(
                                    visit.arrive,
                                    EventKind::Arrive,
                                    dir.former_side(),
                                    dir,
                                ),
                            },
                        );
                    }
                    if !ends_here {
                        axis.push_event(
                            visit.station,
                            CommittedEvent {
                                train: id,
                                event: StationEvent::new(
                                    visit.depart,
                                    EventKind::Depart,
                                    dir.latter_side(),
                                    dir,
                                ),
                            },
                        );
                    }
                } else {
                    axis.push_event(
                        visit.station,
                        CommittedEvent {
                            train: id,
                            event: StationEvent::new(
                                visit.depart,
                                EventKind::SettledPass,
                                dir.latter_side(),
                                dir,
                            ),
                        },
                    );
                }
            }
            for hop in visits.windows(2) {
                let (from, to) = (&hop[0], &hop[1]);
                axis.push_occupation(
                    from.station,
                    dir,
                    IntervalOccupation {
                        train: id,
                        dir,
                        enter: from.depart,
                        exit: to.arrive,
                        enter_kind: EventKind::leaving(from.is_stop()),
                        exit_kind: if to.is_stop() {
                            EventKind::Arrive
                        } else {
                            EventKind::SettledPass
                        },
                    },
                );
            }
        }
        axis
    }
}
