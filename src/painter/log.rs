//! The diagnostic trail of a paint attempt.
//!
//! Every timing decision and conflict resolution the search makes
//! appends one [`LogEntry`]. The log is append-only and ordered by
//! emission — it is a trace of decisions, not a report sorted by
//! schedule time. Entries store station and train handles, never
//! owning references, so a log is only meaningful next to the diagram
//! it was painted against.
//!
//! [`LogEntry::render`] turns an entry into one human-readable
//! sentence. The wording is for display and debugging; tests should
//! match the structured fields instead.

use serde::{Deserialize, Serialize};

use crate::diagram::{ConflictKind, Diagram};
use crate::models::{ClockTime, EventKind, GapKind, RailInterval, StationId, TrainId};

/// Which timetable field a decision set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogField {
    /// The arrival time.
    Arrive,
    /// The departure time.
    Depart,
}

impl LogField {
    fn label(&self) -> &'static str {
        match self {
            LogField::Arrive => "arrival",
            LogField::Depart => "departure",
        }
    }
}

/// Reason tag of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogReason {
    /// A pre-settled stop's dwell was applied.
    SetStop,
    /// A time was projected from the running-time ruler.
    Predicted,
    /// The path reached the configured end of the line.
    Finished,
    /// The ruler has no data for the next interval.
    NoData,
    /// A station gap rule forced a time shift.
    GapConflict,
    /// An interval occupation forced a time shift.
    IntervalConflict,
    /// A maintenance window forced a time shift.
    ForbidConflict,
    /// A hop exceeded the 24 h delay cap and was abandoned.
    Backoff,
    /// The backoff budget ran out; the attempt was aborted.
    BadTermination,
}

/// One record in the diagnostic trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    /// The path reached the configured end of the line.
    Finished,
    /// The ruler has no data for the next interval; the path stops here.
    NoRulerData,
    /// The backoff budget ran out; the attempt was aborted.
    BadTermination,
    /// A pre-settled stop's dwell was applied to a station time.
    SetStop {
        station: StationId,
        time: ClockTime,
        field: LogField,
    },
    /// A station time was projected from the ruler.
    Predicted {
        station: StationId,
        time: ClockTime,
        field: LogField,
    },
    /// A gap rule against a committed event forced a time shift.
    GapConflict {
        /// Station whose time was moved.
        station: StationId,
        /// The time it was moved to.
        time: ClockTime,
        field: LogField,
        /// The violated ordered kind pair.
        gap: GapKind,
        /// Station where the conflicting event sits.
        conflict_station: StationId,
        /// Kind of the conflicting committed event.
        conflict_kind: EventKind,
        /// Time of the conflicting committed event.
        conflict_time: ClockTime,
        /// Train owning the conflicting event.
        conflict_train: TrainId,
    },
    /// An interval occupation forced a time shift.
    IntervalConflict {
        station: StationId,
        time: ClockTime,
        field: LogField,
        /// Conflict classification.
        kind: ConflictKind,
        /// The conflicted interval.
        interval: RailInterval,
        /// The occupying train, when the report named one.
        train: Option<TrainId>,
    },
    /// A maintenance window forced the departure past its end.
    ForbidConflict {
        station: StationId,
        time: ClockTime,
        /// The closed interval.
        interval: RailInterval,
        /// Name of the forbid.
        forbid: String,
    },
    /// A hop exceeded the 24 h delay cap and was abandoned.
    Backoff {
        station: StationId,
        time: ClockTime,
        field: LogField,
        /// Running backoff count after this abandonment.
        count: u32,
    },
}

impl LogEntry {
    /// The entry's reason tag.
    pub fn reason(&self) -> LogReason {
        match self {
            LogEntry::Finished => LogReason::Finished,
            LogEntry::NoRulerData => LogReason::NoData,
            LogEntry::BadTermination => LogReason::BadTermination,
            LogEntry::SetStop { .. } => LogReason::SetStop,
            LogEntry::Predicted { .. } => LogReason::Predicted,
            LogEntry::GapConflict { .. } => LogReason::GapConflict,
            LogEntry::IntervalConflict { .. } => LogReason::IntervalConflict,
            LogEntry::ForbidConflict { .. } => LogReason::ForbidConflict,
            LogEntry::Backoff { .. } => LogReason::Backoff,
        }
    }

    /// Renders the entry as one sentence, resolving handles against the
    /// diagram the attempt was painted on.
    pub fn render(&self, diagram: &Diagram) -> String {
        let station_name = |id: &StationId| diagram.railway.station_name(*id).to_string();
        let interval_name = |i: &RailInterval| {
            format!(
                "{}->{}",
                diagram.railway.station_name(i.from),
                diagram.railway.station_name(i.to)
            )
        };
        match self {
            LogEntry::Finished => "[finished] path construction complete".to_string(),
            LogEntry::NoRulerData => "[no ruler data] path construction ends here".to_string(),
            LogEntry::BadTermination => {
                "[backoff limit reached] path construction aborted".to_string()
            }
            LogEntry::SetStop {
                station,
                time,
                field,
            } => format!(
                "[settled stop] set {} {} time to {}",
                station_name(station),
                field.label(),
                time
            ),
            LogEntry::Predicted {
                station,
                time,
                field,
            } => format!(
                "[projected] set {} {} time to {}",
                station_name(station),
                field.label(),
                time
            ),
            LogEntry::GapConflict {
                station,
                time,
                field,
                gap,
                conflict_station,
                conflict_train,
                ..
            } => format!(
                "[{} gap conflict {:?}/{:?}] set {} {} time to {} (train {})",
                station_name(conflict_station),
                gap.earlier,
                gap.later,
                station_name(station),
                field.label(),
                time,
                diagram.train_name(*conflict_train)
            ),
            LogEntry::IntervalConflict {
                station,
                time,
                field,
                kind,
                interval,
                train,
            } => {
                let mut s = format!(
                    "[{} interval conflict {:?}] set {} {} time to {}",
                    interval_name(interval),
                    kind,
                    station_name(station),
                    field.label(),
                    time
                );
                if let Some(id) = train {
                    s.push_str(&format!(" (train {})", diagram.train_name(*id)));
                }
                s
            }
            LogEntry::ForbidConflict {
                station,
                time,
                interval,
                forbid,
            } => format!(
                "[{} forbid {} conflict] set {} departure time to {}",
                interval_name(interval),
                forbid,
                station_name(station),
                time
            ),
            LogEntry::Backoff {
                station,
                time,
                field,
                count,
            } => format!(
                "[no feasible slot] abandoned {} {} at {}, backoff count {}",
                station_name(station),
                field.label(),
                time,
                count
            ),
        }
    }
}
