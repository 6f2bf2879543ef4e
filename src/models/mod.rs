//! Railway scheduling domain models.
//!
//! Core data types for constructing one train's running path against a
//! populated diagram: wall-clock times on the 24-hour wheel, station
//! events, railway topology, running-time rulers, maintenance windows,
//! gap rules, and the train timetable itself.
//!
//! | Type | Role |
//! |------|------|
//! | [`ClockTime`] | Time of day with wraparound arithmetic |
//! | [`StationEvent`] | A timed arrival / departure / pass |
//! | [`Railway`] / [`RailInterval`] | Station chain and its directed edges |
//! | [`Ruler`] / [`RulerNode`] | Running-time profile per interval |
//! | [`Forbid`] / [`ForbidNode`] | Maintenance windows closing intervals |
//! | [`GapConstraints`] | Minimum separations between event kinds |
//! | [`Train`] / [`TrainVisit`] | The timetable being built |

pub mod time;

mod event;
mod forbid;
mod gap;
mod railway;
mod ruler;
mod train;

pub use event::{EventKind, EventSide, StationEvent};
pub use forbid::{Forbid, ForbidNode};
pub use gap::{GapConstraints, GapKind};
pub use railway::{Direction, RailInterval, Railway, Station, StationId};
pub use ruler::{Ruler, RulerNode};
pub use time::ClockTime;
pub use train::{Train, TrainId, TrainVisit};
