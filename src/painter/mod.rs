//! The greedy path painter and its diagnostic log.
//!
//! [`GreedyPainter::paint`] constructs one train's running path against
//! a populated [`Diagram`](crate::diagram::Diagram), appending a
//! [`LogEntry`] for every decision and conflict resolution it makes.

mod greedy;
mod log;

pub use greedy::{GreedyPainter, PaintOutcome, PaintRequest, PaintStatus};
pub use log::{LogEntry, LogField, LogReason};
