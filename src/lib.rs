//! Computational core of a railway-diagram drafting tool.
//!
//! Given a railway, a running-time ruler, gap rules, maintenance
//! windows, and the trains already committed to the diagram, the
//! [`GreedyPainter`](painter::GreedyPainter) constructs a feasible
//! running path for one more train: a timetable whose station times
//! violate no minimum-separation rule, cross no committed run, and
//! avoid every closed window. Alongside the timetable it produces an
//! ordered diagnostic log explaining each decision the search made.
//!
//! The search is greedy and locally backtracking, not an optimizer:
//! it pushes times forward past conflicts in a fixed priority order
//! and retries at most the immediately preceding station when a hop
//! cannot be placed. A 24-hour delay cap plus a bounded backoff budget
//! guarantee termination even on infeasible configurations.
//!
//! # Modules
//!
//! - **`models`**: domain types — [`ClockTime`](models::ClockTime),
//!   [`Railway`](models::Railway), [`Ruler`](models::Ruler),
//!   [`Forbid`](models::Forbid), [`GapConstraints`](models::GapConstraints),
//!   [`Train`](models::Train)
//! - **`diagram`**: committed trains and the derived conflict queries
//! - **`painter`**: the greedy search and its diagnostic log
//! - **`validation`**: input integrity checks before painting
//!
//! # Example
//!
//! ```
//! use raildraft::diagram::Diagram;
//! use raildraft::models::{
//!     ClockTime, Direction, GapConstraints, Railway, Ruler, RulerNode, StationId,
//! };
//! use raildraft::painter::{GreedyPainter, PaintRequest};
//!
//! let railway = Railway::new("demo").with_station("A").with_station("B");
//! let diagram = Diagram::new(railway);
//! let ruler = Ruler::new("standard").with_node(
//!     StationId(0),
//!     Direction::Down,
//!     RulerNode::new(0, 600, 0),
//! );
//!
//! let request = PaintRequest::new(
//!     "G1",
//!     &ruler,
//!     GapConstraints::uniform(false, 120),
//!     StationId(0),
//!     ClockTime::from_hms(8, 0, 0),
//!     Direction::Down,
//!     StationId(1),
//! );
//! let outcome = GreedyPainter::new(&diagram).paint(&request);
//! assert!(outcome.is_success());
//! assert_eq!(outcome.train.visits()[1].arrive, ClockTime::from_hms(8, 10, 0));
//! ```

pub mod diagram;
pub mod models;
pub mod painter;
pub mod validation;
