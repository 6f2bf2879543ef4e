//! Greedy construction of one train's running path.
//!
//! The painter walks the line interval by interval from an anchor
//! station, projecting times with the ruler and resolving conflicts
//! against the committed diagram in a fixed priority order: settled
//! dwell, the 24-hour delay cap, station gap rules, maintenance
//! windows, interval occupations, and finally the pass-or-stop decision
//! at the far station. A hop that cannot be resolved locally fails back
//! to the previous hop, which retries with a forced stop — backtracking
//! is bounded to that single step, and the delay cap plus the backoff
//! budget bound the whole search.
//!
//! The search is greedy and local: it produces a feasible path, not an
//! optimal one, and paints exactly one train per call against a
//! read-only snapshot of everything already on the diagram.

use log::debug;
use std::collections::HashMap;

use super::log::{LogEntry, LogField};
use crate::diagram::{ConflictKind, Diagram, RailAxis};
use crate::models::time::SECS_PER_DAY;
use crate::models::{
    ClockTime, Direction, EventKind, Forbid, GapConstraints, GapKind, RailInterval, Ruler,
    StationEvent, StationId, Train, TrainVisit,
};

/// How a paint attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStatus {
    /// The path reached the configured end of the line.
    Finished,
    /// The ruler ran out of data; the path stops where the data stops.
    NoData,
    /// The backoff budget was exceeded and the attempt aborted.
    Exhausted,
    /// The first hop could not be placed within the delay cap.
    Infeasible,
}

/// The painted train, the diagnostic trail, and the terminal status.
#[derive(Debug, Clone)]
pub struct PaintOutcome {
    /// The constructed timetable. Only meaningful on success; a failed
    /// attempt leaves whatever partial state the search abandoned.
    pub train: Train,
    /// The ordered diagnostic trail of the attempt.
    pub log: Vec<LogEntry>,
    /// Terminal status.
    pub status: PaintStatus,
}

impl PaintOutcome {
    /// Whether a usable path was produced.
    pub fn is_success(&self) -> bool {
        matches!(self.status, PaintStatus::Finished | PaintStatus::NoData)
    }
}

/// Configuration of one paint attempt.
///
/// Borrows the ruler and forbids it is painted with; the diagram is
/// supplied to [`GreedyPainter`] separately.
#[derive(Debug, Clone)]
pub struct PaintRequest<'a> {
    /// Name of the train to construct.
    pub train_name: String,
    /// Running-time profile.
    pub ruler: &'a Ruler,
    /// Gap rules and track mode.
    pub constraints: GapConstraints,
    /// Travel direction.
    pub dir: Direction,
    /// Station the search starts from (may be mid-line).
    pub anchor: StationId,
    /// Wall-clock time at the anchor.
    pub anchor_time: ClockTime,
    /// Whether `anchor_time` is the arrival there (dwell extends
    /// forward) or the departure (dwell extends backward).
    pub anchor_time_is_arrival: bool,
    /// First station of the painted range (defaults to the anchor).
    pub start: StationId,
    /// Station the path is drawn toward; the search stops on reaching it.
    pub end: StationId,
    /// Active maintenance windows.
    pub forbids: Vec<&'a Forbid>,
    /// Required dwell seconds per pre-settled stop.
    pub settled_stops: HashMap<StationId, i64>,
    /// Whether the train originates at `start`.
    pub local_starting: bool,
    /// Whether the train terminates at `end`.
    pub local_terminal: bool,
    /// Backoff budget: abandoning more hops than this aborts the attempt.
    pub max_backoff: u32,
}

impl<'a> PaintRequest<'a> {
    /// Creates a request with the required parameters; everything else
    /// takes its default.
    pub fn new(
        train_name: impl Into<String>,
        ruler: &'a Ruler,
        constraints: GapConstraints,
        anchor: StationId,
        anchor_time: ClockTime,
        dir: Direction,
        end: StationId,
    ) -> Self {
        Self {
            train_name: train_name.into(),
            ruler,
            constraints,
            dir,
            anchor,
            anchor_time,
            anchor_time_is_arrival: true,
            start: anchor,
            end,
            forbids: Vec::new(),
            settled_stops: HashMap::new(),
            local_starting: false,
            local_terminal: false,
            max_backoff: 20,
        }
    }

    /// Sets the first station of the painted range.
    pub fn with_start(mut self, start: StationId) -> Self {
        self.start = start;
        self
    }

    /// Treats the anchor time as a departure instead of an arrival.
    pub fn with_anchor_as_departure(mut self) -> Self {
        self.anchor_time_is_arrival = false;
        self
    }

    /// Adds an active maintenance window set.
    pub fn with_forbid(mut self, forbid: &'a Forbid) -> Self {
        self.forbids.push(forbid);
        self
    }

    /// Requires a dwell of `dwell_secs` at a station.
    pub fn with_settled_stop(mut self, station: StationId, dwell_secs: i64) -> Self {
        self.settled_stops.insert(station, dwell_secs);
        self
    }

    /// Marks the train as originating at `start`.
    pub fn with_local_starting(mut self) -> Self {
        self.local_starting = true;
        self
    }

    /// Marks the train as terminating at `end`.
    pub fn with_local_terminal(mut self) -> Self {
        self.local_terminal = true;
        self
    }

    /// Sets the backoff budget.
    pub fn with_max_backoff(mut self, max_backoff: u32) -> Self {
        self.max_backoff = max_backoff;
        self
    }
}

/// Paints trains onto a diagram.
pub struct GreedyPainter<'a> {
    diagram: &'a Diagram,
}

impl<'a> GreedyPainter<'a> {
    /// Creates a painter over a diagram.
    pub fn new(diagram: &'a Diagram) -> Self {
        Self { diagram }
    }

    /// Constructs a running path per `request`.
    ///
    /// On success every consecutive pair of visits in the returned
    /// timetable clears the gap table and interval rules and no
    /// occupied span intersects an active forbid window. On failure the
    /// timetable is whatever partial state the search abandoned and
    /// must not be reused; the log ends with the abnormal-termination
    /// record.
    pub fn paint(&self, request: &PaintRequest<'_>) -> PaintOutcome {
        let search = Search {
            diagram: self.diagram,
            req: request,
            axis: self.diagram.build_axis(),
            train: Train::new(request.train_name.clone()),
            log: Vec::new(),
            backoff_count: 0,
        };
        search.run()
    }
}

/// Successful ways a branch of the recursion can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    ReachedEnd,
    NoRulerData,
}

/// Failure signals of the recursion. `Backtrack` is consumed by the
/// immediate caller; `Exhausted` propagates eagerly all the way to
/// [`GreedyPainter::paint`], which converts it into the terminal log
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepError {
    Backtrack,
    Exhausted,
}

type StepResult = Result<Termination, StepError>;

/// Per-hop resolution phases. Every round resolves the departure first;
/// any time adjustment falls back to `TryDepart`, so the pass and stop
/// attempts always run against a fully resolved departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HopPhase {
    /// Resolve the origin departure against the delay cap, gap rules,
    /// forbid windows, and interval occupations. `for_stop` marks
    /// whether this round already aims at stopping at the far station
    /// (which lengthens the occupied span by the braking extra).
    TryDepart { for_stop: bool },
    /// Attempt to run through the far station without stopping.
    /// `int_secs` is the occupied span the departure was resolved with.
    TryPass { int_secs: i64 },
    /// Attempt to stop at the far station.
    TryStop { int_secs: i64 },
}

struct Search<'a> {
    diagram: &'a Diagram,
    req: &'a PaintRequest<'a>,
    axis: RailAxis,
    train: Train,
    log: Vec<LogEntry>,
    backoff_count: u32,
}

impl<'a> Search<'a> {
    fn run(mut self) -> PaintOutcome {
        let req = self.req;

        // Seed the anchor visit. A settled dwell at the anchor extends
        // forward from an arrival time, backward from a departure time.
        let mut arrive = req.anchor_time;
        let mut depart = req.anchor_time;
        if let Some(&dwell) = req.settled_stops.get(&req.anchor) {
            if req.anchor_time_is_arrival {
                depart = depart.add_secs(dwell);
            } else {
                arrive = arrive.add_secs(-dwell);
            }
        }
        let dwelling = arrive != depart;
        self.train
            .push_visit(TrainVisit::new(req.anchor, arrive, depart, dwelling));
        if dwelling {
            self.log.push(LogEntry::SetStop {
                station: req.anchor,
                time: depart,
                field: LogField::Depart,
            });
        }

        let first_interval = self.diagram.railway.dir_next_interval(req.anchor, req.dir);
        let wants_stop = (req.anchor == req.start && req.local_starting) || dwelling;

        let status = match self.cal_forward(first_interval, depart, wants_stop) {
            Ok(Termination::ReachedEnd) => PaintStatus::Finished,
            Ok(Termination::NoRulerData) => PaintStatus::NoData,
            Err(StepError::Exhausted) => {
                self.log.push(LogEntry::BadTermination);
                PaintStatus::Exhausted
            }
            Err(StepError::Backtrack) => {
                self.train.pop_visit();
                PaintStatus::Infeasible
            }
        };

        if matches!(status, PaintStatus::Finished | PaintStatus::NoData) && !self.train.is_empty() {
            // Collapse the endpoint visits of an originating/terminating
            // train: the outward half of the stop does not exist.
            if req.local_starting {
                self.train.set_starting(req.start);
                if let Some(first) = self.train.first_visit_mut() {
                    if first.station == req.start {
                        first.arrive = first.depart;
                        first.business = true;
                    }
                }
            }
            if req.local_terminal {
                self.train.set_terminal(req.end);
                if let Some(last) = self.train.last_visit_mut() {
                    if last.station == req.end {
                        last.depart = last.arrive;
                        last.business = true;
                    }
                }
            }
        }

        PaintOutcome {
            train: self.train,
            log: self.log,
            status,
        }
    }

    /// Resolves one hop and recurses toward the end of the line.
    ///
    /// `stop` says whether the train stands at the hop's origin (the
    /// previous hop decided that). The hop's own pass-or-stop decision
    /// at the far station is driven by a small per-hop state: each
    /// round first resolves the departure, then tries to pass, then to
    /// stop; any time adjustment restarts the round.
    fn cal_forward(
        &mut self,
        interval: Option<RailInterval>,
        from_time: ClockTime,
        stop: bool,
    ) -> StepResult {
        let interval = match interval {
            Some(i) if i.from != self.req.end => i,
            _ => {
                self.log.push(LogEntry::Finished);
                return Ok(Termination::ReachedEnd);
            }
        };
        let node = match self.req.ruler.node(interval) {
            Some(n) => *n,
            None => {
                self.log.push(LogEntry::NoRulerData);
                return Ok(Termination::NoRulerData);
            }
        };

        let req = self.req;
        let st_from = interval.from;
        let st_to = interval.to;
        let next_stop =
            req.settled_stops.contains_key(&st_to) || (st_to == req.end && req.local_terminal);

        let ev_kind = EventKind::leaving(stop);
        let mut ev_time = from_time;

        // Settled dwell at the origin is charged once, on hop entry. The
        // anchor's dwell was already charged when its visit was seeded.
        if stop && st_from != req.anchor {
            if let Some(&dwell) = req.settled_stops.get(&st_from) {
                ev_time = ev_time.add_secs(dwell);
                self.log.push(LogEntry::SetStop {
                    station: st_from,
                    time: ev_time,
                    field: LogField::Depart,
                });
                if let Some(prev) = self.train.last_visit_mut() {
                    prev.business = true;
                }
            }
        }

        let mut tot_delay = from_time.seconds_to(ev_time);
        let mut phase = HopPhase::TryDepart { for_stop: false };

        loop {
            match phase {
                HopPhase::TryDepart { for_stop } => {
                    debug!(
                        "{}->{} delay {}s",
                        self.diagram.railway.station_name(st_from),
                        self.diagram.railway.station_name(st_to),
                        tot_delay
                    );

                    if tot_delay >= SECS_PER_DAY {
                        // No slot anywhere on the wheel: abandon this hop.
                        self.backoff_count += 1;
                        self.log.push(LogEntry::Backoff {
                            station: st_from,
                            time: ev_time,
                            field: LogField::Depart,
                            count: self.backoff_count,
                        });
                        if self.backoff_count > req.max_backoff {
                            return Err(StepError::Exhausted);
                        }
                        return Err(StepError::Backtrack);
                    }

                    // Departure gap rules at the origin.
                    let candidate =
                        StationEvent::new(ev_time, ev_kind, req.dir.latter_side(), req.dir);
                    if let Some(conf) =
                        self.axis.conflict_event(st_from, &candidate, &req.constraints)
                    {
                        if !stop && st_from != req.anchor {
                            debug!(
                                "backtracking out of {}",
                                self.diagram.railway.station_name(st_from)
                            );
                            return Err(StepError::Backtrack);
                        }
                        let (gap, new_time) = if ev_time.wheel_before(conf.event.time) {
                            // The committed event is ahead: close up to it
                            // exactly; the next round settles any remaining
                            // margin.
                            (GapKind::between(ev_kind, conf.event.kind), conf.event.time)
                        } else {
                            let gap = GapKind::between(conf.event.kind, ev_kind);
                            (gap, conf.event.time.add_secs(req.constraints.at(gap)))
                        };
                        tot_delay += ev_time.seconds_to(new_time);
                        ev_time = new_time;
                        self.log.push(LogEntry::GapConflict {
                            station: st_from,
                            time: ev_time,
                            field: LogField::Depart,
                            gap,
                            conflict_station: st_from,
                            conflict_kind: conf.event.kind,
                            conflict_time: conf.event.time,
                            conflict_train: conf.train,
                        });
                        // A moved departure prefers passing again.
                        phase = HopPhase::TryDepart { for_stop: false };
                        continue;
                    }

                    // Interval timing for this round. Any accumulated delay
                    // means the train stood at the origin, so the standing
                    // start applies.
                    let mut int_secs = node.run_secs;
                    if stop || tot_delay > 0 {
                        int_secs += node.start_secs;
                    }
                    if next_stop || for_stop {
                        int_secs += node.stop_secs;
                    }

                    // Maintenance windows on this interval.
                    let forbid_hit = req.forbids.iter().find_map(|f| {
                        f.node(interval)
                            .filter(|n| n.intersects_span(ev_time, int_secs))
                            .map(|n| (f.name.clone(), n.end))
                    });
                    if let Some((name, end)) = forbid_hit {
                        tot_delay += ev_time.seconds_to(end);
                        ev_time = end;
                        self.log.push(LogEntry::ForbidConflict {
                            station: st_from,
                            time: ev_time,
                            interval,
                            forbid: name,
                        });
                        continue;
                    }

                    // Interval-running conflicts against committed occupations.
                    let report = self.axis.interval_conflicted(
                        interval,
                        ev_time,
                        int_secs,
                        req.constraints.is_single_line(),
                    );
                    if report.is_conflict() {
                        if !stop && st_from != req.anchor {
                            return Err(StepError::Backtrack);
                        }
                        let new_time = match (report.kind, report.event) {
                            (ConflictKind::LeftConflict, Some(ev)) => {
                                ev.event.time.add_secs(-int_secs)
                            }
                            (ConflictKind::RightConflict, Some(ev)) => ev.event.time,
                            // Same track, no usable boundary: minimal nudge.
                            _ => ev_time.add_secs(1),
                        };
                        tot_delay += ev_time.seconds_to(new_time);
                        ev_time = new_time;
                        self.log.push(LogEntry::IntervalConflict {
                            station: st_from,
                            time: ev_time,
                            field: LogField::Depart,
                            kind: report.kind,
                            interval,
                            train: report.event.map(|e| e.train),
                        });
                        continue;
                    }

                    // The origin departure stands for this round.
                    if let Some(last) = self.train.last_visit_mut() {
                        last.depart = ev_time;
                    }
                    phase = if !for_stop && !next_stop {
                        HopPhase::TryPass { int_secs }
                    } else {
                        HopPhase::TryStop { int_secs }
                    };
                }

                HopPhase::TryPass { int_secs } => {
                    let tm_to = ev_time.add_secs(int_secs);
                    let pass_ev = StationEvent::new(
                        tm_to,
                        EventKind::SettledPass,
                        req.dir.former_side(),
                        req.dir,
                    );
                    if self
                        .axis
                        .conflict_event(st_to, &pass_ev, &req.constraints)
                        .is_none()
                    {
                        self.log.push(LogEntry::Predicted {
                            station: st_to,
                            time: tm_to,
                            field: LogField::Arrive,
                        });
                        match self.advance(interval, st_to, tm_to, false) {
                            Ok(t) => return Ok(t),
                            Err(StepError::Exhausted) => return Err(StepError::Exhausted),
                            Err(StepError::Backtrack) => {}
                        }
                    }
                    // Passing is off the table at this time; rerun the
                    // departure aiming at a stop.
                    phase = HopPhase::TryDepart { for_stop: true };
                }

                HopPhase::TryStop { int_secs } => {
                    let tm_to = ev_time.add_secs(int_secs);
                    let arr_ev =
                        StationEvent::new(tm_to, EventKind::Arrive, req.dir.former_side(), req.dir);
                    match self.axis.conflict_event(st_to, &arr_ev, &req.constraints) {
                        None => {
                            self.log.push(LogEntry::Predicted {
                                station: st_to,
                                time: tm_to,
                                field: LogField::Arrive,
                            });
                            // A failed stop is unrecoverable at this hop: a
                            // slot that can neither be passed nor stopped at
                            // fails back to the previous hop.
                            return self.advance(interval, st_to, tm_to, true);
                        }
                        Some(conf) => {
                            if !stop && st_from != req.anchor {
                                return Err(StepError::Backtrack);
                            }
                            // Back-solve a departure that clears the
                            // arrival-side gap. The braking extra is excluded
                            // here; the stop retry re-adds it.
                            let run_base = int_secs - node.stop_secs;
                            let (gap, new_dep) = if tm_to.wheel_before(conf.event.time) {
                                (
                                    GapKind::between(EventKind::Arrive, conf.event.kind),
                                    conf.event.time.add_secs(-run_base),
                                )
                            } else {
                                let gap = GapKind::between(conf.event.kind, EventKind::Arrive);
                                let trial_arr =
                                    conf.event.time.add_secs(req.constraints.at(gap));
                                (gap, trial_arr.add_secs(-run_base))
                            };
                            tot_delay += ev_time.seconds_to(new_dep);
                            ev_time = new_dep;
                            self.log.push(LogEntry::GapConflict {
                                station: st_from,
                                time: ev_time,
                                field: LogField::Depart,
                                gap,
                                conflict_station: st_to,
                                conflict_kind: conf.event.kind,
                                conflict_time: conf.event.time,
                                conflict_train: conf.train,
                            });
                            // One stop attempt per position; afterwards the
                            // moved departure prefers passing again.
                            phase = HopPhase::TryDepart { for_stop: false };
                        }
                    }
                }
            }
        }
    }

    /// Tentatively appends the far-station visit and recurses.
    ///
    /// The push/pop pairing lives here so every failing return path
    /// removes the tentative visit again.
    fn advance(
        &mut self,
        interval: RailInterval,
        st_to: StationId,
        tm_to: ClockTime,
        stop: bool,
    ) -> StepResult {
        self.train
            .push_visit(TrainVisit::new(st_to, tm_to, tm_to, false));
        let next = self.diagram.railway.next_interval(interval);
        let result = self.cal_forward(next, tm_to, stop);
        if result.is_err() {
            self.train.pop_visit();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForbidNode, Railway, RulerNode};

    fn t(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hms(h, m, 0)
    }

    fn line(stations: usize) -> Railway {
        let mut rw = Railway::new("test line");
        for i in 0..stations {
            rw = rw.with_station(format!("S{i}"));
        }
        rw
    }

    /// A ruler with the same node on every down interval.
    fn flat_ruler(stations: usize, start: i64, run: i64, stop: i64) -> Ruler {
        let mut ruler = Ruler::new("standard");
        for i in 0..stations.saturating_sub(1) {
            ruler = ruler.with_node(
                StationId(i),
                Direction::Down,
                RulerNode::new(start, run, stop),
            );
        }
        ruler
    }

    fn visit(station: usize, arrive: ClockTime, depart: ClockTime) -> TrainVisit {
        TrainVisit::new(StationId(station), arrive, depart, false)
    }

    #[test]
    fn test_single_interval_no_conflicts() {
        // Scenario A: one interval, empty diagram, {start: 0, run: 600, stop: 0}.
        let diagram = Diagram::new(line(2));
        let ruler = flat_ruler(2, 0, 600, 0);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(1),
        );
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        assert!(outcome.is_success());
        let visits = outcome.train.visits();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].depart, t(8, 0));
        assert_eq!(visits[1].arrive, t(8, 10));
        assert_eq!(outcome.log.last(), Some(&LogEntry::Finished));
    }

    #[test]
    fn test_arrival_gap_conflict_shifts_departure() {
        // Scenario B: a committed arrival occupies the naive arrival slot;
        // the departure must shift by exactly the 120 s gap.
        let mut diagram = Diagram::new(line(2));
        let mut other = Train::new("K9406");
        other.push_visit(visit(0, t(7, 55), t(7, 58)));
        other.push_visit(visit(1, t(8, 10), t(8, 15)));
        diagram.commit(other, Direction::Down);

        let ruler = flat_ruler(2, 0, 600, 0);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(1),
        );
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        let visits = outcome.train.visits();
        // Naive arrival 8:10 collides; departure = (8:10 - 600 s) + 120 s.
        assert_eq!(visits[0].depart, t(8, 2));
        assert_eq!(visits[1].arrive, t(8, 12));
        assert!(outcome
            .log
            .iter()
            .any(|e| matches!(e, LogEntry::GapConflict { conflict_station, .. }
                if *conflict_station == StationId(1))));
    }

    #[test]
    fn test_forbid_window_pushes_departure() {
        // Scenario C: forbid [00:10, 00:20) over the naive span [00:05, 00:15].
        let diagram = Diagram::new(line(2));
        let ruler = flat_ruler(2, 0, 600, 0);
        let forbid = Forbid::new("overhaul").with_node(
            StationId(0),
            Direction::Down,
            ForbidNode::new(t(0, 10), t(0, 20)),
        );
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(0, 5),
            Direction::Down,
            StationId(1),
        )
        .with_forbid(&forbid);
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        let visits = outcome.train.visits();
        assert_eq!(visits[0].depart, t(0, 20));
        assert_eq!(visits[1].arrive, t(0, 30));

        let forbid_hits: Vec<_> = outcome
            .log
            .iter()
            .filter(|e| matches!(e, LogEntry::ForbidConflict { .. }))
            .collect();
        assert_eq!(forbid_hits.len(), 1);

        // The committed span no longer intersects the window.
        let node = ForbidNode::new(t(0, 10), t(0, 20));
        let span = visits[0].depart.seconds_to(visits[1].arrive);
        assert!(!node.intersects_span(visits[0].depart, span));
    }

    #[test]
    fn test_delay_cap_exhausts_backoff_budget() {
        // Scenario D: two windows covering the whole day leave no slot;
        // with a zero budget the attempt aborts.
        let diagram = Diagram::new(line(2));
        let ruler = flat_ruler(2, 0, 600, 0);
        let all_day_a = Forbid::new("first half").with_node(
            StationId(0),
            Direction::Down,
            ForbidNode::new(t(0, 0), t(12, 0)),
        );
        let all_day_b = Forbid::new("second half").with_node(
            StationId(0),
            Direction::Down,
            ForbidNode::new(t(12, 0), t(0, 0)),
        );
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(6, 0),
            Direction::Down,
            StationId(1),
        )
        .with_forbid(&all_day_a)
        .with_forbid(&all_day_b)
        .with_max_backoff(0);
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Exhausted);
        assert!(!outcome.is_success());
        let n = outcome.log.len();
        assert_eq!(outcome.log[n - 1], LogEntry::BadTermination);
        assert!(matches!(outcome.log[n - 2], LogEntry::Backoff { count: 1, .. }));
    }

    #[test]
    fn test_backoff_within_budget_reports_infeasible() {
        // Same dead configuration but the budget tolerates one abandonment:
        // the attempt fails without the abnormal-termination record.
        let diagram = Diagram::new(line(2));
        let ruler = flat_ruler(2, 0, 600, 0);
        let all_day_a = Forbid::new("first half").with_node(
            StationId(0),
            Direction::Down,
            ForbidNode::new(t(0, 0), t(12, 0)),
        );
        let all_day_b = Forbid::new("second half").with_node(
            StationId(0),
            Direction::Down,
            ForbidNode::new(t(12, 0), t(0, 0)),
        );
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(6, 0),
            Direction::Down,
            StationId(1),
        )
        .with_forbid(&all_day_a)
        .with_forbid(&all_day_b)
        .with_max_backoff(2);
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Infeasible);
        assert!(outcome.train.is_empty());
        assert!(matches!(outcome.log.last(), Some(LogEntry::Backoff { count: 1, .. })));
    }

    #[test]
    fn test_backtrack_forces_stop_at_previous_station() {
        // A committed slow run over S1->S2 crosses the candidate's pass-mode
        // hop there. The hop fails back, S1 becomes a stop, and the S1
        // departure is re-solved around the conflict.
        let mut diagram = Diagram::new(line(3));
        let mut slow = Train::new("K55");
        slow.push_visit(TrainVisit::new(StationId(1), t(8, 0), t(8, 5), true));
        slow.push_visit(TrainVisit::new(StationId(2), t(8, 40), t(8, 40), true));
        slow.set_terminal(StationId(2));
        diagram.commit(slow, Direction::Down);

        let ruler = flat_ruler(3, 0, 600, 0);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(2),
        );
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        let visits = outcome.train.visits();
        assert_eq!(visits.len(), 3);
        // S1 turned into a stop: arrival at the projected 8:10, departure
        // re-solved so the arrival at S2 clears the slow train (8:40 + 120 s
        // gap backed off through the 600 s run, after first pinning to 8:40).
        assert_eq!(visits[1].arrive, t(8, 10));
        assert_eq!(visits[1].depart, t(8, 32));
        assert_eq!(visits[2].arrive, t(8, 42));
        assert!(visits[1].is_stop());
        assert!(outcome
            .log
            .iter()
            .any(|e| matches!(e, LogEntry::IntervalConflict { kind: ConflictKind::LeftConflict, .. })));
    }

    #[test]
    fn test_settled_stop_applies_dwell() {
        let diagram = Diagram::new(line(3));
        let ruler = flat_ruler(3, 30, 600, 30);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(2),
        )
        .with_settled_stop(StationId(1), 120);
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        let visits = outcome.train.visits();
        // S0 -> S1 carries the braking extra (630 s); the dwell holds the
        // train at S1 for 120 s; S1 -> S2 carries the standing start.
        assert_eq!(visits[1].arrive, t(8, 0).add_secs(630));
        assert_eq!(visits[1].depart, visits[1].arrive.add_secs(120));
        assert!(visits[1].business);
        assert_eq!(visits[2].arrive, visits[1].depart.add_secs(630));
        assert!(outcome
            .log
            .iter()
            .any(|e| matches!(e, LogEntry::SetStop { station, .. } if *station == StationId(1))));
    }

    #[test]
    fn test_local_starting_and_terminal_collapse_endpoints() {
        let diagram = Diagram::new(line(3));
        let ruler = flat_ruler(3, 30, 600, 30);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(2),
        )
        .with_local_starting()
        .with_local_terminal();
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        assert_eq!(outcome.train.starting, Some(StationId(0)));
        assert_eq!(outcome.train.terminal, Some(StationId(2)));
        let visits = outcome.train.visits();
        assert_eq!(visits[0].arrive, visits[0].depart);
        assert!(visits[0].business);
        assert_eq!(visits[2].arrive, visits[2].depart);
        assert!(visits[2].business);
        // Starting hop carries the standing start, the terminal hop the
        // braking extra; S1 itself is passed at speed.
        assert_eq!(visits[1].arrive, t(8, 0).add_secs(630));
        assert_eq!(visits[2].arrive, visits[1].arrive.add_secs(630));
    }

    #[test]
    fn test_opposing_train_on_single_line() {
        // An opposing run holds the interval until 8:25; the candidate
        // waits for the meet, then clears the arrival gap on top of it.
        let mut diagram = Diagram::new(line(2));
        let mut opposing = Train::new("K202");
        opposing.push_visit(TrainVisit::new(StationId(1), t(7, 50), t(8, 5), true));
        opposing.push_visit(TrainVisit::new(StationId(0), t(8, 25), t(8, 25), true));
        opposing.set_terminal(StationId(0));
        diagram.commit(opposing, Direction::Up);

        let ruler = flat_ruler(2, 0, 600, 0);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(true, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(1),
        );
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        let visits = outcome.train.visits();
        // Meet resolution pins the departure to 8:25, then the gap against
        // the opposing arrival event pushes it to 8:27.
        assert_eq!(visits[0].depart, t(8, 27));
        assert_eq!(visits[1].arrive, t(8, 37));
        assert!(outcome.log.iter().any(|e| matches!(
            e,
            LogEntry::IntervalConflict {
                kind: ConflictKind::RightConflict,
                ..
            }
        )));
    }

    #[test]
    fn test_missing_ruler_data_ends_path() {
        // Data exists for the first interval only: the path stops at S1.
        let diagram = Diagram::new(line(3));
        let ruler = Ruler::new("partial").with_node(
            StationId(0),
            Direction::Down,
            RulerNode::new(0, 600, 0),
        );
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(2),
        );
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::NoData);
        assert!(outcome.is_success());
        assert_eq!(outcome.train.visits().len(), 2);
        assert_eq!(outcome.log.last(), Some(&LogEntry::NoRulerData));
    }

    #[test]
    fn test_monotonic_commit_and_no_surviving_conflicts() {
        // Rerun the scenario-B setup and audit the finished path: times
        // advance monotonically and every committed span re-queries clean.
        let mut diagram = Diagram::new(line(2));
        let mut other = Train::new("K9406");
        other.push_visit(visit(0, t(7, 55), t(7, 58)));
        other.push_visit(visit(1, t(8, 10), t(8, 15)));
        diagram.commit(other, Direction::Down);

        let ruler = flat_ruler(2, 0, 600, 0);
        let constraints = GapConstraints::uniform(false, 120);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            constraints.clone(),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(1),
        );
        let outcome = GreedyPainter::new(&diagram).paint(&req);
        assert!(outcome.is_success());

        let visits = outcome.train.visits();
        for pair in visits.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            assert!(!prev.depart.wheel_before(prev.arrive));
            assert!(prev.depart == next.arrive || prev.depart.wheel_before(next.arrive));
        }

        let axis = diagram.build_axis();
        for pair in visits.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let interval = diagram
                .railway
                .dir_next_interval(prev.station, Direction::Down)
                .unwrap();
            let span = prev.depart.seconds_to(next.arrive);
            let report = axis.interval_conflicted(interval, prev.depart, span, false);
            assert_eq!(report.kind, ConflictKind::NoConflict);

            let leave = StationEvent::new(
                prev.depart,
                EventKind::leaving(prev.is_stop()),
                Direction::Down.latter_side(),
                Direction::Down,
            );
            assert!(axis
                .conflict_event(prev.station, &leave, &constraints)
                .is_none());
            let arrive_kind = if next.is_stop() {
                EventKind::Arrive
            } else {
                EventKind::SettledPass
            };
            let arrive = StationEvent::new(
                next.arrive,
                arrive_kind,
                Direction::Down.former_side(),
                Direction::Down,
            );
            assert!(axis
                .conflict_event(next.station, &arrive, &constraints)
                .is_none());
        }
    }

    #[test]
    fn test_repainting_is_deterministic() {
        let mut diagram = Diagram::new(line(3));
        let mut slow = Train::new("K55");
        slow.push_visit(TrainVisit::new(StationId(1), t(8, 0), t(8, 5), true));
        slow.push_visit(TrainVisit::new(StationId(2), t(8, 40), t(8, 41), true));
        diagram.commit(slow, Direction::Down);

        let ruler = flat_ruler(3, 0, 600, 0);
        let request = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(2),
        );
        let painter = GreedyPainter::new(&diagram);
        let first = painter.paint(&request);
        let second = painter.paint(&request);

        assert_eq!(first.status, second.status);
        assert_eq!(first.train.visits(), second.train.visits());
        assert_eq!(first.log, second.log);
    }

    #[test]
    fn test_anchor_dwell_extends_backward_for_departure_anchor() {
        let diagram = Diagram::new(line(2));
        let ruler = flat_ruler(2, 0, 600, 0);
        let req = PaintRequest::new(
            "G1",
            &ruler,
            GapConstraints::uniform(false, 120),
            StationId(0),
            t(8, 0),
            Direction::Down,
            StationId(1),
        )
        .with_settled_stop(StationId(0), 180)
        .with_anchor_as_departure();
        let outcome = GreedyPainter::new(&diagram).paint(&req);

        assert_eq!(outcome.status, PaintStatus::Finished);
        let visits = outcome.train.visits();
        assert_eq!(visits[0].arrive, t(7, 57));
        assert_eq!(visits[0].depart, t(8, 0));
        assert!(visits[0].business);
    }
}
