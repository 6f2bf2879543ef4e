//! Input validation for paint requests.
//!
//! Checks structural integrity of a [`PaintRequest`] against its
//! diagram before the search runs. Detects:
//! - Stations that are not on the railway
//! - Anchor / start / end ordering inconsistent with the direction
//! - Negative dwell times
//! - Gap tables with missing kind pairs
//! - Empty forbid windows
//!
//! The painter assumes these preconditions hold; validating up front
//! turns what would otherwise be a panic (gap-table hole) or a
//! nonsense path into a reported error list.

use crate::models::{EventKind, GapKind};
use crate::painter::PaintRequest;
use crate::diagram::Diagram;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A referenced station is not on the railway.
    UnknownStation,
    /// Anchor, start, and end are not ordered along the direction.
    DirectionMismatch,
    /// A settled stop has a negative dwell.
    NegativeDwell,
    /// The gap table is missing a kind pair.
    IncompleteGapTable,
    /// A forbid window has zero length.
    EmptyForbidWindow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a paint request against its diagram.
///
/// Returns `Ok(())` if all checks pass, `Err(errors)` with every
/// detected issue otherwise.
pub fn validate_inputs(diagram: &Diagram, request: &PaintRequest<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    let railway = &diagram.railway;

    for (label, station) in [
        ("anchor", request.anchor),
        ("start", request.start),
        ("end", request.end),
    ] {
        if !railway.contains(station) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStation,
                format!("{label} station {station:?} is not on railway '{}'", railway.name),
            ));
        }
    }

    if railway.contains(request.start)
        && railway.contains(request.anchor)
        && railway.contains(request.end)
    {
        if !railway.is_ordered(request.start, request.anchor, request.dir) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DirectionMismatch,
                format!(
                    "start '{}' lies beyond anchor '{}' in {:?} direction",
                    railway.station_name(request.start),
                    railway.station_name(request.anchor),
                    request.dir
                ),
            ));
        }
        if !railway.is_ordered(request.anchor, request.end, request.dir) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DirectionMismatch,
                format!(
                    "end '{}' lies behind anchor '{}' in {:?} direction",
                    railway.station_name(request.end),
                    railway.station_name(request.anchor),
                    request.dir
                ),
            ));
        }
    }

    for (&station, &dwell) in &request.settled_stops {
        if !railway.contains(station) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStation,
                format!("settled stop {station:?} is not on railway '{}'", railway.name),
            ));
        }
        if dwell < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDwell,
                format!("settled stop {station:?} has negative dwell {dwell}s"),
            ));
        }
    }

    for earlier in EventKind::ALL {
        for later in EventKind::ALL {
            let pair = GapKind::between(earlier, later);
            if request.constraints.get(pair).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IncompleteGapTable,
                    format!("gap table has no entry for {earlier:?} -> {later:?}"),
                ));
            }
        }
    }

    for forbid in &request.forbids {
        for (key, node) in forbid.nodes() {
            if node.window_secs() == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyForbidWindow,
                    format!(
                        "forbid '{}' has an empty window on interval {key:?}",
                        forbid.name
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
