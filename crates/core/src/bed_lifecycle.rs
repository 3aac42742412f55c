// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bed lifecycle state machine.
//!
//! Beds move between `Available`, `Occupied`, and `UnderMaintenance`. The
//! functions here validate each transition and return the resulting status
//! plus the counter adjustment for the owning block. The caller is
//! responsible for re-deriving the room's status from its beds afterwards.

use quarters_domain::{
    BedStatus, EarlyVacateDetails, Occupant, validate_early_vacate_details, validate_occupant,
};
use time::Date;

use crate::counters::CounterDelta;
use crate::error::CoreError;

/// The result of a validated bed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedTransition {
    /// The bed's status after the transition.
    pub new_status: BedStatus,
    /// The counter adjustment for the owning block.
    pub counters: CounterDelta,
}

/// The result of a validated vacate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VacateOutcome {
    /// The bed's status after the vacate (always `Available`).
    pub new_status: BedStatus,
    /// True when the vacate happened before the occupant's scheduled
    /// check-out and an early-vacate history record must be written.
    pub early_vacate: bool,
    /// The counter adjustment for the owning block.
    pub counters: CounterDelta,
}

/// Validates assigning an occupant to a bed.
///
/// # Errors
///
/// Returns `CoreError::BedNotAvailable` unless the bed is `Available`, and
/// a domain error if the occupant record is incomplete.
pub fn assign_bed(current: BedStatus, occupant: &Occupant) -> Result<BedTransition, CoreError> {
    if current != BedStatus::Available {
        return Err(CoreError::BedNotAvailable { status: current });
    }
    validate_occupant(occupant)?;
    Ok(BedTransition {
        new_status: BedStatus::Occupied,
        counters: CounterDelta::bed_status_changed(current, BedStatus::Occupied),
    })
}

/// Validates vacating a bed.
///
/// A vacate before the occupant's scheduled check-out date is an early
/// vacate and requires complete [`EarlyVacateDetails`]; the outcome then
/// instructs the caller to append exactly one history record.
///
/// # Errors
///
/// Returns `CoreError::BedNotOccupied` unless the bed is `Occupied`,
/// `CoreError::EarlyVacateDetailsRequired` when an early vacate lacks
/// details, and a domain error when the supplied details are incomplete.
pub fn vacate_bed(
    current: BedStatus,
    occupant: Option<&Occupant>,
    vacate_date: Date,
    details: Option<&EarlyVacateDetails>,
) -> Result<VacateOutcome, CoreError> {
    if current != BedStatus::Occupied {
        return Err(CoreError::BedNotOccupied { status: current });
    }

    let early_vacate: bool = occupant.is_some_and(|occ| vacate_date < occ.check_out_date);
    if early_vacate {
        let Some(details) = details else {
            // occupant presence is implied by early_vacate
            let check_out_date: Date = occupant.map_or(vacate_date, |occ| occ.check_out_date);
            return Err(CoreError::EarlyVacateDetailsRequired {
                check_out_date,
                vacate_date,
            });
        };
        validate_early_vacate_details(details)?;
    }

    Ok(VacateOutcome {
        new_status: BedStatus::Available,
        early_vacate,
        counters: CounterDelta::bed_status_changed(current, BedStatus::Available),
    })
}

/// Validates a direct bed status change.
///
/// Any transition is permitted; the counter delta is empty when the status
/// does not actually change. Moving a bed out of `Occupied` clears its
/// occupant, which the caller performs.
#[must_use]
pub const fn update_bed_status(current: BedStatus, new: BedStatus) -> BedTransition {
    BedTransition {
        new_status: new,
        counters: CounterDelta::bed_status_changed(current, new),
    }
}

/// Validates deleting a bed.
///
/// # Errors
///
/// Returns `CoreError::BedOccupied` when the bed is occupied.
pub const fn delete_bed(current: BedStatus) -> Result<CounterDelta, CoreError> {
    if matches!(current, BedStatus::Occupied) {
        return Err(CoreError::BedOccupied);
    }
    Ok(CounterDelta::bed_deleted(current))
}
