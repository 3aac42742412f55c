// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The accommodation-request workflow state machine.
//!
//! Every status change flows through [`request_transition`], so the legal
//! transitions live in exactly one table. Endpoint handlers never test a
//! request's status themselves.

use quarters_domain::{BedStatus, RequestStatus};

use crate::counters::CounterDelta;
use crate::error::CoreError;

/// An action attempted against an accommodation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    /// Assign beds to the request, approving it.
    AssignBeds,
    /// Reject the request with a reason.
    Reject,
    /// Cancel the request.
    Cancel,
    /// Move the request directly to another status.
    SetStatus(RequestStatus),
}

/// The result of a legal workflow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTransition {
    /// The request's status after the transition.
    pub new_status: RequestStatus,
    /// True when the transition releases any beds currently assigned to
    /// the request (the beds return to `Available` and the block's
    /// available-bed counter is credited in the same transaction).
    pub releases_beds: bool,
}

/// A bed offered for assignment to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedForAssignment {
    pub bed_id: i64,
    pub room_id: i64,
    pub bed_number: String,
    pub status: BedStatus,
}

/// The single transition table for the request workflow.
///
/// # Errors
///
/// Returns `CoreError::TransitionNotAllowed` for any action that is not
/// legal from the current status:
///
/// - `AssignBeds` and `Reject` require `Pending` or `UnderReview`.
/// - `Cancel` is refused for `Approved`, `Rejected`, and `Cancelled`
///   requests.
/// - `SetStatus` is the administrative escape hatch and permits any
///   target; moving to `Completed` or `Rejected` releases assigned beds.
pub const fn request_transition(
    current: RequestStatus,
    action: RequestAction,
) -> Result<RequestTransition, CoreError> {
    match (current, action) {
        (
            RequestStatus::Pending | RequestStatus::UnderReview,
            RequestAction::AssignBeds,
        ) => Ok(RequestTransition {
            new_status: RequestStatus::Approved,
            releases_beds: false,
        }),
        (_, RequestAction::AssignBeds) => Err(CoreError::TransitionNotAllowed {
            from: current,
            action: "assign beds to",
        }),
        (RequestStatus::Pending | RequestStatus::UnderReview, RequestAction::Reject) => {
            Ok(RequestTransition {
                new_status: RequestStatus::Rejected,
                releases_beds: false,
            })
        }
        (_, RequestAction::Reject) => Err(CoreError::TransitionNotAllowed {
            from: current,
            action: "reject",
        }),
        (
            RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled,
            RequestAction::Cancel,
        ) => Err(CoreError::TransitionNotAllowed {
            from: current,
            action: "cancel",
        }),
        (_, RequestAction::Cancel) => Ok(RequestTransition {
            new_status: RequestStatus::Cancelled,
            releases_beds: false,
        }),
        (_, RequestAction::SetStatus(new_status)) => Ok(RequestTransition {
            new_status,
            releases_beds: matches!(
                new_status,
                RequestStatus::Completed | RequestStatus::Rejected
            ),
        }),
    }
}

/// Validates the beds offered for assignment to a request.
///
/// The room must belong to the request's preferred block, every bed must
/// belong to that room and be available, and there must be at least as
/// many beds as occupants on the request.
///
/// On success, returns the counter delta that reserves the beds.
///
/// # Errors
///
/// Returns the first violated rule as a `CoreError`.
pub fn validate_bed_assignment(
    request_block_id: i64,
    room_id: i64,
    room_block_id: i64,
    number_of_occupants: i32,
    beds: &[BedForAssignment],
) -> Result<CounterDelta, CoreError> {
    if room_block_id != request_block_id {
        return Err(CoreError::RoomNotInPreferredBlock {
            room_id,
            block_id: request_block_id,
        });
    }

    for bed in beds {
        if bed.room_id != room_id {
            return Err(CoreError::BedNotInRoom {
                bed_id: bed.bed_id,
                room_id,
            });
        }
        if bed.status != BedStatus::Available {
            return Err(CoreError::BedUnavailableForAssignment {
                bed_number: bed.bed_number.clone(),
                status: bed.status,
            });
        }
    }

    let required: usize = usize::try_from(number_of_occupants).unwrap_or(0);
    if beds.len() < required {
        return Err(CoreError::InsufficientBeds {
            required: number_of_occupants,
            provided: beds.len(),
        });
    }

    let reserved: i64 = i64::try_from(beds.len()).unwrap_or(i64::MAX);
    Ok(CounterDelta::beds_assigned(reserved))
}

/// Validates deleting a request.
///
/// # Errors
///
/// Returns `CoreError::RequestHasAssignments` while the request still
/// holds an assigned room or any assigned beds.
pub const fn can_delete_request(
    has_assigned_room: bool,
    assigned_bed_count: usize,
) -> Result<(), CoreError> {
    if has_assigned_room || assigned_bed_count > 0 {
        return Err(CoreError::RequestHasAssignments);
    }
    Ok(())
}
