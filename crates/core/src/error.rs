// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::{BedStatus, DomainError, RequestStatus};
use time::Date;

/// Errors produced by the occupancy rules and workflow state machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A bed must be available for the attempted operation.
    BedNotAvailable {
        /// The bed's actual status.
        status: BedStatus,
    },
    /// A bed must be occupied for the attempted operation.
    BedNotOccupied {
        /// The bed's actual status.
        status: BedStatus,
    },
    /// An occupied bed cannot be deleted.
    BedOccupied,
    /// Vacating before the scheduled check-out requires early-vacate details.
    EarlyVacateDetailsRequired {
        /// The occupant's scheduled check-out date.
        check_out_date: Date,
        /// The attempted vacate date.
        vacate_date: Date,
    },
    /// The request workflow does not allow this action from the current status.
    TransitionNotAllowed {
        /// The request's current status.
        from: RequestStatus,
        /// The attempted action.
        action: &'static str,
    },
    /// A request still holding a room or bed assignment cannot be deleted.
    RequestHasAssignments,
    /// Fewer beds were offered than the request needs.
    InsufficientBeds {
        /// The number of occupants on the request.
        required: i32,
        /// The number of beds offered.
        provided: usize,
    },
    /// A bed offered for assignment is not available.
    BedUnavailableForAssignment {
        /// The bed's display number.
        bed_number: String,
        /// The bed's actual status.
        status: BedStatus,
    },
    /// The chosen room does not belong to the request's preferred block.
    RoomNotInPreferredBlock {
        /// The chosen room.
        room_id: i64,
        /// The request's preferred block.
        block_id: i64,
    },
    /// A bed offered for assignment does not belong to the chosen room.
    BedNotInRoom {
        /// The offending bed.
        bed_id: i64,
        /// The chosen room.
        room_id: i64,
    },
    /// A field failed domain validation.
    Domain(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BedNotAvailable { status } => {
                write!(f, "Bed is not available for assignment (status: {status})")
            }
            Self::BedNotOccupied { status } => {
                write!(f, "Bed is not occupied (status: {status})")
            }
            Self::BedOccupied => write!(f, "Cannot delete a bed that is currently occupied"),
            Self::EarlyVacateDetailsRequired {
                check_out_date,
                vacate_date,
            } => {
                write!(
                    f,
                    "Vacating on {vacate_date} is before the scheduled check-out {check_out_date}; early vacate details are required"
                )
            }
            Self::TransitionNotAllowed { from, action } => {
                write!(f, "Cannot {action} a request with status '{from}'")
            }
            Self::RequestHasAssignments => {
                write!(
                    f,
                    "Cannot delete a request that still has an assigned room or beds"
                )
            }
            Self::InsufficientBeds { required, provided } => {
                write!(
                    f,
                    "Request needs {required} beds but only {provided} were offered"
                )
            }
            Self::BedUnavailableForAssignment { bed_number, status } => {
                write!(f, "Bed '{bed_number}' is not available (status: {status})")
            }
            Self::RoomNotInPreferredBlock { room_id, block_id } => {
                write!(
                    f,
                    "Room {room_id} does not belong to the request's preferred block {block_id}"
                )
            }
            Self::BedNotInRoom { bed_id, room_id } => {
                write!(f, "Bed {bed_id} does not belong to room {room_id}")
            }
            Self::Domain(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}
