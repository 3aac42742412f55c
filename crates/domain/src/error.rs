// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty.
    EmptyField(&'static str),
    /// A text field exceeds its maximum length.
    FieldTooLong {
        /// The field name.
        field: &'static str,
        /// The maximum allowed length.
        max: usize,
    },
    /// Email address is malformed.
    InvalidEmail(String),
    /// Password does not meet the minimum length.
    InvalidPassword {
        /// The minimum required length.
        min: usize,
    },
    /// Room capacity is outside the allowed range.
    InvalidCapacity {
        /// The rejected capacity value.
        capacity: i32,
    },
    /// Number of occupants must be at least one.
    InvalidOccupantCount {
        /// The rejected count value.
        count: i32,
    },
    /// Check-out date is not after the check-in date.
    InvalidDateRange {
        /// The check-in date.
        check_in: Date,
        /// The check-out date.
        check_out: Date,
    },
    /// Price per day is negative or not a finite number.
    InvalidPrice(String),
    /// An occupant field required for bed assignment is missing.
    MissingOccupantField(&'static str),
    /// A field required for an early vacate is missing.
    MissingEarlyVacateField(&'static str),
    /// Role string is not a known role.
    InvalidRole(String),
    /// Block type string is not a known block type.
    InvalidBlockType(String),
    /// Room type string is not a known room type.
    InvalidRoomType(String),
    /// Room status string is not a known room status.
    InvalidRoomStatus(String),
    /// Bed status string is not a known bed status.
    InvalidBedStatus(String),
    /// Request status string is not a known request status.
    InvalidRequestStatus(String),
    /// Notification type string is not a known notification type.
    InvalidNotificationType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::FieldTooLong { field, max } => {
                write!(f, "{field} exceeds the maximum length of {max} characters")
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {email}"),
            Self::InvalidPassword { min } => {
                write!(f, "Password must be at least {min} characters")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "Invalid capacity: {capacity}. Must be between 1 and 20")
            }
            Self::InvalidOccupantCount { count } => {
                write!(f, "Invalid occupant count: {count}. Must be at least 1")
            }
            Self::InvalidDateRange {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Check-out date {check_out} must be after check-in date {check_in}"
                )
            }
            Self::InvalidPrice(msg) => write!(f, "Invalid price per day: {msg}"),
            Self::MissingOccupantField(field) => {
                write!(f, "Occupant {field} is required for bed assignment")
            }
            Self::MissingEarlyVacateField(field) => {
                write!(f, "Early vacate {field} is required")
            }
            Self::InvalidRole(value) => write!(f, "Invalid role: {value}"),
            Self::InvalidBlockType(value) => write!(f, "Invalid block type: {value}"),
            Self::InvalidRoomType(value) => write!(f, "Invalid room type: {value}"),
            Self::InvalidRoomStatus(value) => write!(f, "Invalid room status: {value}"),
            Self::InvalidBedStatus(value) => write!(f, "Invalid bed status: {value}"),
            Self::InvalidRequestStatus(value) => write!(f, "Invalid request status: {value}"),
            Self::InvalidNotificationType(value) => {
                write!(f, "Invalid notification type: {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
