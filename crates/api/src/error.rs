// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use quarters_core::CoreError;
use quarters_domain::DomainError;
use quarters_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core, and persistence errors and
/// represent the API contract. The server layer maps each variant to an
/// HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed (401).
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor does not have permission (403).
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided (400).
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation is not legal in the entity's current state (400).
    InvalidState {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A uniqueness rule was violated (400).
    Duplicate {
        /// The kind of resource that collided.
        resource: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// A requested resource was not found (404).
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred (500).
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidState { message } => {
                write!(f, "Invalid state: {message}")
            }
            Self::Duplicate { resource, message } => {
                write!(f, "Duplicate {resource}: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Forbidden {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain validation error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} must not be empty"),
        },
        DomainError::FieldTooLong { field, max } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{field} must be at most {max} characters"),
        },
        DomainError::InvalidEmail(email) => ApiError::InvalidInput {
            field: String::from("email"),
            message: format!("Invalid email address: {email}"),
        },
        DomainError::InvalidPassword { min } => ApiError::InvalidInput {
            field: String::from("password"),
            message: format!("Password must be at least {min} characters"),
        },
        DomainError::InvalidCapacity { capacity } => ApiError::InvalidInput {
            field: String::from("capacity"),
            message: format!("Invalid room capacity: {capacity}"),
        },
        DomainError::InvalidOccupantCount { count } => ApiError::InvalidInput {
            field: String::from("numberOfOccupants"),
            message: format!("Invalid occupant count: {count}"),
        },
        DomainError::InvalidDateRange {
            check_in,
            check_out,
        } => ApiError::InvalidInput {
            field: String::from("checkOutDate"),
            message: format!("Check-out {check_out} must fall after check-in {check_in}"),
        },
        DomainError::InvalidPrice(message) => ApiError::InvalidInput {
            field: String::from("pricePerDay"),
            message,
        },
        DomainError::MissingOccupantField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Occupant {field} is required"),
        },
        DomainError::MissingEarlyVacateField(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Early vacate {field} is required"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role: {value}"),
        },
        DomainError::InvalidBlockType(value) => ApiError::InvalidInput {
            field: String::from("blockType"),
            message: format!("Invalid block type: {value}"),
        },
        DomainError::InvalidRoomType(value) => ApiError::InvalidInput {
            field: String::from("roomType"),
            message: format!("Invalid room type: {value}"),
        },
        DomainError::InvalidRoomStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid room status: {value}"),
        },
        DomainError::InvalidBedStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid bed status: {value}"),
        },
        DomainError::InvalidRequestStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid request status: {value}"),
        },
        DomainError::InvalidNotificationType(value) => ApiError::InvalidInput {
            field: String::from("type"),
            message: format!("Invalid notification type: {value}"),
        },
    }
}

/// Translates a core rule error into an API error.
///
/// Rule violations surface as state conflicts; embedded domain errors go
/// back through the domain translation.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Domain(domain_err) => translate_domain_error(domain_err),
        CoreError::InsufficientBeds { .. } => ApiError::InvalidInput {
            field: String::from("bedIds"),
            message: err.to_string(),
        },
        CoreError::BedNotAvailable { .. }
        | CoreError::BedNotOccupied { .. }
        | CoreError::BedOccupied
        | CoreError::EarlyVacateDetailsRequired { .. }
        | CoreError::TransitionNotAllowed { .. }
        | CoreError::RequestHasAssignments
        | CoreError::BedUnavailableForAssignment { .. }
        | CoreError::RoomNotInPreferredBlock { .. }
        | CoreError::BedNotInRoom { .. } => ApiError::InvalidState {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        PersistenceError::EmailNotFound(email) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("No user with email '{email}'"),
        },
        PersistenceError::BlockNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Block"),
            message: format!("Block {id} does not exist"),
        },
        PersistenceError::RoomNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: format!("Room {id} does not exist"),
        },
        PersistenceError::BedNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Bed"),
            message: format!("Bed {id} does not exist"),
        },
        PersistenceError::RequestNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Request"),
            message: format!("Request {id} does not exist"),
        },
        PersistenceError::NotificationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {id} does not exist"),
        },
        PersistenceError::DuplicateBlockName(name) => ApiError::Duplicate {
            resource: String::from("block"),
            message: format!("A block named '{name}' already exists"),
        },
        PersistenceError::DuplicateEmail(email) => ApiError::Duplicate {
            resource: String::from("user"),
            message: format!("A user with email '{email}' already exists"),
        },
        PersistenceError::DuplicateRoomNumber {
            block_id,
            room_number,
        } => ApiError::Duplicate {
            resource: String::from("room"),
            message: format!("Room '{room_number}' already exists in block {block_id}"),
        },
        PersistenceError::DuplicateBedNumber {
            room_id,
            bed_number,
        } => ApiError::Duplicate {
            resource: String::from("bed"),
            message: format!("Bed '{bed_number}' already exists in room {room_id}"),
        },
        PersistenceError::NotABlockHead(id) => ApiError::InvalidInput {
            field: String::from("blockHeadId"),
            message: format!("User {id} does not hold the blockHead role"),
        },
        PersistenceError::BlockHasRooms(id) => ApiError::InvalidState {
            message: format!("Block {id} still contains rooms"),
        },
        PersistenceError::RoomHasBeds(id) => ApiError::InvalidState {
            message: format!("Room {id} still contains beds"),
        },
        PersistenceError::UserReferenced(id) => ApiError::InvalidState {
            message: format!("User {id} is still referenced by other records"),
        },
        PersistenceError::DateParseFailed(message) => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
        PersistenceError::Rule(core_err) => translate_core_error(core_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
