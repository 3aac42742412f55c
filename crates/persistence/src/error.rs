// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_core::CoreError;

/// Errors that can occur in the persistence layer.
#[derive(Debug)]
pub enum PersistenceError {
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database initialization failed.
    InitializationError(String),
    /// Migration execution failed.
    MigrationFailed(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A query failed.
    QueryFailed(String),
    /// A looked-up record does not exist.
    UserNotFound(i64),
    /// No user carries the given email address.
    EmailNotFound(String),
    /// A looked-up block does not exist.
    BlockNotFound(i64),
    /// A looked-up room does not exist.
    RoomNotFound(i64),
    /// A looked-up bed does not exist.
    BedNotFound(i64),
    /// A looked-up request does not exist.
    RequestNotFound(i64),
    /// A looked-up notification does not exist.
    NotificationNotFound(i64),
    /// A block with this name already exists.
    DuplicateBlockName(String),
    /// A user with this email already exists.
    DuplicateEmail(String),
    /// A room with this number already exists in the block.
    DuplicateRoomNumber {
        /// The block holding the conflicting room.
        block_id: i64,
        /// The conflicting room number.
        room_number: String,
    },
    /// A bed with this number already exists in the room.
    DuplicateBedNumber {
        /// The room holding the conflicting bed.
        room_id: i64,
        /// The conflicting bed number.
        bed_number: String,
    },
    /// The designated block head does not hold the blockHead role.
    NotABlockHead(i64),
    /// A block still containing rooms cannot be deleted.
    BlockHasRooms(i64),
    /// A room still containing beds cannot be deleted.
    RoomHasBeds(i64),
    /// A user referenced by other records cannot be deleted.
    UserReferenced(i64),
    /// A stored date string failed to parse.
    DateParseFailed(String),
    /// An occupancy or workflow rule was violated.
    Rule(CoreError),
    /// Serialization of a JSON column failed.
    SerializationFailed(String),
    /// Catch-all for other failures.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Database initialization failed: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "SQLite foreign key enforcement is not enabled")
            }
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::EmailNotFound(email) => write!(f, "No user with email '{email}'"),
            Self::BlockNotFound(id) => write!(f, "Block {id} not found"),
            Self::RoomNotFound(id) => write!(f, "Room {id} not found"),
            Self::BedNotFound(id) => write!(f, "Bed {id} not found"),
            Self::RequestNotFound(id) => write!(f, "Request {id} not found"),
            Self::NotificationNotFound(id) => write!(f, "Notification {id} not found"),
            Self::DuplicateBlockName(name) => {
                write!(f, "A block named '{name}' already exists")
            }
            Self::DuplicateEmail(email) => {
                write!(f, "A user with email '{email}' already exists")
            }
            Self::DuplicateRoomNumber {
                block_id,
                room_number,
            } => {
                write!(
                    f,
                    "Room '{room_number}' already exists in block {block_id}"
                )
            }
            Self::DuplicateBedNumber {
                room_id,
                bed_number,
            } => {
                write!(f, "Bed '{bed_number}' already exists in room {room_id}")
            }
            Self::NotABlockHead(id) => {
                write!(f, "User {id} does not hold the blockHead role")
            }
            Self::BlockHasRooms(id) => {
                write!(f, "Block {id} still contains rooms and cannot be deleted")
            }
            Self::RoomHasBeds(id) => {
                write!(f, "Room {id} still contains beds and cannot be deleted")
            }
            Self::UserReferenced(id) => {
                write!(
                    f,
                    "User {id} is referenced by other records and cannot be deleted"
                )
            }
            Self::DateParseFailed(msg) => write!(f, "Failed to parse stored date: {msg}"),
            Self::Rule(err) => write!(f, "{err}"),
            Self::SerializationFailed(msg) => write!(f, "Serialization failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rule(err) => Some(err),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationFailed(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rule(err)
    }
}

impl From<quarters_domain::DomainError> for PersistenceError {
    fn from(err: quarters_domain::DomainError) -> Self {
        Self::Rule(CoreError::Domain(err))
    }
}
