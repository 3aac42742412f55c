// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core entity enums and value types for the accommodation domain.
//!
//! Every enum carries its wire representation: `as_str` returns the exact
//! string stored in the database and sent over the API, and `parse` is the
//! inverse. Parsing an unknown string is a `DomainError`, never a panic.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::DomainError;

/// User roles, ordered from most to least privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full access to every entity, including user management.
    #[serde(rename = "systemAdmin")]
    SystemAdmin,
    /// Manages blocks, rooms, requests, and notifications.
    #[serde(rename = "admin")]
    Admin,
    /// Manages beds and requests for blocks they are the head of.
    #[serde(rename = "blockHead")]
    BlockHead,
}

impl Role {
    /// Returns the canonical string form of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SystemAdmin => "systemAdmin",
            Self::Admin => "admin",
            Self::BlockHead => "blockHead",
        }
    }

    /// Parses a role from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the string is not a known role.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "systemAdmin" => Ok(Self::SystemAdmin),
            "admin" => Ok(Self::Admin),
            "blockHead" => Ok(Self::BlockHead),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category of an accommodation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "A Block")]
    ABlock,
    #[serde(rename = "B Block")]
    BBlock,
    #[serde(rename = "Guest House")]
    GuestHouse,
    #[serde(rename = "SO Mess")]
    SoMess,
    #[serde(rename = "Dormitory")]
    Dormitory,
}

impl BlockType {
    /// Returns the canonical string form of this block type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ABlock => "A Block",
            Self::BBlock => "B Block",
            Self::GuestHouse => "Guest House",
            Self::SoMess => "SO Mess",
            Self::Dormitory => "Dormitory",
        }
    }

    /// Parses a block type from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBlockType` if the string is unknown.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "A Block" => Ok(Self::ABlock),
            "B Block" => Ok(Self::BBlock),
            "Guest House" => Ok(Self::GuestHouse),
            "SO Mess" => Ok(Self::SoMess),
            "Dormitory" => Ok(Self::Dormitory),
            other => Err(DomainError::InvalidBlockType(other.to_string())),
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The layout category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Single")]
    Single,
    #[serde(rename = "Double")]
    Double,
    #[serde(rename = "Triple")]
    Triple,
    #[serde(rename = "Dormitory")]
    Dormitory,
    #[serde(rename = "VIP Suite")]
    VipSuite,
}

impl RoomType {
    /// Returns the canonical string form of this room type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Triple => "Triple",
            Self::Dormitory => "Dormitory",
            Self::VipSuite => "VIP Suite",
        }
    }

    /// Parses a room type from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoomType` if the string is unknown.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "Single" => Ok(Self::Single),
            "Double" => Ok(Self::Double),
            "Triple" => Ok(Self::Triple),
            "Dormitory" => Ok(Self::Dormitory),
            "VIP Suite" => Ok(Self::VipSuite),
            other => Err(DomainError::InvalidRoomType(other.to_string())),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The occupancy status of a room.
///
/// Except for `UnderMaintenance`, this is always derived from the statuses
/// of the beds in the room and never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Partially Occupied")]
    PartiallyOccupied,
    #[serde(rename = "Fully Occupied")]
    FullyOccupied,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl RoomStatus {
    /// Returns the canonical string form of this room status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::PartiallyOccupied => "Partially Occupied",
            Self::FullyOccupied => "Fully Occupied",
            Self::UnderMaintenance => "Under Maintenance",
        }
    }

    /// Parses a room status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoomStatus` if the string is unknown.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "Available" => Ok(Self::Available),
            "Partially Occupied" => Ok(Self::PartiallyOccupied),
            "Fully Occupied" => Ok(Self::FullyOccupied),
            "Under Maintenance" => Ok(Self::UnderMaintenance),
            other => Err(DomainError::InvalidRoomStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle status of a bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Occupied")]
    Occupied,
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl BedStatus {
    /// Returns the canonical string form of this bed status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::UnderMaintenance => "Under Maintenance",
        }
    }

    /// Parses a bed status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBedStatus` if the string is unknown.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "Available" => Ok(Self::Available),
            "Occupied" => Ok(Self::Occupied),
            "Under Maintenance" => Ok(Self::UnderMaintenance),
            other => Err(DomainError::InvalidBedStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for BedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The workflow status of an accommodation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Cancelled")]
    Cancelled,
    #[serde(rename = "Completed")]
    Completed,
}

impl RequestStatus {
    /// Returns the canonical string form of this request status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    /// Parses a request status from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRequestStatus` if the string is unknown.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Under Review" => Ok(Self::UnderReview),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "Cancelled" => Ok(Self::Cancelled),
            "Completed" => Ok(Self::Completed),
            other => Err(DomainError::InvalidRequestStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    #[serde(rename = "New Request")]
    NewRequest,
    #[serde(rename = "Request Update")]
    RequestUpdate,
    #[serde(rename = "Room Assigned")]
    RoomAssigned,
    #[serde(rename = "Request Rejected")]
    RequestRejected,
    #[serde(rename = "Room Vacated")]
    RoomVacated,
    #[serde(rename = "System Update")]
    SystemUpdate,
}

impl NotificationType {
    /// Returns the canonical string form of this notification type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewRequest => "New Request",
            Self::RequestUpdate => "Request Update",
            Self::RoomAssigned => "Room Assigned",
            Self::RequestRejected => "Request Rejected",
            Self::RoomVacated => "Room Vacated",
            Self::SystemUpdate => "System Update",
        }
    }

    /// Parses a notification type from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNotificationType` if the string is unknown.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "New Request" => Ok(Self::NewRequest),
            "Request Update" => Ok(Self::RequestUpdate),
            "Room Assigned" => Ok(Self::RoomAssigned),
            "Request Rejected" => Ok(Self::RequestRejected),
            "Room Vacated" => Ok(Self::RoomVacated),
            "System Update" => Ok(Self::SystemUpdate),
            other => Err(DomainError::InvalidNotificationType(other.to_string())),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The person occupying a bed.
///
/// Present on a bed only while the bed is `Occupied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// Full name of the occupant.
    pub name: String,
    /// Contact information (phone or email).
    pub contact_info: String,
    /// First day of the stay.
    pub check_in_date: Date,
    /// Last day of the stay.
    pub check_out_date: Date,
    /// Purpose of the stay.
    pub purpose: String,
}

/// Details required when a bed is vacated before the occupant's
/// scheduled check-out date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyVacateDetails {
    /// Why the occupant is leaving early.
    pub reason: String,
    /// Name of a follow-up contact.
    pub contact_name: String,
    /// Phone number of the follow-up contact.
    pub contact_number: String,
    /// Free-form notes.
    pub notes: Option<String>,
}
