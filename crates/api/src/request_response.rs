// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Wire field names are camelCase. Dates travel as ISO 8601 strings and
//! are parsed at the handler boundary; stored rows already hold them in
//! that shape.

use quarters_persistence::{
    BedData, BlockData, EarlyVacateRecordData, NotificationData, RequestData, RequestNoteData,
    RoomBedCounts, RoomData, UserData,
};
use serde::{Deserialize, Serialize};

/// API request to log in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// A user, without credential material.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<UserData> for UserInfo {
    fn from(user: UserData) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// API request to create a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// API request to update a user's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

/// API request to change a user's password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

/// A block with its denormalized counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub block_id: i64,
    pub name: String,
    pub block_type: String,
    pub description: Option<String>,
    pub block_head_id: i64,
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub total_beds: i64,
    pub available_beds: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BlockData> for BlockInfo {
    fn from(block: BlockData) -> Self {
        Self {
            block_id: block.block_id,
            name: block.name,
            block_type: block.block_type,
            description: block.description,
            block_head_id: block.block_head_id,
            total_rooms: block.total_rooms,
            available_rooms: block.available_rooms,
            total_beds: block.total_beds,
            available_beds: block.available_beds,
            created_at: block.created_at,
            updated_at: block.updated_at,
        }
    }
}

/// API request to create or update a block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    pub name: String,
    pub block_type: String,
    pub description: Option<String>,
    pub block_head_id: i64,
}

/// A room, with bed counts derived from its bed rows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_id: i64,
    pub block_id: i64,
    pub room_number: String,
    pub room_type: String,
    pub capacity: i32,
    pub description: Option<String>,
    pub status: String,
    pub amenities: Vec<String>,
    pub price_per_day: f64,
    pub total_beds: i64,
    pub available_beds: i64,
    pub occupied_beds: i64,
}

impl RoomInfo {
    /// Builds the DTO from a room row plus its bed counts. The stored
    /// amenities JSON is decoded here; an unreadable value surfaces as an
    /// empty list rather than failing the read.
    #[must_use]
    pub fn from_parts(room: RoomData, counts: RoomBedCounts) -> Self {
        let amenities: Vec<String> = serde_json::from_str(&room.amenities).unwrap_or_default();
        Self {
            room_id: room.room_id,
            block_id: room.block_id,
            room_number: room.room_number,
            room_type: room.room_type,
            capacity: room.capacity,
            description: room.description,
            status: room.status,
            amenities,
            price_per_day: room.price_per_day,
            total_beds: counts.total_beds,
            available_beds: counts.available_beds,
            occupied_beds: counts.occupied_beds,
        }
    }
}

/// API request to create a room.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub room_type: String,
    pub capacity: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub price_per_day: f64,
}

/// API request to update a room. A status is only supplied to force an
/// empty room in or out of maintenance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_type: String,
    pub capacity: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub price_per_day: f64,
    pub status: Option<String>,
}

/// The occupant embedded in an occupied bed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupantInfo {
    pub name: String,
    pub contact_info: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub purpose: String,
}

/// A bed, with its occupant when occupied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedInfo {
    pub bed_id: i64,
    pub room_id: i64,
    pub bed_number: String,
    pub status: String,
    pub occupant: Option<OccupantInfo>,
}

impl From<BedData> for BedInfo {
    fn from(bed: BedData) -> Self {
        let occupant: Option<OccupantInfo> = match (
            bed.occupant_name,
            bed.occupant_contact,
            bed.occupant_check_in,
            bed.occupant_check_out,
            bed.occupant_purpose,
        ) {
            (Some(name), Some(contact), Some(check_in), Some(check_out), Some(purpose)) => {
                Some(OccupantInfo {
                    name,
                    contact_info: contact,
                    check_in_date: check_in,
                    check_out_date: check_out,
                    purpose,
                })
            }
            _ => None,
        };
        Self {
            bed_id: bed.bed_id,
            room_id: bed.room_id,
            bed_number: bed.bed_number,
            status: bed.status,
            occupant,
        }
    }
}

/// A bed together with its early-vacate history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedDetailResponse {
    #[serde(flatten)]
    pub bed: BedInfo,
    pub early_vacate_history: Vec<EarlyVacateRecordInfo>,
}

/// One early-vacate history entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyVacateRecordInfo {
    pub record_id: i64,
    pub bed_id: i64,
    pub occupant_name: String,
    pub original_check_out_date: String,
    pub vacate_date: String,
    pub reason: String,
    pub contact_name: String,
    pub contact_number: String,
    pub notes: Option<String>,
    pub vacated_at: String,
}

impl From<EarlyVacateRecordData> for EarlyVacateRecordInfo {
    fn from(record: EarlyVacateRecordData) -> Self {
        Self {
            record_id: record.record_id,
            bed_id: record.bed_id,
            occupant_name: record.occupant_name,
            original_check_out_date: record.original_check_out_date,
            vacate_date: record.vacate_date,
            reason: record.reason,
            contact_name: record.contact_name,
            contact_number: record.contact_number,
            notes: record.notes,
            vacated_at: record.vacated_at,
        }
    }
}

/// API request to create a bed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBedRequest {
    pub bed_number: String,
    pub status: Option<String>,
}

/// API request to change a bed's status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBedStatusRequest {
    pub status: String,
}

/// API request to assign an occupant to a bed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBedRequest {
    pub name: String,
    pub contact_info: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub purpose: String,
}

/// API request to vacate a bed. The reason and contact fields are
/// required only when the vacate date falls before the occupant's
/// scheduled check-out.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacateBedRequest {
    pub vacate_date: String,
    pub reason: Option<String>,
    pub contact_name: Option<String>,
    pub contact_number: Option<String>,
    pub notes: Option<String>,
}

/// API request to create an accommodation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    pub requester_name: String,
    pub requester_contact: String,
    pub purpose: String,
    pub block_preference_id: i64,
    pub room_type_preference: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_occupants: i32,
    pub special_requirements: Option<String>,
}

/// API request to update an undecided accommodation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestRequest {
    pub requester_name: String,
    pub requester_contact: String,
    pub purpose: String,
    pub room_type_preference: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_occupants: i32,
    pub special_requirements: Option<String>,
}

/// An accommodation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub request_id: i64,
    pub request_number: String,
    pub requester_name: String,
    pub requester_contact: String,
    pub purpose: String,
    pub block_preference_id: i64,
    pub room_type_preference: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_occupants: i32,
    pub special_requirements: Option<String>,
    pub status: String,
    pub assigned_room_id: Option<i64>,
    pub handled_by_admin_id: Option<i64>,
    pub handled_by_block_head_id: Option<i64>,
    pub rejection_reason: Option<String>,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RequestData> for RequestInfo {
    fn from(request: RequestData) -> Self {
        Self {
            request_id: request.request_id,
            request_number: request.request_number,
            requester_name: request.requester_name,
            requester_contact: request.requester_contact,
            purpose: request.purpose,
            block_preference_id: request.block_preference_id,
            room_type_preference: request.room_type_preference,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            number_of_occupants: request.number_of_occupants,
            special_requirements: request.special_requirements,
            status: request.status,
            assigned_room_id: request.assigned_room_id,
            handled_by_admin_id: request.handled_by_admin_id,
            handled_by_block_head_id: request.handled_by_block_head_id,
            rejection_reason: request.rejection_reason,
            created_by: request.created_by,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// A request with its notes and assigned beds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetailResponse {
    #[serde(flatten)]
    pub request: RequestInfo,
    pub assigned_bed_ids: Vec<i64>,
    pub notes: Vec<RequestNoteInfo>,
}

/// A note on a request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestNoteInfo {
    pub note_id: i64,
    pub request_id: i64,
    pub author_id: i64,
    pub message: String,
    pub created_at: String,
}

impl From<RequestNoteData> for RequestNoteInfo {
    fn from(note: RequestNoteData) -> Self {
        Self {
            note_id: note.note_id,
            request_id: note.request_id,
            author_id: note.author_id,
            message: note.message,
            created_at: note.created_at,
        }
    }
}

/// API request to move a request to another status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRequestStatusRequest {
    pub status: String,
}

/// API request to approve a request by assigning beds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBedsRequest {
    pub room_id: i64,
    pub bed_ids: Vec<i64>,
}

/// API request to reject a request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRequestRequest {
    pub reason: String,
}

/// API request to append a note to a request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub message: String,
}

/// A notification in a user's inbox.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInfo {
    pub notification_id: i64,
    pub sender_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_model: Option<String>,
    pub related_id: Option<i64>,
    pub is_read: bool,
    pub created_at: String,
}

impl From<NotificationData> for NotificationInfo {
    fn from(notification: NotificationData) -> Self {
        Self {
            notification_id: notification.notification_id,
            sender_id: notification.sender_id,
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            related_model: notification.related_model,
            related_id: notification.related_id,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

/// A user's inbox together with its unread count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationInfo>,
    pub unread_count: i64,
}

const fn default_true() -> bool {
    true
}
