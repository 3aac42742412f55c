// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs returned by queries.
//!
//! Dates and timestamps are stored as ISO 8601 TEXT and surface here as
//! strings; the layers above parse the ones they do arithmetic on.

use diesel::prelude::*;

use crate::diesel_schema::{
    beds, blocks, early_vacate_records, notifications, request_notes, requests, rooms, sessions,
    users,
};

/// A user account row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserData {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A session row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A block row, including its denormalized counters.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blocks)]
pub struct BlockData {
    pub block_id: i64,
    pub name: String,
    pub block_type: String,
    pub description: Option<String>,
    pub block_head_id: i64,
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub total_beds: i64,
    pub available_beds: i64,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A room row. `amenities` is a JSON array of strings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
pub struct RoomData {
    pub room_id: i64,
    pub block_id: i64,
    pub room_number: String,
    pub room_type: String,
    pub capacity: i32,
    pub description: Option<String>,
    pub status: String,
    pub amenities: String,
    pub price_per_day: f64,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A bed row with its embedded occupant columns.
///
/// The occupant columns are all set while the bed is `Occupied` and all
/// NULL otherwise.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = beds)]
pub struct BedData {
    pub bed_id: i64,
    pub room_id: i64,
    pub bed_number: String,
    pub status: String,
    pub occupant_name: Option<String>,
    pub occupant_contact: Option<String>,
    pub occupant_check_in: Option<String>,
    pub occupant_check_out: Option<String>,
    pub occupant_purpose: Option<String>,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// An early-vacate history row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = early_vacate_records)]
pub struct EarlyVacateRecordData {
    pub record_id: i64,
    pub bed_id: i64,
    pub occupant_name: String,
    pub original_check_out_date: String,
    pub vacate_date: String,
    pub reason: String,
    pub contact_name: String,
    pub contact_number: String,
    pub notes: Option<String>,
    pub vacated_by: i64,
    pub vacated_at: String,
}

/// An accommodation request row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = requests)]
pub struct RequestData {
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

/// A note appended to a request.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = request_notes)]
pub struct RequestNoteData {
    pub note_id: i64,
    pub request_id: i64,
    pub author_id: i64,
    pub message: String,
    pub created_at: String,
}

/// A notification row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub struct NotificationData {
    pub notification_id: i64,
    pub recipient_id: i64,
    pub sender_id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_model: Option<String>,
    pub related_id: Option<i64>,
    pub is_read: bool,
    pub created_at: String,
}
