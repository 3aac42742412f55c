// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Quarters accommodation system.
//!
//! This crate stores users, sessions, blocks, rooms, beds, accommodation
//! requests, and notifications in `SQLite` via Diesel, with migrations
//! embedded in the binary.
//!
//! ## Consistency model
//!
//! Blocks carry denormalized room and bed counters, and rooms carry a
//! status derived from their beds. Every mutation that can move either
//! runs inside a single transaction that also writes the triggering row,
//! so a crash or a failed notification insert can never leave the
//! counters out of step with the rows they summarize.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory `SQLite` databases, so they
//! are isolated from each other and need no external infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use quarters_domain::{
    BedStatus, BlockType, EarlyVacateDetails, Occupant, RequestStatus, RoomStatus, RoomType,
};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    BedData, BlockData, EarlyVacateRecordData, NotificationData, RequestData, RequestNoteData,
    RoomData, SessionData, UserData,
};
pub use error::PersistenceError;
pub use queries::blocks::{BlockStats, LabelCount};
pub use queries::dashboard::{AdminOverview, BlockHeadOverview, BlockOccupancy, SystemOverview};
pub use queries::rooms::RoomBedCounts;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// tests never collide on a shared database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The persistence adapter. Owns the `SQLite` connection and exposes the
/// full query and mutation surface as methods.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter backed by an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique shared in-memory database via an
    /// atomic counter, giving deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a `SQLite` database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // --- users ---

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if the email is taken or an error if the
    /// insert fails.
    pub fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        is_active: bool,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, name, email, password, role, is_active)
    }

    /// Updates a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `DuplicateEmail` on conflict.
    pub fn update_user(
        &mut self,
        user_id: i64,
        name: &str,
        email: &str,
        role: &str,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user(&mut self.conn, user_id, name, email, role, is_active)
    }

    /// Updates a user's password and invalidates their sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or a write fails.
    pub fn update_password(
        &mut self,
        user_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_password(&mut self.conn, user_id, new_password)
    }

    /// Stamps a user's last login time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_last_login(&mut self.conn, user_id)
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns `UserReferenced` if other records still point at them and
    /// `UserNotFound` if they do not exist.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Gets a user by id.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no user with this id exists.
    pub fn get_user(&mut self, user_id: i64) -> Result<UserData, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Looks a user up by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Counts all user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    // --- sessions ---

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Looks a session up by its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Stamps a session's last activity time.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn)
    }

    // --- blocks ---

    /// Creates a block.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateBlockName` or `NotABlockHead` on conflict.
    pub fn create_block(
        &mut self,
        name: &str,
        block_type: BlockType,
        description: Option<&str>,
        block_head_id: i64,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::blocks::create_block(
            &mut self.conn,
            name,
            block_type,
            description,
            block_head_id,
            created_by,
        )
    }

    /// Updates a block's fields.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound`, `DuplicateBlockName`, or `NotABlockHead`
    /// on conflict.
    pub fn update_block(
        &mut self,
        block_id: i64,
        name: &str,
        block_type: BlockType,
        description: Option<&str>,
        block_head_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::blocks::update_block(
            &mut self.conn,
            block_id,
            name,
            block_type,
            description,
            block_head_id,
        )
    }

    /// Deletes a block.
    ///
    /// # Errors
    ///
    /// Returns `BlockHasRooms` while rooms remain and `BlockNotFound` if
    /// it does not exist.
    pub fn delete_block(&mut self, block_id: i64) -> Result<(), PersistenceError> {
        mutations::blocks::delete_block(&mut self.conn, block_id)
    }

    /// Gets a block by id.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` if no block with this id exists.
    pub fn get_block(&mut self, block_id: i64) -> Result<BlockData, PersistenceError> {
        queries::blocks::get_block(&mut self.conn, block_id)
    }

    /// Lists all blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_blocks(&mut self) -> Result<Vec<BlockData>, PersistenceError> {
        queries::blocks::list_blocks(&mut self.conn)
    }

    /// Lists the blocks headed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_blocks_headed_by(
        &mut self,
        block_head_id: i64,
    ) -> Result<Vec<BlockData>, PersistenceError> {
        queries::blocks::list_blocks_headed_by(&mut self.conn, block_head_id)
    }

    /// Computes statistics for a block from its room and bed rows.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` if the block does not exist.
    pub fn get_block_stats(&mut self, block_id: i64) -> Result<BlockStats, PersistenceError> {
        queries::blocks::get_block_stats(&mut self.conn, block_id)
    }

    // --- rooms ---

    /// Creates a room in a block.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` or `DuplicateRoomNumber` on conflict.
    #[allow(clippy::too_many_arguments)]
    pub fn create_room(
        &mut self,
        block_id: i64,
        room_number: &str,
        room_type: RoomType,
        capacity: i32,
        description: Option<&str>,
        amenities: &[String],
        price_per_day: f64,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::rooms::create_room(
            &mut self.conn,
            block_id,
            room_number,
            room_type,
            capacity,
            description,
            amenities,
            price_per_day,
            created_by,
        )
    }

    /// Updates a room's metadata, and optionally forces its status.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if the room does not exist.
    #[allow(clippy::too_many_arguments)]
    pub fn update_room(
        &mut self,
        room_id: i64,
        room_type: RoomType,
        capacity: i32,
        description: Option<&str>,
        amenities: &[String],
        price_per_day: f64,
        status: Option<RoomStatus>,
    ) -> Result<(), PersistenceError> {
        mutations::rooms::update_room(
            &mut self.conn,
            room_id,
            room_type,
            capacity,
            description,
            amenities,
            price_per_day,
            status,
        )
    }

    /// Deletes a room.
    ///
    /// # Errors
    ///
    /// Returns `RoomHasBeds` while beds remain and `RoomNotFound` if it
    /// does not exist.
    pub fn delete_room(&mut self, room_id: i64) -> Result<(), PersistenceError> {
        mutations::rooms::delete_room(&mut self.conn, room_id)
    }

    /// Gets a room by id.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if no room with this id exists.
    pub fn get_room(&mut self, room_id: i64) -> Result<RoomData, PersistenceError> {
        queries::rooms::get_room(&mut self.conn, room_id)
    }

    /// Lists all rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&mut self) -> Result<Vec<RoomData>, PersistenceError> {
        queries::rooms::list_rooms(&mut self.conn)
    }

    /// Lists the rooms in a block.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms_for_block(
        &mut self,
        block_id: i64,
    ) -> Result<Vec<RoomData>, PersistenceError> {
        queries::rooms::list_rooms_for_block(&mut self.conn, block_id)
    }

    /// Counts a room's beds by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_bed_counts(
        &mut self,
        room_id: i64,
    ) -> Result<RoomBedCounts, PersistenceError> {
        queries::rooms::get_room_bed_counts(&mut self.conn, room_id)
    }

    // --- beds ---

    /// Creates a bed in a room.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` or `DuplicateBedNumber` on conflict.
    pub fn create_bed(
        &mut self,
        room_id: i64,
        bed_number: &str,
        status: BedStatus,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::beds::create_bed(&mut self.conn, room_id, bed_number, status, created_by)
    }

    /// Assigns an occupant to an available bed.
    ///
    /// # Errors
    ///
    /// Returns `BedNotFound` or a rule error when the bed is not
    /// available.
    pub fn assign_bed(&mut self, bed_id: i64, occupant: &Occupant) -> Result<(), PersistenceError> {
        mutations::beds::assign_bed(&mut self.conn, bed_id, occupant)
    }

    /// Vacates an occupied bed, recording early-vacate history when the
    /// vacate date is before the occupant's scheduled check-out.
    ///
    /// # Errors
    ///
    /// Returns `BedNotFound` or a rule error when the bed is not occupied
    /// or required details are missing.
    pub fn vacate_bed(
        &mut self,
        bed_id: i64,
        vacate_date: Date,
        details: Option<&EarlyVacateDetails>,
        vacated_by: i64,
    ) -> Result<(), PersistenceError> {
        mutations::beds::vacate_bed(&mut self.conn, bed_id, vacate_date, details, vacated_by)
    }

    /// Changes a bed's status directly.
    ///
    /// # Errors
    ///
    /// Returns `BedNotFound` if the bed does not exist.
    pub fn update_bed_status(
        &mut self,
        bed_id: i64,
        new_status: BedStatus,
    ) -> Result<(), PersistenceError> {
        mutations::beds::update_bed_status(&mut self.conn, bed_id, new_status)
    }

    /// Deletes a bed.
    ///
    /// # Errors
    ///
    /// Returns `BedNotFound` or a rule error when the bed is occupied.
    pub fn delete_bed(&mut self, bed_id: i64) -> Result<(), PersistenceError> {
        mutations::beds::delete_bed(&mut self.conn, bed_id)
    }

    /// Gets a bed by id.
    ///
    /// # Errors
    ///
    /// Returns `BedNotFound` if no bed with this id exists.
    pub fn get_bed(&mut self, bed_id: i64) -> Result<BedData, PersistenceError> {
        queries::beds::get_bed(&mut self.conn, bed_id)
    }

    /// Lists the beds in a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_beds_for_room(&mut self, room_id: i64) -> Result<Vec<BedData>, PersistenceError> {
        queries::beds::list_beds_for_room(&mut self.conn, room_id)
    }

    /// Loads the beds with the given ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_beds_by_ids(&mut self, bed_ids: &[i64]) -> Result<Vec<BedData>, PersistenceError> {
        queries::beds::get_beds_by_ids(&mut self.conn, bed_ids)
    }

    /// Lists a bed's early-vacate history.
    ///
    /// # Errors
    ///
    /// Returns `BedNotFound` if the bed does not exist.
    pub fn list_early_vacate_records(
        &mut self,
        bed_id: i64,
    ) -> Result<Vec<EarlyVacateRecordData>, PersistenceError> {
        queries::beds::list_early_vacate_records(&mut self.conn, bed_id)
    }

    // --- requests ---

    /// Creates an accommodation request and notifies the head of the
    /// preferred block.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` if the preferred block does not exist.
    #[allow(clippy::too_many_arguments)]
    pub fn create_request(
        &mut self,
        request_number: &str,
        requester_name: &str,
        requester_contact: &str,
        purpose: &str,
        block_preference_id: i64,
        room_type_preference: RoomType,
        check_in_date: Date,
        check_out_date: Date,
        number_of_occupants: i32,
        special_requirements: Option<&str>,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::requests::create_request(
            &mut self.conn,
            request_number,
            requester_name,
            requester_contact,
            purpose,
            block_preference_id,
            room_type_preference,
            check_in_date,
            check_out_date,
            number_of_occupants,
            special_requirements,
            created_by,
        )
    }

    /// Updates an undecided request's details.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` or a rule error when the request is
    /// already decided.
    #[allow(clippy::too_many_arguments)]
    pub fn update_request(
        &mut self,
        request_id: i64,
        requester_name: &str,
        requester_contact: &str,
        purpose: &str,
        room_type_preference: RoomType,
        check_in_date: Date,
        check_out_date: Date,
        number_of_occupants: i32,
        special_requirements: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::requests::update_request(
            &mut self.conn,
            request_id,
            requester_name,
            requester_contact,
            purpose,
            room_type_preference,
            check_in_date,
            check_out_date,
            number_of_occupants,
            special_requirements,
        )
    }

    /// Appends a note to a request.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the request does not exist.
    pub fn add_request_note(
        &mut self,
        request_id: i64,
        author_id: i64,
        message: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::requests::add_request_note(&mut self.conn, request_id, author_id, message)
    }

    /// Assigns beds in a room to a request, approving it.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for a missing request, room, or bed, or
    /// a rule error for an illegal transition or failed validation.
    pub fn assign_beds_to_request(
        &mut self,
        request_id: i64,
        room_id: i64,
        bed_ids: &[i64],
        block_head_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::requests::assign_beds_to_request(
            &mut self.conn,
            request_id,
            room_id,
            bed_ids,
            block_head_id,
        )
    }

    /// Rejects a request with a reason.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` or a rule error for an illegal
    /// transition.
    pub fn reject_request(
        &mut self,
        request_id: i64,
        reason: &str,
        block_head_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::requests::reject_request(&mut self.conn, request_id, reason, block_head_id)
    }

    /// Cancels a request.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` or a rule error for an illegal
    /// transition.
    pub fn cancel_request(
        &mut self,
        request_id: i64,
        actor_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::requests::cancel_request(&mut self.conn, request_id, actor_id)
    }

    /// Moves a request directly to another status, releasing its beds
    /// when the new status is `Completed` or `Rejected`.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` or a rule error for an illegal
    /// transition.
    pub fn set_request_status(
        &mut self,
        request_id: i64,
        new_status: RequestStatus,
        actor_id: i64,
        actor_is_admin: bool,
    ) -> Result<(), PersistenceError> {
        mutations::requests::set_request_status(
            &mut self.conn,
            request_id,
            new_status,
            actor_id,
            actor_is_admin,
        )
    }

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` or a rule error while it still holds
    /// assignments.
    pub fn delete_request(&mut self, request_id: i64) -> Result<(), PersistenceError> {
        mutations::requests::delete_request(&mut self.conn, request_id)
    }

    /// Gets a request by id.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if no request with this id exists.
    pub fn get_request(&mut self, request_id: i64) -> Result<RequestData, PersistenceError> {
        queries::requests::get_request(&mut self.conn, request_id)
    }

    /// Lists requests, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests(
        &mut self,
        status: Option<RequestStatus>,
    ) -> Result<Vec<RequestData>, PersistenceError> {
        queries::requests::list_requests(&mut self.conn, status)
    }

    /// Lists requests whose preferred block is headed by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests_for_block_head(
        &mut self,
        block_head_id: i64,
    ) -> Result<Vec<RequestData>, PersistenceError> {
        queries::requests::list_requests_for_block_head(&mut self.conn, block_head_id)
    }

    /// Lists requests created by the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests_created_by(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<RequestData>, PersistenceError> {
        queries::requests::list_requests_created_by(&mut self.conn, user_id)
    }

    /// Lists the bed ids currently assigned to a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assigned_bed_ids(
        &mut self,
        request_id: i64,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::requests::list_assigned_bed_ids(&mut self.conn, request_id)
    }

    /// Lists a request's notes.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the request does not exist.
    pub fn list_request_notes(
        &mut self,
        request_id: i64,
    ) -> Result<Vec<RequestNoteData>, PersistenceError> {
        queries::requests::list_request_notes(&mut self.conn, request_id)
    }

    // --- notifications ---

    /// Lists a recipient's notifications, unread first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications_for_recipient(
        &mut self,
        recipient_id: i64,
    ) -> Result<Vec<NotificationData>, PersistenceError> {
        queries::notifications::list_notifications_for_recipient(&mut self.conn, recipient_id)
    }

    /// Counts a recipient's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_unread_notifications(
        &mut self,
        recipient_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::notifications::count_unread_notifications(&mut self.conn, recipient_id)
    }

    /// Marks one of the recipient's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `NotificationNotFound` if it is not theirs or missing.
    pub fn mark_notification_read(
        &mut self,
        notification_id: i64,
        recipient_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::notifications::mark_notification_read(
            &mut self.conn,
            notification_id,
            recipient_id,
        )
    }

    /// Marks all of the recipient's notifications as read, returning how
    /// many changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_all_notifications_read(
        &mut self,
        recipient_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::notifications::mark_all_notifications_read(&mut self.conn, recipient_id)
    }

    /// Deletes one of the recipient's notifications.
    ///
    /// # Errors
    ///
    /// Returns `NotificationNotFound` if it is not theirs or missing.
    pub fn delete_notification(
        &mut self,
        notification_id: i64,
        recipient_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::notifications::delete_notification(
            &mut self.conn,
            notification_id,
            recipient_id,
        )
    }

    // --- dashboards ---

    /// Builds the systemAdmin dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn system_overview(&mut self) -> Result<SystemOverview, PersistenceError> {
        queries::dashboard::system_overview(&mut self.conn)
    }

    /// Builds the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn admin_overview(&mut self) -> Result<AdminOverview, PersistenceError> {
        queries::dashboard::admin_overview(&mut self.conn)
    }

    /// Builds the blockHead dashboard for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn block_head_overview(
        &mut self,
        block_head_id: i64,
    ) -> Result<BlockHeadOverview, PersistenceError> {
        queries::dashboard::block_head_overview(&mut self.conn, block_head_id)
    }
}
