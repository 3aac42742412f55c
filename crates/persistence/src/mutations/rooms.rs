// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room mutations.
//!
//! Creating or deleting a room adjusts the owning block's room counters
//! inside the same transaction as the row write.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_core::CounterDelta;
use quarters_domain::{RoomStatus, RoomType};
use tracing::info;

use crate::backend::LastInsertRowId;
use crate::data_models::RoomData;
use crate::diesel_schema::{beds, rooms};
use crate::error::PersistenceError;
use crate::mutations::support::{apply_counter_delta, current_timestamp, load_block, load_room};

fn room_number_taken(
    conn: &mut SqliteConnection,
    block_id: i64,
    room_number: &str,
    exclude_room_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = rooms::table
        .filter(rooms::block_id.eq(block_id))
        .filter(rooms::room_number.eq(room_number))
        .into_boxed();
    if let Some(room_id) = exclude_room_id {
        query = query.filter(rooms::room_id.ne(room_id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Creates a new room in a block.
///
/// New rooms start `Available`; the block's total and available room
/// counters are incremented in the same transaction.
///
/// # Errors
///
/// Returns `BlockNotFound` if the block does not exist,
/// `DuplicateRoomNumber` if the number is taken within the block, or an
/// error if a write fails.
pub fn create_room(
    conn: &mut SqliteConnection,
    block_id: i64,
    room_number: &str,
    room_type: RoomType,
    capacity: i32,
    description: Option<&str>,
    amenities: &[String],
    price_per_day: f64,
    created_by: i64,
) -> Result<i64, PersistenceError> {
    info!("Creating room '{}' in block {}", room_number, block_id);

    let amenities_json: String = serde_json::to_string(amenities)?;

    conn.transaction(|conn| {
        load_block(conn, block_id)?;
        if room_number_taken(conn, block_id, room_number, None)? {
            return Err(PersistenceError::DuplicateRoomNumber {
                block_id,
                room_number: room_number.to_string(),
            });
        }

        diesel::insert_into(rooms::table)
            .values((
                rooms::block_id.eq(block_id),
                rooms::room_number.eq(room_number),
                rooms::room_type.eq(room_type.as_str()),
                rooms::capacity.eq(capacity),
                rooms::description.eq(description),
                rooms::status.eq(RoomStatus::Available.as_str()),
                rooms::amenities.eq(&amenities_json),
                rooms::price_per_day.eq(price_per_day),
                rooms::created_by.eq(created_by),
            ))
            .execute(conn)?;

        let room_id: i64 = conn.last_insert_rowid()?;
        apply_counter_delta(
            conn,
            block_id,
            CounterDelta::room_created(RoomStatus::Available),
        )?;

        info!(room_id, block_id, "Room created");
        Ok(room_id)
    })
}

/// Updates a room's metadata, and optionally forces its status (used to
/// put an empty room under maintenance).
///
/// A forced status change moves the block's available-room counter in the
/// same transaction.
///
/// # Errors
///
/// Returns `RoomNotFound` if the room does not exist or an error if a
/// write fails.
pub fn update_room(
    conn: &mut SqliteConnection,
    room_id: i64,
    room_type: RoomType,
    capacity: i32,
    description: Option<&str>,
    amenities: &[String],
    price_per_day: f64,
    status: Option<RoomStatus>,
) -> Result<(), PersistenceError> {
    let amenities_json: String = serde_json::to_string(amenities)?;

    conn.transaction(|conn| {
        let room: RoomData = load_room(conn, room_id)?;

        diesel::update(rooms::table.find(room_id))
            .set((
                rooms::room_type.eq(room_type.as_str()),
                rooms::capacity.eq(capacity),
                rooms::description.eq(description),
                rooms::amenities.eq(&amenities_json),
                rooms::price_per_day.eq(price_per_day),
                rooms::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        if let Some(new_status) = status {
            let current: RoomStatus = RoomStatus::parse(&room.status)?;
            if new_status != current {
                diesel::update(rooms::table.find(room_id))
                    .set(rooms::status.eq(new_status.as_str()))
                    .execute(conn)?;
                apply_counter_delta(
                    conn,
                    room.block_id,
                    CounterDelta::room_status_changed(current, new_status),
                )?;
            }
        }

        info!(room_id, "Room updated");
        Ok(())
    })
}

/// Deletes a room.
///
/// The block's room counters are decremented in the same transaction.
///
/// # Errors
///
/// Returns `RoomHasBeds` while the room still contains beds and
/// `RoomNotFound` if it does not exist.
pub fn delete_room(conn: &mut SqliteConnection, room_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete room ID: {}", room_id);

    conn.transaction(|conn| {
        let room: RoomData = load_room(conn, room_id)?;

        let bed_count: i64 = beds::table
            .filter(beds::room_id.eq(room_id))
            .count()
            .get_result(conn)?;
        if bed_count > 0 {
            return Err(PersistenceError::RoomHasBeds(room_id));
        }

        let status: RoomStatus = RoomStatus::parse(&room.status)?;
        diesel::delete(rooms::table.find(room_id)).execute(conn)?;
        apply_counter_delta(conn, room.block_id, CounterDelta::room_deleted(status))?;

        info!("Deleted room ID: {}", room_id);
        Ok(())
    })
}
