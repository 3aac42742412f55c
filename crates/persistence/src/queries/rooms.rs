// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use serde::Serialize;

use crate::data_models::RoomData;
use crate::diesel_schema::{beds, rooms};
use crate::error::PersistenceError;

/// Bed counts for one room, derived from its bed rows.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomBedCounts {
    pub total_beds: i64,
    pub available_beds: i64,
    pub occupied_beds: i64,
    pub maintenance_beds: i64,
}

/// Gets a room by id.
///
/// # Errors
///
/// Returns `RoomNotFound` if no room with this id exists.
pub fn get_room(conn: &mut SqliteConnection, room_id: i64) -> Result<RoomData, PersistenceError> {
    rooms::table
        .find(room_id)
        .select(RoomData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::RoomNotFound(room_id))
}

/// Lists all rooms, ordered by block then room number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_rooms(conn: &mut SqliteConnection) -> Result<Vec<RoomData>, PersistenceError> {
    Ok(rooms::table
        .order((rooms::block_id.asc(), rooms::room_number.asc()))
        .select(RoomData::as_select())
        .load(conn)?)
}

/// Lists the rooms in a block, ordered by room number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_rooms_for_block(
    conn: &mut SqliteConnection,
    block_id: i64,
) -> Result<Vec<RoomData>, PersistenceError> {
    Ok(rooms::table
        .filter(rooms::block_id.eq(block_id))
        .order(rooms::room_number.asc())
        .select(RoomData::as_select())
        .load(conn)?)
}

/// Counts a room's beds by status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_room_bed_counts(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<RoomBedCounts, PersistenceError> {
    let statuses: Vec<String> = beds::table
        .filter(beds::room_id.eq(room_id))
        .select(beds::status)
        .load(conn)?;

    let mut counts: RoomBedCounts = RoomBedCounts::default();
    for status in &statuses {
        counts.total_beds += 1;
        match status.as_str() {
            "Occupied" => counts.occupied_beds += 1,
            "Under Maintenance" => counts.maintenance_beds += 1,
            _ => counts.available_beds += 1,
        }
    }
    Ok(counts)
}
