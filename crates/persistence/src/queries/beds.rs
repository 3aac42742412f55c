// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bed and early-vacate history queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{BedData, EarlyVacateRecordData};
use crate::diesel_schema::{beds, early_vacate_records};
use crate::error::PersistenceError;

/// Gets a bed by id.
///
/// # Errors
///
/// Returns `BedNotFound` if no bed with this id exists.
pub fn get_bed(conn: &mut SqliteConnection, bed_id: i64) -> Result<BedData, PersistenceError> {
    beds::table
        .find(bed_id)
        .select(BedData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::BedNotFound(bed_id))
}

/// Lists the beds in a room, ordered by bed number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_beds_for_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<Vec<BedData>, PersistenceError> {
    Ok(beds::table
        .filter(beds::room_id.eq(room_id))
        .order(beds::bed_number.asc())
        .select(BedData::as_select())
        .load(conn)?)
}

/// Loads the beds with the given ids. Missing ids are simply absent from
/// the result; callers that need all of them check the length.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_beds_by_ids(
    conn: &mut SqliteConnection,
    bed_ids: &[i64],
) -> Result<Vec<BedData>, PersistenceError> {
    Ok(beds::table
        .filter(beds::bed_id.eq_any(bed_ids))
        .select(BedData::as_select())
        .load(conn)?)
}

/// Lists a bed's early-vacate history, newest first.
///
/// # Errors
///
/// Returns `BedNotFound` if the bed does not exist or an error if the
/// query fails.
pub fn list_early_vacate_records(
    conn: &mut SqliteConnection,
    bed_id: i64,
) -> Result<Vec<EarlyVacateRecordData>, PersistenceError> {
    get_bed(conn, bed_id)?;

    Ok(early_vacate_records::table
        .filter(early_vacate_records::bed_id.eq(bed_id))
        .order(early_vacate_records::vacated_at.desc())
        .select(EarlyVacateRecordData::as_select())
        .load(conn)?)
}
