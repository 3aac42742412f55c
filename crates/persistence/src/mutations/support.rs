// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Helpers shared by the mutation modules: row loading, date parsing,
//! counter application, and room status refresh.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_core::{BlockCounters, CounterDelta, derive_room_status};
use quarters_domain::{BedStatus, Occupant, RoomStatus};
use time::Date;
use time::format_description::well_known::Iso8601;

use crate::data_models::{BedData, BlockData, RoomData};
use crate::diesel_schema::{beds, blocks, rooms};
use crate::error::PersistenceError;

/// SQL expression for the database-side current timestamp.
pub(crate) fn current_timestamp() -> diesel::expression::SqlLiteral<diesel::sql_types::Text> {
    diesel::dsl::sql::<diesel::sql_types::Text>("CURRENT_TIMESTAMP")
}

/// Parses a stored ISO 8601 calendar date.
pub(crate) fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::DateParseFailed(format!("'{value}': {e}")))
}

/// Formats a calendar date for storage.
pub(crate) fn format_date(value: Date) -> Result<String, PersistenceError> {
    value
        .format(&Iso8601::DATE)
        .map_err(|e| PersistenceError::DateParseFailed(e.to_string()))
}

/// Loads a block row or reports it missing.
pub(crate) fn load_block(
    conn: &mut SqliteConnection,
    block_id: i64,
) -> Result<BlockData, PersistenceError> {
    blocks::table
        .find(block_id)
        .select(BlockData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::BlockNotFound(block_id))
}

/// Loads a room row or reports it missing.
pub(crate) fn load_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<RoomData, PersistenceError> {
    rooms::table
        .find(room_id)
        .select(RoomData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::RoomNotFound(room_id))
}

/// Loads a bed row or reports it missing.
pub(crate) fn load_bed(
    conn: &mut SqliteConnection,
    bed_id: i64,
) -> Result<BedData, PersistenceError> {
    beds::table
        .find(bed_id)
        .select(BedData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::BedNotFound(bed_id))
}

/// Reconstructs the embedded occupant from a bed row.
pub(crate) fn occupant_of(bed: &BedData) -> Result<Option<Occupant>, PersistenceError> {
    let (Some(name), Some(contact), Some(check_in), Some(check_out), Some(purpose)) = (
        bed.occupant_name.as_ref(),
        bed.occupant_contact.as_ref(),
        bed.occupant_check_in.as_ref(),
        bed.occupant_check_out.as_ref(),
        bed.occupant_purpose.as_ref(),
    ) else {
        return Ok(None);
    };
    Ok(Some(Occupant {
        name: name.clone(),
        contact_info: contact.clone(),
        check_in_date: parse_date(check_in)?,
        check_out_date: parse_date(check_out)?,
        purpose: purpose.clone(),
    }))
}

/// Applies a counter delta to a block, clamped so the invariants
/// `0 <= available <= total` always hold after the write.
pub(crate) fn apply_counter_delta(
    conn: &mut SqliteConnection,
    block_id: i64,
    delta: CounterDelta,
) -> Result<(), PersistenceError> {
    if delta.is_empty() {
        return Ok(());
    }

    let block: BlockData = load_block(conn, block_id)?;
    let updated: BlockCounters = delta.apply(BlockCounters {
        total_rooms: block.total_rooms,
        available_rooms: block.available_rooms,
        total_beds: block.total_beds,
        available_beds: block.available_beds,
    });

    diesel::update(blocks::table.find(block_id))
        .set((
            blocks::total_rooms.eq(updated.total_rooms),
            blocks::available_rooms.eq(updated.available_rooms),
            blocks::total_beds.eq(updated.total_beds),
            blocks::available_beds.eq(updated.available_beds),
            blocks::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    Ok(())
}

/// Re-derives a room's status from its current bed rows and writes it
/// back when it changed.
///
/// Returns the counter delta for the owning block's available-room
/// counter. A room with no beds keeps its current status and yields an
/// empty delta.
pub(crate) fn refresh_room_status(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<CounterDelta, PersistenceError> {
    let room: RoomData = load_room(conn, room_id)?;

    let stored: Vec<String> = beds::table
        .filter(beds::room_id.eq(room_id))
        .select(beds::status)
        .load(conn)?;
    let statuses: Vec<BedStatus> = stored
        .iter()
        .map(|status| BedStatus::parse(status))
        .collect::<Result<Vec<BedStatus>, _>>()?;

    let Some(derived) = derive_room_status(&statuses) else {
        return Ok(CounterDelta::default());
    };
    let current: RoomStatus = RoomStatus::parse(&room.status)?;

    if derived != current {
        diesel::update(rooms::table.find(room_id))
            .set((
                rooms::status.eq(derived.as_str()),
                rooms::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;
    }

    Ok(CounterDelta::room_status_changed(current, derived))
}
