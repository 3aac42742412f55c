// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bed mutations.
//!
//! Every bed write recomputes the owning room's status from its bed rows
//! and adjusts the block counters, all inside one transaction. The bed's
//! status is re-read inside the transaction, so two concurrent
//! assignments of the same bed cannot both succeed.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_core::{
    BedTransition, CounterDelta, VacateOutcome, assign_bed as validate_assign,
    delete_bed as validate_delete, update_bed_status as validate_update_status,
    vacate_bed as validate_vacate,
};
use quarters_domain::{BedStatus, EarlyVacateDetails, Occupant};
use quarters_notify::NotificationEvent;
use time::Date;
use tracing::info;

use crate::backend::LastInsertRowId;
use crate::data_models::{BedData, BlockData, RoomData};
use crate::diesel_schema::{beds, early_vacate_records, request_beds};
use crate::error::PersistenceError;
use crate::mutations::notifications::create_notification;
use crate::mutations::support::{
    apply_counter_delta, current_timestamp, format_date, load_bed, load_block, load_room,
    occupant_of, refresh_room_status,
};

/// Creates a new bed in a room.
///
/// The block's bed counters and the room's derived status are updated in
/// the same transaction.
///
/// # Errors
///
/// Returns `RoomNotFound` if the room does not exist,
/// `DuplicateBedNumber` if the number is taken within the room, or an
/// error if a write fails.
pub fn create_bed(
    conn: &mut SqliteConnection,
    room_id: i64,
    bed_number: &str,
    status: BedStatus,
    created_by: i64,
) -> Result<i64, PersistenceError> {
    info!("Creating bed '{}' in room {}", bed_number, room_id);

    conn.transaction(|conn| {
        let room: RoomData = load_room(conn, room_id)?;

        let taken: i64 = beds::table
            .filter(beds::room_id.eq(room_id))
            .filter(beds::bed_number.eq(bed_number))
            .count()
            .get_result(conn)?;
        if taken > 0 {
            return Err(PersistenceError::DuplicateBedNumber {
                room_id,
                bed_number: bed_number.to_string(),
            });
        }

        diesel::insert_into(beds::table)
            .values((
                beds::room_id.eq(room_id),
                beds::bed_number.eq(bed_number),
                beds::status.eq(status.as_str()),
                beds::created_by.eq(created_by),
            ))
            .execute(conn)?;
        let bed_id: i64 = conn.last_insert_rowid()?;

        let delta: CounterDelta =
            CounterDelta::bed_created(status).then(refresh_room_status(conn, room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;

        info!(bed_id, room_id, "Bed created");
        Ok(bed_id)
    })
}

/// Assigns an occupant to a bed.
///
/// The bed must be available; its status is re-read inside the
/// transaction so a concurrent assignment loses cleanly.
///
/// # Errors
///
/// Returns `BedNotFound` if the bed does not exist, a rule error when the
/// bed is not available or the occupant record is incomplete, or an error
/// if a write fails.
pub fn assign_bed(
    conn: &mut SqliteConnection,
    bed_id: i64,
    occupant: &Occupant,
) -> Result<(), PersistenceError> {
    info!("Assigning occupant to bed ID: {}", bed_id);

    conn.transaction(|conn| {
        let bed: BedData = load_bed(conn, bed_id)?;
        let current: BedStatus = BedStatus::parse(&bed.status)?;

        let transition: BedTransition = validate_assign(current, occupant)?;

        let check_in: String = format_date(occupant.check_in_date)?;
        let check_out: String = format_date(occupant.check_out_date)?;
        diesel::update(beds::table.find(bed_id))
            .set((
                beds::status.eq(transition.new_status.as_str()),
                beds::occupant_name.eq(&occupant.name),
                beds::occupant_contact.eq(&occupant.contact_info),
                beds::occupant_check_in.eq(&check_in),
                beds::occupant_check_out.eq(&check_out),
                beds::occupant_purpose.eq(&occupant.purpose),
                beds::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        let room: RoomData = load_room(conn, bed.room_id)?;
        let delta: CounterDelta = transition
            .counters
            .then(refresh_room_status(conn, bed.room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;

        info!(bed_id, "Bed assigned");
        Ok(())
    })
}

/// Vacates an occupied bed.
///
/// A vacate before the occupant's scheduled check-out appends exactly one
/// early-vacate history record. The block head is notified.
///
/// # Errors
///
/// Returns `BedNotFound` if the bed does not exist, a rule error when the
/// bed is not occupied or required early-vacate details are missing, or
/// an error if a write fails.
pub fn vacate_bed(
    conn: &mut SqliteConnection,
    bed_id: i64,
    vacate_date: Date,
    details: Option<&EarlyVacateDetails>,
    vacated_by: i64,
) -> Result<(), PersistenceError> {
    info!("Vacating bed ID: {}", bed_id);

    conn.transaction(|conn| {
        let bed: BedData = load_bed(conn, bed_id)?;
        let current: BedStatus = BedStatus::parse(&bed.status)?;
        let occupant: Option<Occupant> = occupant_of(&bed)?;

        let outcome: VacateOutcome =
            validate_vacate(current, occupant.as_ref(), vacate_date, details)?;

        if outcome.early_vacate
            && let (Some(occupant), Some(details)) = (occupant.as_ref(), details)
        {
            let original_check_out: String = format_date(occupant.check_out_date)?;
            let vacate: String = format_date(vacate_date)?;
            diesel::insert_into(early_vacate_records::table)
                .values((
                    early_vacate_records::bed_id.eq(bed_id),
                    early_vacate_records::occupant_name.eq(&occupant.name),
                    early_vacate_records::original_check_out_date.eq(&original_check_out),
                    early_vacate_records::vacate_date.eq(&vacate),
                    early_vacate_records::reason.eq(&details.reason),
                    early_vacate_records::contact_name.eq(&details.contact_name),
                    early_vacate_records::contact_number.eq(&details.contact_number),
                    early_vacate_records::notes.eq(details.notes.as_deref()),
                    early_vacate_records::vacated_by.eq(vacated_by),
                ))
                .execute(conn)?;
        }

        diesel::update(beds::table.find(bed_id))
            .set((
                beds::status.eq(outcome.new_status.as_str()),
                beds::occupant_name.eq(None::<String>),
                beds::occupant_contact.eq(None::<String>),
                beds::occupant_check_in.eq(None::<String>),
                beds::occupant_check_out.eq(None::<String>),
                beds::occupant_purpose.eq(None::<String>),
                beds::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        let room: RoomData = load_room(conn, bed.room_id)?;
        let delta: CounterDelta = outcome
            .counters
            .then(refresh_room_status(conn, bed.room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;

        let block: BlockData = load_block(conn, room.block_id)?;
        if block.block_head_id != vacated_by {
            let occupant_name: String =
                occupant.map_or_else(|| "The occupant".to_string(), |occ| occ.name);
            create_notification(
                conn,
                &NotificationEvent::room_vacated(
                    block.block_head_id,
                    vacated_by,
                    bed_id,
                    &bed.bed_number,
                    &occupant_name,
                ),
            )?;
        }

        info!(bed_id, "Bed vacated");
        Ok(())
    })
}

/// Changes a bed's status directly.
///
/// Any transition is permitted. Moving a bed out of `Occupied` clears the
/// embedded occupant.
///
/// # Errors
///
/// Returns `BedNotFound` if the bed does not exist or an error if a write
/// fails.
pub fn update_bed_status(
    conn: &mut SqliteConnection,
    bed_id: i64,
    new_status: BedStatus,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let bed: BedData = load_bed(conn, bed_id)?;
        let current: BedStatus = BedStatus::parse(&bed.status)?;

        let transition: BedTransition = validate_update_status(current, new_status);

        if transition.new_status == BedStatus::Occupied {
            diesel::update(beds::table.find(bed_id))
                .set((
                    beds::status.eq(transition.new_status.as_str()),
                    beds::updated_at.eq(current_timestamp()),
                ))
                .execute(conn)?;
        } else {
            diesel::update(beds::table.find(bed_id))
                .set((
                    beds::status.eq(transition.new_status.as_str()),
                    beds::occupant_name.eq(None::<String>),
                    beds::occupant_contact.eq(None::<String>),
                    beds::occupant_check_in.eq(None::<String>),
                    beds::occupant_check_out.eq(None::<String>),
                    beds::occupant_purpose.eq(None::<String>),
                    beds::updated_at.eq(current_timestamp()),
                ))
                .execute(conn)?;
        }

        let room: RoomData = load_room(conn, bed.room_id)?;
        let delta: CounterDelta = transition
            .counters
            .then(refresh_room_status(conn, bed.room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;

        info!(bed_id, status = %transition.new_status, "Bed status updated");
        Ok(())
    })
}

/// Deletes a bed.
///
/// # Errors
///
/// Returns `BedNotFound` if the bed does not exist, a rule error when the
/// bed is occupied, or an error if a write fails.
pub fn delete_bed(conn: &mut SqliteConnection, bed_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete bed ID: {}", bed_id);

    conn.transaction(|conn| {
        let bed: BedData = load_bed(conn, bed_id)?;
        let current: BedStatus = BedStatus::parse(&bed.status)?;

        let delta: CounterDelta = validate_delete(current)?;

        // Stale assignment links from released requests go with the bed.
        diesel::delete(request_beds::table)
            .filter(request_beds::bed_id.eq(bed_id))
            .execute(conn)?;
        diesel::delete(beds::table.find(bed_id)).execute(conn)?;

        let room: RoomData = load_room(conn, bed.room_id)?;
        let delta: CounterDelta = delta.then(refresh_room_status(conn, bed.room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;

        info!("Deleted bed ID: {}", bed_id);
        Ok(())
    })
}
