// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accommodation request mutations.
//!
//! Every status change goes through the workflow state machine, and
//! every multi-entity step (occupying beds, releasing beds, adjusting
//! block counters, fanning out notifications) happens in one transaction
//! with the status change itself.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_core::{
    BedForAssignment, CounterDelta, RequestAction, RequestTransition, can_delete_request,
    request_transition, validate_bed_assignment,
};
use quarters_domain::{BedStatus, RequestStatus, RoomType};
use quarters_notify::NotificationEvent;
use time::Date;
use tracing::info;

use crate::backend::LastInsertRowId;
use crate::data_models::{BedData, BlockData, RequestData, RoomData};
use crate::diesel_schema::{beds, request_beds, request_notes, requests};
use crate::error::PersistenceError;
use crate::mutations::notifications::create_notification;
use crate::mutations::support::{
    apply_counter_delta, current_timestamp, format_date, load_block, load_room,
    refresh_room_status,
};
use crate::queries::requests::list_assigned_bed_ids;

fn load_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<RequestData, PersistenceError> {
    requests::table
        .find(request_id)
        .select(RequestData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::RequestNotFound(request_id))
}

/// Creates a new accommodation request and notifies the head of the
/// preferred block.
///
/// # Errors
///
/// Returns `BlockNotFound` if the preferred block does not exist or an
/// error if a write fails.
#[allow(clippy::too_many_arguments)]
pub fn create_request(
    conn: &mut SqliteConnection,
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
    info!(
        "Creating accommodation request {} for block {}",
        request_number, block_preference_id
    );

    conn.transaction(|conn| {
        let block: BlockData = load_block(conn, block_preference_id)?;

        let check_in: String = format_date(check_in_date)?;
        let check_out: String = format_date(check_out_date)?;
        diesel::insert_into(requests::table)
            .values((
                requests::request_number.eq(request_number),
                requests::requester_name.eq(requester_name),
                requests::requester_contact.eq(requester_contact),
                requests::purpose.eq(purpose),
                requests::block_preference_id.eq(block_preference_id),
                requests::room_type_preference.eq(room_type_preference.as_str()),
                requests::check_in_date.eq(&check_in),
                requests::check_out_date.eq(&check_out),
                requests::number_of_occupants.eq(number_of_occupants),
                requests::special_requirements.eq(special_requirements),
                requests::status.eq(RequestStatus::Pending.as_str()),
                requests::created_by.eq(created_by),
            ))
            .execute(conn)?;
        let request_id: i64 = conn.last_insert_rowid()?;

        if block.block_head_id != created_by {
            create_notification(
                conn,
                &NotificationEvent::new_request(
                    block.block_head_id,
                    created_by,
                    request_id,
                    request_number,
                    requester_name,
                ),
            )?;
        }

        info!(request_id, "Request created");
        Ok(request_id)
    })
}

/// Updates a request's details.
///
/// Only requests that have not yet been decided (`Pending` or
/// `Under Review`) can be edited.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist, a rule error
/// when the request is already decided, or an error if a write fails.
#[allow(clippy::too_many_arguments)]
pub fn update_request(
    conn: &mut SqliteConnection,
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
    conn.transaction(|conn| {
        let request: RequestData = load_request(conn, request_id)?;
        let status: RequestStatus = RequestStatus::parse(&request.status)?;
        if !matches!(status, RequestStatus::Pending | RequestStatus::UnderReview) {
            return Err(PersistenceError::Rule(
                quarters_core::CoreError::TransitionNotAllowed {
                    from: status,
                    action: "edit",
                },
            ));
        }

        let check_in: String = format_date(check_in_date)?;
        let check_out: String = format_date(check_out_date)?;
        diesel::update(requests::table.find(request_id))
            .set((
                requests::requester_name.eq(requester_name),
                requests::requester_contact.eq(requester_contact),
                requests::purpose.eq(purpose),
                requests::room_type_preference.eq(room_type_preference.as_str()),
                requests::check_in_date.eq(&check_in),
                requests::check_out_date.eq(&check_out),
                requests::number_of_occupants.eq(number_of_occupants),
                requests::special_requirements.eq(special_requirements),
                requests::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        info!(request_id, "Request updated");
        Ok(())
    })
}

/// Appends a note to a request.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist or an error if
/// the insert fails.
pub fn add_request_note(
    conn: &mut SqliteConnection,
    request_id: i64,
    author_id: i64,
    message: &str,
) -> Result<i64, PersistenceError> {
    load_request(conn, request_id)?;

    diesel::insert_into(request_notes::table)
        .values((
            request_notes::request_id.eq(request_id),
            request_notes::author_id.eq(author_id),
            request_notes::message.eq(message),
        ))
        .execute(conn)?;

    conn.last_insert_rowid()
}

/// Assigns beds in a room to a request, approving it.
///
/// Validates the room against the request's preferred block, the beds
/// against the room, and every bed's availability, all inside the
/// transaction that occupies them. The requester becomes the occupant of
/// each assigned bed. The admin who handled the request, if any, is
/// notified.
///
/// # Errors
///
/// Returns a not-found error for a missing request, room, or bed; a rule
/// error for an illegal transition or failed assignment validation; or an
/// error if a write fails.
pub fn assign_beds_to_request(
    conn: &mut SqliteConnection,
    request_id: i64,
    room_id: i64,
    bed_ids: &[i64],
    block_head_id: i64,
) -> Result<(), PersistenceError> {
    info!(
        "Assigning {} beds in room {} to request {}",
        bed_ids.len(),
        room_id,
        request_id
    );

    conn.transaction(|conn| {
        let request: RequestData = load_request(conn, request_id)?;
        let status: RequestStatus = RequestStatus::parse(&request.status)?;
        let transition: RequestTransition =
            request_transition(status, RequestAction::AssignBeds)?;

        let room: RoomData = load_room(conn, room_id)?;
        let rows: Vec<BedData> = beds::table
            .filter(beds::bed_id.eq_any(bed_ids))
            .select(BedData::as_select())
            .load(conn)?;
        for bed_id in bed_ids {
            if !rows.iter().any(|bed| bed.bed_id == *bed_id) {
                return Err(PersistenceError::BedNotFound(*bed_id));
            }
        }

        let offered: Vec<BedForAssignment> = rows
            .iter()
            .map(|bed| {
                Ok(BedForAssignment {
                    bed_id: bed.bed_id,
                    room_id: bed.room_id,
                    bed_number: bed.bed_number.clone(),
                    status: BedStatus::parse(&bed.status)?,
                })
            })
            .collect::<Result<Vec<BedForAssignment>, PersistenceError>>()?;

        let reserve: CounterDelta = validate_bed_assignment(
            request.block_preference_id,
            room_id,
            room.block_id,
            request.number_of_occupants,
            &offered,
        )?;

        diesel::update(beds::table.filter(beds::bed_id.eq_any(bed_ids)))
            .set((
                beds::status.eq(BedStatus::Occupied.as_str()),
                beds::occupant_name.eq(&request.requester_name),
                beds::occupant_contact.eq(&request.requester_contact),
                beds::occupant_check_in.eq(&request.check_in_date),
                beds::occupant_check_out.eq(&request.check_out_date),
                beds::occupant_purpose.eq(&request.purpose),
                beds::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        for bed_id in bed_ids {
            diesel::insert_into(request_beds::table)
                .values((
                    request_beds::request_id.eq(request_id),
                    request_beds::bed_id.eq(*bed_id),
                ))
                .execute(conn)?;
        }

        diesel::update(requests::table.find(request_id))
            .set((
                requests::status.eq(transition.new_status.as_str()),
                requests::assigned_room_id.eq(Some(room_id)),
                requests::handled_by_block_head_id.eq(Some(block_head_id)),
                requests::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        let delta: CounterDelta = reserve.then(refresh_room_status(conn, room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;

        if let Some(admin_id) = request.handled_by_admin_id {
            create_notification(
                conn,
                &NotificationEvent::room_assigned(
                    admin_id,
                    block_head_id,
                    request_id,
                    &request.request_number,
                    &room.room_number,
                ),
            )?;
        }

        info!(request_id, room_id, "Beds assigned, request approved");
        Ok(())
    })
}

/// Rejects a request with a reason.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist, a rule error
/// for an illegal transition, or an error if a write fails.
pub fn reject_request(
    conn: &mut SqliteConnection,
    request_id: i64,
    reason: &str,
    block_head_id: i64,
) -> Result<(), PersistenceError> {
    info!("Rejecting request ID: {}", request_id);

    conn.transaction(|conn| {
        let request: RequestData = load_request(conn, request_id)?;
        let status: RequestStatus = RequestStatus::parse(&request.status)?;
        let transition: RequestTransition = request_transition(status, RequestAction::Reject)?;

        diesel::update(requests::table.find(request_id))
            .set((
                requests::status.eq(transition.new_status.as_str()),
                requests::rejection_reason.eq(Some(reason)),
                requests::handled_by_block_head_id.eq(Some(block_head_id)),
                requests::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        if let Some(admin_id) = request.handled_by_admin_id {
            create_notification(
                conn,
                &NotificationEvent::request_rejected(
                    admin_id,
                    block_head_id,
                    request_id,
                    &request.request_number,
                    reason,
                ),
            )?;
        }

        info!(request_id, "Request rejected");
        Ok(())
    })
}

/// Cancels a request.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist, a rule error
/// for an illegal transition, or an error if a write fails.
pub fn cancel_request(
    conn: &mut SqliteConnection,
    request_id: i64,
    actor_id: i64,
) -> Result<(), PersistenceError> {
    info!("Cancelling request ID: {}", request_id);

    conn.transaction(|conn| {
        let request: RequestData = load_request(conn, request_id)?;
        let status: RequestStatus = RequestStatus::parse(&request.status)?;
        let transition: RequestTransition = request_transition(status, RequestAction::Cancel)?;

        diesel::update(requests::table.find(request_id))
            .set((
                requests::status.eq(transition.new_status.as_str()),
                requests::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        if let Some(block_head_id) = request.handled_by_block_head_id
            && block_head_id != actor_id
        {
            create_notification(
                conn,
                &NotificationEvent::request_update(
                    block_head_id,
                    actor_id,
                    request_id,
                    &request.request_number,
                    transition.new_status.as_str(),
                ),
            )?;
        }

        info!(request_id, "Request cancelled");
        Ok(())
    })
}

/// Moves a request directly to another status.
///
/// Transitions into `Completed` or `Rejected` release the request's
/// assigned beds: each bed returns to `Available` with its occupant
/// cleared, the assignment links are removed, the room status is
/// re-derived, and the block's available-bed counter is credited by the
/// number of beds actually freed, all in this transaction.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist, a rule error
/// for an illegal transition, or an error if a write fails.
pub fn set_request_status(
    conn: &mut SqliteConnection,
    request_id: i64,
    new_status: RequestStatus,
    actor_id: i64,
    actor_is_admin: bool,
) -> Result<(), PersistenceError> {
    info!(
        "Updating request ID: {} to status '{}'",
        request_id, new_status
    );

    conn.transaction(|conn| {
        let request: RequestData = load_request(conn, request_id)?;
        let status: RequestStatus = RequestStatus::parse(&request.status)?;
        let transition: RequestTransition =
            request_transition(status, RequestAction::SetStatus(new_status))?;

        if transition.releases_beds {
            release_assigned_beds(conn, &request)?;
        }

        diesel::update(requests::table.find(request_id))
            .set((
                requests::status.eq(transition.new_status.as_str()),
                requests::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;
        if actor_is_admin {
            diesel::update(requests::table.find(request_id))
                .set(requests::handled_by_admin_id.eq(Some(actor_id)))
                .execute(conn)?;
        }

        if let Some(block_head_id) = request.handled_by_block_head_id
            && block_head_id != actor_id
        {
            create_notification(
                conn,
                &NotificationEvent::request_update(
                    block_head_id,
                    actor_id,
                    request_id,
                    &request.request_number,
                    transition.new_status.as_str(),
                ),
            )?;
        }

        info!(request_id, status = %transition.new_status, "Request status updated");
        Ok(())
    })
}

/// Frees every bed assigned to the request and credits the block's
/// available-bed counter by the number actually freed.
fn release_assigned_beds(
    conn: &mut SqliteConnection,
    request: &RequestData,
) -> Result<(), PersistenceError> {
    let bed_ids: Vec<i64> = list_assigned_bed_ids(conn, request.request_id)?;
    if bed_ids.is_empty() && request.assigned_room_id.is_none() {
        return Ok(());
    }

    let mut delta: CounterDelta = CounterDelta::default();
    if !bed_ids.is_empty() {
        let rows: Vec<BedData> = beds::table
            .filter(beds::bed_id.eq_any(&bed_ids))
            .select(BedData::as_select())
            .load(conn)?;
        for bed in &rows {
            let current: BedStatus = BedStatus::parse(&bed.status)?;
            delta = delta.then(CounterDelta::bed_status_changed(
                current,
                BedStatus::Available,
            ));
        }

        diesel::update(beds::table.filter(beds::bed_id.eq_any(&bed_ids)))
            .set((
                beds::status.eq(BedStatus::Available.as_str()),
                beds::occupant_name.eq(None::<String>),
                beds::occupant_contact.eq(None::<String>),
                beds::occupant_check_in.eq(None::<String>),
                beds::occupant_check_out.eq(None::<String>),
                beds::occupant_purpose.eq(None::<String>),
                beds::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;

        diesel::delete(request_beds::table)
            .filter(request_beds::request_id.eq(request.request_id))
            .execute(conn)?;
    }

    if let Some(room_id) = request.assigned_room_id {
        let room: RoomData = load_room(conn, room_id)?;
        delta = delta.then(refresh_room_status(conn, room_id)?);
        apply_counter_delta(conn, room.block_id, delta)?;
    }

    diesel::update(requests::table.find(request.request_id))
        .set(requests::assigned_room_id.eq(None::<i64>))
        .execute(conn)?;

    info!(
        request_id = request.request_id,
        released = bed_ids.len(),
        "Released assigned beds"
    );
    Ok(())
}

/// Deletes a request.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist or a rule
/// error while it still holds an assigned room or beds.
pub fn delete_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete request ID: {}", request_id);

    conn.transaction(|conn| {
        let request: RequestData = load_request(conn, request_id)?;
        let bed_ids: Vec<i64> = list_assigned_bed_ids(conn, request_id)?;
        can_delete_request(request.assigned_room_id.is_some(), bed_ids.len())?;

        diesel::delete(requests::table.find(request_id)).execute(conn)?;

        info!("Deleted request ID: {}", request_id);
        Ok(())
    })
}
