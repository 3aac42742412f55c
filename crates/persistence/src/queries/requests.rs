// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accommodation request queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_domain::RequestStatus;

use crate::data_models::{RequestData, RequestNoteData};
use crate::diesel_schema::{blocks, request_beds, request_notes, requests};
use crate::error::PersistenceError;

/// Gets a request by id.
///
/// # Errors
///
/// Returns `RequestNotFound` if no request with this id exists.
pub fn get_request(
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

/// Lists requests, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_requests(
    conn: &mut SqliteConnection,
    status: Option<RequestStatus>,
) -> Result<Vec<RequestData>, PersistenceError> {
    let mut query = requests::table.order(requests::created_at.desc()).into_boxed();
    if let Some(status) = status {
        query = query.filter(requests::status.eq(status.as_str()));
    }
    Ok(query.select(RequestData::as_select()).load(conn)?)
}

/// Lists requests whose preferred block is headed by the given user,
/// newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_requests_for_block_head(
    conn: &mut SqliteConnection,
    block_head_id: i64,
) -> Result<Vec<RequestData>, PersistenceError> {
    Ok(requests::table
        .inner_join(blocks::table)
        .filter(blocks::block_head_id.eq(block_head_id))
        .order(requests::created_at.desc())
        .select(RequestData::as_select())
        .load(conn)?)
}

/// Lists requests created by the given user, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_requests_created_by(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<RequestData>, PersistenceError> {
    Ok(requests::table
        .filter(requests::created_by.eq(user_id))
        .order(requests::created_at.desc())
        .select(RequestData::as_select())
        .load(conn)?)
}

/// Lists the bed ids currently assigned to a request.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assigned_bed_ids(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(request_beds::table
        .filter(request_beds::request_id.eq(request_id))
        .select(request_beds::bed_id)
        .load(conn)?)
}

/// Lists a request's notes, oldest first.
///
/// # Errors
///
/// Returns `RequestNotFound` if the request does not exist or an error if
/// the query fails.
pub fn list_request_notes(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Vec<RequestNoteData>, PersistenceError> {
    get_request(conn, request_id)?;

    Ok(request_notes::table
        .filter(request_notes::request_id.eq(request_id))
        .order((request_notes::created_at.asc(), request_notes::note_id.asc()))
        .select(RequestNoteData::as_select())
        .load(conn)?)
}
