// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{SessionData, UserData};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Gets a user by id.
///
/// # Errors
///
/// Returns `UserNotFound` if no user with this id exists.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<UserData, PersistenceError> {
    users::table
        .find(user_id)
        .select(UserData::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::UserNotFound(user_id))
}

/// Looks a user up by email. The lookup is case-insensitive because
/// emails are stored lowercased.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();
    debug!("Looking up user by email: {}", normalized_email);

    Ok(users::table
        .filter(users::email.eq(&normalized_email))
        .select(UserData::as_select())
        .first(conn)
        .optional()?)
}

/// Lists all users, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<UserData>, PersistenceError> {
    Ok(users::table
        .order(users::name.asc())
        .select(UserData::as_select())
        .load(conn)?)
}

/// Counts all user accounts. Used to decide whether to bootstrap the
/// first administrator.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}

/// Looks a session up by its token.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    Ok(sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionData::as_select())
        .first(conn)
        .optional()?)
}
