// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::LastInsertRowId;
use crate::diesel_schema::{blocks, sessions, users};
use crate::error::PersistenceError;
use crate::mutations::support::current_timestamp;
use crate::queries::users::get_user_by_email;

/// Creates a new user.
///
/// The email is normalized to lowercase for case-insensitive uniqueness
/// and the password is hashed with bcrypt before storage.
///
/// # Errors
///
/// Returns `DuplicateEmail` if a user with this email already exists, or
/// an error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
    is_active: bool,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    info!(
        "Creating user with email: {}, role: {}",
        normalized_email, role
    );

    if get_user_by_email(conn, &normalized_email)?.is_some() {
        return Err(PersistenceError::DuplicateEmail(normalized_email));
    }

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::name.eq(name),
            users::email.eq(&normalized_email),
            users::password_hash.eq(&password_hash),
            users::role.eq(role),
            users::is_active.eq(is_active),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.last_insert_rowid()?;
    info!(user_id, "User created");
    Ok(user_id)
}

/// Updates a user's profile fields.
///
/// # Errors
///
/// Returns `UserNotFound` if the user does not exist and `DuplicateEmail`
/// if the new email belongs to someone else.
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
    email: &str,
    role: &str,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    if let Some(existing) = get_user_by_email(conn, &normalized_email)?
        && existing.user_id != user_id
    {
        return Err(PersistenceError::DuplicateEmail(normalized_email));
    }

    let rows_affected: usize = diesel::update(users::table.find(user_id))
        .set((
            users::name.eq(name),
            users::email.eq(&normalized_email),
            users::role.eq(role),
            users::is_active.eq(is_active),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::UserNotFound(user_id));
    }

    info!(user_id, "User updated");
    Ok(())
}

/// Updates a user's password and invalidates all of their sessions.
///
/// # Errors
///
/// Returns an error if hashing or either write fails.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for user ID: {}", user_id);

    let password_hash: String = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    conn.transaction(|conn| {
        diesel::update(users::table.find(user_id))
            .set(users::password_hash.eq(&password_hash))
            .execute(conn)?;

        diesel::delete(sessions::table)
            .filter(sessions::user_id.eq(user_id))
            .execute(conn)?;

        Ok(())
    })
}

/// Updates the last login timestamp for a user.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for user ID: {}", user_id);

    diesel::update(users::table.find(user_id))
        .set(users::last_login_at.eq(diesel::dsl::sql::<
            diesel::sql_types::Nullable<diesel::sql_types::Text>,
        >("CURRENT_TIMESTAMP")))
        .execute(conn)?;

    Ok(())
}

/// Deletes a user.
///
/// A user who heads a block cannot be deleted; reassign the block first.
/// Their sessions are removed by the cascade.
///
/// # Errors
///
/// Returns `UserReferenced` if the user heads a block or is referenced by
/// other records, and `UserNotFound` if they do not exist.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete user ID: {}", user_id);

    let headed_blocks: i64 = blocks::table
        .filter(blocks::block_head_id.eq(user_id))
        .count()
        .get_result(conn)?;
    if headed_blocks > 0 {
        return Err(PersistenceError::UserReferenced(user_id));
    }

    let result: Result<usize, diesel::result::Error> =
        diesel::delete(users::table.find(user_id)).execute(conn);

    match result {
        Ok(0) => Err(PersistenceError::UserNotFound(user_id)),
        Ok(_) => {
            info!("Deleted user ID: {}", user_id);
            Ok(())
        }
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => Err(PersistenceError::UserReferenced(user_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Creates a new session for a user.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for user ID: {} with expiration: {}",
        user_id, expires_at
    );

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.last_insert_rowid()?;
    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Updating last_activity_at for session ID: {}", session_id);

    diesel::update(sessions::table.find(session_id))
        .set(sessions::last_activity_at.eq(current_timestamp()))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token. Used for logout.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(current_timestamp()))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
