// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use quarters_notify::NotificationEvent;
use tracing::debug;

use crate::backend::LastInsertRowId;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Stores a notification event.
///
/// Workflow mutations call this inside their own transaction; a failed
/// notification write rolls the whole workflow back.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_notification(
    conn: &mut SqliteConnection,
    event: &NotificationEvent,
) -> Result<i64, PersistenceError> {
    debug!(
        recipient_id = event.recipient_id,
        kind = %event.kind,
        "Creating notification"
    );

    diesel::insert_into(notifications::table)
        .values((
            notifications::recipient_id.eq(event.recipient_id),
            notifications::sender_id.eq(event.sender_id),
            notifications::kind.eq(event.kind.as_str()),
            notifications::title.eq(&event.title),
            notifications::message.eq(&event.message),
            notifications::related_model.eq(event.related.as_ref().map(|r| r.model.as_str())),
            notifications::related_id.eq(event.related.as_ref().map(|r| r.id)),
        ))
        .execute(conn)?;

    conn.last_insert_rowid()
}

/// Marks one of the recipient's notifications as read.
///
/// # Errors
///
/// Returns `NotificationNotFound` if no notification with this id belongs
/// to the recipient.
pub fn mark_notification_read(
    conn: &mut SqliteConnection,
    notification_id: i64,
    recipient_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(
        notifications::table
            .find(notification_id)
            .filter(notifications::recipient_id.eq(recipient_id)),
    )
    .set(notifications::is_read.eq(true))
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotificationNotFound(notification_id));
    }
    Ok(())
}

/// Marks all of the recipient's notifications as read.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_all_notifications_read(
    conn: &mut SqliteConnection,
    recipient_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        notifications::table
            .filter(notifications::recipient_id.eq(recipient_id))
            .filter(notifications::is_read.eq(false)),
    )
    .set(notifications::is_read.eq(true))
    .execute(conn)?)
}

/// Deletes one of the recipient's notifications.
///
/// # Errors
///
/// Returns `NotificationNotFound` if no notification with this id belongs
/// to the recipient.
pub fn delete_notification(
    conn: &mut SqliteConnection,
    notification_id: i64,
    recipient_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(
        notifications::table
            .find(notification_id)
            .filter(notifications::recipient_id.eq(recipient_id)),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotificationNotFound(notification_id));
    }
    Ok(())
}
