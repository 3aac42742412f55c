// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification queries.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::NotificationData;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Lists a recipient's notifications, unread first, newest first within
/// each group.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notifications_for_recipient(
    conn: &mut SqliteConnection,
    recipient_id: i64,
) -> Result<Vec<NotificationData>, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::recipient_id.eq(recipient_id))
        .order((
            notifications::is_read.asc(),
            notifications::created_at.desc(),
        ))
        .select(NotificationData::as_select())
        .load(conn)?)
}

/// Counts a recipient's unread notifications.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_unread_notifications(
    conn: &mut SqliteConnection,
    recipient_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(notifications::table
        .filter(notifications::recipient_id.eq(recipient_id))
        .filter(notifications::is_read.eq(false))
        .count()
        .get_result(conn)?)
}
