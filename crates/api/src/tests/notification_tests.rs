// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification inbox handler tests.

use crate::error::ApiError;
use crate::handlers;

use super::helpers::{seed_admin, seed_block, seed_block_head, seed_request, seed_system_admin, test_db};

#[test]
fn a_new_request_lands_in_the_block_heads_inbox() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let admin = seed_admin(&mut db, "admin@example.com");
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    seed_request(&mut db, &admin, block.block_id);

    let inbox = handlers::list_notifications(&mut db, &head).expect("Inbox should list");
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications.len(), 1);
    assert_eq!(inbox.notifications[0].kind, "New Request");
    assert_eq!(inbox.notifications[0].sender_id, admin.user_id);

    let admin_inbox = handlers::list_notifications(&mut db, &admin).expect("Inbox should list");
    assert_eq!(admin_inbox.unread_count, 0);
}

#[test]
fn marking_read_is_scoped_to_the_recipient() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let admin = seed_admin(&mut db, "admin@example.com");
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    seed_request(&mut db, &admin, block.block_id);

    let inbox = handlers::list_notifications(&mut db, &head).expect("Inbox should list");
    let notification_id: i64 = inbox.notifications[0].notification_id;

    let err = handlers::mark_notification_read(&mut db, &admin, notification_id)
        .expect_err("Another user's notification should be untouchable");
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    handlers::mark_notification_read(&mut db, &head, notification_id)
        .expect("The recipient should mark it read");
    let refreshed = handlers::list_notifications(&mut db, &head).expect("Inbox should list");
    assert_eq!(refreshed.unread_count, 0);
    assert!(refreshed.notifications[0].is_read);
}

#[test]
fn mark_all_reports_how_many_were_flipped() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let admin = seed_admin(&mut db, "admin@example.com");
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    seed_request(&mut db, &admin, block.block_id);
    seed_request(&mut db, &admin, block.block_id);

    let flipped = handlers::mark_all_notifications_read(&mut db, &head)
        .expect("Mark-all should succeed");
    assert_eq!(flipped, 2);

    let again = handlers::mark_all_notifications_read(&mut db, &head)
        .expect("A second pass should be a no-op");
    assert_eq!(again, 0);
}

#[test]
fn deleting_is_scoped_to_the_recipient() {
    let mut db = test_db();
    let sysadmin = seed_system_admin(&mut db);
    let admin = seed_admin(&mut db, "admin@example.com");
    let head = seed_block_head(&mut db, "head@example.com");
    let block = seed_block(&mut db, &sysadmin, "Block A", &head);
    seed_request(&mut db, &admin, block.block_id);

    let inbox = handlers::list_notifications(&mut db, &head).expect("Inbox should list");
    let notification_id: i64 = inbox.notifications[0].notification_id;

    let err = handlers::delete_notification(&mut db, &admin, notification_id)
        .expect_err("Another user's notification should be untouchable");
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    handlers::delete_notification(&mut db, &head, notification_id)
        .expect("The recipient should delete it");
    let refreshed = handlers::list_notifications(&mut db, &head).expect("Inbox should list");
    assert!(refreshed.notifications.is_empty());
}
