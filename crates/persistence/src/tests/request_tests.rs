// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::{RequestStatus, RoomType};
use time::Month;

use crate::tests::{
    create_admin, create_block_head, create_test_bed, create_test_block, create_test_room,
    test_date, test_db,
};
use crate::{BlockData, Persistence, PersistenceError, RequestData};

struct Fixture {
    head_id: i64,
    admin_id: i64,
    block_id: i64,
    room_id: i64,
    bed_ids: Vec<i64>,
    request_id: i64,
}

fn fixture(db: &mut Persistence, occupants: i32) -> Fixture {
    let head_id: i64 = create_block_head(db, "head@example.com");
    let admin_id: i64 = create_admin(db, "admin@example.com");
    let block_id: i64 = create_test_block(db, "A Block", head_id, admin_id);
    let room_id: i64 = create_test_room(db, block_id, "101", admin_id);
    let bed_ids: Vec<i64> = vec![
        create_test_bed(db, room_id, "101-A", admin_id),
        create_test_bed(db, room_id, "101-B", admin_id),
    ];
    let request_id: i64 = db
        .create_request(
            "REQ-1000-1",
            "Amira Hassan",
            "amira@example.com",
            "Official visit",
            block_id,
            RoomType::Double,
            test_date(2026, Month::March, 1),
            test_date(2026, Month::March, 15),
            occupants,
            None,
            admin_id,
        )
        .expect("Request should be created");
    Fixture {
        head_id,
        admin_id,
        block_id,
        room_id,
        bed_ids,
        request_id,
    }
}

#[test]
fn new_request_is_pending_and_notifies_the_block_head() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);

    let request: RequestData = db.get_request(fx.request_id).expect("Request should exist");
    assert_eq!(request.status, "Pending");
    assert_eq!(request.request_number, "REQ-1000-1");

    let inbox = db
        .list_notifications_for_recipient(fx.head_id)
        .expect("Inbox should load");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, "New Request");
}

#[test]
fn assignment_approves_and_occupies_beds() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 2);

    db.assign_beds_to_request(fx.request_id, fx.room_id, &fx.bed_ids, fx.head_id)
        .expect("Assignment should succeed");

    let request: RequestData = db.get_request(fx.request_id).expect("Request should exist");
    assert_eq!(request.status, "Approved");
    assert_eq!(request.assigned_room_id, Some(fx.room_id));
    assert_eq!(request.handled_by_block_head_id, Some(fx.head_id));

    for bed_id in &fx.bed_ids {
        let bed = db.get_bed(*bed_id).expect("Bed should exist");
        assert_eq!(bed.status, "Occupied");
        assert_eq!(bed.occupant_name.as_deref(), Some("Amira Hassan"));
    }

    let block: BlockData = db.get_block(fx.block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 0);
    assert_eq!(block.available_rooms, 0);

    let assigned = db
        .list_assigned_bed_ids(fx.request_id)
        .expect("Links should load");
    assert_eq!(assigned.len(), 2);
}

#[test]
fn assignment_needs_enough_available_beds() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 2);

    let result = db.assign_beds_to_request(fx.request_id, fx.room_id, &fx.bed_ids[..1], fx.head_id);
    assert!(matches!(result, Err(PersistenceError::Rule(_))));

    let request: RequestData = db.get_request(fx.request_id).expect("Request should exist");
    assert_eq!(request.status, "Pending");
}

#[test]
fn assignment_rejects_a_room_outside_the_preferred_block() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);
    let other_block: i64 = create_test_block(&mut db, "B Block", fx.head_id, fx.admin_id);
    let other_room: i64 = create_test_room(&mut db, other_block, "201", fx.admin_id);
    let other_bed: i64 = create_test_bed(&mut db, other_room, "201-A", fx.admin_id);

    let result = db.assign_beds_to_request(fx.request_id, other_room, &[other_bed], fx.head_id);
    assert!(matches!(result, Err(PersistenceError::Rule(_))));
}

#[test]
fn completion_releases_beds_and_restores_counters() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 2);
    db.assign_beds_to_request(fx.request_id, fx.room_id, &fx.bed_ids, fx.head_id)
        .expect("Assignment should succeed");

    db.set_request_status(fx.request_id, RequestStatus::Completed, fx.admin_id, true)
        .expect("Completion should succeed");

    let request: RequestData = db.get_request(fx.request_id).expect("Request should exist");
    assert_eq!(request.status, "Completed");
    assert_eq!(request.assigned_room_id, None);
    assert_eq!(request.handled_by_admin_id, Some(fx.admin_id));

    for bed_id in &fx.bed_ids {
        let bed = db.get_bed(*bed_id).expect("Bed should exist");
        assert_eq!(bed.status, "Available");
        assert!(bed.occupant_name.is_none());
    }

    let block: BlockData = db.get_block(fx.block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 2);
    assert_eq!(block.available_rooms, 1);

    let room = db.get_room(fx.room_id).expect("Room should exist");
    assert_eq!(room.status, "Available");

    assert!(
        db.list_assigned_bed_ids(fx.request_id)
            .expect("Links should load")
            .is_empty()
    );
}

#[test]
fn rejection_after_approval_also_releases_beds() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);
    db.assign_beds_to_request(fx.request_id, fx.room_id, &fx.bed_ids[..1], fx.head_id)
        .expect("Assignment should succeed");

    db.set_request_status(fx.request_id, RequestStatus::Rejected, fx.head_id, false)
        .expect("Rejection should succeed");

    let block: BlockData = db.get_block(fx.block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 2);
}

#[test]
fn approved_request_cannot_be_cancelled() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);
    db.assign_beds_to_request(fx.request_id, fx.room_id, &fx.bed_ids[..1], fx.head_id)
        .expect("Assignment should succeed");

    let result = db.cancel_request(fx.request_id, fx.admin_id);
    assert!(matches!(result, Err(PersistenceError::Rule(_))));
}

#[test]
fn decided_request_cannot_be_edited() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);
    db.reject_request(fx.request_id, "No availability", fx.head_id)
        .expect("Rejection should succeed");

    let result = db.update_request(
        fx.request_id,
        "Amira Hassan",
        "amira@example.com",
        "Official visit",
        RoomType::Single,
        test_date(2026, Month::April, 1),
        test_date(2026, Month::April, 5),
        1,
        None,
    );
    assert!(matches!(result, Err(PersistenceError::Rule(_))));
}

#[test]
fn request_with_assignments_cannot_be_deleted() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);
    db.assign_beds_to_request(fx.request_id, fx.room_id, &fx.bed_ids[..1], fx.head_id)
        .expect("Assignment should succeed");

    let result = db.delete_request(fx.request_id);
    assert!(matches!(result, Err(PersistenceError::Rule(_))));

    db.set_request_status(fx.request_id, RequestStatus::Completed, fx.admin_id, true)
        .expect("Completion should succeed");
    db.delete_request(fx.request_id)
        .expect("Completed request should be deletable");
}

#[test]
fn block_head_sees_requests_for_their_blocks_only() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);
    let other_head: i64 = create_block_head(&mut db, "other@example.com");
    create_test_block(&mut db, "B Block", other_head, fx.admin_id);

    let mine = db
        .list_requests_for_block_head(fx.head_id)
        .expect("List should load");
    assert_eq!(mine.len(), 1);

    let theirs = db
        .list_requests_for_block_head(other_head)
        .expect("List should load");
    assert!(theirs.is_empty());
}

#[test]
fn notes_are_listed_in_order() {
    let mut db: Persistence = test_db();
    let fx: Fixture = fixture(&mut db, 1);

    db.add_request_note(fx.request_id, fx.head_id, "Checking availability")
        .expect("Note should be added");
    db.add_request_note(fx.request_id, fx.admin_id, "Please expedite")
        .expect("Note should be added");

    let notes = db
        .list_request_notes(fx.request_id)
        .expect("Notes should load");
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].message, "Checking availability");
}
