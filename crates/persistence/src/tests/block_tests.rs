// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::BlockType;

use crate::tests::{
    create_admin, create_block_head, create_test_bed, create_test_block, create_test_room,
    test_db, test_occupant,
};
use crate::{BlockData, BlockStats, Persistence, PersistenceError};

#[test]
fn block_head_role_is_required() {
    let mut db: Persistence = test_db();
    let admin_id: i64 = create_admin(&mut db, "admin@example.com");

    let result = db.create_block("A Block", BlockType::ABlock, None, admin_id, admin_id);
    assert!(matches!(result, Err(PersistenceError::NotABlockHead(_))));
}

#[test]
fn duplicate_block_name_is_rejected() {
    let mut db: Persistence = test_db();
    let head_id: i64 = create_block_head(&mut db, "head@example.com");
    let admin_id: i64 = create_admin(&mut db, "admin@example.com");
    create_test_block(&mut db, "A Block", head_id, admin_id);

    let result = db.create_block("A Block", BlockType::BBlock, None, head_id, admin_id);
    assert!(matches!(
        result,
        Err(PersistenceError::DuplicateBlockName(_))
    ));
}

#[test]
fn block_with_rooms_cannot_be_deleted() {
    let mut db: Persistence = test_db();
    let head_id: i64 = create_block_head(&mut db, "head@example.com");
    let admin_id: i64 = create_admin(&mut db, "admin@example.com");
    let block_id: i64 = create_test_block(&mut db, "A Block", head_id, admin_id);
    create_test_room(&mut db, block_id, "101", admin_id);

    let result = db.delete_block(block_id);
    assert!(matches!(result, Err(PersistenceError::BlockHasRooms(_))));
}

#[test]
fn counters_follow_room_and_bed_lifecycle() {
    let mut db: Persistence = test_db();
    let head_id: i64 = create_block_head(&mut db, "head@example.com");
    let admin_id: i64 = create_admin(&mut db, "admin@example.com");
    let block_id: i64 = create_test_block(&mut db, "A Block", head_id, admin_id);

    let room_id: i64 = create_test_room(&mut db, block_id, "101", admin_id);
    let block: BlockData = db.get_block(block_id).expect("Block should exist");
    assert_eq!(block.total_rooms, 1);
    assert_eq!(block.available_rooms, 1);

    let first_bed: i64 = create_test_bed(&mut db, room_id, "101-A", admin_id);
    let second_bed: i64 = create_test_bed(&mut db, room_id, "101-B", admin_id);
    let block: BlockData = db.get_block(block_id).expect("Block should exist");
    assert_eq!(block.total_beds, 2);
    assert_eq!(block.available_beds, 2);

    db.assign_bed(first_bed, &test_occupant())
        .expect("First assignment should succeed");
    let block: BlockData = db.get_block(block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 1);
    assert_eq!(block.available_rooms, 0);
    let room = db.get_room(room_id).expect("Room should exist");
    assert_eq!(room.status, "Partially Occupied");

    db.assign_bed(second_bed, &test_occupant())
        .expect("Second assignment should succeed");
    let block: BlockData = db.get_block(block_id).expect("Block should exist");
    assert_eq!(block.available_beds, 0);
    assert_eq!(block.available_rooms, 0);
    let room = db.get_room(room_id).expect("Room should exist");
    assert_eq!(room.status, "Fully Occupied");

    db.delete_bed(second_bed)
        .expect_err("Occupied bed must not be deletable");
}

#[test]
fn block_stats_are_computed_from_rows() {
    let mut db: Persistence = test_db();
    let head_id: i64 = create_block_head(&mut db, "head@example.com");
    let admin_id: i64 = create_admin(&mut db, "admin@example.com");
    let block_id: i64 = create_test_block(&mut db, "A Block", head_id, admin_id);
    let room_id: i64 = create_test_room(&mut db, block_id, "101", admin_id);
    let bed_id: i64 = create_test_bed(&mut db, room_id, "101-A", admin_id);
    create_test_bed(&mut db, room_id, "101-B", admin_id);

    db.assign_bed(bed_id, &test_occupant())
        .expect("Assignment should succeed");

    let stats: BlockStats = db.get_block_stats(block_id).expect("Stats should build");
    assert_eq!(stats.total_beds, 2);
    assert_eq!(stats.occupied_beds, 1);
    assert_eq!(stats.available_beds, 1);
    assert!((stats.occupancy_rate - 50.0).abs() < f64::EPSILON);
    assert_eq!(stats.rooms_by_status.len(), 1);
    assert_eq!(stats.rooms_by_status[0].label, "Partially Occupied");
}

#[test]
fn missing_block_reports_not_found() {
    let mut db: Persistence = test_db();
    let result = db.get_block(999);
    assert!(matches!(result, Err(PersistenceError::BlockNotFound(999))));
}
