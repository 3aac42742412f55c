// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod block_tests;
mod request_tests;
mod user_tests;

use quarters_domain::{BlockType, Occupant, RoomType};
use time::{Date, Month};

use crate::Persistence;

pub fn test_db() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database should initialize")
}

pub fn test_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn create_block_head(db: &mut Persistence, email: &str) -> i64 {
    db.create_user("Block Head", email, "sturdy-password", "blockHead", true)
        .expect("Block head should be created")
}

pub fn create_admin(db: &mut Persistence, email: &str) -> i64 {
    db.create_user("Admin", email, "sturdy-password", "admin", true)
        .expect("Admin should be created")
}

pub fn create_test_block(db: &mut Persistence, name: &str, head_id: i64, creator_id: i64) -> i64 {
    db.create_block(name, BlockType::ABlock, None, head_id, creator_id)
        .expect("Block should be created")
}

pub fn create_test_room(db: &mut Persistence, block_id: i64, number: &str, creator_id: i64) -> i64 {
    db.create_room(
        block_id,
        number,
        RoomType::Double,
        2,
        None,
        &[],
        150.0,
        creator_id,
    )
    .expect("Room should be created")
}

pub fn create_test_bed(db: &mut Persistence, room_id: i64, number: &str, creator_id: i64) -> i64 {
    db.create_bed(
        room_id,
        number,
        quarters_domain::BedStatus::Available,
        creator_id,
    )
    .expect("Bed should be created")
}

pub fn test_occupant() -> Occupant {
    Occupant {
        name: String::from("Amira Hassan"),
        contact_info: String::from("amira@example.com"),
        check_in_date: test_date(2026, Month::March, 1),
        check_out_date: test_date(2026, Month::March, 15),
        purpose: String::from("Official visit"),
    }
}
