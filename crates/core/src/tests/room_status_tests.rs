// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::{BedStatus, RoomStatus};

use crate::derive_room_status;

use BedStatus::{Available, Occupied, UnderMaintenance};

#[test]
fn room_with_no_beds_keeps_its_current_status() {
    assert_eq!(derive_room_status(&[]), None);
}

#[test]
fn all_beds_under_maintenance_puts_room_under_maintenance() {
    assert_eq!(
        derive_room_status(&[UnderMaintenance, UnderMaintenance]),
        Some(RoomStatus::UnderMaintenance)
    );
}

#[test]
fn all_non_maintenance_beds_occupied_is_fully_occupied() {
    assert_eq!(
        derive_room_status(&[Occupied, Occupied]),
        Some(RoomStatus::FullyOccupied)
    );
    // A maintenance bed does not block full occupancy of the rest.
    assert_eq!(
        derive_room_status(&[Occupied, UnderMaintenance]),
        Some(RoomStatus::FullyOccupied)
    );
}

#[test]
fn mixed_occupied_and_available_is_partially_occupied() {
    assert_eq!(
        derive_room_status(&[Occupied, Available]),
        Some(RoomStatus::PartiallyOccupied)
    );
    assert_eq!(
        derive_room_status(&[Occupied, Available, UnderMaintenance]),
        Some(RoomStatus::PartiallyOccupied)
    );
}

#[test]
fn no_occupied_beds_is_available() {
    assert_eq!(derive_room_status(&[Available]), Some(RoomStatus::Available));
    assert_eq!(
        derive_room_status(&[Available, UnderMaintenance]),
        Some(RoomStatus::Available)
    );
}

// The documented walk-through: a two-bed room moves Available,
// Partially Occupied, Fully Occupied, Partially Occupied, Available as
// its beds are assigned and vacated one at a time.
#[test]
fn two_bed_room_walkthrough() {
    let mut beds: Vec<BedStatus> = vec![Available, Available];
    assert_eq!(derive_room_status(&beds), Some(RoomStatus::Available));

    beds[0] = Occupied;
    assert_eq!(
        derive_room_status(&beds),
        Some(RoomStatus::PartiallyOccupied)
    );

    beds[1] = Occupied;
    assert_eq!(derive_room_status(&beds), Some(RoomStatus::FullyOccupied));

    beds[0] = Available;
    assert_eq!(
        derive_room_status(&beds),
        Some(RoomStatus::PartiallyOccupied)
    );

    beds[1] = Available;
    assert_eq!(derive_room_status(&beds), Some(RoomStatus::Available));
}
