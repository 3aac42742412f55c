// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::{BedStatus, RoomStatus};

/// Derives a room's status from the statuses of its beds.
///
/// The rules, applied in order:
///
/// 1. Every bed under maintenance: the room is under maintenance.
/// 2. Every non-maintenance bed occupied (and at least one occupied):
///    fully occupied.
/// 3. At least one bed occupied: partially occupied.
/// 4. Otherwise: available.
///
/// A room with no beds has no derivable status and keeps whatever status
/// it currently holds, so this returns `None` for an empty slice.
#[must_use]
pub fn derive_room_status(bed_statuses: &[BedStatus]) -> Option<RoomStatus> {
    if bed_statuses.is_empty() {
        return None;
    }

    let total: usize = bed_statuses.len();
    let occupied: usize = bed_statuses
        .iter()
        .filter(|status| **status == BedStatus::Occupied)
        .count();
    let maintenance: usize = bed_statuses
        .iter()
        .filter(|status| **status == BedStatus::UnderMaintenance)
        .count();

    if maintenance == total {
        return Some(RoomStatus::UnderMaintenance);
    }
    if occupied > 0 && occupied == total - maintenance {
        return Some(RoomStatus::FullyOccupied);
    }
    if occupied > 0 {
        return Some(RoomStatus::PartiallyOccupied);
    }
    Some(RoomStatus::Available)
}
