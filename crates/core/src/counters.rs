// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Block counter maintenance.
//!
//! Blocks carry denormalized room and bed counters so list views never
//! aggregate over the whole table. Every room or bed write computes a
//! [`CounterDelta`] here and applies it to the owning block in the same
//! database transaction as the triggering write.

use quarters_domain::{BedStatus, RoomStatus};

/// A block's denormalized room and bed counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockCounters {
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub total_beds: i64,
    pub available_beds: i64,
}

/// A signed adjustment to a block's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub total_beds: i64,
    pub available_beds: i64,
}

impl CounterDelta {
    /// The delta for creating a room with the given initial status.
    #[must_use]
    pub const fn room_created(status: RoomStatus) -> Self {
        Self {
            total_rooms: 1,
            available_rooms: if matches!(status, RoomStatus::Available) {
                1
            } else {
                0
            },
            total_beds: 0,
            available_beds: 0,
        }
    }

    /// The delta for deleting a room that held the given status.
    #[must_use]
    pub const fn room_deleted(status: RoomStatus) -> Self {
        Self {
            total_rooms: -1,
            available_rooms: if matches!(status, RoomStatus::Available) {
                -1
            } else {
                0
            },
            total_beds: 0,
            available_beds: 0,
        }
    }

    /// The delta for a room moving between statuses.
    ///
    /// Only transitions into or out of `Available` move the available-room
    /// counter.
    #[must_use]
    pub const fn room_status_changed(old: RoomStatus, new: RoomStatus) -> Self {
        let was_available: i64 = if matches!(old, RoomStatus::Available) {
            1
        } else {
            0
        };
        let is_available: i64 = if matches!(new, RoomStatus::Available) {
            1
        } else {
            0
        };
        Self {
            total_rooms: 0,
            available_rooms: is_available - was_available,
            total_beds: 0,
            available_beds: 0,
        }
    }

    /// The delta for creating a bed with the given initial status.
    #[must_use]
    pub const fn bed_created(status: BedStatus) -> Self {
        Self {
            total_rooms: 0,
            available_rooms: 0,
            total_beds: 1,
            available_beds: if matches!(status, BedStatus::Available) {
                1
            } else {
                0
            },
        }
    }

    /// The delta for deleting a bed that held the given status.
    #[must_use]
    pub const fn bed_deleted(status: BedStatus) -> Self {
        Self {
            total_rooms: 0,
            available_rooms: 0,
            total_beds: -1,
            available_beds: if matches!(status, BedStatus::Available) {
                -1
            } else {
                0
            },
        }
    }

    /// The delta for a bed moving between statuses.
    #[must_use]
    pub const fn bed_status_changed(old: BedStatus, new: BedStatus) -> Self {
        let was_available: i64 = if matches!(old, BedStatus::Available) {
            1
        } else {
            0
        };
        let is_available: i64 = if matches!(new, BedStatus::Available) {
            1
        } else {
            0
        };
        Self {
            total_rooms: 0,
            available_rooms: 0,
            total_beds: 0,
            available_beds: is_available - was_available,
        }
    }

    /// The delta for assigning `count` available beds to occupants.
    #[must_use]
    pub const fn beds_assigned(count: i64) -> Self {
        Self {
            total_rooms: 0,
            available_rooms: 0,
            total_beds: 0,
            available_beds: -count,
        }
    }

    /// The delta for releasing `count` occupied beds back to available.
    #[must_use]
    pub const fn beds_released(count: i64) -> Self {
        Self {
            total_rooms: 0,
            available_rooms: 0,
            total_beds: 0,
            available_beds: count,
        }
    }

    /// Combines two deltas into one.
    #[must_use]
    pub const fn then(self, other: Self) -> Self {
        Self {
            total_rooms: self.total_rooms + other.total_rooms,
            available_rooms: self.available_rooms + other.available_rooms,
            total_beds: self.total_beds + other.total_beds,
            available_beds: self.available_beds + other.available_beds,
        }
    }

    /// True when applying this delta would change nothing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.total_rooms == 0
            && self.available_rooms == 0
            && self.total_beds == 0
            && self.available_beds == 0
    }

    /// Applies this delta to a block's counters.
    ///
    /// Counters never go negative and an available count never exceeds its
    /// total, whatever the delta says. Drift is clamped rather than allowed
    /// to propagate.
    #[must_use]
    pub const fn apply(self, current: BlockCounters) -> BlockCounters {
        let total_rooms: i64 = clamp_non_negative(current.total_rooms + self.total_rooms);
        let total_beds: i64 = clamp_non_negative(current.total_beds + self.total_beds);
        let available_rooms: i64 =
            clamp_range(current.available_rooms + self.available_rooms, total_rooms);
        let available_beds: i64 =
            clamp_range(current.available_beds + self.available_beds, total_beds);
        BlockCounters {
            total_rooms,
            available_rooms,
            total_beds,
            available_beds,
        }
    }
}

const fn clamp_non_negative(value: i64) -> i64 {
    if value < 0 { 0 } else { value }
}

const fn clamp_range(value: i64, max: i64) -> i64 {
    if value < 0 {
        0
    } else if value > max {
        max
    } else {
        value
    }
}
