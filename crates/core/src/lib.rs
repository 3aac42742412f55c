// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure occupancy rules for the Quarters accommodation system.
//!
//! Everything in this crate is a function from current state to a
//! transition value. No I/O happens here; the persistence layer reads the
//! current state, calls into this crate, and writes the transition back
//! inside a single database transaction.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod bed_lifecycle;
mod counters;
mod error;
mod request_workflow;
mod room_status;

#[cfg(test)]
mod tests;

pub use bed_lifecycle::{BedTransition, VacateOutcome, assign_bed, delete_bed, update_bed_status, vacate_bed};
pub use counters::{BlockCounters, CounterDelta};
pub use error::CoreError;
pub use request_workflow::{
    BedForAssignment, RequestAction, RequestTransition, can_delete_request, request_transition,
    validate_bed_assignment,
};
pub use room_status::derive_room_status;
