// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    BedStatus, BlockType, EarlyVacateDetails, NotificationType, Occupant, RequestStatus, Role,
    RoomStatus, RoomType,
};
pub use validation::{
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, validate_block_fields, validate_capacity,
    validate_date_range, validate_description, validate_early_vacate_details, validate_email,
    validate_name, validate_occupant, validate_occupant_count, validate_password,
    validate_price_per_day, validate_purpose, validate_rejection_reason,
};
