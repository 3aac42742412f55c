// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation shared by every layer above the domain.

use time::Date;

use crate::error::DomainError;
use crate::types::{EarlyVacateDetails, Occupant};

/// Maximum length for name fields (user names, block names, room and
/// bed numbers).
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for free-form text fields (descriptions, purposes,
/// rejection reasons, special requirements).
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_CAPACITY: i32 = 1;
const MAX_CAPACITY: i32 = 20;

/// Validates a required name field.
///
/// # Errors
///
/// Returns an error if the name is empty after trimming or longer than
/// [`MAX_NAME_LENGTH`].
pub fn validate_name(field: &'static str, value: &str) -> Result<(), DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::FieldTooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Validates an optional free-form description field.
///
/// # Errors
///
/// Returns an error if the text is longer than [`MAX_DESCRIPTION_LENGTH`].
pub fn validate_description(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), DomainError> {
    if let Some(text) = value
        && text.chars().count() > MAX_DESCRIPTION_LENGTH
    {
        return Err(DomainError::FieldTooLong {
            field,
            max: MAX_DESCRIPTION_LENGTH,
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// This is intentionally shallow: one `@` with non-empty local and domain
/// parts, and a dot in the domain. Deliverability is not our problem.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(value: &str) -> Result<(), DomainError> {
    let trimmed: &str = value.trim();
    let Some((local, host)) = trimmed.split_once('@') else {
        return Err(DomainError::InvalidEmail(trimmed.to_string()));
    };
    if local.is_empty() || host.is_empty() || !host.contains('.') || host.contains('@') {
        return Err(DomainError::InvalidEmail(trimmed.to_string()));
    }
    Ok(())
}

/// Validates a plain-text password before it is hashed.
///
/// # Errors
///
/// Returns an error if the password is shorter than eight characters.
pub fn validate_password(value: &str) -> Result<(), DomainError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::InvalidPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Validates a room capacity.
///
/// # Errors
///
/// Returns an error if the capacity is outside 1 through 20.
pub const fn validate_capacity(capacity: i32) -> Result<(), DomainError> {
    if capacity < MIN_CAPACITY || capacity > MAX_CAPACITY {
        return Err(DomainError::InvalidCapacity { capacity });
    }
    Ok(())
}

/// Validates the occupant count on an accommodation request.
///
/// # Errors
///
/// Returns an error if the count is below one.
pub const fn validate_occupant_count(count: i32) -> Result<(), DomainError> {
    if count < 1 {
        return Err(DomainError::InvalidOccupantCount { count });
    }
    Ok(())
}

/// Validates that a check-out date falls after a check-in date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if it does not.
pub fn validate_date_range(check_in: Date, check_out: Date) -> Result<(), DomainError> {
    if check_out <= check_in {
        return Err(DomainError::InvalidDateRange {
            check_in,
            check_out,
        });
    }
    Ok(())
}

/// Validates a nightly price.
///
/// # Errors
///
/// Returns an error if the price is negative or not a finite number.
pub fn validate_price_per_day(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() {
        return Err(DomainError::InvalidPrice(format!(
            "{price} is not a finite number"
        )));
    }
    if price < 0.0 {
        return Err(DomainError::InvalidPrice(format!(
            "{price} must not be negative"
        )));
    }
    Ok(())
}

/// Validates the purpose field of a request or occupancy.
///
/// # Errors
///
/// Returns an error if the purpose is empty or too long.
pub fn validate_purpose(value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField("purpose"));
    }
    validate_description("purpose", Some(value))
}

/// Validates a rejection reason.
///
/// # Errors
///
/// Returns an error if the reason is empty or too long.
pub fn validate_rejection_reason(value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField("rejection reason"));
    }
    validate_description("rejection reason", Some(value))
}

/// Validates the shared fields of a block.
///
/// # Errors
///
/// Returns an error if the name or description fails validation.
pub fn validate_block_fields(name: &str, description: Option<&str>) -> Result<(), DomainError> {
    validate_name("block name", name)?;
    validate_description("block description", description)
}

/// Validates a complete occupant record for bed assignment.
///
/// All fields are required and the stay must span at least one night.
///
/// # Errors
///
/// Returns `DomainError::MissingOccupantField` for any empty field and
/// `DomainError::InvalidDateRange` for an inverted stay.
pub fn validate_occupant(occupant: &Occupant) -> Result<(), DomainError> {
    if occupant.name.trim().is_empty() {
        return Err(DomainError::MissingOccupantField("name"));
    }
    if occupant.contact_info.trim().is_empty() {
        return Err(DomainError::MissingOccupantField("contact info"));
    }
    if occupant.purpose.trim().is_empty() {
        return Err(DomainError::MissingOccupantField("purpose"));
    }
    validate_date_range(occupant.check_in_date, occupant.check_out_date)
}

/// Validates the details required for an early vacate.
///
/// # Errors
///
/// Returns `DomainError::MissingEarlyVacateField` for any missing field.
pub fn validate_early_vacate_details(details: &EarlyVacateDetails) -> Result<(), DomainError> {
    if details.reason.trim().is_empty() {
        return Err(DomainError::MissingEarlyVacateField("reason"));
    }
    if details.contact_name.trim().is_empty() {
        return Err(DomainError::MissingEarlyVacateField("contact name"));
    }
    if details.contact_number.trim().is_empty() {
        return Err(DomainError::MissingEarlyVacateField("contact number"));
    }
    validate_description("early vacate notes", details.notes.as_deref())
}
