// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quarters_domain::{BedStatus, DomainError, EarlyVacateDetails, Occupant};
use time::macros::date;

use crate::{CoreError, assign_bed, delete_bed, update_bed_status, vacate_bed};

fn occupant() -> Occupant {
    Occupant {
        name: "M. Iyer".to_string(),
        contact_info: "555-0173".to_string(),
        check_in_date: date!(2026 - 04 - 01),
        check_out_date: date!(2026 - 04 - 15),
        purpose: "Training detachment".to_string(),
    }
}

fn vacate_details() -> EarlyVacateDetails {
    EarlyVacateDetails {
        reason: "Posting order".to_string(),
        contact_name: "Admin Office".to_string(),
        contact_number: "555-0100".to_string(),
        notes: None,
    }
}

#[test]
fn assigning_an_available_bed_occupies_it() {
    let transition = assign_bed(BedStatus::Available, &occupant()).unwrap_or_else(|err| {
        panic!("assignment should succeed: {err}");
    });
    assert_eq!(transition.new_status, BedStatus::Occupied);
    assert_eq!(transition.counters.available_beds, -1);
}

#[test]
fn assigning_an_occupied_bed_is_refused() {
    assert_eq!(
        assign_bed(BedStatus::Occupied, &occupant()),
        Err(CoreError::BedNotAvailable {
            status: BedStatus::Occupied,
        })
    );
}

#[test]
fn assigning_a_maintenance_bed_is_refused() {
    assert_eq!(
        assign_bed(BedStatus::UnderMaintenance, &occupant()),
        Err(CoreError::BedNotAvailable {
            status: BedStatus::UnderMaintenance,
        })
    );
}

#[test]
fn assignment_requires_a_complete_occupant() {
    let mut incomplete: Occupant = occupant();
    incomplete.purpose = String::new();
    assert_eq!(
        assign_bed(BedStatus::Available, &incomplete),
        Err(CoreError::Domain(DomainError::MissingOccupantField(
            "purpose"
        )))
    );
}

#[test]
fn vacating_a_non_occupied_bed_is_refused() {
    for status in [BedStatus::Available, BedStatus::UnderMaintenance] {
        assert_eq!(
            vacate_bed(status, None, date!(2026 - 04 - 10), None),
            Err(CoreError::BedNotOccupied { status })
        );
    }
}

#[test]
fn on_time_vacate_needs_no_details() {
    let occ: Occupant = occupant();
    let outcome = vacate_bed(BedStatus::Occupied, Some(&occ), occ.check_out_date, None)
        .unwrap_or_else(|err| panic!("vacate should succeed: {err}"));
    assert_eq!(outcome.new_status, BedStatus::Available);
    assert!(!outcome.early_vacate);
    assert_eq!(outcome.counters.available_beds, 1);
}

#[test]
fn early_vacate_without_details_is_refused() {
    let occ: Occupant = occupant();
    let result = vacate_bed(BedStatus::Occupied, Some(&occ), date!(2026 - 04 - 10), None);
    assert_eq!(
        result,
        Err(CoreError::EarlyVacateDetailsRequired {
            check_out_date: occ.check_out_date,
            vacate_date: date!(2026 - 04 - 10),
        })
    );
}

#[test]
fn early_vacate_with_incomplete_details_is_refused() {
    let occ: Occupant = occupant();
    let mut details: EarlyVacateDetails = vacate_details();
    details.contact_name = String::new();
    let result = vacate_bed(
        BedStatus::Occupied,
        Some(&occ),
        date!(2026 - 04 - 10),
        Some(&details),
    );
    assert_eq!(
        result,
        Err(CoreError::Domain(DomainError::MissingEarlyVacateField(
            "contact name"
        )))
    );
}

#[test]
fn early_vacate_with_details_records_history() {
    let occ: Occupant = occupant();
    let details: EarlyVacateDetails = vacate_details();
    let outcome = vacate_bed(
        BedStatus::Occupied,
        Some(&occ),
        date!(2026 - 04 - 10),
        Some(&details),
    )
    .unwrap_or_else(|err| panic!("early vacate should succeed: {err}"));
    assert!(outcome.early_vacate);
    assert_eq!(outcome.new_status, BedStatus::Available);
}

#[test]
fn direct_status_update_permits_any_transition() {
    let transition = update_bed_status(BedStatus::Available, BedStatus::UnderMaintenance);
    assert_eq!(transition.new_status, BedStatus::UnderMaintenance);
    assert_eq!(transition.counters.available_beds, -1);

    let unchanged = update_bed_status(BedStatus::Occupied, BedStatus::Occupied);
    assert!(unchanged.counters.is_empty());
}

#[test]
fn deleting_an_occupied_bed_is_refused() {
    assert_eq!(delete_bed(BedStatus::Occupied), Err(CoreError::BedOccupied));
}

#[test]
fn deleting_an_available_bed_decrements_both_counters() {
    let delta = delete_bed(BedStatus::Available)
        .unwrap_or_else(|err| panic!("delete should succeed: {err}"));
    assert_eq!(delta.total_beds, -1);
    assert_eq!(delta.available_beds, -1);
}
