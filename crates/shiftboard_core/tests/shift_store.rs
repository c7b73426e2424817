use chrono::NaiveDate;
use shiftboard_core::db::{open_db, open_db_in_memory};
use shiftboard_core::{
    CaregiverRepository, RepoError, ShiftRepository, ShiftType, SqliteCaregiverRepository,
    SqliteShiftRepository,
};
use std::sync::{Arc, Barrier};
use std::thread;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn created_shift_is_returned_once_by_range_query() {
    let conn = open_db_in_memory().unwrap();
    let caregiver = SqliteCaregiverRepository::new(&conn)
        .create_caregiver("Fatima")
        .unwrap();
    let repo = SqliteShiftRepository::new(&conn);

    let shift = repo
        .create_shift(date(2024, 6, 3), ShiftType::A, caregiver.id)
        .unwrap();

    let found = repo
        .query_shifts_in_range(date(2024, 6, 3), date(2024, 6, 10))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, shift.id);
    assert_eq!(found[0].caregiver_name, "Fatima");
    assert_eq!(found[0].shift_type, ShiftType::A);
}

#[test]
fn second_assignment_to_same_slot_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let caregivers = SqliteCaregiverRepository::new(&conn);
    let fatima = caregivers.create_caregiver("Fatima").unwrap();
    let kisha = caregivers.create_caregiver("Kisha").unwrap();
    let repo = SqliteShiftRepository::new(&conn);

    repo.create_shift(date(2024, 6, 3), ShiftType::A, fatima.id)
        .unwrap();
    let err = repo
        .create_shift(date(2024, 6, 3), ShiftType::A, kisha.id)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::SlotTaken {
            shift_type: ShiftType::A,
            ..
        }
    ));

    let slot = repo
        .query_shifts_in_range(date(2024, 6, 3), date(2024, 6, 4))
        .unwrap();
    assert_eq!(slot.len(), 1);
    assert_eq!(slot[0].caregiver_id, fatima.id);

    // Same caregiver is rejected too.
    assert!(repo
        .create_shift(date(2024, 6, 3), ShiftType::A, fatima.id)
        .is_err());
}

#[test]
fn taken_slot_conflicts_even_for_unknown_caregiver() {
    let conn = open_db_in_memory().unwrap();
    let fatima = SqliteCaregiverRepository::new(&conn)
        .create_caregiver("Fatima")
        .unwrap();
    let repo = SqliteShiftRepository::new(&conn);
    repo.create_shift(date(2024, 6, 3), ShiftType::A, fatima.id)
        .unwrap();

    let err = repo
        .create_shift(date(2024, 6, 3), ShiftType::A, 999)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::SlotTaken {
            shift_type: ShiftType::A,
            ..
        }
    ));

    let slot = repo
        .query_shifts_in_range(date(2024, 6, 3), date(2024, 6, 4))
        .unwrap();
    assert_eq!(slot.len(), 1);
    assert_eq!(slot[0].caregiver_name, "Fatima");
}

#[test]
fn unknown_caregiver_is_not_found_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShiftRepository::new(&conn);

    let err = repo
        .create_shift(date(2024, 6, 3), ShiftType::C, 77)
        .unwrap_err();
    assert!(matches!(err, RepoError::CaregiverNotFound(77)));
    assert!(repo
        .query_shifts_in_range(date(2024, 6, 1), date(2024, 7, 1))
        .unwrap()
        .is_empty());
}

#[test]
fn range_query_is_half_open_and_ordered() {
    let conn = open_db_in_memory().unwrap();
    let caregiver = SqliteCaregiverRepository::new(&conn)
        .create_caregiver("Amanda")
        .unwrap();
    let repo = SqliteShiftRepository::new(&conn);

    for (day, shift_type) in [
        (date(2024, 6, 4), ShiftType::G1),
        (date(2024, 6, 3), ShiftType::C),
        (date(2024, 6, 4), ShiftType::A),
        (date(2024, 6, 3), ShiftType::G2),
        (date(2024, 6, 10), ShiftType::A),
        (date(2024, 6, 2), ShiftType::A),
    ] {
        repo.create_shift(day, shift_type, caregiver.id).unwrap();
    }

    let found: Vec<(NaiveDate, ShiftType)> = repo
        .query_shifts_in_range(date(2024, 6, 3), date(2024, 6, 10))
        .unwrap()
        .into_iter()
        .map(|s| (s.date, s.shift_type))
        .collect();
    assert_eq!(
        found,
        vec![
            (date(2024, 6, 3), ShiftType::C),
            (date(2024, 6, 3), ShiftType::G2),
            (date(2024, 6, 4), ShiftType::A),
            (date(2024, 6, 4), ShiftType::G1),
        ]
    );
}

#[test]
fn delete_shift_frees_slot_and_reports_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let caregivers = SqliteCaregiverRepository::new(&conn);
    let maria = caregivers.create_caregiver("Maria B").unwrap();
    let kisha = caregivers.create_caregiver("Kisha").unwrap();
    let repo = SqliteShiftRepository::new(&conn);

    let shift = repo
        .create_shift(date(2024, 6, 5), ShiftType::B, maria.id)
        .unwrap();
    repo.delete_shift(shift.id).unwrap();
    assert!(repo.get_shift(shift.id).unwrap().is_none());

    let err = repo.delete_shift(shift.id).unwrap_err();
    assert!(matches!(err, RepoError::ShiftNotFound(id) if id == shift.id));

    // Reassignment is delete-then-recreate.
    let reassigned = repo
        .create_shift(date(2024, 6, 5), ShiftType::B, kisha.id)
        .unwrap();
    let loaded = repo.get_shift(reassigned.id).unwrap().unwrap();
    assert_eq!(loaded.caregiver_name, "Kisha");

    // Maria owns nothing now and can be deleted.
    caregivers.delete_caregiver(maria.id).unwrap();
}

#[test]
fn unique_index_rejects_raw_duplicate_inserts() {
    let conn = open_db_in_memory().unwrap();
    let caregiver = SqliteCaregiverRepository::new(&conn)
        .create_caregiver("Michelle")
        .unwrap();
    SqliteShiftRepository::new(&conn)
        .create_shift(date(2024, 6, 6), ShiftType::C, caregiver.id)
        .unwrap();

    let raw = conn.execute(
        "INSERT INTO shifts (date, shift_type, caregiver_id) VALUES ('2024-06-06', 'C', ?1);",
        [caregiver.id],
    );
    assert!(raw.is_err());
}

#[test]
fn persisted_garbage_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let caregiver = SqliteCaregiverRepository::new(&conn)
        .create_caregiver("Teontae")
        .unwrap();
    conn.execute(
        "INSERT INTO shifts (date, shift_type, caregiver_id) VALUES ('2024-13-45', 'A', ?1);",
        [caregiver.id],
    )
    .unwrap();

    let err = SqliteShiftRepository::new(&conn)
        .query_shifts_in_range(date(2024, 1, 1), date(2025, 1, 1))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn concurrent_writers_cannot_double_book_a_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");
    let (first_id, second_id) = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteCaregiverRepository::new(&conn);
        (
            repo.create_caregiver("Fatima").unwrap().id,
            repo.create_caregiver("Kisha").unwrap().id,
        )
    };

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = [first_id, second_id]
        .into_iter()
        .map(|caregiver_id| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                barrier.wait();
                SqliteShiftRepository::new(&conn)
                    .create_shift(date(2024, 6, 3), ShiftType::A, caregiver_id)
                    .map(|shift| shift.id)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(RepoError::SlotTaken { .. }))));

    let conn = open_db(&path).unwrap();
    let stored = SqliteShiftRepository::new(&conn)
        .query_shifts_in_range(date(2024, 6, 3), date(2024, 6, 4))
        .unwrap();
    assert_eq!(stored.len(), 1);
}
