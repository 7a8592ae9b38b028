use std::collections::HashMap;

use chrono::NaiveTime;
use timetable_tool::plan::PlanError;
use timetable_tool::{PlanMetadata, StudyPlan, Timetable};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_plan() -> StudyPlan {
    let subjects = vec!["Math".to_string(), "English".to_string()];
    let mut start_times = HashMap::new();
    start_times.insert("Math".to_string(), t(9, 0));
    start_times.insert("English".to_string(), t(10, 30));
    StudyPlan::new(subjects, start_times, 1, 2)
}

#[test]
fn generates_the_expected_entry_strings() {
    let timetable = Timetable::generate(&sample_plan()).unwrap();

    let expected = vec![
        "Math (09:00 AM - 10:00 AM)".to_string(),
        "English (10:30 AM - 11:30 AM)".to_string(),
    ];
    assert_eq!(timetable.entries_for_day("Day 1").unwrap(), expected);
    assert_eq!(timetable.entries_for_day("Day 2").unwrap(), expected);
}

#[test]
fn timetable_shape_matches_the_plan() {
    let timetable = Timetable::generate(&sample_plan()).unwrap();

    assert_eq!(timetable.day_count(), 2);
    assert_eq!(timetable.slot_count(), 2);
    assert_eq!(timetable.day_labels(), vec!["Day 1", "Day 2"]);
    assert_eq!(timetable.slot_labels().unwrap(), vec!["Slot 1", "Slot 2"]);
}

#[test]
fn every_day_carries_identical_entries() {
    let subjects = vec![
        "Math".to_string(),
        "English".to_string(),
        "Science".to_string(),
    ];
    let mut start_times = HashMap::new();
    start_times.insert("Math".to_string(), t(8, 0));
    start_times.insert("English".to_string(), t(11, 15));
    start_times.insert("Science".to_string(), t(16, 45));
    let plan = StudyPlan::new(subjects, start_times, 2, 5);

    let timetable = Timetable::generate(&plan).unwrap();
    let first = timetable.entries_for_day("Day 1").unwrap();
    for label in timetable.day_labels() {
        assert_eq!(timetable.entries_for_day(&label).unwrap(), first);
    }
}

#[test]
fn generation_is_deterministic() {
    let plan = sample_plan();
    let first = Timetable::generate(&plan).unwrap();
    let second = Timetable::generate(&plan).unwrap();
    assert!(first.dataframe().equals(second.dataframe()));
}

#[test]
fn six_hour_evening_slot_wraps_to_early_morning() {
    let subjects = vec!["Night Review".to_string()];
    let mut start_times = HashMap::new();
    start_times.insert("Night Review".to_string(), t(20, 0));
    let plan = StudyPlan::new(subjects, start_times, 6, 1);

    let timetable = Timetable::generate(&plan).unwrap();
    assert_eq!(
        timetable.entries_for_day("Day 1").unwrap(),
        vec!["Night Review (08:00 PM - 02:00 AM)".to_string()]
    );
}

#[test]
fn empty_subject_list_fails_with_invalid_input() {
    let plan = StudyPlan::new(Vec::new(), HashMap::new(), 1, 2);
    match Timetable::generate(&plan) {
        Err(PlanError::InvalidInput(msg)) => {
            assert!(msg.contains("no subjects"), "unexpected message: {msg}")
        }
        Ok(_) => panic!("expected generation to fail without subjects"),
        Err(other) => panic!("expected InvalidInput error, got {other:?}"),
    }
}

#[test]
fn metadata_is_carried_on_the_timetable() {
    let mut metadata = PlanMetadata::default();
    metadata.plan_name = "Exam Prep".to_string();

    let timetable = Timetable::generate_with_metadata(&sample_plan(), metadata).unwrap();
    assert_eq!(timetable.metadata().plan_name, "Exam Prep");
}

#[test]
fn thirty_day_plan_fills_thirty_columns() {
    let mut plan = sample_plan();
    plan.day_count = 30;

    let timetable = Timetable::generate(&plan).unwrap();
    assert_eq!(timetable.day_count(), 30);
    assert_eq!(timetable.day_labels().last().unwrap(), "Day 30");
}
