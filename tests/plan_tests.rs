use std::collections::HashMap;

use chrono::NaiveTime;
use timetable_tool::plan::{PlanError, StudyPlan, parse_subject_list};

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

fn expect_invalid_input(result: Result<(), PlanError>, needle: &str) {
    match result {
        Err(PlanError::InvalidInput(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {msg}")
        }
        other => panic!("expected InvalidInput error, got {other:?}"),
    }
}

#[test]
fn parse_subject_list_trims_and_drops_empties() {
    let names = parse_subject_list(" Math, English ,,  Science  ");
    assert_eq!(names, vec!["Math", "English", "Science"]);
}

#[test]
fn parse_subject_list_of_blanks_is_empty() {
    assert!(parse_subject_list("  , ,,").is_empty());
    assert!(parse_subject_list("").is_empty());
}

#[test]
fn validate_accepts_a_well_formed_plan() {
    sample_plan().validate().unwrap();
}

#[test]
fn validate_rejects_empty_subject_list() {
    let plan = StudyPlan::new(Vec::new(), HashMap::new(), 1, 2);
    expect_invalid_input(plan.validate(), "no subjects provided");
}

#[test]
fn validate_rejects_blank_subject_name() {
    let mut plan = sample_plan();
    plan.subjects.push("   ".to_string());
    plan.set_start_time("   ", t(9, 0));
    expect_invalid_input(plan.validate(), "must not be blank");
}

#[test]
fn validate_rejects_missing_start_time() {
    let mut plan = sample_plan();
    plan.subjects.push("Science".to_string());
    expect_invalid_input(plan.validate(), "missing start time for subject 'Science'");
}

#[test]
fn validate_rejects_out_of_range_duration() {
    let mut plan = sample_plan();
    plan.duration_hours = 0;
    expect_invalid_input(plan.validate(), "duration_hours must be between 1 and 6");

    plan.duration_hours = 7;
    expect_invalid_input(plan.validate(), "duration_hours must be between 1 and 6");
}

#[test]
fn validate_rejects_out_of_range_day_count() {
    let mut plan = sample_plan();
    plan.day_count = 0;
    expect_invalid_input(plan.validate(), "day_count must be between 1 and 30");

    plan.day_count = 31;
    expect_invalid_input(plan.validate(), "day_count must be between 1 and 30");
}

#[test]
fn slot_entries_follow_subject_order() {
    let entries = sample_plan().slot_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].to_string(), "Math (09:00 AM - 10:00 AM)");
    assert_eq!(entries[1].to_string(), "English (10:30 AM - 11:30 AM)");
}

#[test]
fn duplicate_subjects_share_one_start_time() {
    let subjects = vec!["Math".to_string(), "Math".to_string()];
    let mut start_times = HashMap::new();
    start_times.insert("Math".to_string(), t(9, 0));
    let plan = StudyPlan::new(subjects, start_times, 1, 1);

    let entries = plan.slot_entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entries[1]);
}
