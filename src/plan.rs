use std::collections::HashMap;
use std::fmt;

use chrono::NaiveTime;
use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};

use crate::clock;

pub const MIN_DURATION_HOURS: i64 = 1;
pub const MAX_DURATION_HOURS: i64 = 6;
pub const MIN_DAY_COUNT: u32 = 1;
pub const MAX_DAY_COUNT: u32 = 30;

#[derive(Debug)]
pub enum PlanError {
    InvalidInput(String),
    DataFrame(PolarsError),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            PlanError::DataFrame(err) => write!(f, "dataframe error: {err}"),
        }
    }
}

impl std::error::Error for PlanError {}

impl From<PolarsError> for PlanError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

pub type PlanResult<T> = Result<T, PlanError>;

/// Split a comma-separated subject entry into trimmed, non-empty names.
pub fn parse_subject_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// The inputs for one generation run: an ordered subject list, a start time
/// per subject, a uniform session length, and how many days to plan for.
///
/// Duplicate subject names are allowed and resolve to the same start time;
/// rejecting or merging them is a caller-level policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    pub subjects: Vec<String>,
    pub start_times: HashMap<String, NaiveTime>,
    pub duration_hours: i64,
    pub day_count: u32,
}

impl Default for StudyPlan {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            start_times: HashMap::new(),
            duration_hours: MIN_DURATION_HOURS,
            day_count: MIN_DAY_COUNT,
        }
    }
}

impl StudyPlan {
    pub fn new(
        subjects: Vec<String>,
        start_times: HashMap<String, NaiveTime>,
        duration_hours: i64,
        day_count: u32,
    ) -> Self {
        Self {
            subjects,
            start_times,
            duration_hours,
            day_count,
        }
    }

    pub fn set_start_time(&mut self, subject: impl Into<String>, time: NaiveTime) {
        self.start_times.insert(subject.into(), time);
    }

    /// All-or-nothing input check. Generation refuses to produce a partial
    /// timetable, so every problem is reported before any slot is computed.
    pub fn validate(&self) -> PlanResult<()> {
        if self.subjects.is_empty() {
            return Err(PlanError::InvalidInput("no subjects provided".to_string()));
        }
        for subject in &self.subjects {
            if subject.trim().is_empty() {
                return Err(PlanError::InvalidInput(
                    "subject names must not be blank".to_string(),
                ));
            }
            if !self.start_times.contains_key(subject) {
                return Err(PlanError::InvalidInput(format!(
                    "missing start time for subject '{subject}'"
                )));
            }
        }
        if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&self.duration_hours) {
            return Err(PlanError::InvalidInput(format!(
                "duration_hours must be between {MIN_DURATION_HOURS} and {MAX_DURATION_HOURS} (got {})",
                self.duration_hours
            )));
        }
        if !(MIN_DAY_COUNT..=MAX_DAY_COUNT).contains(&self.day_count) {
            return Err(PlanError::InvalidInput(format!(
                "day_count must be between {MIN_DAY_COUNT} and {MAX_DAY_COUNT} (got {})",
                self.day_count
            )));
        }
        Ok(())
    }

    /// Derive one slot per subject, in subject order. The same slots repeat
    /// on every day of the plan.
    pub fn slot_entries(&self) -> PlanResult<Vec<SlotEntry>> {
        self.validate()?;
        let mut entries = Vec::with_capacity(self.subjects.len());
        for subject in &self.subjects {
            let start = self.start_times.get(subject).copied().ok_or_else(|| {
                PlanError::InvalidInput(format!("missing start time for subject '{subject}'"))
            })?;
            entries.push(SlotEntry::new(subject.clone(), start, self.duration_hours));
        }
        Ok(entries)
    }
}

/// A derived (subject, start, end) value; rendered into the timetable cell
/// and never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub subject: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotEntry {
    pub fn new(subject: impl Into<String>, start: NaiveTime, duration_hours: i64) -> Self {
        Self {
            subject: subject.into(),
            start,
            end: clock::add_hours(start, duration_hours),
        }
    }
}

impl fmt::Display for SlotEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.subject,
            clock::format_range(self.start, self.end)
        )
    }
}
