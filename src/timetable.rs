use polars::prelude::*;

use crate::metadata::PlanMetadata;
use crate::plan::{PlanResult, StudyPlan};

pub const SLOT_COLUMN: &str = "slot";

/// A generated study timetable.
///
/// Rows are slots (one per subject, in input order), columns are
/// `"Day 1"`..`"Day N"` plus a leading slot label column. Every day column
/// carries identical content; the schedule does not vary by day. A value is
/// built fresh per generation request and simply replaced by the next one.
pub struct Timetable {
    df: DataFrame,
    metadata: PlanMetadata,
}

impl Timetable {
    pub fn generate(plan: &StudyPlan) -> PlanResult<Self> {
        Self::generate_with_metadata(plan, PlanMetadata::default())
    }

    pub fn generate_with_metadata(plan: &StudyPlan, metadata: PlanMetadata) -> PlanResult<Self> {
        let entries = plan.slot_entries()?;
        let rendered: Vec<String> = entries.iter().map(ToString::to_string).collect();
        let slot_labels: Vec<String> = (1..=rendered.len()).map(|i| format!("Slot {i}")).collect();

        let mut columns: Vec<Column> = Vec::with_capacity(plan.day_count as usize + 1);
        columns.push(
            Series::new(PlSmallStr::from_static(SLOT_COLUMN), slot_labels).into_column(),
        );
        for day in 1..=plan.day_count {
            let label = format!("Day {day}");
            columns.push(Series::new(PlSmallStr::from(label), rendered.clone()).into_column());
        }

        let df = DataFrame::new(columns)?;
        Ok(Self { df, metadata })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn metadata(&self) -> &PlanMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: PlanMetadata) {
        self.metadata = metadata;
    }

    pub fn day_count(&self) -> usize {
        self.df.width().saturating_sub(1)
    }

    pub fn slot_count(&self) -> usize {
        self.df.height()
    }

    pub fn day_labels(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .map(|col| col.name().to_string())
            .filter(|name| name != SLOT_COLUMN)
            .collect()
    }

    pub fn slot_labels(&self) -> PlanResult<Vec<String>> {
        Self::string_column(&self.df, SLOT_COLUMN)
    }

    pub fn entries_for_day(&self, label: &str) -> PlanResult<Vec<String>> {
        Self::string_column(&self.df, label)
    }

    fn string_column(df: &DataFrame, name: &str) -> PlanResult<Vec<String>> {
        Ok(df
            .column(name)?
            .str()?
            .into_iter()
            .map(|value| value.unwrap_or("").to_string())
            .collect())
    }
}
