pub mod clock;
pub mod export;
pub mod metadata;
pub mod plan;
pub mod timetable;

#[cfg(feature = "http_api")]
pub mod http_api;

pub use export::{
    csv_bytes, csv_dimensions, save_timetable_to_csv, save_timetable_to_json, ExportError,
    DEFAULT_CSV_FILENAME,
};
pub use metadata::PlanMetadata;
pub use plan::{parse_subject_list, PlanError, SlotEntry, StudyPlan};
pub use timetable::Timetable;
