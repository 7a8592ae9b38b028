use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub plan_name: String,
    pub plan_description: String,
    pub default_start_time: NaiveTime,
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            plan_name: "Study Plan".to_string(),
            plan_description: "No description".to_string(),
            default_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }
}
