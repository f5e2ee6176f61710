use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{DailyReportId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TaskEntry {
    /// Label picked from the department's task catalog.
    #[validate(length(min = 1))]
    pub task: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom(function = "validate_hours"))]
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub id: DailyReportId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub tasks: Vec<TaskEntry>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitDailyReport {
    #[validate(length(min = 1), nested)]
    pub tasks: Vec<TaskEntry>,
}

/// Hours must be a positive, finite number. Non-finite values would be
/// written to the store as `null` and could not be read back.
pub fn validate_hours(hours: f64) -> Result<(), ValidationError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(ValidationError::new("hours_out_of_range"));
    }
    Ok(())
}

impl DailyReport {
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        tasks: Vec<TaskEntry>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DailyReportId::new(),
            user_id,
            date,
            tasks,
            submitted_at: now,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.hours).sum()
    }
}
