use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::request_status::RequestStatus;
use crate::types::{DailyReportId, UserId, WeeklyReportId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub id: WeeklyReportId,
    pub user_id: UserId,
    /// Monday of the covered week.
    pub week_start: NaiveDate,
    /// Sunday of the covered week.
    pub week_end: NaiveDate,
    /// Ids of the daily reports bucketed into this week, in store order.
    pub daily_reports: Vec<DailyReportId>,
    pub submitted_at: DateTime<Utc>,
    pub status: RequestStatus,
}

impl WeeklyReport {
    pub fn new(
        user_id: UserId,
        (week_start, week_end): (NaiveDate, NaiveDate),
        daily_reports: Vec<DailyReportId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: WeeklyReportId::new(),
            user_id,
            week_start,
            week_end,
            daily_reports,
            submitted_at: now,
            status: RequestStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_stored_key_names() {
        let report = WeeklyReport::new(
            UserId::from("2"),
            (
                NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 16).unwrap(),
            ),
            vec![DailyReportId::from("a"), DailyReportId::from("b")],
            Utc::now(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weekStart"], "2024-06-10");
        assert_eq!(json["weekEnd"], "2024-06-16");
        assert_eq!(json["dailyReports"], serde_json::json!(["a", "b"]));
        assert_eq!(json["status"], "pending");
    }
}
