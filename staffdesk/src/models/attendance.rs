use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::{AttendanceId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Wfh,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Wfh => "wfh",
        }
    }
}

impl AttendanceRecord {
    pub fn checked_in(user_id: UserId, date: NaiveDate, at: NaiveTime) -> Self {
        Self {
            id: AttendanceId::new(),
            user_id,
            date,
            status: AttendanceStatus::Present,
            check_in: Some(at),
            check_out: None,
        }
    }

    pub fn working_from_home(user_id: UserId, date: NaiveDate) -> Self {
        Self {
            id: AttendanceId::new(),
            user_id,
            date,
            status: AttendanceStatus::Wfh,
            check_in: None,
            check_out: None,
        }
    }

    pub fn is_for(&self, user_id: &UserId, date: NaiveDate) -> bool {
        &self.user_id == user_id && self.date == date
    }

    pub fn is_checked_out(&self) -> bool {
        self.check_out.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_status_serde_lowercase() {
        let s: AttendanceStatus = serde_json::from_str("\"wfh\"").unwrap();
        assert_eq!(s, AttendanceStatus::Wfh);
        let v = serde_json::to_value(AttendanceStatus::Present).unwrap();
        assert_eq!(v, serde_json::json!("present"));
    }

    #[test]
    fn record_uses_stored_key_names() {
        let record = AttendanceRecord::checked_in(
            UserId::from("2"),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "2");
        assert_eq!(json["date"], "2024-06-10");
        assert_eq!(json["checkIn"], "09:05:00");
        assert!(json.get("checkOut").is_none());
    }

    #[test]
    fn wfh_record_has_no_timestamps() {
        let record = AttendanceRecord::working_from_home(
            UserId::from("3"),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        );
        assert_eq!(record.status, AttendanceStatus::Wfh);
        assert!(record.check_in.is_none());
        assert!(!record.is_checked_out());
    }
}
