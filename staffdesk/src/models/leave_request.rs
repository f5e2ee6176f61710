use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::request_status::RequestStatus;
use crate::types::{LeaveRequestId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Leave form payload. Start/end ordering and overlap are not checked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1))]
    pub reason: String,
}

impl LeaveRequest {
    pub fn new(user_id: UserId, payload: CreateLeaveRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: LeaveRequestId::new(),
            user_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
            status: RequestStatus::Pending,
            submitted_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}
