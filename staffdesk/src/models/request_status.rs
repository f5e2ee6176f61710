//! Review status shared between leave requests and weekly reports.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// An admin's verdict on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    /// Applies `decision`; returns `None` when the status is already final.
    pub fn resolve(self, decision: Decision) -> Option<RequestStatus> {
        match (self, decision) {
            (RequestStatus::Pending, Decision::Approve) => Some(RequestStatus::Approved),
            (RequestStatus::Pending, Decision::Reject) => Some(RequestStatus::Rejected),
            (RequestStatus::Approved | RequestStatus::Rejected, _) => None,
        }
    }
}
