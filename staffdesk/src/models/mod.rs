//! Entity models persisted in the key-value store, plus form payloads.

pub mod attendance;
pub mod daily_report;
pub mod department;
pub mod leave_request;
pub mod project;
pub mod request_status;
pub mod user;
pub mod weekly_report;
