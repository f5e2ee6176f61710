//! Department roster and today's attendance, joined by department *name*.
//!
//! Renaming a department does not move its members: membership is the
//! string in `User::department`, not a department id.

use serde::Serialize;

use crate::{
    error::AppError,
    models::{
        attendance::{AttendanceRecord, AttendanceStatus},
        department::Department,
        user::User,
    },
    services::auth::Session,
    state::AppState,
};

/// One roster row with today's status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStatus {
    pub name: String,
    pub email: String,
    pub status: AttendanceStatus,
    /// False when no record exists and the status is only inferred.
    pub recorded: bool,
}

/// Identities whose department field equals `department_name`.
pub fn department_roster<'a>(users: &'a [User], department_name: &str) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| u.department == department_name)
        .collect()
}

/// Records for `date` belonging to members of `roster`.
pub fn today_attendance<'a>(
    records: &'a [AttendanceRecord],
    roster: &[&User],
    date: chrono::NaiveDate,
) -> Vec<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.date == date && roster.iter().any(|m| m.id == r.user_id))
        .collect()
}

/// Roster of the caller's department with today's status; missing
/// records show as absent.
pub fn my_department_today(
    state: &AppState,
    session: &Session,
) -> Result<Vec<MemberStatus>, AppError> {
    let users = state.repo.load::<User>()?;
    let records = state.repo.load::<AttendanceRecord>()?;
    let roster = department_roster(&users, &session.user().department);
    let todays = today_attendance(&records, &roster, state.clock.today());

    Ok(roster
        .iter()
        .map(|member| {
            let record = todays.iter().find(|r| r.user_id == member.id);
            MemberStatus {
                name: member.name.clone(),
                email: member.email.clone(),
                status: record.map_or(AttendanceStatus::Absent, |r| r.status),
                recorded: record.is_some(),
            }
        })
        .collect())
}

/// The department record matching the caller's department name.
pub fn my_department(state: &AppState, session: &Session) -> Result<Option<Department>, AppError> {
    Ok(state
        .repo
        .load::<Department>()?
        .into_iter()
        .find(|d| d.name == session.user().department))
}
