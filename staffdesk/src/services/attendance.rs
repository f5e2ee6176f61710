//! Check-in, check-out and work-from-home for the signed-in identity.
//!
//! Each operation looks up the (user, today) record first. Two processes
//! sharing a store can both pass that lookup and write duplicates; see
//! [`crate::repositories::repository`].

use crate::{
    error::AppError,
    models::attendance::AttendanceRecord,
    services::auth::Session,
    state::AppState,
};

pub fn check_in(state: &AppState, session: &Session) -> Result<AttendanceRecord, AppError> {
    let user = session.user();
    let today = state.clock.today();
    let mut records = state.repo.load::<AttendanceRecord>()?;

    if records.iter().any(|r| r.is_for(&user.id, today)) {
        tracing::warn!(user_id = %user.id, %today, "Duplicate check-in rejected");
        return Err(AppError::AlreadyRecorded(
            "You have already checked in today!".into(),
        ));
    }

    let record = AttendanceRecord::checked_in(user.id.clone(), today, state.clock.time_of_day());
    records.push(record.clone());
    state.repo.replace_all(&records)?;

    tracing::info!(user_id = %user.id, attendance_id = %record.id, "Checked in");
    Ok(record)
}

pub fn check_out(state: &AppState, session: &Session) -> Result<AttendanceRecord, AppError> {
    let user = session.user();
    let today = state.clock.today();
    let mut records = state.repo.load::<AttendanceRecord>()?;

    let record = records
        .iter_mut()
        .find(|r| r.is_for(&user.id, today))
        .ok_or_else(|| AppError::Ineligible("You need to check in first!".into()))?;

    if record.is_checked_out() {
        tracing::warn!(user_id = %user.id, %today, "Duplicate check-out rejected");
        return Err(AppError::AlreadyRecorded(
            "You have already checked out today!".into(),
        ));
    }

    record.check_out = Some(state.clock.time_of_day());
    let updated = record.clone();
    state.repo.replace_all(&records)?;

    tracing::info!(user_id = %user.id, attendance_id = %updated.id, "Checked out");
    Ok(updated)
}

pub fn work_from_home(state: &AppState, session: &Session) -> Result<AttendanceRecord, AppError> {
    let user = session.user();
    let today = state.clock.today();
    let mut records = state.repo.load::<AttendanceRecord>()?;

    if records.iter().any(|r| r.is_for(&user.id, today)) {
        tracing::warn!(user_id = %user.id, %today, "Work-from-home rejected");
        return Err(AppError::AlreadyRecorded(
            "You have already marked attendance for today!".into(),
        ));
    }

    let record = AttendanceRecord::working_from_home(user.id.clone(), today);
    records.push(record.clone());
    state.repo.replace_all(&records)?;

    tracing::info!(user_id = %user.id, attendance_id = %record.id, "Marked work from home");
    Ok(record)
}

/// The caller's record for today, if any.
pub fn today_record(
    state: &AppState,
    session: &Session,
) -> Result<Option<AttendanceRecord>, AppError> {
    let today = state.clock.today();
    Ok(state
        .repo
        .load::<AttendanceRecord>()?
        .into_iter()
        .find(|r| r.is_for(&session.user().id, today)))
}

/// All of the caller's records, newest date first.
pub fn my_history(state: &AppState, session: &Session) -> Result<Vec<AttendanceRecord>, AppError> {
    let mut records: Vec<AttendanceRecord> = state
        .repo
        .load::<AttendanceRecord>()?
        .into_iter()
        .filter(|r| r.user_id == session.user().id)
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(records)
}
