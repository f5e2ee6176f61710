//! Leave requests: staff submission and one-way admin decisions.

use validator::Validate;

use crate::{
    error::AppError,
    models::{
        leave_request::{CreateLeaveRequest, LeaveRequest},
        request_status::Decision,
    },
    services::auth::Session,
    state::AppState,
    types::LeaveRequestId,
};

/// Files a pending request. Date order and overlap are deliberately not
/// checked.
pub fn submit(
    state: &AppState,
    session: &Session,
    payload: CreateLeaveRequest,
) -> Result<LeaveRequest, AppError> {
    payload.validate()?;
    let user = session.user();
    let request = LeaveRequest::new(user.id.clone(), payload, state.clock.now_utc());
    let request = state.repo.append(request)?;

    tracing::info!(
        user_id = %user.id,
        request_id = %request.id,
        start_date = %request.start_date,
        end_date = %request.end_date,
        "Leave request submitted"
    );
    Ok(request)
}

/// Moves a pending request to approved or rejected. A request that is
/// already resolved is left untouched and reported as a conflict.
pub fn decide(
    state: &AppState,
    session: &Session,
    id: &LeaveRequestId,
    decision: Decision,
) -> Result<LeaveRequest, AppError> {
    let admin = session.require_admin()?;
    let mut requests = state.repo.load::<LeaveRequest>()?;
    let request = requests
        .iter_mut()
        .find(|r| &r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Leave request {} not found", id)))?;

    let Some(next) = request.status.resolve(decision) else {
        tracing::warn!(request_id = %id, status = request.status.as_str(), "Leave request already resolved");
        return Err(AppError::Conflict(format!(
            "Leave request {} is already {}",
            id,
            request.status.as_str()
        )));
    };
    request.status = next;
    let updated = request.clone();
    state.repo.replace_all(&requests)?;

    tracing::info!(admin_id = %admin.id, request_id = %id, status = next.as_str(), "Leave request decided");
    Ok(updated)
}

pub fn my_requests(state: &AppState, session: &Session) -> Result<Vec<LeaveRequest>, AppError> {
    Ok(state
        .repo
        .load::<LeaveRequest>()?
        .into_iter()
        .filter(|r| r.user_id == session.user().id)
        .collect())
}

pub fn list_all(state: &AppState, session: &Session) -> Result<Vec<LeaveRequest>, AppError> {
    session.require_admin()?;
    state.repo.load::<LeaveRequest>()
}
