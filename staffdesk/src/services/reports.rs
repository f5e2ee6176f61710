//! Daily task reports and the weekly reports derived from them.

use chrono::Datelike;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        daily_report::{DailyReport, SubmitDailyReport},
        department::Department,
        request_status::Decision,
        weekly_report::WeeklyReport,
    },
    services::auth::Session,
    state::AppState,
    types::WeeklyReportId,
    utils::time::week_window,
};

pub fn submit_daily(
    state: &AppState,
    session: &Session,
    payload: SubmitDailyReport,
) -> Result<DailyReport, AppError> {
    let user = session.user();
    if let Err(errors) = payload.validate() {
        tracing::warn!(user_id = %user.id, "Incomplete daily report rejected");
        return Err(errors.into());
    }

    let departments = state.repo.load::<Department>()?;
    if let Some(department) = departments.iter().find(|d| d.name == user.department) {
        let unknown: Vec<String> = payload
            .tasks
            .iter()
            .filter(|entry| !department.offers_task(&entry.task))
            .map(|entry| format!("task: '{}' is not a {} task", entry.task, department.name))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::Validation(unknown));
        }
    }

    let today = state.clock.today();
    let mut reports = state.repo.load::<DailyReport>()?;
    if reports
        .iter()
        .any(|r| r.user_id == user.id && r.date == today)
    {
        return Err(AppError::AlreadyRecorded(
            "You have already submitted a report for today!".into(),
        ));
    }

    let report = DailyReport::new(user.id.clone(), today, payload.tasks, state.clock.now_utc());
    reports.push(report.clone());
    state.repo.replace_all(&reports)?;

    tracing::info!(
        user_id = %user.id,
        report_id = %report.id,
        total_hours = report.total_hours(),
        "Daily report submitted"
    );
    Ok(report)
}

/// Bundles this week's daily reports into a weekly report for review.
///
/// Only allowed on the configured submission day, judged by the local
/// calendar date. Daily reports are bucketed by their `date` field, not by
/// submission instant.
pub fn submit_weekly(state: &AppState, session: &Session) -> Result<WeeklyReport, AppError> {
    let user = session.user();
    let today = state.clock.today();
    let submission_day = state.config.submission_day;

    if today.weekday() != submission_day {
        tracing::warn!(user_id = %user.id, %today, "Weekly report requested off-day");
        return Err(AppError::Ineligible(format!(
            "Weekly reports can only be submitted on {}s!",
            weekday_name(submission_day)
        )));
    }

    let (week_start, week_end) = week_window(today);
    let daily_ids: Vec<_> = state
        .repo
        .load::<DailyReport>()?
        .into_iter()
        .filter(|r| r.user_id == user.id && (week_start..=week_end).contains(&r.date))
        .map(|r| r.id)
        .collect();

    if daily_ids.is_empty() {
        return Err(AppError::Ineligible(
            "No daily reports found for this week!".into(),
        ));
    }

    let mut weekly = state.repo.load::<WeeklyReport>()?;
    if weekly
        .iter()
        .any(|w| w.user_id == user.id && w.week_start == week_start)
    {
        return Err(AppError::AlreadySubmitted(
            "Weekly report already submitted for this week!".into(),
        ));
    }

    let report = WeeklyReport::new(
        user.id.clone(),
        (week_start, week_end),
        daily_ids,
        state.clock.now_utc(),
    );
    weekly.push(report.clone());
    state.repo.replace_all(&weekly)?;

    tracing::info!(
        user_id = %user.id,
        report_id = %report.id,
        %week_start,
        days = report.daily_reports.len(),
        "Weekly report submitted"
    );
    Ok(report)
}

/// Admin verdict on a pending weekly report.
pub fn review_weekly(
    state: &AppState,
    session: &Session,
    id: &WeeklyReportId,
    decision: Decision,
) -> Result<WeeklyReport, AppError> {
    let admin = session.require_admin()?;
    let mut weekly = state.repo.load::<WeeklyReport>()?;
    let report = weekly
        .iter_mut()
        .find(|w| &w.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Weekly report {} not found", id)))?;

    let next = report.status.resolve(decision).ok_or_else(|| {
        AppError::Conflict(format!(
            "Weekly report {} is already {}",
            id,
            report.status.as_str()
        ))
    })?;
    report.status = next;
    let updated = report.clone();
    state.repo.replace_all(&weekly)?;

    tracing::info!(admin_id = %admin.id, report_id = %id, status = next.as_str(), "Weekly report reviewed");
    Ok(updated)
}

pub fn my_daily_reports(state: &AppState, session: &Session) -> Result<Vec<DailyReport>, AppError> {
    Ok(state
        .repo
        .load::<DailyReport>()?
        .into_iter()
        .filter(|r| r.user_id == session.user().id)
        .collect())
}

pub fn my_weekly_reports(
    state: &AppState,
    session: &Session,
) -> Result<Vec<WeeklyReport>, AppError> {
    Ok(state
        .repo
        .load::<WeeklyReport>()?
        .into_iter()
        .filter(|r| r.user_id == session.user().id)
        .collect())
}

pub fn list_daily(state: &AppState, session: &Session) -> Result<Vec<DailyReport>, AppError> {
    session.require_admin()?;
    state.repo.load::<DailyReport>()
}

pub fn list_weekly(state: &AppState, session: &Session) -> Result<Vec<WeeklyReport>, AppError> {
    session.require_admin()?;
    state.repo.load::<WeeklyReport>()
}

fn weekday_name(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match day {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}
