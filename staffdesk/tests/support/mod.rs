#![allow(dead_code)]
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use staffdesk::{
    config::Config,
    error::AppError,
    models::daily_report::{SubmitDailyReport, TaskEntry},
    models::user::LoginRequest,
    repositories::{seed, KeyValueStore, MemoryStore},
    services::auth::{self, Session},
    state::AppState,
    utils::time::FixedClock,
};

/// Friday, 2024-06-14.
pub fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

pub fn test_config() -> Config {
    Config {
        login_delay_ms: 0,
        ..Config::default()
    }
}

/// Seeded state over `store` with the clock pinned to 09:30 UTC on `date`.
pub fn state_on_store(store: Arc<dyn KeyValueStore>, date: NaiveDate) -> AppState {
    let config = test_config();
    let clock = FixedClock::at(config.time_zone, date, 9, 30, 0).expect("valid wall time");
    let state = AppState::with_clock(store, Arc::new(clock), config);
    seed::bootstrap(&state.repo).expect("seed store");
    state
}

/// Seeded in-memory state configured for `tz`, pinned to `hour:min` local
/// time on `date`.
pub fn state_in_zone(tz: Tz, date: NaiveDate, hour: u32, min: u32) -> AppState {
    let config = Config {
        time_zone: tz,
        ..test_config()
    };
    let clock = FixedClock::at(tz, date, hour, min, 0).expect("valid wall time");
    let state = AppState::with_clock(Arc::new(MemoryStore::new()), Arc::new(clock), config);
    seed::bootstrap(&state.repo).expect("seed store");
    state
}

pub fn state_on(date: NaiveDate) -> AppState {
    state_on_store(Arc::new(MemoryStore::new()), date)
}

/// Same store, clock moved to another day.
pub fn advance_to(state: &AppState, date: NaiveDate) -> AppState {
    let clock = FixedClock::at(state.config.time_zone, date, 9, 30, 0).expect("valid wall time");
    AppState {
        repo: state.repo.clone(),
        clock: Arc::new(clock),
        config: state.config.clone(),
    }
}

pub fn login(state: &AppState, username: &str, password: &str) -> Result<Session, AppError> {
    auth::login(
        state,
        &LoginRequest {
            username: username.into(),
            password: password.into(),
        },
    )
}

pub fn admin(state: &AppState) -> Session {
    login(state, "admin", "admin123").expect("admin login")
}

pub fn john(state: &AppState) -> Session {
    login(state, "john", "john123").expect("john login")
}

pub fn jane(state: &AppState) -> Session {
    login(state, "jane", "jane123").expect("jane login")
}

pub fn entry(task: &str, hours: f64) -> TaskEntry {
    TaskEntry {
        task: task.into(),
        description: format!("Worked on {}", task.to_lowercase()),
        hours,
    }
}

pub fn report(entries: Vec<TaskEntry>) -> SubmitDailyReport {
    SubmitDailyReport { tasks: entries }
}
