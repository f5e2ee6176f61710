//! Typed collection access on top of a [`KeyValueStore`].
//!
//! Each collection lives under one fixed key as a JSON array. Reads load the
//! whole array; writes replace it. There is no locking and no
//! read-modify-write atomicity: if two writers interleave a load and a
//! replace on the same key, the later `replace_all` silently wins and the
//! earlier writer's changes are lost. Callers must not assume otherwise.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use super::store::KeyValueStore;
use crate::error::AppError;
use crate::models::{
    attendance::AttendanceRecord, daily_report::DailyReport, department::Department,
    leave_request::LeaveRequest, project::Project, user::User, weekly_report::WeeklyReport,
};

/// Storage keys for each collection.
pub mod keys {
    pub const USERS: &str = "users";
    pub const DEPARTMENTS: &str = "departments";
    pub const ATTENDANCE_RECORDS: &str = "attendanceRecords";
    pub const LEAVE_REQUESTS: &str = "leaveRequests";
    pub const DAILY_REPORTS: &str = "dailyReports";
    pub const WEEKLY_REPORTS: &str = "weeklyReports";
    pub const PROJECTS: &str = "projects";
}

/// An entity stored as one element of a keyed JSON array.
pub trait Record: Serialize + DeserializeOwned {
    /// Storage key of the collection.
    const KEY: &'static str;
}

impl Record for User {
    const KEY: &'static str = keys::USERS;
}

impl Record for Department {
    const KEY: &'static str = keys::DEPARTMENTS;
}

impl Record for AttendanceRecord {
    const KEY: &'static str = keys::ATTENDANCE_RECORDS;
}

impl Record for LeaveRequest {
    const KEY: &'static str = keys::LEAVE_REQUESTS;
}

impl Record for DailyReport {
    const KEY: &'static str = keys::DAILY_REPORTS;
}

impl Record for WeeklyReport {
    const KEY: &'static str = keys::WEEKLY_REPORTS;
}

impl Record for Project {
    const KEY: &'static str = keys::PROJECTS;
}

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the full collection in stored order. A missing key is empty.
    pub fn load<T: Record>(&self) -> Result<Vec<T>, AppError> {
        match self.store.get_item(T::KEY)? {
            Some(raw) => {
                let items: Vec<T> = serde_json::from_str(&raw)?;
                tracing::debug!(key = T::KEY, count = items.len(), "collection loaded");
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Serializes `items` and overwrites the collection. Not atomic with
    /// respect to any preceding [`Repository::load`].
    pub fn replace_all<T: Record>(&self, items: &[T]) -> Result<(), AppError> {
        let raw = serde_json::to_string(items)?;
        self.store.set_item(T::KEY, &raw)?;
        tracing::debug!(key = T::KEY, count = items.len(), "collection replaced");
        Ok(())
    }

    /// Loads, appends `item`, and writes the collection back.
    pub fn append<T: Record + Clone>(&self, item: T) -> Result<T, AppError> {
        let mut items = self.load::<T>()?;
        items.push(item.clone());
        self.replace_all(&items)?;
        Ok(item)
    }

    /// Whether the raw key exists at all, regardless of contents.
    pub fn contains_key(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.store.get_item(key)?.is_some())
    }
}
