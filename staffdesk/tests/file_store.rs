use std::sync::Arc;

use staffdesk::{
    models::{attendance::AttendanceRecord, daily_report::DailyReport, user::User},
    repositories::{FileStore, KeyValueStore},
    services::{attendance, reports},
};
use tempfile::TempDir;

mod support;

use support::{entry, friday, jane, john, report, state_on_store};

#[test]
fn records_survive_a_restart_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("desk.json");

    {
        let state = state_on_store(Arc::new(FileStore::new(&path)), friday());
        attendance::check_in(&state, &john(&state)).unwrap();
        attendance::work_from_home(&state, &jane(&state)).unwrap();
        reports::submit_daily(&state, &john(&state), report(vec![entry("Testing", 2.0)]))
            .unwrap();
    }

    let reopened = state_on_store(Arc::new(FileStore::new(&path)), friday());
    let records = reopened.repo.load::<AttendanceRecord>().unwrap();
    let owners: Vec<&str> = records.iter().map(|r| r.user_id.as_str()).collect();
    assert_eq!(owners, vec!["2", "3"]);
    assert_eq!(reopened.repo.load::<DailyReport>().unwrap().len(), 1);
    assert_eq!(reopened.repo.load::<User>().unwrap().len(), 3);
}

#[test]
fn stored_values_are_camel_case_json_arrays() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("desk.json")));
    let state = state_on_store(store.clone(), friday());
    attendance::check_in(&state, &john(&state)).unwrap();

    let raw = store.get_item("attendanceRecords").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["userId"], "2");
    assert_eq!(first["status"], "present");
    assert_eq!(first["checkIn"], "09:30:00");
    assert!(first["checkOut"].is_null());
}

#[test]
fn two_handles_on_one_file_overwrite_each_other() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("desk.json");
    let first = state_on_store(Arc::new(FileStore::new(&path)), friday());
    let second = state_on_store(Arc::new(FileStore::new(&path)), friday());

    let stale = first.repo.load::<AttendanceRecord>().unwrap();
    attendance::check_in(&second, &john(&second)).unwrap();
    first.repo.replace_all(&stale).unwrap();

    assert!(second.repo.load::<AttendanceRecord>().unwrap().is_empty());
}
