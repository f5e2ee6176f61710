//! Operations behind the staff and admin views.
//!
//! Each function takes the shared [`crate::state::AppState`] and the
//! caller's [`auth::Session`], reads the collections it needs, and writes
//! back whole collections.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod leave;
pub mod reports;
pub mod roster;
