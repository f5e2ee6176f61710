//! Login and the per-process session.

use crate::{
    error::AppError,
    models::user::{LoginRequest, User},
    state::AppState,
};

/// Which presentation a session opens into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Staff,
    Admin,
}

/// The authenticated identity for the lifetime of the page/process.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn view(&self) -> View {
        if self.user.is_admin() {
            View::Admin
        } else {
            View::Staff
        }
    }

    pub(crate) fn require_admin(&self) -> Result<&User, AppError> {
        if self.user.is_admin() {
            Ok(&self.user)
        } else {
            tracing::warn!(user_id = %self.user.id, "Staff session attempted admin action");
            Err(AppError::Forbidden("Admin access required".into()))
        }
    }
}

/// Exact, clear-text match on username and password.
pub fn login(state: &AppState, payload: &LoginRequest) -> Result<Session, AppError> {
    let users = state.repo.load::<User>()?;
    match users
        .into_iter()
        .find(|u| u.matches_credentials(&payload.username, &payload.password))
    {
        Some(user) => {
            tracing::info!(user_id = %user.id, role = user.role.as_str(), "Login succeeded");
            Ok(Session { user })
        }
        None => {
            tracing::warn!(username = %payload.username, "Login failed");
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Discards the session. Nothing is persisted.
pub fn logout(session: Session) {
    tracing::info!(user_id = %session.user.id, "Logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, repositories::seed, repositories::MemoryStore};
    use std::sync::Arc;

    fn seeded_state() -> AppState {
        let state = AppState::new(Arc::new(MemoryStore::new()), Config::default());
        seed::bootstrap(&state.repo).unwrap();
        state
    }

    fn creds(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn login_selects_view_by_role() {
        let state = seeded_state();
        let admin = login(&state, &creds("admin", "admin123")).unwrap();
        assert_eq!(admin.view(), View::Admin);
        let john = login(&state, &creds("john", "john123")).unwrap();
        assert_eq!(john.view(), View::Staff);
        assert_eq!(john.user().name, "John Doe");
    }

    #[test]
    fn login_rejects_wrong_password_and_unknown_user() {
        let state = seeded_state();
        assert!(matches!(
            login(&state, &creds("john", "JOHN123")),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&state, &creds("nobody", "john123")),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn staff_session_is_not_admin() {
        let state = seeded_state();
        let john = login(&state, &creds("john", "john123")).unwrap();
        assert!(matches!(john.require_admin(), Err(AppError::Forbidden(_))));
        let admin = login(&state, &creds("admin", "admin123")).unwrap();
        assert!(admin.require_admin().is_ok());
        logout(admin);
    }
}
