//! Admin surfaces over departments, members and projects.
//!
//! Every operation here requires an admin session.

use serde::Serialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        department::{CreateDepartment, Department},
        leave_request::LeaveRequest,
        project::{CreateProject, Project},
        user::{CreateMember, UpdateMember, User},
        weekly_report::WeeklyReport,
    },
    services::auth::Session,
    state::AppState,
    types::{DepartmentId, UserId},
};

/// Headline counts for the admin landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_staff: usize,
    pub departments: usize,
    pub pending_leave_requests: usize,
    pub pending_weekly_reports: usize,
}

pub fn overview(state: &AppState, session: &Session) -> Result<Overview, AppError> {
    session.require_admin()?;
    Ok(Overview {
        total_staff: state
            .repo
            .load::<User>()?
            .iter()
            .filter(|u| u.is_staff())
            .count(),
        departments: state.repo.load::<Department>()?.len(),
        pending_leave_requests: state
            .repo
            .load::<LeaveRequest>()?
            .iter()
            .filter(|r| r.is_pending())
            .count(),
        pending_weekly_reports: state
            .repo
            .load::<WeeklyReport>()?
            .iter()
            .filter(|r| r.status.is_pending())
            .count(),
    })
}

// Departments

pub fn list_departments(state: &AppState, session: &Session) -> Result<Vec<Department>, AppError> {
    session.require_admin()?;
    state.repo.load::<Department>()
}

pub fn create_department(
    state: &AppState,
    session: &Session,
    payload: CreateDepartment,
) -> Result<Department, AppError> {
    session.require_admin()?;
    payload.validate()?;
    let department = state
        .repo
        .append(Department::new(payload.name, payload.manager))?;
    tracing::info!(department_id = %department.id, name = %department.name, "Department created");
    Ok(department)
}

/// Appends a task label to the end of the catalog.
pub fn add_task(
    state: &AppState,
    session: &Session,
    id: &DepartmentId,
    label: String,
) -> Result<Department, AppError> {
    edit_tasks(state, session, id, |tasks| {
        tasks.push(label);
        Ok(())
    })
}

/// Replaces the label at `index`.
pub fn update_task(
    state: &AppState,
    session: &Session,
    id: &DepartmentId,
    index: usize,
    label: String,
) -> Result<Department, AppError> {
    edit_tasks(state, session, id, |tasks| {
        let slot = tasks
            .get_mut(index)
            .ok_or_else(|| AppError::NotFound(format!("No task at position {}", index)))?;
        *slot = label;
        Ok(())
    })
}

/// Removes the label at `index`, shifting later labels down.
pub fn remove_task(
    state: &AppState,
    session: &Session,
    id: &DepartmentId,
    index: usize,
) -> Result<Department, AppError> {
    edit_tasks(state, session, id, |tasks| {
        if index >= tasks.len() {
            return Err(AppError::NotFound(format!("No task at position {}", index)));
        }
        tasks.remove(index);
        Ok(())
    })
}

/// Overwrites the whole catalog, as the task editor's save button does.
pub fn replace_tasks(
    state: &AppState,
    session: &Session,
    id: &DepartmentId,
    labels: Vec<String>,
) -> Result<Department, AppError> {
    edit_tasks(state, session, id, |tasks| {
        *tasks = labels;
        Ok(())
    })
}

fn edit_tasks<F>(
    state: &AppState,
    session: &Session,
    id: &DepartmentId,
    edit: F,
) -> Result<Department, AppError>
where
    F: FnOnce(&mut Vec<String>) -> Result<(), AppError>,
{
    session.require_admin()?;
    let mut departments = state.repo.load::<Department>()?;
    let department = departments
        .iter_mut()
        .find(|d| &d.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))?;

    edit(&mut department.tasks)?;
    let updated = department.clone();
    state.repo.replace_all(&departments)?;

    tracing::info!(department_id = %id, tasks = updated.tasks.len(), "Department tasks saved");
    Ok(updated)
}

// Members

/// Staff identities, as shown in the member table.
pub fn list_members(state: &AppState, session: &Session) -> Result<Vec<User>, AppError> {
    session.require_admin()?;
    Ok(state
        .repo
        .load::<User>()?
        .into_iter()
        .filter(|u| u.is_staff())
        .collect())
}

/// Adds a staff identity. Username uniqueness is not enforced.
pub fn create_member(
    state: &AppState,
    session: &Session,
    payload: CreateMember,
) -> Result<User, AppError> {
    session.require_admin()?;
    payload.validate()?;
    let user = state.repo.append(User::from_member(payload))?;
    tracing::info!(user_id = %user.id, username = %user.username, "Member created");
    Ok(user)
}

pub fn update_member(
    state: &AppState,
    session: &Session,
    id: &UserId,
    update: UpdateMember,
) -> Result<User, AppError> {
    session.require_admin()?;
    let mut users = state.repo.load::<User>()?;
    let user = users
        .iter_mut()
        .find(|u| &u.id == id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    user.apply_update(update);
    let updated = user.clone();
    state.repo.replace_all(&users)?;

    tracing::info!(user_id = %id, "Member updated");
    Ok(updated)
}

/// Removes the identity only. Attendance, report and leave rows that
/// reference it are kept as orphans.
pub fn delete_member(state: &AppState, session: &Session, id: &UserId) -> Result<(), AppError> {
    let admin = session.require_admin()?;
    if &admin.id == id {
        return Err(AppError::Conflict("Cannot delete the signed-in account".into()));
    }

    let mut users = state.repo.load::<User>()?;
    let before = users.len();
    users.retain(|u| &u.id != id);
    if users.len() == before {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }
    state.repo.replace_all(&users)?;

    tracing::info!(user_id = %id, "Member deleted");
    Ok(())
}

// Projects

pub fn list_projects(state: &AppState, session: &Session) -> Result<Vec<Project>, AppError> {
    session.require_admin()?;
    state.repo.load::<Project>()
}

pub fn create_project(
    state: &AppState,
    session: &Session,
    payload: CreateProject,
) -> Result<Project, AppError> {
    session.require_admin()?;
    payload.validate()?;
    let project = state
        .repo
        .append(Project::new(payload, state.clock.now_utc()))?;
    tracing::info!(project_id = %project.id, status = project.status.as_str(), "Project created");
    Ok(project)
}
