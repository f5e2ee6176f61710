use staffdesk::{
    error::AppError,
    models::{
        daily_report::SubmitDailyReport,
        department::CreateDepartment,
        leave_request::CreateLeaveRequest,
        project::CreateProject,
        request_status::Decision,
        user::{CreateMember, UpdateMember, UserResponse},
    },
    services::{
        admin, attendance,
        auth::{Session, View},
        leave, reports, roster,
    },
    state::AppState,
    types::{DepartmentId, LeaveRequestId, UserId, WeeklyReportId},
};

use super::{
    output::Output, Commands, DailyCommand, DepartmentCommand, LeaveCommand, MemberCommand,
    ProjectCommand, ReviewCommand,
};

fn require_view(session: &Session, view: View) -> Result<(), AppError> {
    if session.view() == view {
        return Ok(());
    }
    let name = match view {
        View::Staff => "staff",
        View::Admin => "admin",
    };
    Err(AppError::Forbidden(format!(
        "This command is only available in the {} view",
        name
    )))
}

pub(crate) fn dispatch(
    state: &AppState,
    session: &Session,
    command: Commands,
    out: &Output,
) -> Result<(), AppError> {
    match command {
        Commands::Login => {
            let user = UserResponse::from(session.user().clone());
            out.emit(&user, |u| {
                format!("Signed in as {} ({}, {} view)", u.name, u.username, u.role)
            });
        }
        Commands::CheckIn => {
            require_view(session, View::Staff)?;
            let record = attendance::check_in(state, session)?;
            out.emit(&record, |r| {
                format!(
                    "Checked in at {}",
                    r.check_in.map(|t| t.to_string()).unwrap_or_default()
                )
            });
        }
        Commands::CheckOut => {
            require_view(session, View::Staff)?;
            let record = attendance::check_out(state, session)?;
            out.emit(&record, |r| {
                format!(
                    "Checked out at {}",
                    r.check_out.map(|t| t.to_string()).unwrap_or_default()
                )
            });
        }
        Commands::Wfh => {
            require_view(session, View::Staff)?;
            let record = attendance::work_from_home(state, session)?;
            out.emit(&record, |r| format!("Marked {} for {}", r.status.as_str(), r.date));
        }
        Commands::Status => {
            require_view(session, View::Staff)?;
            let history = attendance::my_history(state, session)?;
            out.table(&history, "No attendance recorded yet", |r| {
                format!(
                    "{}  {:<8} in {:<8} out {}",
                    r.date,
                    r.status.as_str(),
                    r.check_in.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
                    r.check_out.map(|t| t.to_string()).unwrap_or_else(|| "-".into()),
                )
            });
        }
        Commands::Roster => {
            require_view(session, View::Staff)?;
            let members = roster::my_department_today(state, session)?;
            out.table(&members, "No members in your department", |m| {
                format!("{:<20} {:<28} {}", m.name, m.email, m.status.as_str())
            });
        }
        Commands::Tasks => {
            require_view(session, View::Staff)?;
            let tasks = roster::my_department(state, session)?
                .map(|d| d.tasks)
                .unwrap_or_default();
            out.table(&tasks, "Your department has no task catalog", |t| t.clone());
        }
        Commands::DailyReport { tasks } => {
            require_view(session, View::Staff)?;
            let report = reports::submit_daily(state, session, SubmitDailyReport { tasks })?;
            out.emit(&report, |r| {
                format!(
                    "Daily report submitted for {} ({} tasks, {} hours)",
                    r.date,
                    r.tasks.len(),
                    r.total_hours()
                )
            });
        }
        Commands::WeeklyReport => {
            require_view(session, View::Staff)?;
            let report = reports::submit_weekly(state, session)?;
            out.emit(&report, |r| {
                format!(
                    "Weekly report submitted for {} to {} ({} daily reports)",
                    r.week_start,
                    r.week_end,
                    r.daily_reports.len()
                )
            });
        }
        Commands::Reports => {
            require_view(session, View::Staff)?;
            let daily = reports::my_daily_reports(state, session)?;
            out.table(&daily, "No daily reports", |r| {
                format!("{}  {} tasks  {}h", r.date, r.tasks.len(), r.total_hours())
            });
            let weekly = reports::my_weekly_reports(state, session)?;
            out.table(&weekly, "No weekly reports", |r| {
                format!("week of {}  {}", r.week_start, r.status.as_str())
            });
        }
        Commands::Leave { command } => leave_command(state, session, command, out)?,
        Commands::Overview => {
            let overview = admin::overview(state, session)?;
            out.emit(&overview, |o| {
                format!(
                    "Staff: {}\nDepartments: {}\nPending leave requests: {}\nPending weekly reports: {}",
                    o.total_staff, o.departments, o.pending_leave_requests, o.pending_weekly_reports
                )
            });
        }
        Commands::Departments { command } => department_command(state, session, command, out)?,
        Commands::Members { command } => member_command(state, session, command, out)?,
        Commands::Projects { command } => match command {
            ProjectCommand::List => {
                let projects = admin::list_projects(state, session)?;
                out.table(&projects, "No projects", |p| {
                    format!("{:<10} {:<24} {:<10} {}", p.id, p.name, p.status.as_str(), p.description)
                });
            }
            ProjectCommand::Add {
                name,
                description,
                status,
            } => {
                let project = admin::create_project(
                    state,
                    session,
                    CreateProject {
                        name,
                        description,
                        status: status.into(),
                    },
                )?;
                out.emit(&project, |p| format!("Project {} created ({})", p.name, p.id));
            }
        },
        Commands::Weekly { command } => {
            let decision = match command {
                ReviewCommand::List => {
                    let weekly = reports::list_weekly(state, session)?;
                    out.table(&weekly, "No weekly reports", |r| {
                        format!(
                            "{:<38} user {:<6} week of {}  {} reports  {}",
                            r.id,
                            r.user_id,
                            r.week_start,
                            r.daily_reports.len(),
                            r.status.as_str()
                        )
                    });
                    return Ok(());
                }
                ReviewCommand::Approve { id } => (id, Decision::Approve),
                ReviewCommand::Reject { id } => (id, Decision::Reject),
            };
            let report =
                reports::review_weekly(state, session, &WeeklyReportId::from(decision.0), decision.1)?;
            out.emit(&report, |r| format!("Weekly report {} is now {}", r.id, r.status.as_str()));
        }
        Commands::Daily {
            command: DailyCommand::List,
        } => {
            let daily = reports::list_daily(state, session)?;
            out.table(&daily, "No daily reports", |r| {
                format!(
                    "{}  user {:<6} {} tasks  {}h",
                    r.date,
                    r.user_id,
                    r.tasks.len(),
                    r.total_hours()
                )
            });
        }
    }
    Ok(())
}

fn leave_command(
    state: &AppState,
    session: &Session,
    command: LeaveCommand,
    out: &Output,
) -> Result<(), AppError> {
    let (id, decision) = match command {
        LeaveCommand::Request { start, end, reason } => {
            require_view(session, View::Staff)?;
            let request = leave::submit(
                state,
                session,
                CreateLeaveRequest {
                    start_date: start,
                    end_date: end,
                    reason,
                },
            )?;
            out.emit(&request, |r| {
                format!("Leave request {} submitted ({} to {})", r.id, r.start_date, r.end_date)
            });
            return Ok(());
        }
        LeaveCommand::List => {
            let requests = match session.view() {
                View::Staff => leave::my_requests(state, session)?,
                View::Admin => leave::list_all(state, session)?,
            };
            out.table(&requests, "No leave requests", |r| {
                format!(
                    "{:<38} user {:<6} {} to {}  {:<9} {}",
                    r.id,
                    r.user_id,
                    r.start_date,
                    r.end_date,
                    r.status.as_str(),
                    r.reason
                )
            });
            return Ok(());
        }
        LeaveCommand::Approve { id } => (id, Decision::Approve),
        LeaveCommand::Reject { id } => (id, Decision::Reject),
    };

    let request = leave::decide(state, session, &LeaveRequestId::from(id), decision)?;
    out.emit(&request, |r| format!("Leave request {} is now {}", r.id, r.status.as_str()));
    Ok(())
}

fn department_command(
    state: &AppState,
    session: &Session,
    command: DepartmentCommand,
    out: &Output,
) -> Result<(), AppError> {
    let department = match command {
        DepartmentCommand::List => {
            let departments = admin::list_departments(state, session)?;
            out.table(&departments, "No departments", |d| {
                format!(
                    "{:<10} {:<16} manager {:<14} tasks: {}",
                    d.id,
                    d.name,
                    d.manager,
                    d.tasks.join(", ")
                )
            });
            return Ok(());
        }
        DepartmentCommand::Add { name, manager } => {
            admin::create_department(state, session, CreateDepartment { name, manager })?
        }
        DepartmentCommand::AddTask { id, label } => {
            admin::add_task(state, session, &DepartmentId::from(id), label)?
        }
        DepartmentCommand::UpdateTask { id, index, label } => {
            admin::update_task(state, session, &DepartmentId::from(id), index, label)?
        }
        DepartmentCommand::RemoveTask { id, index } => {
            admin::remove_task(state, session, &DepartmentId::from(id), index)?
        }
    };

    out.emit(&department, |d| {
        let tasks = d
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("  {}. {}", i, t))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{} ({})\n{}", d.name, d.id, tasks)
    });
    Ok(())
}

fn member_command(
    state: &AppState,
    session: &Session,
    command: MemberCommand,
    out: &Output,
) -> Result<(), AppError> {
    match command {
        MemberCommand::List => {
            let members: Vec<UserResponse> = admin::list_members(state, session)?
                .into_iter()
                .map(UserResponse::from)
                .collect();
            out.table(&members, "No members", |m| {
                format!(
                    "{:<38} {:<10} {:<18} {:<26} {:<12} {}",
                    m.id,
                    m.username,
                    m.name,
                    m.email,
                    m.department,
                    m.manager.as_deref().unwrap_or("-")
                )
            });
        }
        MemberCommand::Add {
            login,
            secret,
            name,
            email,
            department,
            manager,
        } => {
            let user = admin::create_member(
                state,
                session,
                CreateMember {
                    username: login,
                    password: secret,
                    name,
                    email,
                    department,
                    manager,
                },
            )?;
            let user = UserResponse::from(user);
            out.emit(&user, |u| format!("Member {} created ({})", u.username, u.id));
        }
        MemberCommand::Edit {
            id,
            name,
            email,
            department,
            manager,
        } => {
            let user = admin::update_member(
                state,
                session,
                &UserId::from(id),
                UpdateMember {
                    name,
                    email,
                    department,
                    manager,
                },
            )?;
            let user = UserResponse::from(user);
            out.emit(&user, |u| format!("Member {} updated", u.username));
        }
        MemberCommand::Delete { id } => {
            let id = UserId::from(id);
            admin::delete_member(state, session, &id)?;
            out.emit(&id, |id| format!("Member {} deleted", id));
        }
    }
    Ok(())
}
