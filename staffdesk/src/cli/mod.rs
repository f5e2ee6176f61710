//! Command-line front end standing in for the staff and admin views.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use staffdesk::{
    config::Config,
    error::AppError,
    models::{daily_report::TaskEntry, project::ProjectStatus, user::LoginRequest},
    repositories::{seed, FileStore},
    services::auth,
    state::AppState,
};

use output::Output;

#[derive(Parser)]
#[command(name = "staffdesk")]
#[command(about = "Attendance, leave and task reporting desk")]
#[command(
    after_help = "Environment:\n  STAFFDESK_STORE_PATH       Store file (default ./staffdesk.json)\n  APP_TIMEZONE               Timezone used for \"today\"\n  STAFFDESK_SUBMISSION_DAY   Weekly report day (default Fri)\n  STAFFDESK_LOGIN_DELAY_MS   Pause before credentials are checked"
)]
pub(crate) struct Cli {
    /// Store file, overriding STAFFDESK_STORE_PATH.
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[arg(long, short = 'u', global = true, env = "STAFFDESK_USERNAME")]
    username: Option<String>,
    #[arg(long, short = 'p', global = true, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Print results as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check credentials and show which view they open.
    Login,

    // Staff view
    CheckIn,
    CheckOut,
    /// Mark today as work from home.
    Wfh,
    /// Today's attendance record and history.
    Status,
    /// Your department's members and their status today.
    Roster,
    /// Task labels offered by your department.
    Tasks,
    /// Submit today's report; repeat --task for each entry.
    DailyReport {
        /// Entry as "label|description|hours".
        #[arg(long = "task", required = true, value_parser = parse_task_entry)]
        tasks: Vec<TaskEntry>,
    },
    /// Bundle this week's daily reports for review.
    WeeklyReport,
    /// Your daily and weekly reports.
    Reports,
    Leave {
        #[command(subcommand)]
        command: LeaveCommand,
    },

    // Admin view
    Overview,
    Departments {
        #[command(subcommand)]
        command: DepartmentCommand,
    },
    Members {
        #[command(subcommand)]
        command: MemberCommand,
    },
    Projects {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    Weekly {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    Daily {
        #[command(subcommand)]
        command: DailyCommand,
    },
}

#[derive(Subcommand)]
pub(crate) enum LeaveCommand {
    Request {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        reason: String,
    },
    /// Own requests (staff) or every request (admin).
    List,
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum DepartmentCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        manager: String,
    },
    AddTask {
        id: String,
        label: String,
    },
    UpdateTask {
        id: String,
        index: usize,
        label: String,
    },
    RemoveTask {
        id: String,
        index: usize,
    },
}

#[derive(Subcommand)]
pub(crate) enum MemberCommand {
    List,
    Add {
        #[arg(long = "login")]
        login: String,
        #[arg(long = "secret")]
        secret: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long)]
        manager: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        manager: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProjectCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_enum, default_value_t = ProjectStatusArg::Active)]
        status: ProjectStatusArg,
    },
}

#[derive(Subcommand)]
pub(crate) enum ReviewCommand {
    List,
    Approve { id: String },
    Reject { id: String },
}

#[derive(Subcommand)]
pub(crate) enum DailyCommand {
    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum ProjectStatusArg {
    Active,
    Completed,
    OnHold,
}

impl From<ProjectStatusArg> for ProjectStatus {
    fn from(value: ProjectStatusArg) -> Self {
        match value {
            ProjectStatusArg::Active => ProjectStatus::Active,
            ProjectStatusArg::Completed => ProjectStatus::Completed,
            ProjectStatusArg::OnHold => ProjectStatus::OnHold,
        }
    }
}

fn parse_task_entry(raw: &str) -> Result<TaskEntry, String> {
    let mut parts = raw.splitn(3, '|');
    let (Some(task), Some(description), Some(hours)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err("expected \"label|description|hours\"".to_string());
    };
    let hours: f64 = hours
        .trim()
        .parse()
        .ok()
        .filter(|h: &f64| h.is_finite())
        .ok_or_else(|| format!("invalid hours: {}", hours.trim()))?;
    Ok(TaskEntry {
        task: task.trim().to_string(),
        description: description.trim().to_string(),
        hours,
    })
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    let out = Output::new(cli.json);
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };
    match execute(cli, config, &out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            out.error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli, mut config: Config, out: &Output) -> Result<(), AppError> {
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    tracing::debug!(
        store_path = %config.store_path.display(),
        time_zone = %config.time_zone,
        submission_day = %config.submission_day,
        "Loaded configuration from environment/.env"
    );

    let store = Arc::new(FileStore::new(config.store_path.clone()));
    let login_delay = Duration::from_millis(config.login_delay_ms);
    let state = AppState::new(store, config);
    seed::bootstrap(&state.repo)?;

    let credentials = LoginRequest {
        username: cli.username.unwrap_or_default(),
        password: cli.password.unwrap_or_default(),
    };
    tokio::time::sleep(login_delay).await;
    let session = auth::login(&state, &credentials)?;

    let result = commands::dispatch(&state, &session, cli.command, out);
    auth::logout(session);
    result
}
