use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use punchclock::commands::{self, AppState, CommandError};
use punchclock::config::AppConfig;
use punchclock::utils::logger;

#[derive(Debug, Parser)]
#[command(name = "punchclock", version, about = "员工打卡与任务评分系统")]
struct Cli {
    /// Data directory holding the CSV tables.
    #[arg(long, env = "PUNCHCLOCK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory for stored issue photos.
    #[arg(long, env = "PUNCHCLOCK_UPLOAD_DIR")]
    uploads_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 验证账号密码并显示角色
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        password: String,
    },
    /// 上班打卡（含迟到判定）
    ClockIn {
        #[arg(long)]
        user: String,
    },
    /// 下班打卡
    ClockOut {
        #[arg(long)]
        user: String,
    },
    /// 查看今日任务清单
    Checklist {
        #[arg(long)]
        user: String,
    },
    /// 储存今日任务完成状态并计算得分
    SaveChecklist {
        #[arg(long)]
        user: String,
        /// 已完成的任务编号，逗号分隔
        #[arg(long = "done", value_delimiter = ',')]
        completed: Vec<String>,
    },
    /// 回报问题（最多 5 张图片）
    ReportIssue {
        #[arg(long)]
        user: String,
        #[arg(long = "type")]
        issue_type: String,
        #[arg(long)]
        description: String,
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
    },
    /// 查看自己回报过的问题
    MyIssues {
        #[arg(long)]
        user: String,
    },
    /// 查看全部班表（管理员）
    ScheduleList,
    /// 新增或覆盖一笔班表（管理员）
    ScheduleSet {
        #[arg(long)]
        user: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
    },
    /// 以 CSV 档整批更新班表（管理员）
    ScheduleImport {
        #[arg(long)]
        file: PathBuf,
    },
    /// 查看最近的打卡纪录（管理员）
    ClockLog {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// 查看全部问题回报（管理员）
    IssueList,
    /// 更改问题状态（管理员）
    IssueStatus {
        #[arg(long)]
        id: String,
        /// 未处理 / 处理中 / 已完成
        #[arg(long)]
        status: String,
    },
    /// 为员工加减分（管理员）
    Adjust {
        #[arg(long)]
        user: String,
        #[arg(long)]
        date: String,
        #[arg(long, allow_hyphen_values = true)]
        score: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.log_dir = data_dir.join("logs");
        config.data_dir = data_dir;
    }
    if let Some(uploads_dir) = cli.uploads_dir {
        config.uploads_dir = uploads_dir;
    }

    if let Err(error) = logger::init_logging(&config.log_dir) {
        eprintln!("failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("failed to open data directory: {error}");
            return ExitCode::FAILURE;
        }
    };

    match run(&state, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_error(&error);
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Login { user, password } => {
            print_json(&commands::auth::login(state, &user, &password)?)
        }
        Command::ClockIn { user } => print_json(&commands::attendance::clock_in(state, &user)?),
        Command::ClockOut { user } => print_json(&commands::attendance::clock_out(state, &user)?),
        Command::Checklist { user } => {
            print_json(&commands::tasks::checklist_fetch(state, &user)?)
        }
        Command::SaveChecklist { user, completed } => {
            print_json(&commands::tasks::checklist_save(state, &user, &completed)?)
        }
        Command::ReportIssue {
            user,
            issue_type,
            description,
            photos,
        } => print_json(
            &commands::issues::issue_report(state, &user, &issue_type, &description, photos)
                .await?,
        ),
        Command::MyIssues { user } => {
            print_json(&commands::issues::issues_list_mine(state, &user)?)
        }
        Command::ScheduleList => print_json(&commands::admin::schedule_list(state)?),
        Command::ScheduleSet { user, date, start } => {
            print_json(&commands::admin::schedule_upsert(state, &user, &date, &start)?)
        }
        Command::ScheduleImport { file } => {
            print_json(&commands::admin::schedule_import(state, &file)?)
        }
        Command::ClockLog { limit } => {
            print_json(&commands::admin::clock_log_recent(state, limit)?)
        }
        Command::IssueList => print_json(&commands::admin::issues_list_all(state)?),
        Command::IssueStatus { id, status } => {
            print_json(&commands::admin::issue_set_status(state, &id, &status)?)
        }
        Command::Adjust { user, date, score } => {
            print_json(&commands::admin::adjustment_add(state, &user, &date, score)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CommandError::new("UNKNOWN", format!("序列化失败: {err}"), None))?;
    println!("{rendered}");
    Ok(())
}

fn report_error(error: &CommandError) {
    match serde_json::to_string_pretty(error) {
        Ok(rendered) => eprintln!("{rendered}"),
        Err(_) => eprintln!("{} - {}", error.code, error.message),
    }
}
