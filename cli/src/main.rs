mod logging;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use timetally_core::{
    parse_report_date, parse_report_month, Config, FileTracker, SummaryKind, TrackerError,
};
use tracing::warn;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "timetally")]
#[command(about = "Track time per project and roll it up into daily and monthly summaries", long_about = None)]
struct Cli {
    /// Data directory (defaults to $TIMETALLY_HOME, then ~/.timetally)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive timer (default)
    Tui,
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectCommand,
    },
    /// Regenerate and print a summary
    Report {
        #[command(subcommand)]
        kind: ReportCommand,
    },
    /// Show time recorded today
    Today,
}

#[derive(clap::Subcommand)]
enum ProjectCommand {
    /// List projects and their hotkeys
    List,
    /// Add a project (usage: projects add "Client work" --hotkey 4)
    Add {
        name: String,
        /// Single digit 1-9
        #[arg(long, short = 'k')]
        hotkey: Option<String>,
    },
    /// Remove projects by id, id prefix or exact name
    Remove {
        #[arg(required = true)]
        projects: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
enum ReportCommand {
    /// Daily summary (today, yesterday, YYYY-MM-DD)
    Daily {
        #[arg(long, default_value = "today")]
        date: String,
    },
    /// Monthly summary (this, last, YYYY-MM)
    Monthly {
        #[arg(long, default_value = "this")]
        month: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = Config::resolve_data_dir(cli.data_dir)?;
    let (config, config_error) = match Config::read(&data_dir) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (Config::defaults_for(&data_dir), None),
        Err(e) => (Config::defaults_for(&data_dir), Some(e)),
    };

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    logging::enable_logging(&config.paths().logs_dir, &config.log_level, !interactive)?;
    if let Some(e) = config_error {
        warn!("ignoring config: {:#}", e);
    }

    let mut tracker = FileTracker::open(&config)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            tui::run(tracker)?;
        }
        Some(Commands::Projects { action }) => match action {
            ProjectCommand::List => {
                report::show_projects(&tracker.projects());
            }
            ProjectCommand::Add { name, hotkey } => {
                match tracker.add_project(&name, hotkey.as_deref()) {
                    Ok(id) => println!("Project added: {} (ID: {})", name.trim(), id),
                    Err(e) => println!("Error: {}", describe(&e)),
                }
            }
            ProjectCommand::Remove { projects } => {
                let mut ids = Vec::new();
                for arg in &projects {
                    match resolve_project(&tracker, arg) {
                        Ok(id) => ids.push(id),
                        Err(msg) => println!("Warning: {}", msg),
                    }
                }
                if ids.is_empty() {
                    return Ok(());
                }
                match tracker.remove_projects(&ids) {
                    Ok(n) => println!("Removed {} project(s).", n),
                    Err(e) => println!("Error: {}", describe(&e)),
                }
            }
        },
        Some(Commands::Report { kind }) => {
            let today = tracker.today();
            match kind {
                ReportCommand::Daily { date } => {
                    let date = parse_report_date(&date, today)?;
                    let summary = tracker.request_daily_report(Some(date))?;
                    report::show_summary(&format!("Daily summary {}", date), &summary);
                    print_location(&config, SummaryKind::Daily(date));
                }
                ReportCommand::Monthly { month } => {
                    let month = parse_report_month(&month, today)?;
                    let summary = tracker.request_monthly_report(Some(month))?;
                    report::show_summary(&format!("Monthly summary {}", month), &summary);
                    print_location(&config, SummaryKind::Monthly(month));
                }
            }
        }
        Some(Commands::Today) => {
            report::show_summary(&format!("Today {}", tracker.today()), &tracker.today_totals());
        }
    }
    Ok(())
}

/// Accepts a full id, a unique id prefix, or an exact project name.
fn resolve_project(tracker: &FileTracker, arg: &str) -> std::result::Result<Uuid, String> {
    if let Ok(id) = Uuid::parse_str(arg) {
        return Ok(id);
    }
    if let Some(id) = tracker.registry().find_by_name(arg) {
        return Ok(id);
    }

    let matches: Vec<Uuid> = tracker
        .projects()
        .iter()
        .map(|p| p.id)
        .filter(|id| id.to_string().starts_with(&arg.to_lowercase()))
        .collect();
    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(format!("Unknown project: '{}'", arg)),
        _ => Err(format!("Ambiguous project: '{}' matches {} ids", arg, matches.len())),
    }
}

fn print_location(config: &Config, kind: SummaryKind) {
    let path = config.paths().reports_dir.join(kind.file_name());
    println!("Written to {}", path.display());
}

/// Short, user-facing form of a rejected operation.
pub fn describe(err: &TrackerError) -> String {
    match err {
        TrackerError::Storage(e) => format!("storage error: {:#}", e),
        other => other.to_string(),
    }
}
