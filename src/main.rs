//! Rollcall - attendance reconciliation and reporting for punch exports.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rollcall as app;
use sea_orm::DatabaseConnection;

use app::config::{AppConfig, ConfigLoadResult};
use app::db;
use app::engine::{ClockTime, ScheduleBook, ShiftWindow, StatsWindow, aggregate, reconcile_batch};
use app::export::{self, EmployeeSummaryRow};
use app::import;
use app::models::{AttendanceRecord, Department};

/// Attendance reconciliation and reporting for punch exports.
#[derive(Parser)]
#[command(name = "rollcall", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a punch sheet, reconcile it, and store the day's records
    Import {
        /// Punch sheet CSV export
        file: PathBuf,

        /// Batch date; derived from a DDMMYYYY filename pattern when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show one date's attendance records
    Day {
        date: NaiveDate,

        /// Write the day sheet to an Excel file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Aggregate per-employee statistics over a date range
    Report {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,

        /// Write the report workbook to an Excel file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show one employee's aggregate statistics
    Employee {
        name: String,

        /// Limit to the last N days
        #[arg(long)]
        days: Option<u32>,
    },
    /// Persist a department shift-window override
    SetSchedule {
        /// Department key (administration, supervisor, packing, production, others)
        department: String,

        /// Expected entry time, e.g. "08:00" or "08:00 AM"
        entry: String,

        /// Expected exit time; earlier than entry means a night shift
        exit: String,
    },
    /// Delete all records for a date
    Delete { date: NaiveDate },
}

/// Outcome of an import run.
struct ImportOutcome {
    punches: usize,
    dropped: usize,
    records: usize,
    stored: usize,
    duration_secs: f64,
}

impl ImportOutcome {
    /// Get summary message.
    fn summary(&self) -> String {
        let base = format!(
            "Punches: {}, Records: {}, Stored: {} (took {:.1}s)",
            self.punches, self.records, self.stored, self.duration_secs
        );
        if self.dropped > 0 {
            format!("{base} - {} rows dropped", self.dropped)
        } else {
            base
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let (config, config_missing) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, false),
        ConfigLoadResult::Missing => (AppConfig::default(), true),
        ConfigLoadResult::Invalid(e) => {
            bail!("Invalid config at {}: {e}", config_path.display());
        }
    };

    // Initialize logging; the guard keeps the file writer alive
    let _guard = init_logging(&config);

    if config_missing {
        tracing::warn!(
            "Config missing at {}, using built-in defaults",
            config_path.display()
        );
    } else {
        tracing::info!("Config loaded from {}", config_path.display());
    }

    let db = db::connect(&config.database.connection_string())
        .await
        .context("Failed to connect to database")?;

    let overrides = db::department::load_overrides(&db).await?;
    let book = ScheduleBook::new(config.rosters.to_rosters(), overrides);

    match cli.command {
        Command::Import { file, date } => run_import(&db, &book, &file, date).await,
        Command::Day { date, export } => run_day(&db, date, export.as_deref()).await,
        Command::Report { from, to, out } => run_report(&db, &book, from, to, out.as_deref()).await,
        Command::Employee { name, days } => run_employee(&db, &book, &name, days).await,
        Command::SetSchedule {
            department,
            entry,
            exit,
        } => run_set_schedule(&db, &department, &entry, &exit).await,
        Command::Delete { date } => run_delete(&db, date).await,
    }
}

/// Set up the tracing subscriber, optionally with a daily rolling file.
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "rollcall.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

async fn run_import(
    db: &DatabaseConnection,
    book: &ScheduleBook,
    file: &Path,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let date = date
        .or_else(|| {
            file.file_name()
                .and_then(|n| n.to_str())
                .and_then(import::date_from_filename)
        })
        .context("No --date given and the filename carries no DDMMYYYY date")?;

    let start = std::time::Instant::now();

    let batch = import::read_punch_file(file, date)?;
    let records = reconcile_batch(&batch.punches, date, book);
    let stored = db::attendance::upsert(db, &records).await?;

    let outcome = ImportOutcome {
        punches: batch.punches.len(),
        dropped: batch.dropped,
        records: records.len(),
        stored,
        duration_secs: start.elapsed().as_secs_f64(),
    };

    tracing::info!("Import of {} complete: {}", file.display(), outcome.summary());
    println!("{}", outcome.summary());
    Ok(())
}

async fn run_day(
    db: &DatabaseConnection,
    date: NaiveDate,
    export_path: Option<&Path>,
) -> anyhow::Result<()> {
    let records = db::attendance::find_by_date(db, date).await?;

    if records.is_empty() {
        println!("No attendance records for {date}");
        return Ok(());
    }

    for record in &records {
        println!(
            "{:<26} {:<22} {:>8} {:>8} {:>6.1}  {}",
            record.employee_name,
            record.department.to_string(),
            clock_cell(record.entry),
            clock_cell(record.exit),
            record.total_hours,
            record.status.label()
        );
    }

    if let Some(path) = export_path {
        export::export_day_sheet(&records, path)?;
        println!("Day sheet written to {}", path.display());
    }

    Ok(())
}

async fn run_report(
    db: &DatabaseConnection,
    book: &ScheduleBook,
    from: NaiveDate,
    to: NaiveDate,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    if from > to {
        bail!("--from must not be after --to");
    }

    let records = db::attendance::find_by_date_range(db, from, to).await?;
    if records.is_empty() {
        println!("No attendance records between {from} and {to}");
        return Ok(());
    }

    // Group per employee, keeping first-seen order
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<AttendanceRecord>> = HashMap::new();
    for record in records {
        let key = record.employee_name.trim().to_lowercase();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(record);
    }

    let window = StatsWindow::from_date(from);
    let mut rows: Vec<EmployeeSummaryRow> = order
        .iter()
        .map(|key| {
            let group = &groups[key];
            let first = &group[0];
            EmployeeSummaryRow {
                employee_no: first.employee_no.clone(),
                employee_name: first.employee_name.clone(),
                department: first.department.clone(),
                stats: aggregate(group, window, book),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.stats
            .total_working_hours
            .partial_cmp(&a.stats.total_working_hours)
            .unwrap_or(Ordering::Equal)
    });

    println!(
        "{:<26} {:>7} {:>9} {:>9} {:>9} {:>6} {:>6}",
        "Employee", "Days", "Hours", "OT", "Short", "Late", "Early"
    );
    for row in &rows {
        println!(
            "{:<26} {:>7} {:>9.1} {:>9.1} {:>9.1} {:>6} {:>6}",
            row.employee_name,
            row.stats.total_present,
            row.stats.total_working_hours,
            row.stats.overtime_hours,
            row.stats.shortfall_hours,
            row.stats.late_entries,
            row.stats.early_exits
        );
    }

    if let Some(path) = out {
        export::export_summary_report(&rows, from, to, path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

async fn run_employee(
    db: &DatabaseConnection,
    book: &ScheduleBook,
    name: &str,
    days: Option<u32>,
) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let since = days.map(|d| today - chrono::TimeDelta::days(i64::from(d)));

    let records = db::attendance::find_by_employee(db, name, since).await?;
    if records.is_empty() {
        println!("No attendance records for {name}");
        return Ok(());
    }

    let window = match days {
        Some(d) => StatsWindow::last_days(d, today),
        None => StatsWindow::all(),
    };
    let stats = aggregate(&records, window, book);

    println!("Present days:        {}", stats.total_present);
    println!("Working hours:       {:.1}", stats.total_working_hours);
    println!("Average daily hours: {:.1}", stats.average_daily_hours);
    println!("Late entries:        {}", stats.late_entries);
    println!("Early exits:         {}", stats.early_exits);
    println!("Overtime hours:      {:.1}", stats.overtime_hours);
    println!("Shortfall hours:     {:.1}", stats.shortfall_hours);
    println!(
        "Sunday overtime:     {:.1} over {} Sundays",
        stats.sunday_overtime_hours, stats.sundays_worked
    );
    println!("Perfect days:        {}", stats.perfect_attendance_days);
    if let Some(day) = stats.longest_overtime_day {
        println!("Longest overtime:    {} ({:.1} h)", day.date, day.hours);
    }
    if let Some(status) = stats.most_frequent_status {
        println!("Most frequent:       {}", status.label());
    }
    Ok(())
}

async fn run_set_schedule(
    db: &DatabaseConnection,
    department: &str,
    entry: &str,
    exit: &str,
) -> anyhow::Result<()> {
    let Some(dept) = Department::parse_key(department) else {
        bail!(
            "Unknown department '{department}' (expected one of: {})",
            Department::all_keys().join(", ")
        );
    };

    // ClockTime::parse treats empty input as midnight; reject it up front.
    if entry.trim().is_empty() || exit.trim().is_empty() {
        bail!("Entry and exit times cannot be empty");
    }

    let window = ShiftWindow {
        entry: ClockTime::parse(entry),
        exit: ClockTime::parse(exit),
    };
    db::department::set_schedule(db, dept.key(), window).await?;

    println!("Schedule for {} set to {} - {}", dept.key(), window.entry, window.exit);
    Ok(())
}

async fn run_delete(db: &DatabaseConnection, date: NaiveDate) -> anyhow::Result<()> {
    let removed = db::attendance::delete_by_date(db, date).await?;
    println!("Removed {removed} records for {date}");
    Ok(())
}

fn clock_cell(time: Option<ClockTime>) -> String {
    time.map(|t| t.format_12h()).unwrap_or_else(|| "-".to_string())
}
