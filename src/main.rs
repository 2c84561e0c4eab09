use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use serde::Serialize;
use stampfmt::config::{self, Settings};
use stampfmt::{DateParts, Formatter, calendar};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stampfmt")]
#[command(about = "Format timestamps, durations and byte counts for display")]
#[command(version)]
struct Cli {
    /// Timezone: local, utc, or an offset like +05:30
    /// Can also be set via STAMPFMT_TZ environment variable
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Render midnight and noon as 12 instead of 0
    /// Can also be set via STAMPFMT_MIDNIGHT=12
    #[arg(long, global = true)]
    midnight_twelve: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a timestamp as DD/MM/YYYY
    Date {
        #[arg(allow_hyphen_values = true)]
        secs: i64,
    },

    /// Print a timestamp as a 12-hour clock time
    Time {
        #[arg(allow_hyphen_values = true)]
        secs: i64,
    },

    /// Print the time-of-day of a timestamp as HH:MM:SS
    Duration {
        #[arg(allow_hyphen_values = true)]
        secs: i64,
    },

    /// Print a number of elapsed seconds as HH:MM:SS
    Elapsed {
        #[arg(allow_hyphen_values = true)]
        secs: i64,
    },

    /// Print a byte count with a unit suffix
    Size { bytes: u64 },

    /// Print date, time and time-of-day of a timestamp
    All {
        #[arg(allow_hyphen_values = true)]
        secs: i64,
    },

    /// Print the name and length of a month
    Calendar {
        year: i32,
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// Format the current instant
    Now,

    /// Show the resolved settings
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Serialize)]
struct Rendered<T: Serialize> {
    input: T,
    output: String,
}

#[derive(Serialize)]
struct InstantReport {
    secs: i64,
    date: String,
    time: String,
    duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parts: Option<DateParts>,
}

impl InstantReport {
    fn new(fmt: &Formatter, secs: i64) -> Self {
        Self {
            secs,
            date: fmt.date_string(secs),
            time: fmt.time_string(secs),
            duration: fmt.duration(secs),
            parts: fmt.parts(secs),
        }
    }

    fn print(&self) {
        println!("Date:      {}", self.date);
        println!("Time:      {}", self.time);
        println!("Clock:     {}", self.duration);
    }
}

#[derive(Serialize)]
struct MonthReport {
    year: i32,
    month: u32,
    name: &'static str,
    short_name: &'static str,
    days: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = Settings::resolve(cli.tz.as_deref(), cli.midnight_twelve)
        .context("Invalid --tz value")?;
    let fmt = settings.formatter();

    match cli.command {
        Commands::Date { secs } => emit(cli.json, secs, fmt.date_string(secs))?,
        Commands::Time { secs } => emit(cli.json, secs, fmt.time_string(secs))?,
        Commands::Duration { secs } => emit(cli.json, secs, fmt.duration(secs))?,
        Commands::Elapsed { secs } => emit(cli.json, secs, stampfmt::elapsed_from_secs(secs))?,
        Commands::Size { bytes } => emit(cli.json, bytes, stampfmt::file_size_from_bytes(bytes))?,

        Commands::All { secs } => report_instant(cli.json, &fmt, secs)?,

        Commands::Now => report_instant(cli.json, &fmt, calendar::now_secs())?,

        Commands::Calendar { year, month } => {
            let report = month_report(year, month)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} {} ({}): {} days", report.name, year, report.short_name, report.days);
            }
        }

        Commands::Config => print_config(cli.json, &settings)?,

        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, input: T, output: String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&Rendered { input, output })?);
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn report_instant(json: bool, fmt: &Formatter, secs: i64) -> Result<()> {
    let report = InstantReport::new(fmt, secs);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn month_report(year: i32, month: u32) -> Result<MonthReport> {
    let days = calendar::days_in_month(year, month)
        .with_context(|| format!("No such month: {}-{:02}", year, month))?;
    let name = calendar::long_month_name(month)
        .with_context(|| format!("No name for month {}", month))?;
    let short_name = calendar::short_month_name(month)
        .with_context(|| format!("No name for month {}", month))?;

    Ok(MonthReport {
        year,
        month,
        name,
        short_name,
        days,
    })
}

/// Print the resolved timezone and midnight style
fn print_config(json: bool, settings: &Settings) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "tz": settings.tz.to_string(),
            "tz_source": settings.source(),
            "midnight": settings.midnight,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let source = match settings.source() {
        config::Source::Flag => "flag",
        config::Source::Env => "env",
        config::Source::Default => "default",
    };
    println!("Timezone: {} ({})", settings.tz, source);
    println!("Midnight: {:?}", settings.midnight);
    Ok(())
}

/// Generate shell completions
fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
