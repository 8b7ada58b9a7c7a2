//! `booking-hours`: operator CLI for the salon's business-hours settings.
//!
//! Reads and edits the same `businessHoursSettings` record the dashboard
//! uses, through the file-backed store.
//!
//! ```text
//! booking-hours show
//! booking-hours toggle friday sunday
//! booking-hours window 09:00 "6:30 PM"
//! booking-hours slots 2026-10-23 --duration 45
//! booking-hours reset
//! ```
//!
//! Mutating subcommands apply every edit to the draft and then save once, so
//! subscribers and the appointment refresh flag see a single change.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use booking_core::{next_open_date, TimeOfDay, Weekday, WeeklySchedule};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use booking_hours::application::availability_config::AvailabilityConfig;
use booking_hours::infrastructure::storage::config::{self, AppConfig};
use booking_hours::infrastructure::storage::file_store::FileStore;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Business-hours settings for the salon booking CRM.
#[derive(Debug, Parser)]
#[command(
    name = "booking-hours",
    about = "View and edit the salon's weekly business hours",
    version
)]
struct Cli {
    /// Directory holding the stored settings records.
    ///
    /// Overrides `[storage] data_dir` from the config file.
    #[arg(long, global = true, env = "BOOKING_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to the TOML config file.  Defaults to the platform config dir.
    #[arg(long, global = true, env = "BOOKING_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the saved weekly schedule.
    Show,

    /// Flip one or more weekdays open/closed and save.
    Toggle {
        /// Day names (`friday`, `Fri`, ...).
        #[arg(required = true)]
        days: Vec<Weekday>,
    },

    /// Set the opening window applied to every day and save.
    Window {
        /// Opening time, `HH:MM` or `h:MM AM`.
        #[arg(value_parser = parse_time)]
        start: TimeOfDay,
        /// Closing time, `HH:MM` or `h:MM PM`.
        #[arg(value_parser = parse_time)]
        end: TimeOfDay,
    },

    /// List bookable start times on a date (`YYYY-MM-DD`).
    Slots {
        date: NaiveDate,
        /// Appointment length in minutes.  Defaults to the configured value.
        #[arg(long)]
        duration: Option<u16>,
        /// Minutes between start times.  Defaults to the configured value.
        #[arg(long)]
        step: Option<u16>,
    },

    /// Restore the default schedule and save.
    Reset,
}

fn parse_time(text: &str) -> Result<TimeOfDay, String> {
    text.parse::<TimeOfDay>()
        .or_else(|_| TimeOfDay::parse_12_hour(text))
        .map_err(|e| e.to_string())
}

fn load_app_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let loaded = match path {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    loaded.context("failed to load configuration")
}

fn print_schedule(schedule: &WeeklySchedule) {
    for (day, hours) in schedule.days_open.iter() {
        if hours.open {
            println!(
                "{:<10} {} - {}",
                day.name(),
                hours.start.to_12_hour(),
                hours.end.to_12_hour()
            );
        } else {
            println!("{:<10} closed", day.name());
        }
    }
    let days_off: Vec<&str> = schedule
        .working_hours
        .days_off
        .iter()
        .filter_map(|n| Weekday::from_number(*n).ok())
        .map(Weekday::name)
        .collect();
    println!("days off: {}", days_off.join(", "));
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app_config = load_app_config(cli.config.as_ref())?;

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => app_config
            .data_dir()
            .context("no --data-dir given and no platform config directory")?,
    };
    info!("using data directory {}", data_dir.display());

    let mut hours = AvailabilityConfig::new(Arc::new(FileStore::new(data_dir)));
    hours
        .load()
        .await
        .context("failed to read stored business hours")?;

    match cli.command {
        Command::Show => print_schedule(hours.persisted()),
        Command::Toggle { days } => {
            for day in days {
                hours.toggle_day(day);
            }
            hours.save().await.context("failed to save business hours")?;
            print_schedule(hours.persisted());
        }
        Command::Window { start, end } => {
            hours.set_window(start, end);
            hours.save().await.context("failed to save business hours")?;
            print_schedule(hours.persisted());
        }
        Command::Slots {
            date,
            duration,
            step,
        } => {
            let duration = duration.unwrap_or(app_config.booking.default_service_minutes);
            let step = step.unwrap_or(app_config.booking.slot_step_minutes);
            let slots = booking_core::bookable_slots(hours.persisted(), date, duration, step);
            if slots.is_empty() {
                println!("{date}: no bookable slots");
                let from = date.succ_opt().unwrap_or(date);
                if let Some(next) = next_open_date(hours.persisted(), from) {
                    println!("next open day: {next}");
                }
            } else {
                for slot in slots {
                    println!("{}", slot.to_12_hour());
                }
            }
        }
        Command::Reset => {
            hours.reset_to_defaults();
            hours.save().await.context("failed to save business hours")?;
            print_schedule(hours.persisted());
        }
    }

    Ok(())
}
