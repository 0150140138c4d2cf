use std::path::Path;

use agenda_db::{Scheduler, SqliteBlobStore};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use agenda_cli::commands::{add, conflicts, day, delete, edit, list, month, status, upcoming, util, week};
use agenda_cli::{Cli, Commands, Config, load_seed};

/// Load config and open the scheduler, ensuring the database directory exists.
fn open_scheduler(config_path: Option<&Path>) -> Result<(Scheduler<SqliteBlobStore>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let store =
        SqliteBlobStore::open(&config.database_path).context("failed to open database")?;
    let mut scheduler = Scheduler::new(store);
    let seed = load_seed(config.seed_path.as_deref());
    let loaded = scheduler.load(&seed).len();
    tracing::debug!(loaded, path = ?config.database_path, "opened event store");
    Ok((scheduler, config))
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let today = Local::now().date_naive();
    let (mut scheduler, config) = open_scheduler(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Add {
            title,
            date,
            fields,
        } => add::run(
            &mut stdout,
            &mut scheduler,
            &title,
            &date,
            fields,
            &config.default_color,
            today,
        )?,
        Commands::Edit {
            id,
            title,
            date,
            fields,
        } => edit::run(
            &mut stdout,
            &mut scheduler,
            id,
            title,
            date.as_deref(),
            fields,
            today,
        )?,
        Commands::Delete { id } => delete::run(&mut stdout, &mut scheduler, id)?,
        Commands::Complete { id } => delete::complete(&mut stdout, &mut scheduler, id)?,
        Commands::List {
            search,
            filter,
            month,
            json,
        } => {
            let reference = match month {
                Some(month) => {
                    let (year, month0) = util::parse_month(&month)?;
                    chrono::NaiveDate::from_ymd_opt(year, month0 + 1, 1)
                        .context("reference month out of range")?
                }
                None => today,
            };
            list::run(
                &mut stdout,
                &scheduler,
                &search,
                filter,
                reference,
                today,
                json,
            )?;
        }
        Commands::Upcoming { limit, json } => upcoming::run(
            &mut stdout,
            &scheduler,
            limit.unwrap_or(config.upcoming_limit),
            today,
            json,
        )?,
        Commands::Conflicts { ack, json } => {
            conflicts::run(&mut stdout, &mut scheduler, ack, json)?;
        }
        Commands::Status => status::run(&mut stdout, &scheduler, &config.database_path)?,
        Commands::Day { date } => {
            let date = util::parse_day(&date, today)?;
            day::run(&mut stdout, scheduler.events(), date)?;
        }
        Commands::Week { date } => {
            let date = util::parse_day(&date, today)?;
            week::run(&mut stdout, scheduler.events(), date)?;
        }
        Commands::Month { month: arg } => {
            let (year, month0) = match arg {
                Some(arg) => util::parse_month(&arg)?,
                None => (today.year(), today.month0()),
            };
            month::run(&mut stdout, scheduler.events(), year, month0)?;
        }
    }

    Ok(())
}
