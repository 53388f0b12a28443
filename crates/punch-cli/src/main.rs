use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use punch_core::{Task, TaskId};
use punch_idle::{IdleDetector, NativeSource};
use tracing_subscriber::EnvFilter;

use punch_cli::commands::{report, track, watch};
use punch_cli::{Cli, Commands, Config, Timesheet, TrackingController};

/// Single-threaded runtime for the commands that poll for idle time.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()
        .context("failed to start async runtime")
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match &cli.command {
        Some(Commands::Watch { threshold }) => {
            let threshold = config
                .idle_threshold(*threshold)
                .context("invalid idle threshold")?;
            let mut detector = IdleDetector::new(NativeSource::new());
            let mut stdout = std::io::stdout().lock();
            runtime()?.block_on(watch::run(
                &mut stdout,
                &mut detector,
                threshold,
                config.poll_interval().context("invalid poll interval")?,
                interrupted(),
            ))?;
        }
        Some(Commands::Track {
            task,
            name,
            comment,
            threshold,
        }) => {
            let task_id = TaskId::new(*task).context("invalid task ID")?;
            let name = name.clone().unwrap_or_else(|| format!("Task {task_id}"));
            let options = track::TrackOptions {
                task: Task::new(task_id, name),
                comment: comment.clone(),
                threshold: config
                    .idle_threshold(*threshold)
                    .context("invalid idle threshold")?,
                poll: config
                    .poll_interval()
                    .context("invalid poll interval")?,
            };
            let mut controller = TrackingController::new(config.installation());
            let mut detector = IdleDetector::new(NativeSource::new());
            let mut stdout = std::io::stdout().lock();
            runtime()?.block_on(track::run(
                &mut stdout,
                &mut controller,
                &mut detector,
                options,
                interrupted(),
            ))?;
        }
        Some(Commands::Report { input, date, json }) => {
            let sheet = Timesheet::load(input.as_deref())?;
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let mut stdout = std::io::stdout().lock();
            report::run(&mut stdout, &sheet, today, &Local, *json)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
