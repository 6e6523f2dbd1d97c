use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use top_users_stats::{
    models::{TimeWindow, TopLimit},
    services::{FetchOutcome, HttpExecutor, LeaderboardRow, StatsView, TracingNotifier},
    utils::time::parse_timestamp,
    Config,
};

#[derive(Parser)]
#[command(name = "top-users")]
#[command(about = "Rank users by quota consumption over a time window (max 30 days)")]
#[command(version)]
struct Cli {
    /// Window start: epoch seconds, RFC 3339, or "YYYY-MM-DD HH:MM:SS" local time
    #[arg(long)]
    start: Option<String>,

    /// Window end, same formats as --start (default: now)
    #[arg(long)]
    end: Option<String>,

    /// Number of users to show: 10, 20 or 30
    #[arg(short, long, value_parser = parse_limit)]
    limit: Option<TopLimit>,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// TOML file with settings; TOP_USERS_* variables override it
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    window: TimeWindow,
    limit: u32,
    rows: &'a [LeaderboardRow],
}

fn parse_limit(value: &str) -> std::result::Result<TopLimit, String> {
    let n: u32 = value.parse().map_err(|_| format!("not a number: {}", value))?;
    TopLimit::try_from(n).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "top_users_stats=info,top_users=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let executor = HttpExecutor::new(&config)?;
    let mut view = StatsView::from_config(&config, executor, TracingNotifier);

    if cli.start.is_some() || cli.end.is_some() {
        let today = view.window();
        let start = match cli.start.as_deref() {
            Some(s) => parse_timestamp(s)?,
            None => today.start_secs().unwrap_or_default(),
        };
        let end = match cli.end.as_deref() {
            Some(s) => parse_timestamp(s)?,
            None => today.end_secs().unwrap_or_default(),
        };

        let window = view.set_window(start, end);
        if window.start != Some(start.min(end)) {
            info!(
                "Requested window exceeds 30 days, showing {} to {}",
                format_instant(window.start_secs()),
                format_instant(window.end_secs())
            );
        }
    }

    if let Some(limit) = cli.limit {
        view.set_limit(limit);
    }

    let outcome = view.refresh().await;
    let rows = view.rows();

    if cli.json {
        let report = Report {
            window: view.window(),
            limit: view.limit().get(),
            rows: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(view.window(), view.limit(), &rows);
    }

    Ok(match outcome {
        FetchOutcome::Failed(_) => ExitCode::FAILURE,
        FetchOutcome::Applied(_) | FetchOutcome::Superseded => ExitCode::SUCCESS,
    })
}

fn format_instant(secs: Option<i64>) -> String {
    secs.and_then(|s| Local.timestamp_opt(s, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unbounded".to_string())
}

fn print_table(window: TimeWindow, limit: TopLimit, rows: &[LeaderboardRow]) {
    println!(
        "{} users, {} to {}",
        limit,
        format_instant(window.start_secs()),
        format_instant(window.end_secs())
    );

    if rows.is_empty() {
        println!("No data");
        return;
    }

    let name_width = rows
        .iter()
        .map(|r| r.username.chars().count())
        .max()
        .unwrap_or(0)
        .max("Username".len());

    println!(
        "{:>4}  {:<name_width$}  {:>25}  {:>5}  {:>14}",
        "Rank", "Username", "Remaining / Total", "Left", "Used in window",
    );
    for row in rows {
        println!(
            "{:>4}  {:<name_width$}  {:>25}  {:>5}  {:>14}",
            row.rank, row.username, row.balance_label, row.percent_label, row.used_in_window_label,
        );
    }
}
