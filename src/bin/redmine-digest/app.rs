use std::path::PathBuf;

use redmine_digest::Result;
use redmine_digest::calendar::Calendar;
use redmine_digest::config::Config;
use redmine_digest::digest::{self, RunOptions};
use redmine_digest::telemetry::init_tracing;
use tracing::info;

use super::cli::Cli;

const DEFAULT_CONFIG: &str = "config.toml";

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::load(&config_path, &cli.overrides())?;

    let calendar = Calendar::now();
    info!(
        today = %calendar.today,
        week_boundary = %calendar.week_boundary,
        project = %config.redmine.project,
        "starting digest run"
    );

    let options = RunOptions {
        insecure_http: cli.insecure,
        dry_run: cli.dry_run,
    };
    let outcome = digest::run(&config, calendar, options).await?;

    if cli.dry_run {
        println!("{}", outcome.message);
    }
    info!(
        expired = outcome.expired,
        due_soon = outcome.due_soon,
        posted = outcome.posted.is_some(),
        "digest run finished"
    );
    Ok(())
}
