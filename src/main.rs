mod advisor;
mod aggregate;
mod config;
mod models;
mod run;
mod service;
mod store;
mod util;

#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;

use anyhow::Result;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Settings;
use service::BudgetService;
use store::{SessionSource, StaticSession};

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();
    let verbose = take_flag(&mut args, &["-v", "--verbose"]);

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let settings = Settings::load()?;
    let session = Arc::new(StaticSession::new(settings.owner_id.clone()));
    if settings.remote.is_some() && !session.is_logged_in() {
        warn!("Remote store configured without BUDGET_OWNER_ID; nothing will be saved");
    }
    let store = store::open_store(&settings, session)?;
    let mut service = BudgetService::new(store)?;

    match args.len() {
        1 => run::as_shell(&mut service, &settings.currency),
        _ => run::as_cli(&args, &mut service, &settings.currency),
    }
}

/// Remove every occurrence of any of `names` from `args`.
fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    let before = args.len();
    args.retain(|a| !names.contains(&a.as_str()));
    args.len() != before
}
