use anyhow::Result;

use super::render;
use crate::advisor::Advisor;
use crate::models::MonthKey;
use crate::service::BudgetService;

pub(crate) fn as_cli(args: &[String], service: &mut BudgetService, currency: &str) -> Result<()> {
    let saves = service.subscribe();
    let result = match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], service, currency),
        "ask" => cli_ask(&args[2..], service, currency),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    };

    service.flush();
    for outcome in saves.iter().flat_map(|rx| rx.try_iter()) {
        if let Err(e) = &outcome.result {
            eprintln!("Warning: could not save {}: {e}", outcome.month);
        }
    }
    result
}

fn print_usage() {
    println!("budgetwise: monthly budget tracker with a built-in advisor");
    println!();
    println!("Usage: budgetwise [-v] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch the interactive shell");
    println!("  summary [YYYY-MM]             Print projected vs. actual totals");
    println!("  ask [--month YYYY-MM] <text>  Ask the advisor (e.g. ask how are we doing)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Settings come from settings.json in the data directory and");
    println!("BUDGET_DATA_DIR, BUDGET_REMOTE_URL, BUDGET_REMOTE_KEY, BUDGET_OWNER_ID,");
    println!("BUDGET_CURRENCY. Set RUST_LOG for log output.");
}

fn parse_month(raw: Option<&String>) -> Result<MonthKey> {
    Ok(match raw {
        Some(s) => s.parse()?,
        None => MonthKey::current(),
    })
}

fn cli_summary(args: &[String], service: &mut BudgetService, currency: &str) -> Result<()> {
    let month = parse_month(args.first().filter(|a| !a.starts_with('-')))?;
    service.select_month(month)?;
    for line in render::dashboard(month, service.current()?, currency) {
        println!("{line}");
    }
    Ok(())
}

fn cli_ask(args: &[String], service: &mut BudgetService, currency: &str) -> Result<()> {
    let month_flag = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| &w[1]);
    let month = parse_month(month_flag)?;

    let mut words = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--month" {
            iter.next();
        } else {
            words.push(arg.as_str());
        }
    }
    if words.is_empty() {
        anyhow::bail!("Usage: budgetwise ask [--month YYYY-MM] <question>");
    }

    service.select_month(month)?;
    let reply = Advisor::new(currency).respond(&words.join(" "), service.current()?);
    println!("{}", reply.text);
    Ok(())
}
