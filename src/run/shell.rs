use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

use super::commands::{handle_command, ShellState};
use crate::advisor::Advisor;
use crate::models::MonthKey;
use crate::service::BudgetService;

const PROMPT: &str = "budget> ";

pub(crate) fn as_shell(service: &mut BudgetService, currency: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = run_shell(&mut stdin.lock(), &mut stdout, service, currency);

    // Let queued saves land before the process exits.
    service.flush();
    report_saves(&mut stdout, service)?;
    result
}

pub(crate) fn run_shell(
    input: &mut impl BufRead,
    out: &mut impl Write,
    service: &mut BudgetService,
    currency: &str,
) -> Result<()> {
    let advisor = Advisor::new(currency);
    let mut state = ShellState::new(currency);

    writeln!(
        out,
        "Budget assistant ({} store). Type :help for commands, or ask a question.",
        service.store_label()
    )?;
    if let Err(e) = service.select_month(MonthKey::current()) {
        writeln!(out, "Error: {e}")?;
    } else {
        state.show(service);
    }

    let mut line = String::new();
    while state.running {
        flush_output(out, &mut state)?;
        report_saves(out, service)?;

        write!(out, "{PROMPT}")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(cmd) = trimmed.strip_prefix(':') {
            handle_command(cmd, &mut state, service)?;
        } else {
            chat(trimmed, &advisor, &mut state, service);
        }
    }
    flush_output(out, &mut state)?;
    Ok(())
}

fn chat(text: &str, advisor: &Advisor, state: &mut ShellState, service: &BudgetService) {
    let Ok(record) = service.current() else {
        state.say("No month selected. Use :month YYYY-MM");
        return;
    };
    let reply = advisor.respond(text, record);
    debug!(intent = ?reply.intent, "Chat reply");
    state.say(reply.text);
    if let Some(view) = reply.view {
        state.view = view;
        state.show(service);
    }
}

fn flush_output(out: &mut impl Write, state: &mut ShellState) -> Result<()> {
    for line in state.take_output() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn report_saves(out: &mut impl Write, service: &BudgetService) -> Result<()> {
    for outcome in service.drain_notifications() {
        if let Err(e) = &outcome.result {
            writeln!(out, "Warning: could not save {}: {e}", outcome.month)?;
        }
    }
    Ok(())
}
