mod cli;
mod commands;
mod render;
mod shell;

pub(crate) use cli::as_cli;
pub(crate) use shell::as_shell;
