//! Command dispatch for the calldoc CLI.

use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::{CommandResult, CommandSummary, InitSummary, init::init, scan::scan};
use super::exit_status::ExitStatus;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => {
            init()?;
            Ok(CommandResult {
                summary: CommandSummary::Init(InitSummary { created: true }),
                exit_status: ExitStatus::Success,
            })
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
