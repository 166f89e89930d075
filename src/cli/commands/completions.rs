//! Shell completions generation.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Write the completion script for `shell` to `out`.
    pub fn generate_to(shell: Shell, out: &mut dyn Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "envcheck", out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        Self::generate_to(self.args.shell, &mut lock);
        lock.flush()?;
        Ok(CommandResult::success())
    }
}
