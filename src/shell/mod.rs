//! Shell command execution.

pub mod command;

pub use command::{default_shell, execute, quote_arg, CommandOptions, CommandResult};
