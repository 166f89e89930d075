//! Command-line interface for envcheck.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, NotifyPolicy, PackageArgs, ResourcesArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
