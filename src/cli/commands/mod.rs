//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and builds the real collector,
//! sampler and webhook client. Each command also exposes an
//! `execute_with` method taking those collaborators explicitly, so tests
//! can drive it with in-memory doubles.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod package;
pub mod resources;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
