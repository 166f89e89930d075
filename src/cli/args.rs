//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::notify::ReportStyle;

/// envcheck - Conda environment compatibility and host health checks.
#[derive(Debug, Parser)]
#[command(name = "envcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML settings file
    #[arg(short, long, global = true, env = "ENVCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also print the full report to the console
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare an environment against a requirements manifest
    Check(CheckArgs),

    /// Report the installed version of one package
    Package(PackageArgs),

    /// Report host CPU, memory and swap usage
    Resources(ResourcesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Commands {
    /// Subcommand name, safe to log. Arguments may carry webhook secrets.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check(_) => "check",
            Self::Package(_) => "package",
            Self::Resources(_) => "resources",
            Self::Completions(_) => "completions",
        }
    }
}

/// When `check` posts a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NotifyPolicy {
    /// Only when there is at least one finding
    #[default]
    OnFindings,
    /// Every run, including clean ones
    Always,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Name of the conda environment
    pub env: String,

    /// Requirements manifest, one requirement per line
    pub manifest: PathBuf,

    /// Required Python version as MAJOR.MINOR
    #[arg(value_parser = parse_python_version)]
    pub python_version: String,

    /// Webhook to post the report to
    #[arg(env = "ENVCHECK_WEBHOOK_URL")]
    pub webhook_url: String,

    /// Report layout (defaults to the configured style)
    #[arg(long, value_enum)]
    pub style: Option<ReportStyle>,

    /// When to post the report
    #[arg(long, value_enum, default_value_t = NotifyPolicy::OnFindings)]
    pub notify: NotifyPolicy,

    /// Do not post an alert when the environment cannot be activated
    #[arg(long)]
    pub no_failure_alert: bool,
}

/// Arguments for the `package` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackageArgs {
    /// Name of the conda environment
    pub env: String,

    /// Package to look up
    pub package: String,

    /// Webhook to post the version to
    #[arg(env = "ENVCHECK_WEBHOOK_URL")]
    pub webhook_url: String,
}

/// Arguments for the `resources` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResourcesArgs {
    /// Webhook to post the snapshot to
    #[arg(env = "ENVCHECK_WEBHOOK_URL")]
    pub webhook_url: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Accept `MAJOR.MINOR` with numeric parts, e.g. `3.11`.
fn parse_python_version(value: &str) -> Result<String, String> {
    let valid = value
        .split_once('.')
        .map(|(major, minor)| {
            [major, minor]
                .iter()
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        })
        .unwrap_or(false);

    if valid {
        Ok(value.to_string())
    } else {
        Err(format!("expected MAJOR.MINOR (e.g. 3.11), got '{}'", value))
    }
}
