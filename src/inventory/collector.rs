//! Inventory collection from named environments.

use std::collections::BTreeMap;

use super::parse::{parse_freeze_output, parse_runtime_probe, parse_show_output, RUNTIME_MARKER};
use super::Inventory;
use crate::config::CollectorSettings;
use crate::error::{EnvCheckError, Result};
use crate::shell::{self, quote_arg, CommandOptions, CommandResult};

/// Source of installed-package information for an environment.
///
/// Implementations perform no caching; every call re-reads the environment.
pub trait InventoryCollector {
    /// List installed packages and the interpreter version of `env`.
    fn collect(&self, env: &str) -> Result<Inventory>;

    /// Installed version of a single package in `env`.
    fn package_version(&self, env: &str, package: &str) -> Result<String>;
}

/// Collector that activates a conda environment through a shell.
#[derive(Debug, Clone)]
pub struct CondaCollector {
    settings: CollectorSettings,
}

impl CondaCollector {
    pub fn new(settings: CollectorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CollectorSettings {
        &self.settings
    }

    /// `<activate> && <runtime probe> && <list command>`, all in one process.
    pub fn collect_command(&self, env: &str) -> String {
        format!(
            "{} && {} && {}",
            self.activate_command(env),
            self.runtime_probe_command(),
            self.settings.list_command
        )
    }

    /// `<activate> && <show command>`.
    pub fn show_command(&self, env: &str, package: &str) -> String {
        format!(
            "{} && {}",
            self.activate_command(env),
            self.settings
                .show_command
                .replace("{package}", &quote_arg(package))
        )
    }

    fn activate_command(&self, env: &str) -> String {
        self.settings.activate.replace("{env}", &quote_arg(env))
    }

    fn runtime_probe_command(&self) -> String {
        format!(
            "{} -c \"import sys; print('{}%d.%d' % sys.version_info[:2])\"",
            self.settings.python, RUNTIME_MARKER
        )
    }

    fn run(&self, env: &str, command: &str) -> Result<CommandResult> {
        let options = CommandOptions {
            shell: Some(self.settings.shell.clone()),
        };
        let result = shell::execute(command, &options)?;
        if !result.success {
            return Err(EnvCheckError::EnvironmentActivation {
                env: env.to_string(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }
}

impl InventoryCollector for CondaCollector {
    fn collect(&self, env: &str) -> Result<Inventory> {
        let result = self.run(env, &self.collect_command(env))?;

        let runtime = parse_runtime_probe(&result.stdout).ok_or_else(|| {
            EnvCheckError::RuntimeVersionUnavailable {
                env: env.to_string(),
            }
        })?;
        let packages = parse_freeze_output(&result.stdout);

        tracing::debug!(
            "Collected {} packages from '{}' (Python {}) in {:?}",
            packages.len(),
            env,
            runtime,
            result.duration
        );

        Ok(Inventory::new(packages, runtime))
    }

    fn package_version(&self, env: &str, package: &str) -> Result<String> {
        let result = self.run(env, &self.show_command(env, package))?;
        parse_show_output(&result.stdout).ok_or_else(|| EnvCheckError::PackageNotFound {
            package: package.to_string(),
            env: env.to_string(),
        })
    }
}

/// In-memory collector with a fixed inventory.
#[derive(Debug, Clone, Default)]
pub struct StaticCollector {
    inventory: Option<Inventory>,
    failure: Option<String>,
}

impl StaticCollector {
    /// Collector that always returns `inventory`.
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Some(inventory),
            failure: None,
        }
    }

    /// Collector whose environment never activates.
    pub fn failing(stderr: &str) -> Self {
        Self {
            inventory: None,
            failure: Some(stderr.to_string()),
        }
    }

    fn inventory(&self, env: &str) -> Result<&Inventory> {
        match (&self.inventory, &self.failure) {
            (Some(inventory), None) => Ok(inventory),
            (_, failure) => Err(EnvCheckError::EnvironmentActivation {
                env: env.to_string(),
                code: Some(1),
                stderr: failure.clone().unwrap_or_default(),
            }),
        }
    }
}

impl InventoryCollector for StaticCollector {
    fn collect(&self, env: &str) -> Result<Inventory> {
        self.inventory(env).cloned()
    }

    fn package_version(&self, env: &str, package: &str) -> Result<String> {
        self.inventory(env)?
            .get(package)
            .map(str::to_string)
            .ok_or_else(|| EnvCheckError::PackageNotFound {
                package: package.to_string(),
                env: env.to_string(),
            })
    }
}

impl From<BTreeMap<String, String>> for StaticCollector {
    fn from(packages: BTreeMap<String, String>) -> Self {
        Self::new(Inventory::new(packages, "3.11".to_string()))
    }
}
