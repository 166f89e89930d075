//! Package command implementation.
//!
//! The `envcheck package` command looks up one package's installed version
//! in a conda environment and posts it to the webhook. Failures are reported
//! on the console only.

use std::time::Duration;

use crate::cli::args::PackageArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::inventory::{CondaCollector, InventoryCollector};
use crate::notify::{package_version_card, Notifier, WebhookClient};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The package command implementation.
pub struct PackageCommand {
    args: PackageArgs,
    settings: Settings,
}

impl PackageCommand {
    pub fn new(args: PackageArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        collector: &dyn InventoryCollector,
        notifier: &dyn Notifier,
    ) -> Result<CommandResult> {
        let PackageArgs { env, package, .. } = &self.args;

        let mut spinner = ui.start_spinner(&format!("Looking up {} in {}", package, env));
        let version = match collector.package_version(env, package) {
            Ok(version) => {
                spinner.finish_success(&format!("{} {}", package, version));
                version
            }
            Err(e) => {
                spinner.finish_error(&format!("Could not look up {}", package));
                return Err(e);
            }
        };

        notifier.send(&package_version_card(package, &version))?;
        ui.success(&format!("Posted version of {} from {}", package, env));

        Ok(CommandResult::success())
    }
}

impl Command for PackageCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let collector = CondaCollector::new(self.settings.collector.clone());
        let notifier = WebhookClient::with_timeout(
            &self.args.webhook_url,
            Duration::from_secs(self.settings.notify.timeout_secs),
        )?;
        self.execute_with(ui, &collector, &notifier)
    }
}
