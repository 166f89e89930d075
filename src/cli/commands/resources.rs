//! Resources command implementation.
//!
//! The `envcheck resources` command samples host utilization and posts it
//! to the webhook.

use std::time::Duration;

use crate::cli::args::ResourcesArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::notify::{resource_card, Notifier, WebhookClient};
use crate::resources::{ResourceSampler, SystemSampler};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The resources command implementation.
pub struct ResourcesCommand {
    args: ResourcesArgs,
    settings: Settings,
}

impl ResourcesCommand {
    pub fn new(args: ResourcesArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        sampler: &dyn ResourceSampler,
        notifier: &dyn Notifier,
    ) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Sampling host resources");
        let snapshot = sampler.sample()?;
        spinner.finish_success(&format!(
            "{}: CPU {:.1}%, Memory {:.1}%, Swap {:.1}%",
            snapshot.host_name,
            snapshot.cpu_percent,
            snapshot.memory_percent,
            snapshot.swap_percent
        ));

        notifier.send(&resource_card(&snapshot))?;
        ui.success("Resource usage posted");

        Ok(CommandResult::success())
    }
}

impl Command for ResourcesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let notifier = WebhookClient::with_timeout(
            &self.args.webhook_url,
            Duration::from_secs(self.settings.notify.timeout_secs),
        )?;
        self.execute_with(ui, &SystemSampler::new(), &notifier)
    }
}
