//! Check command implementation.
//!
//! The `envcheck check` command compares a conda environment against a
//! requirements manifest and a required Python version, and posts the
//! incompatibilities to the webhook.

use std::time::Duration;

use crate::cli::args::{CheckArgs, NotifyPolicy};
use crate::compat::{evaluate, CheckStatus, CompatibilityReport};
use crate::config::Settings;
use crate::error::{EnvCheckError, Result};
use crate::inventory::{CondaCollector, InventoryCollector};
use crate::notify::{compatibility_card, failure_card, Notifier, WebhookClient};
use crate::requirements::load_manifest;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    settings: Settings,
}

impl CheckCommand {
    pub fn new(args: CheckArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Run the check against explicit collaborators.
    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        collector: &dyn InventoryCollector,
        notifier: &dyn Notifier,
    ) -> Result<CommandResult> {
        let env = self.args.env.as_str();

        ui.show_header(&format!(
            "Checking {} against {} (Python {})",
            env,
            self.args.manifest.display(),
            self.args.python_version
        ));

        // Manifest errors abort before anything is spawned or posted.
        let requirements = load_manifest(&self.args.manifest)?;

        let mut spinner = ui.start_spinner(&format!("Activating {}", env));
        let inventory = match collector.collect(env) {
            Ok(inventory) => {
                spinner.finish_success(&format!(
                    "Collected {} packages from {} (Python {})",
                    inventory.len(),
                    env,
                    inventory.runtime_version()
                ));
                inventory
            }
            Err(e) => {
                spinner.finish_error(&format!("Could not activate {}", env));
                if is_activation_failure(&e) && !self.args.no_failure_alert {
                    self.send_failure_alert(notifier, &e);
                }
                return Err(e);
            }
        };

        let report = evaluate(env, &inventory, &requirements, &self.args.python_version);
        let findings = report.findings();

        if ui.output_mode().shows_report() {
            ui.message(&console_table(&report).render());
        }

        if findings.is_empty() {
            ui.success(&format!("No incompatibilities found in {}", env));
            if self.args.notify == NotifyPolicy::OnFindings {
                return Ok(CommandResult::success());
            }
        } else {
            let noun = if findings.len() == 1 {
                "incompatibility"
            } else {
                "incompatibilities"
            };
            ui.warning(&format!("{} {} found in {}", findings.len(), noun, env));
        }

        let style = self.args.style.unwrap_or(self.settings.notify.style);
        let card = compatibility_card(&report, style);

        let mut spinner = ui.start_spinner("Posting report");
        match notifier.send(&card) {
            Ok(()) => {
                spinner.finish_success("Report posted");
                Ok(CommandResult::success())
            }
            Err(e) => {
                spinner.finish_error("Report not posted");
                Err(e)
            }
        }
    }

    /// Best effort: a failed alert is logged, and the activation error wins.
    fn send_failure_alert(&self, notifier: &dyn Notifier, error: &EnvCheckError) {
        let message = match error {
            EnvCheckError::EnvironmentActivation { stderr, .. } if !stderr.is_empty() => {
                stderr.clone()
            }
            other => other.to_string(),
        };

        if let Err(e) = notifier.send(&failure_card(&self.args.env, &message)) {
            tracing::warn!("Failed to send activation failure alert: {}", e);
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let collector = CondaCollector::new(self.settings.collector.clone());
        let notifier = WebhookClient::with_timeout(
            &self.args.webhook_url,
            Duration::from_secs(self.settings.notify.timeout_secs),
        )?;
        self.execute_with(ui, &collector, &notifier)
    }
}

fn is_activation_failure(error: &EnvCheckError) -> bool {
    matches!(
        error,
        EnvCheckError::EnvironmentActivation { .. }
            | EnvCheckError::RuntimeVersionUnavailable { .. }
            | EnvCheckError::CommandFailed { .. }
    )
}

/// Console rendering of the report, one row per requirement.
fn console_table(report: &CompatibilityReport) -> Table {
    let mut table = Table::new(&["Package", "Installed", "Required", "Status"]);

    table.add_row(&[
        "python",
        report.runtime.actual.as_str(),
        report.runtime.required.as_str(),
        if report.runtime.is_mismatch() {
            "CRITICAL"
        } else {
            "ok"
        },
    ]);

    for check in &report.packages {
        let required = if check.constraint.is_empty() {
            "any"
        } else {
            check.constraint.as_str()
        };
        let status = match check.status {
            CheckStatus::Satisfied => "ok",
            CheckStatus::Mismatch => "mismatch",
            CheckStatus::Missing => "missing",
        };
        table.add_row(&[
            check.name.as_str(),
            check.installed.as_deref().unwrap_or("-"),
            required,
            status,
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, InventoryCollector, StaticCollector};
    use crate::notify::{MessageCard, RecordingNotifier, ReportStyle};
    use crate::ui::{MockUI, OutputMode, SpinnerStatus};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("requirements.txt");
        fs::write(&path, content).unwrap();
        path
    }

    fn args(manifest: std::path::PathBuf, python: &str) -> CheckArgs {
        CheckArgs {
            env: "ml-prod".to_string(),
            manifest,
            python_version: python.to_string(),
            webhook_url: "http://localhost/hook".to_string(),
            style: None,
            notify: NotifyPolicy::OnFindings,
            no_failure_alert: false,
        }
    }

    fn collector(pairs: &[(&str, &str)], runtime: &str) -> StaticCollector {
        let packages: BTreeMap<String, String> = pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        StaticCollector::new(Inventory::new(packages, runtime.to_string()))
    }

    #[test]
    fn clean_environment_posts_nothing() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy>=1.20\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());
        let mut ui = MockUI::new();
        let notifier = RecordingNotifier::new();

        let result = cmd
            .execute_with(&mut ui, &collector(&[("numpy", "1.24.0")], "3.11"), &notifier)
            .unwrap();

        assert!(result.success);
        assert!(notifier.sent().is_empty());
        assert!(ui.has_success("No incompatibilities found in ml-prod"));
        assert_eq!(ui.headers().len(), 1);
        assert!(ui.headers()[0].starts_with("Checking ml-prod against "));
        assert!(ui.headers()[0].ends_with("requirements.txt (Python 3.11)"));
    }

    #[test]
    fn clean_environment_posts_when_always() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy\n");
        let mut check_args = args(manifest, "3.11");
        check_args.notify = NotifyPolicy::Always;
        let cmd = CheckCommand::new(check_args, Settings::default());
        let notifier = RecordingNotifier::new();

        cmd.execute_with(
            &mut MockUI::new(),
            &collector(&[("numpy", "2.0.0")], "3.11"),
            &notifier,
        )
        .unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].summary, "Package Compatibility Report");
    }

    #[test]
    fn findings_are_posted_as_facts_by_default() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy>=1.20\npandas==2.0.0\ntorch\n");
        let cmd = CheckCommand::new(args(manifest, "3.10"), Settings::default());
        let mut ui = MockUI::new();
        let notifier = RecordingNotifier::new();

        let result = cmd
            .execute_with(
                &mut ui,
                &collector(&[("numpy", "1.24.0"), ("pandas", "1.5.3")], "3.11"),
                &notifier,
            )
            .unwrap();

        assert!(result.success);
        assert!(ui.has_warning("3 incompatibilities found in ml-prod"));

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].summary, "Package Compatibility Alert");
        let facts = sent[0].sections[0].facts.as_ref().unwrap();
        assert_eq!(facts.len(), 3);
        assert!(facts[0].value.contains("CRITICAL"));
        assert!(facts[1].value.contains("pandas 1.5.3"));
        assert!(facts[2].value.contains("torch"));
    }

    #[test]
    fn style_flag_overrides_settings() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "pandas==2.0.0\n");
        let mut check_args = args(manifest, "3.11");
        check_args.style = Some(ReportStyle::Table);
        let cmd = CheckCommand::new(check_args, Settings::default());
        let notifier = RecordingNotifier::new();

        cmd.execute_with(
            &mut MockUI::new(),
            &collector(&[("pandas", "1.5.3")], "3.11"),
            &notifier,
        )
        .unwrap();

        let text = notifier.sent()[0].sections[0].text.clone().unwrap();
        assert!(text.contains("| pandas | 1.5.3 | ==2.0.0 | Yes |"));
    }

    #[test]
    fn malformed_manifest_aborts_before_collecting() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy>=1.20\n###not-a-requirement\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());
        let mut ui = MockUI::new();
        let notifier = RecordingNotifier::new();

        let err = cmd
            .execute_with(&mut ui, &StaticCollector::failing("unused"), &notifier)
            .unwrap_err();

        assert!(matches!(err, EnvCheckError::ManifestParse { line: 2, .. }));
        assert!(ui.spinners().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn missing_manifest_aborts_with_read_error() {
        let temp = TempDir::new().unwrap();
        let cmd = CheckCommand::new(
            args(temp.path().join("absent.txt"), "3.11"),
            Settings::default(),
        );

        let err = cmd
            .execute_with(
                &mut MockUI::new(),
                &collector(&[], "3.11"),
                &RecordingNotifier::new(),
            )
            .unwrap_err();
        assert!(matches!(err, EnvCheckError::Other(_)));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn activation_failure_sends_alert() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());
        let mut ui = MockUI::new();
        let notifier = RecordingNotifier::new();

        let err = cmd
            .execute_with(
                &mut ui,
                &StaticCollector::failing("Could not find conda environment: ml-prod"),
                &notifier,
            )
            .unwrap_err();

        assert!(matches!(err, EnvCheckError::EnvironmentActivation { .. }));
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].summary, "High-Priority Alert");
        let facts = sent[0].sections[0].facts.as_ref().unwrap();
        assert_eq!(facts[0].value, "ml-prod");
        assert_eq!(facts[1].value, "Could not find conda environment: ml-prod");
        assert_eq!(
            ui.spinner_results(),
            vec![("Could not activate ml-prod".to_string(), SpinnerStatus::Error)]
        );
    }

    /// Collector whose `collect` fails with a fixed error.
    struct ErrorCollector(fn(&str) -> EnvCheckError);

    impl InventoryCollector for ErrorCollector {
        fn collect(&self, env: &str) -> Result<Inventory> {
            Err((self.0)(env))
        }

        fn package_version(&self, env: &str, _package: &str) -> Result<String> {
            Err((self.0)(env))
        }
    }

    fn alert_for(collector: &ErrorCollector) -> (EnvCheckError, Vec<MessageCard>) {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());
        let notifier = RecordingNotifier::new();

        let err = cmd
            .execute_with(&mut MockUI::new(), collector, &notifier)
            .unwrap_err();
        (err, notifier.sent())
    }

    #[test]
    fn unknown_runtime_version_sends_alert() {
        let (err, sent) = alert_for(&ErrorCollector(|env| {
            EnvCheckError::RuntimeVersionUnavailable {
                env: env.to_string(),
            }
        }));

        assert!(matches!(err, EnvCheckError::RuntimeVersionUnavailable { .. }));
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].summary, "High-Priority Alert");
        let facts = sent[0].sections[0].facts.as_ref().unwrap();
        assert_eq!(facts[0].value, "ml-prod");
        assert_eq!(
            facts[1].value,
            "Could not determine the Python version of environment 'ml-prod'"
        );
    }

    #[test]
    fn unspawnable_shell_sends_alert_with_cause() {
        let (err, sent) = alert_for(&ErrorCollector(|_| EnvCheckError::CommandFailed {
            command: "missing-shell -c pip freeze".to_string(),
            message: "No such file or directory (os error 2)".to_string(),
        }));

        assert!(matches!(err, EnvCheckError::CommandFailed { .. }));
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].summary, "High-Priority Alert");
        let facts = sent[0].sections[0].facts.as_ref().unwrap();
        assert!(facts[1].value.contains("missing-shell -c pip freeze"));
        assert!(facts[1].value.contains("No such file or directory"));
    }

    #[test]
    fn activation_failure_alert_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy\n");
        let mut check_args = args(manifest, "3.11");
        check_args.no_failure_alert = true;
        let cmd = CheckCommand::new(check_args, Settings::default());
        let notifier = RecordingNotifier::new();

        let result = cmd.execute_with(
            &mut MockUI::new(),
            &StaticCollector::failing("boom"),
            &notifier,
        );

        assert!(result.is_err());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn failed_alert_keeps_activation_error() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());

        let err = cmd
            .execute_with(
                &mut MockUI::new(),
                &StaticCollector::failing("boom"),
                &RecordingNotifier::failing("connection refused"),
            )
            .unwrap_err();

        assert!(matches!(err, EnvCheckError::EnvironmentActivation { .. }));
    }

    #[test]
    fn notification_failure_is_an_error() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "torch\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());

        let err = cmd
            .execute_with(
                &mut MockUI::new(),
                &collector(&[], "3.11"),
                &RecordingNotifier::failing("HTTP 500"),
            )
            .unwrap_err();

        assert!(matches!(err, EnvCheckError::Notification { .. }));
    }

    #[test]
    fn verbose_mode_prints_report_table() {
        let temp = TempDir::new().unwrap();
        let manifest = write_manifest(temp.path(), "numpy>=1.20\ntorch\n");
        let cmd = CheckCommand::new(args(manifest, "3.11"), Settings::default());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        cmd.execute_with(
            &mut ui,
            &collector(&[("numpy", "1.24.0")], "3.11"),
            &RecordingNotifier::new(),
        )
        .unwrap();

        let table = &ui.messages()[0];
        assert!(table.contains("python"));
        assert!(table.contains("numpy"));
        assert!(table.contains("missing"));
    }

    #[test]
    fn console_table_marks_runtime_mismatch() {
        let report = CompatibilityReport {
            environment: "ml-prod".to_string(),
            runtime: crate::compat::RuntimeVersionCheck::new("3.10", "3.11"),
            packages: Vec::new(),
        };
        let output = console_table(&report).render();
        assert!(output.contains("CRITICAL"));
        assert_eq!(console_table(&report).row_count(), 1);
    }
}
