//! Settings file schema.
//!
//! Every field is optional; an empty file (or no file) yields the defaults.

use serde::{Deserialize, Serialize};

use crate::notify::ReportStyle;

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How environments are activated and inspected.
    pub collector: CollectorSettings,

    /// Webhook delivery settings.
    pub notify: NotifySettings,
}

/// Commands used to inspect an environment.
///
/// `{env}` and `{package}` placeholders are replaced (shell-quoted) before
/// the command line runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorSettings {
    /// Shell program that runs the combined command line.
    pub shell: String,

    /// Activation command for a named environment.
    pub activate: String,

    /// Command that lists installed packages as `name==version` lines.
    pub list_command: String,

    /// Command that describes a single package, `pip show` style.
    pub show_command: String,

    /// Interpreter inside the environment, used to probe its version.
    pub python: String,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        let activate = if cfg!(target_os = "windows") {
            "conda activate {env}"
        } else {
            "source activate {env}"
        };
        Self {
            shell: crate::shell::default_shell(),
            activate: activate.to_string(),
            list_command: "pip freeze".to_string(),
            show_command: "pip show {package}".to_string(),
            python: "python".to_string(),
        }
    }
}

/// Webhook delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Default rendering style for compatibility reports.
    pub style: ReportStyle,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            style: ReportStyle::Facts,
        }
    }
}
