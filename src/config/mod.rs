//! Settings loading and schema.
//!
//! Settings come from an optional YAML file named by `--config` or
//! `ENVCHECK_CONFIG`. Command-line flags override file values.

pub mod loader;
pub mod schema;

pub use loader::{load_settings, load_settings_file, parse_settings};
pub use schema::{CollectorSettings, NotifySettings, Settings};
