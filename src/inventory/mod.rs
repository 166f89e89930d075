//! Installed-package inventories.
//!
//! - [`collector`] - the [`InventoryCollector`] seam and its implementations
//! - [`parse`] - parsers for `pip freeze` / `pip show` output

pub mod collector;
pub mod parse;

pub use collector::{CondaCollector, InventoryCollector, StaticCollector};
pub use parse::{parse_freeze_output, parse_runtime_probe, parse_show_output};

use std::collections::BTreeMap;

/// Packages installed in one environment, plus its interpreter version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    packages: BTreeMap<String, String>,
    runtime_version: String,
}

impl Inventory {
    pub fn new(packages: BTreeMap<String, String>, runtime_version: String) -> Self {
        Self {
            packages,
            runtime_version,
        }
    }

    /// Installed version of `name`. Lookup is exact and case-sensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn packages(&self) -> &BTreeMap<String, String> {
        &self.packages
    }

    /// Interpreter `major.minor`, e.g. `3.11`.
    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }
}
