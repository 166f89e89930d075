//! envcheck - conda environment compatibility and host health checks.
//!
//! envcheck compares the packages installed in a named conda environment
//! against a requirements manifest and a required Python version, and
//! posts what it finds to a chat webhook as a message card. It can also
//! report a single package's version or a snapshot of host utilization.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compat`] - Compatibility evaluation and findings
//! - [`config`] - Settings file loading
//! - [`error`] - Error types and result aliases
//! - [`inventory`] - Installed-package collection from environments
//! - [`notify`] - Message cards and webhook delivery
//! - [`requirements`] - Versions, specifiers, requirement lines and manifests
//! - [`resources`] - Host CPU, memory and swap sampling
//! - [`shell`] - Shell command execution
//! - [`ui`] - Spinners, tables and terminal output
//!
//! # Example
//!
//! ```
//! use envcheck::compat::{evaluate_lines, FindingKind};
//! use envcheck::inventory::Inventory;
//! use std::collections::BTreeMap;
//!
//! let mut packages = BTreeMap::new();
//! packages.insert("numpy".to_string(), "1.24.0".to_string());
//! packages.insert("pandas".to_string(), "1.5.3".to_string());
//! let inventory = Inventory::new(packages, "3.11".to_string());
//!
//! let findings =
//!     evaluate_lines("ml-prod", &inventory, &["numpy>=1.20", "pandas==2.0.0"], "3.11").unwrap();
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].kind, FindingKind::PackageVersionMismatch);
//! ```

pub mod cli;
pub mod compat;
pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod requirements;
pub mod resources;
pub mod shell;
pub mod ui;

pub use error::{EnvCheckError, Result};
