//! Package compatibility checking.

pub mod evaluator;
pub mod finding;

pub use evaluator::{evaluate, evaluate_lines, CheckStatus, CompatibilityReport, PackageCheck};
pub use finding::{Finding, FindingKind, RuntimeVersionCheck};
