//! Requirement grammar: versions, specifiers, requirement lines and manifests.

pub mod manifest;
pub mod requirement;
pub mod specifier;
pub mod version;

pub use manifest::{load_manifest, parse_manifest};
pub use requirement::Requirement;
pub use specifier::{Operator, Specifier, SpecifierSet};
pub use version::{LocalSegment, Number, PreRelease, Version};
