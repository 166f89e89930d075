//! Host utilization sampling.

pub mod sampler;

pub use sampler::{percent, FixedSampler, ResourceSampler, SystemSampler};

use serde::Serialize;

/// A point-in-time view of host utilization, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSnapshot {
    pub host_name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub swap_percent: f32,
}
