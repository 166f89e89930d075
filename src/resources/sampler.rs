//! Resource samplers.

use sysinfo::System;

use super::ResourceSnapshot;
use crate::error::Result;

/// Source of [`ResourceSnapshot`]s.
pub trait ResourceSampler {
    fn sample(&self) -> Result<ResourceSnapshot>;
}

/// Samples the local host through `sysinfo`.
#[derive(Debug, Default)]
pub struct SystemSampler;

impl SystemSampler {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceSampler for SystemSampler {
    fn sample(&self) -> Result<ResourceSnapshot> {
        let mut sys = System::new();

        // CPU usage is a delta between two refreshes.
        sys.refresh_cpu();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu();
        sys.refresh_memory();

        let cpu_percent = sys.global_cpu_info().cpu_usage().clamp(0.0, 100.0);

        // Some platforms report 0 for "available". Fall back to free in that case.
        let available = match sys.available_memory() {
            0 => sys.free_memory(),
            n => n,
        };
        let memory_percent = percent(
            sys.total_memory().saturating_sub(available),
            sys.total_memory(),
        );
        let swap_percent = percent(sys.used_swap(), sys.total_swap());

        let host_name = System::host_name().unwrap_or_else(|| "unknown".to_string());

        tracing::debug!(
            "Sampled {}: cpu {:.1}%, memory {:.1}%, swap {:.1}%",
            host_name,
            cpu_percent,
            memory_percent,
            swap_percent
        );

        Ok(ResourceSnapshot {
            host_name,
            cpu_percent,
            memory_percent,
            swap_percent,
        })
    }
}

/// `used / total` as a percentage; 0 when `total` is 0.
pub fn percent(used: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    ((used as f64 / total as f64) * 100.0) as f32
}

/// Sampler that returns a fixed snapshot.
#[derive(Debug, Clone)]
pub struct FixedSampler(pub ResourceSnapshot);

impl ResourceSampler for FixedSampler {
    fn sample(&self) -> Result<ResourceSnapshot> {
        Ok(self.0.clone())
    }
}
