//! System information health check

use sysinfo::System;

use crate::health::check::{CheckResult, Details, SystemCheck};

const MIN_MEMORY_GB: f64 = 0.5;
const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Checks that system information can be gathered
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Reports the OS, CPU, and memory the game runs on")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new_all();
        sys.refresh_all();

        let mut details = Details::new();

        let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());
        let kernel_version = System::kernel_version().unwrap_or_else(|| "Unknown".to_string());
        details.note(format!("OS: {} {}", os_name, os_version));
        details.note(format!("Kernel: {}", kernel_version));
        if let Some(hostname) = System::host_name() {
            details.note(format!("Hostname: {}", hostname));
        }

        let physical_cores = System::physical_core_count().unwrap_or(0);
        let logical_cores = sys.cpus().len();
        if physical_cores == 0 || logical_cores == 0 {
            details.warn("Unable to detect CPU cores");
        } else {
            details.pass(format!(
                "CPU cores: {} physical, {} logical",
                physical_cores, logical_cores
            ));
        }

        let total_memory_gb = sys.total_memory() as f64 / BYTES_PER_GB;
        let available_memory_gb = sys.available_memory() as f64 / BYTES_PER_GB;
        let memory = format!(
            "Memory: {:.1} GB total, {:.1} GB available",
            total_memory_gb, available_memory_gb
        );
        // Decoded textures and the GPU context need a few hundred megabytes
        if total_memory_gb < MIN_MEMORY_GB {
            details.warn(memory);
        } else {
            details.pass(memory);
        }

        details.finish(
            "System info gathered successfully",
            "System info gathered with warnings",
            "System info unavailable",
        )
    }
}
