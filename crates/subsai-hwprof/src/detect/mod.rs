use std::path::PathBuf;
use sysinfo::System as SysInfo;

use crate::backend::{ComputeBackend, LiveBackend};
use crate::types::{HardwareProfile, HostSummary, System};

#[cfg(any(target_os = "linux", target_os = "windows"))]
pub(crate) mod cuda;

#[cfg(target_os = "macos")]
pub(crate) mod macos;

pub mod drm;
pub mod util;

/// Raw OS facts the prober consumes. `current()` reads the live host.
#[derive(Debug, Clone)]
pub struct HostFacts {
    pub os_name: String,
    pub machine: String,
    pub drm_root: PathBuf,
}

impl HostFacts {
    pub fn current() -> Self {
        Self {
            os_name: std::env::consts::OS.to_string(),
            machine: current_machine(),
            drm_root: util::drm_root(),
        }
    }
}

/// Kernel-reported architecture ("arm64" on macOS, "x86_64"/"aarch64" on Linux),
/// falling back to the compile target.
fn current_machine() -> String {
    SysInfo::cpu_arch()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| std::env::consts::ARCH.to_string())
}

/// Probes the live host. Never fails.
pub fn detect_hardware() -> HardwareProfile {
    detect_hardware_with(&HostFacts::current(), &LiveBackend::from_env())
}

pub fn detect_hardware_with(host: &HostFacts, backend: &dyn ComputeBackend) -> HardwareProfile {
    let system = System::from_os_name(&host.os_name);
    let machine = host.machine.trim().to_ascii_lowercase();

    let has_mps = backend.has_mps();
    let has_cuda = backend.cuda_available();

    // Intel detection is only attempted on linux.
    let intel_gpu_detected = system == System::Linux && drm::detect_intel_gpu_in(&host.drm_root);

    let profile = HardwareProfile {
        system,
        machine,
        has_mps,
        has_cuda,
        intel_gpu_detected,
    };
    log::debug!("hardware profile: {profile:?}");
    profile
}

pub fn host_summary() -> HostSummary {
    let mut sys = SysInfo::new();
    sys.refresh_cpu();

    let cpu_brand = sys
        .cpus()
        .first()
        .map(|c| c.brand().trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "Unknown CPU".into());

    HostSummary {
        os: SysInfo::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
        os_version: SysInfo::os_version(),
        machine: current_machine().to_ascii_lowercase(),
        cpu_brand,
        logical_cpus: num_cpus::get() as u32,
        physical_cores: Some(num_cpus::get_physical() as u32),
        cuda_driver: cuda_driver_version(),
    }
}

fn cuda_driver_version() -> Option<String> {
    #[cfg(any(target_os = "linux", target_os = "windows"))]
    {
        if util::disabled("cuda") {
            return None;
        }
        cuda::probe_driver().ok().and_then(|d| d.version)
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoAccel;

    impl ComputeBackend for NoAccel {
        fn mps_built(&self) -> bool {
            false
        }
        fn mps_available(&self) -> bool {
            false
        }
        fn cuda_device_count(&self) -> usize {
            0
        }
    }

    #[test]
    fn normalizes_os_and_machine() {
        let dir = tempfile::tempdir().unwrap();
        let host = HostFacts {
            os_name: "Darwin".into(),
            machine: "ARM64\n".into(),
            drm_root: dir.path().to_path_buf(),
        };
        let hw = detect_hardware_with(&host, &NoAccel);
        assert_eq!(hw.system, System::Darwin);
        assert_eq!(hw.machine, "arm64");
        assert!(!hw.has_mps);
        assert!(!hw.has_cuda);
        assert!(!hw.intel_gpu_detected);
    }

    #[test]
    fn host_summary_has_cpus() {
        let s = host_summary();
        assert!(s.logical_cpus >= 1);
        assert!(!s.machine.is_empty());
    }
}
