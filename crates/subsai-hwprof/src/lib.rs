//! Hardware profiling and faster-whisper runtime resolution for subsai.
//! Detects OS/arch/accelerators on every call; nothing is cached.

pub mod backend;
pub mod detect;
pub mod devices;
pub mod errors;
pub mod runtime;
pub mod types;

pub use backend::{ComputeBackend, LiveBackend};
pub use detect::drm::detect_intel_gpu_in;
pub use detect::{detect_hardware, detect_hardware_with, host_summary, HostFacts};
pub use devices::{available_devices, get_available_devices, DeviceList};
pub use errors::ConfigurationError;
pub use runtime::{
    resolve_runtime, select_faster_whisper_runtime, AUTO_DEVICE, DEFAULT_COMPUTE_TYPE,
};
pub use types::{HardwareProfile, HostSummary, RuntimeDecision, System};

/// Linux Intel GPU detection against the live (or `SUBSAI_HWPROF_DRM_ROOT`) sysfs tree.
pub fn detect_linux_intel_gpu() -> bool {
    detect_intel_gpu_in(&detect::util::drm_root())
}
