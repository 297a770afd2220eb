//! faster-whisper runtime resolution.
//!
//! Turns a requested `(device, compute_type)` pair, possibly `"auto"` /
//! `"default"`, into concrete values for CTranslate2. Unsupported hardware is a
//! hard error rather than a silent CPU fallback.

use crate::detect::detect_hardware;
use crate::errors::ConfigurationError;
use crate::types::{HardwareProfile, RuntimeDecision, System};

pub const AUTO_DEVICE: &str = "auto";
pub const DEFAULT_COMPUTE_TYPE: &str = "default";

const REASON_LINUX_CUDA: &str = "linux+nvidia-cuda detected";
const REASON_APPLE_SILICON: &str = "apple-silicon detected";
const REASON_EXPLICIT: &str = "using explicit runtime configuration";

/// Re-probes the host and resolves the runtime against it.
pub fn select_faster_whisper_runtime(
    config_device: &str,
    config_compute_type: &str,
) -> Result<RuntimeDecision, ConfigurationError> {
    let hw = detect_hardware();
    resolve_runtime(&hw, config_device, config_compute_type)
}

pub fn resolve_runtime(
    hw: &HardwareProfile,
    config_device: &str,
    config_compute_type: &str,
) -> Result<RuntimeDecision, ConfigurationError> {
    let mut reason: Vec<&str> = Vec::new();
    let mut device = config_device.to_string();
    let mut compute_type = config_compute_type.to_string();

    if device == AUTO_DEVICE {
        if hw.system == System::Linux && hw.has_cuda {
            device = "cuda".into();
            reason.push(REASON_LINUX_CUDA);
            if compute_type == DEFAULT_COMPUTE_TYPE {
                compute_type = "float16".into();
            }
        } else if hw.is_apple_silicon() {
            // CTranslate2 has no MPS backend, so Apple silicon runs on CPU.
            device = "cpu".into();
            reason.push(REASON_APPLE_SILICON);
            if compute_type == DEFAULT_COMPUTE_TYPE {
                compute_type = "int8".into();
            }
        } else if hw.system == System::Linux && hw.intel_gpu_detected {
            log::warn!("intel gpu on linux without a faster-whisper runtime");
            return Err(ConfigurationError::IntelGpuUnsupported);
        } else {
            log::warn!(
                "no auto runtime for platform={} machine={}",
                hw.system,
                hw.machine
            );
            return Err(ConfigurationError::UnsupportedPlatform {
                system: hw.system,
                machine: hw.machine.clone(),
            });
        }
    } else if device == "cuda" && !hw.has_cuda {
        return Err(ConfigurationError::CudaUnavailable);
    }

    if reason.is_empty() {
        reason.push(REASON_EXPLICIT);
    }

    let decision = RuntimeDecision {
        device,
        compute_type,
        reason: reason.join("; "),
    };
    log::info!(
        "faster-whisper runtime: device={} compute_type={} ({})",
        decision.device,
        decision.compute_type,
        decision.reason
    );
    Ok(decision)
}
