//! Compute backend facts: what the host can actually run on.

use crate::detect::util;

/// The accelerator questions the prober and enumerator ask.
///
/// MPS has two facts because a build can carry the backend while the host
/// cannot use it (no Metal device, too old an OS).
pub trait ComputeBackend {
    fn mps_built(&self) -> bool;
    fn mps_available(&self) -> bool;
    fn cuda_device_count(&self) -> usize;

    fn cuda_available(&self) -> bool {
        self.cuda_device_count() > 0
    }

    fn has_mps(&self) -> bool {
        self.mps_built() && self.mps_available()
    }
}

/// Queries the live host. Each call re-probes; nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct LiveBackend {
    pub disable_cuda: bool,
    pub disable_mps: bool,
}

impl LiveBackend {
    /// Applies `SUBSAI_HWPROF_DISABLE_{CUDA,MPS}`.
    pub fn from_env() -> Self {
        Self {
            disable_cuda: util::disabled("cuda"),
            disable_mps: util::disabled("mps"),
        }
    }
}

impl ComputeBackend for LiveBackend {
    fn mps_built(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn mps_available(&self) -> bool {
        if self.disable_mps {
            log::debug!("[mps] disabled by env");
            return false;
        }
        #[cfg(target_os = "macos")]
        {
            crate::detect::macos::metal_available()
        }
        #[cfg(not(target_os = "macos"))]
        {
            false
        }
    }

    fn cuda_device_count(&self) -> usize {
        if self.disable_cuda {
            log::debug!("[cuda] disabled by env");
            return 0;
        }
        #[cfg(any(target_os = "linux", target_os = "windows"))]
        {
            match crate::detect::cuda::probe_driver() {
                Ok(driver) => {
                    log::debug!(
                        "[cuda] devices={} driver={}",
                        driver.devices,
                        driver.version.as_deref().unwrap_or("unknown")
                    );
                    driver.devices
                }
                Err(e) => {
                    log::debug!("[cuda] probe_error: {e:#}");
                    0
                }
            }
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows")))]
        {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_live_backend_reports_nothing() {
        let b = LiveBackend {
            disable_cuda: true,
            disable_mps: true,
        };
        assert_eq!(b.cuda_device_count(), 0);
        assert!(!b.cuda_available());
        assert!(!b.has_mps());
    }

    #[test]
    fn mps_built_only_on_macos() {
        let b = LiveBackend::default();
        assert_eq!(b.mps_built(), cfg!(target_os = "macos"));
    }
}
