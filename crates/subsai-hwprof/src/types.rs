use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family, normalized to lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    Linux,
    Darwin,
    Windows,
    Other,
}

impl System {
    /// Accepts both Rust target names ("macos") and uname-style names ("Darwin").
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => System::Linux,
            "darwin" | "macos" => System::Darwin,
            "windows" => System::Windows,
            _ => System::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            System::Linux => "linux",
            System::Darwin => "darwin",
            System::Windows => "windows",
            System::Other => "other",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub system: System,
    pub machine: String, // lower-cased, e.g. "x86_64", "arm64", "aarch64"

    pub has_mps: bool,  // compiled in AND usable
    pub has_cuda: bool,
    pub intel_gpu_detected: bool, // only probed on linux
}

impl HardwareProfile {
    pub fn is_apple_silicon(&self) -> bool {
        self.system == System::Darwin && matches!(self.machine.as_str(), "arm64" | "aarch64")
    }
}

/// Resolved faster-whisper runtime parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeDecision {
    pub device: String,
    pub compute_type: String,
    pub reason: String, // "; "-joined trail, never empty
}

/// Host details for diagnostics. Not used by any policy decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSummary {
    pub os: String,
    #[serde(default)]
    pub os_version: Option<String>,
    pub machine: String,
    pub cpu_brand: String,
    pub logical_cpus: u32,
    #[serde(default)]
    pub physical_cores: Option<u32>,
    #[serde(default)]
    pub cuda_driver: Option<String>, // e.g. "12.4"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_names_normalize() {
        assert_eq!(System::from_os_name("Linux"), System::Linux);
        assert_eq!(System::from_os_name("Darwin"), System::Darwin);
        assert_eq!(System::from_os_name("macos"), System::Darwin);
        assert_eq!(System::from_os_name("windows"), System::Windows);
        assert_eq!(System::from_os_name("freebsd"), System::Other);
    }

    #[test]
    fn system_serializes_lowercase() {
        let s = serde_json::to_string(&System::Darwin).unwrap();
        assert_eq!(s, "\"darwin\"");
    }

    #[test]
    fn apple_silicon_needs_both_darwin_and_arm() {
        let mut hw = HardwareProfile {
            system: System::Darwin,
            machine: "arm64".into(),
            has_mps: true,
            has_cuda: false,
            intel_gpu_detected: false,
        };
        assert!(hw.is_apple_silicon());
        hw.machine = "aarch64".into();
        assert!(hw.is_apple_silicon());
        hw.machine = "x86_64".into();
        assert!(!hw.is_apple_silicon());
        hw.system = System::Linux;
        hw.machine = "aarch64".into();
        assert!(!hw.is_apple_silicon());
    }
}
