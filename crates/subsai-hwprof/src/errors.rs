use thiserror::Error;

use crate::types::System;

/// Fatal runtime-configuration failures. Never retried, never downgraded to CPU.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("CUDA device was explicitly requested, but CUDA is unavailable on this system.")]
    CudaUnavailable,

    #[error(
        "Linux Intel GPU detected, but faster-whisper has no configured Intel GPU runtime in this project. Hard fail by policy."
    )]
    IntelGpuUnsupported,

    #[error("Auto device selection failed for platform={system} machine={machine}. Hard fail by policy.")]
    UnsupportedPlatform { system: System, machine: String },
}
