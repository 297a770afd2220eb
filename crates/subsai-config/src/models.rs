use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use subsai_hwprof::{
    resolve_runtime, select_faster_whisper_runtime, HardwareProfile, RuntimeDecision, AUTO_DEVICE,
    DEFAULT_COMPUTE_TYPE,
};

use crate::errors::{ConfigError, Result};
use crate::schema::{load_str, ConfigField, ConfigSchema};

pub const FASTER_WHISPER_ID: &str = "guillaumekln/faster-whisper";

pub const FASTER_WHISPER_DEVICES: &[&str] = &["auto", "cpu", "cuda"];
pub const FASTER_WHISPER_COMPUTE_TYPES: &[&str] = &[
    "default",
    "auto",
    "int8",
    "int8_float16",
    "int8_float32",
    "int16",
    "float16",
    "float32",
];

/// A transcription model compiled into this build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub description: String,
    pub url: String,
    pub config_schema: ConfigSchema,
}

/// Runtime fields of the faster-whisper config.
pub fn faster_whisper_schema() -> ConfigSchema {
    ConfigSchema::new(vec![
        ConfigField::choice(
            "device",
            "Device to run on. \"auto\" picks a platform-specific runtime and fails \
             when no supported one exists.",
            FASTER_WHISPER_DEVICES,
            AUTO_DEVICE,
        ),
        ConfigField::choice(
            "compute_type",
            "Quantization type. \"default\" lets the device selection pick a precision.",
            FASTER_WHISPER_COMPUTE_TYPES,
            DEFAULT_COMPUTE_TYPE,
        ),
    ])
}

#[cfg(feature = "faster-whisper")]
fn faster_whisper_entry() -> ModelEntry {
    ModelEntry {
        id: FASTER_WHISPER_ID.into(),
        description: "**faster-whisper** is a reimplementation of OpenAI's Whisper model using \
                      [CTranslate2](https://github.com/OpenNMT/CTranslate2/), which is a fast \
                      inference engine for Transformer models.\n\
                      This implementation is up to 4 times faster than \
                      [openai/whisper](https://github.com/openai/whisper) for the same accuracy \
                      while using less memory. The efficiency can be further improved with 8-bit \
                      quantization on both CPU and GPU."
            .into(),
        url: "https://github.com/guillaumekln/faster-whisper".into(),
        config_schema: faster_whisper_schema(),
    }
}

/// Models enabled at build time. Empty is an error: the toolkit has nothing to run.
pub fn available_models() -> Result<Vec<ModelEntry>> {
    #[allow(unused_mut)]
    let mut models = Vec::new();

    #[cfg(feature = "faster-whisper")]
    models.push(faster_whisper_entry());

    if models.is_empty() {
        return Err(ConfigError::NoModelsAvailable);
    }
    Ok(models)
}

fn runtime_request(model_config: &Map<String, Value>) -> Result<(String, String)> {
    let schema = faster_whisper_schema();
    let device = load_str("device", model_config, &schema)?;
    let compute_type = load_str("compute_type", model_config, &schema)?;
    Ok((device, compute_type))
}

/// Resolves the faster-whisper runtime for a model config against the live host.
pub fn faster_whisper_runtime(model_config: &Map<String, Value>) -> Result<RuntimeDecision> {
    let (device, compute_type) = runtime_request(model_config)?;
    Ok(select_faster_whisper_runtime(&device, &compute_type)?)
}

/// Same as [`faster_whisper_runtime`] for an already-probed host.
pub fn faster_whisper_runtime_for(
    hw: &HardwareProfile,
    model_config: &Map<String, Value>,
) -> Result<RuntimeDecision> {
    let (device, compute_type) = runtime_request(model_config)?;
    Ok(resolve_runtime(hw, &device, &compute_type)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use subsai_hwprof::{ConfigurationError, System};

    fn linux_cuda() -> HardwareProfile {
        HardwareProfile {
            system: System::Linux,
            machine: "x86_64".into(),
            has_mps: false,
            has_cuda: true,
            intel_gpu_detected: false,
        }
    }

    #[test]
    fn empty_config_uses_auto_default() {
        let d = faster_whisper_runtime_for(&linux_cuda(), &Map::new()).unwrap();
        assert_eq!(d.device, "cuda");
        assert_eq!(d.compute_type, "float16");
    }

    #[test]
    fn config_values_override_defaults() {
        let cfg = json!({ "device": "cpu", "compute_type": "int8" })
            .as_object()
            .cloned()
            .unwrap();
        let d = faster_whisper_runtime_for(&linux_cuda(), &cfg).unwrap();
        assert_eq!((d.device.as_str(), d.compute_type.as_str()), ("cpu", "int8"));
        assert_eq!(d.reason, "using explicit runtime configuration");
    }

    #[test]
    fn resolver_errors_propagate() {
        let mut hw = linux_cuda();
        hw.has_cuda = false;
        hw.intel_gpu_detected = true;
        let err = faster_whisper_runtime_for(&hw, &Map::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Runtime(ConfigurationError::IntelGpuUnsupported)
        ));
    }

    #[test]
    fn schema_is_valid() {
        faster_whisper_schema().validate().unwrap();
    }

    #[cfg(feature = "faster-whisper")]
    #[test]
    fn faster_whisper_is_registered() {
        let models = available_models().unwrap();
        assert_eq!(models[0].id, FASTER_WHISPER_ID);
    }
}
