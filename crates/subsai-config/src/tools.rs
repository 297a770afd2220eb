use serde::{Deserialize, Serialize};
use subsai_hwprof::{DeviceList, AUTO_DEVICE};

use crate::formats::available_translation_models;
use crate::schema::{ConfigField, ConfigSchema};

// ffsubsync defaults
pub const DEFAULT_VAD: &str = "subs_then_webrtc";
pub const DEFAULT_MAX_SUBTITLE_SECONDS: f64 = 10.0;
pub const DEFAULT_START_SECONDS: i64 = 0;
pub const DEFAULT_MAX_OFFSET_SECONDS: f64 = 60.0;
pub const DEFAULT_APPLY_OFFSET_SECONDS: f64 = 0.0;
pub const DEFAULT_FRAME_RATE: i64 = 48000;

pub const VAD_OPTIONS: &[&str] = &[
    "subs_then_webrtc",
    "webrtc",
    "subs_then_auditok",
    "auditok",
    "subs_then_silero",
    "silero",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    pub config_schema: ConfigSchema,
}

fn time_fields() -> Vec<ConfigField> {
    vec![
        ConfigField::float(
            "h",
            "hours: Integer or float values, may be positive or negative",
            Some(0.0),
        ),
        ConfigField::float(
            "m",
            "minutes: Integer or float values, may be positive or negative",
            Some(0.0),
        ),
        ConfigField::float(
            "s",
            "seconds: Integer or float values, may be positive or negative",
            Some(0.0),
        ),
        ConfigField::float(
            "ms",
            "milliseconds: Integer or float values, may be positive or negative",
            Some(0.0),
        ),
    ]
}

/// Timing tools that need no extra software.
pub fn basic_tools() -> Vec<ToolConfig> {
    let mut shift = time_fields();
    shift.push(ConfigField::int(
        "frames",
        "When specified, must be an integer number of frames",
        None,
    ));
    shift.push(ConfigField::float(
        "fps",
        "When specified, must be a positive number.",
        None,
    ));

    vec![
        ToolConfig {
            name: "set time".into(),
            description: "Set time to a subtitle".into(),
            url: None,
            config_schema: ConfigSchema::new(time_fields()),
        },
        ToolConfig {
            name: "shift".into(),
            description: "Shift all subtitles by constant time amount".into(),
            url: None,
            config_schema: ConfigSchema::new(shift),
        },
    ]
}

/// Synchronization and translation. The translation device picker lists
/// `"auto"` followed by `devices` in order.
pub fn advanced_tools(devices: &DeviceList) -> Vec<ToolConfig> {
    vec![ffsubsync(), translation(devices)]
}

fn ffsubsync() -> ToolConfig {
    let fields = vec![
        ConfigField::choice(
            "vad",
            "Which voice activity detector to use for speech extraction \
             (if using video / audio as a reference",
            VAD_OPTIONS,
            DEFAULT_VAD,
        ),
        ConfigField::float(
            "max-subtitle-seconds",
            "Maximum duration for a subtitle to appear on-screen",
            Some(DEFAULT_MAX_SUBTITLE_SECONDS),
        ),
        ConfigField::int(
            "start-seconds",
            "Start time for processing",
            Some(DEFAULT_START_SECONDS),
        ),
        ConfigField::float(
            "max-offset-seconds",
            "The max allowed offset seconds for any subtitle segment",
            Some(DEFAULT_MAX_OFFSET_SECONDS),
        ),
        ConfigField::float(
            "apply-offset-seconds",
            "Apply a predefined offset in seconds to all subtitle segments",
            Some(DEFAULT_APPLY_OFFSET_SECONDS),
        ),
        ConfigField::float(
            "suppress-output-if-offset-less-than",
            "Suppress output if the best offset found is less than this many seconds",
            None,
        ),
        ConfigField::int(
            "frame-rate",
            "Frame rate for audio extraction",
            Some(DEFAULT_FRAME_RATE),
        ),
        ConfigField::string(
            "output-encoding",
            "What encoding to use for writing output subtitles (default=utf-8). \
             Can indicate \"same\" to use same encoding as that of the input.",
            Some("utf-8"),
        ),
        ConfigField::boolean(
            "skip-infer-framerate-ratio",
            "If set, do not try to infer framerate ratio based on duration ratio.",
            false,
        ),
        ConfigField::boolean(
            "no-fix-framerate",
            "If specified, subsync will not attempt to correct a framerate",
            false,
        ),
        ConfigField::boolean(
            "serialize-speech",
            "If specified, serialize reference speech to a numpy array.",
            false,
        ),
        ConfigField::boolean(
            "gss",
            "If specified, use golden-section search to try to find \
             the optimal framerate ratio between video and subtitles.",
            false,
        ),
    ];

    ToolConfig {
        name: "ffsubsync".into(),
        description: "Language-agnostic automatic synchronization of subtitles with video, \
                      so that subtitles are aligned to the correct starting point within the video."
            .into(),
        url: Some("https://github.com/smacke/ffsubsync".into()),
        config_schema: ConfigSchema::new(fields),
    }
}

fn translation(devices: &DeviceList) -> ToolConfig {
    let models = available_translation_models();
    let mut device_options = vec![AUTO_DEVICE.to_string()];
    device_options.extend(devices.iter().cloned());

    let fields = vec![
        ConfigField::choice("model", "The model", &models, models[0]),
        ConfigField::choice(
            "device",
            "\"cpu\", \"gpu\" or \"auto\". If it's set to \"auto\", will try to select a GPU \
             when available or else fall back to CPU",
            &device_options,
            AUTO_DEVICE,
        ),
        ConfigField::int(
            "batch_size",
            "The number of samples to load at once. If set to `None`, it will process everything \
             at once\nA smaller value is preferred for `batch_size` if your (video) RAM is limited",
            Some(32),
        ),
        ConfigField::boolean(
            "verbose",
            "Whether to display the progress bar for every batch processed.",
            true,
        ),
    ];

    ToolConfig {
        name: "Translation".into(),
        description: "Translate to different languages using AI".into(),
        url: Some("https://github.com/xhluca/dl-translate".into()),
        config_schema: ConfigSchema::new(fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subsai_hwprof::{available_devices, ComputeBackend};

    struct TwoGpus;

    impl ComputeBackend for TwoGpus {
        fn mps_built(&self) -> bool {
            false
        }
        fn mps_available(&self) -> bool {
            false
        }
        fn cuda_device_count(&self) -> usize {
            2
        }
    }

    #[test]
    fn every_default_is_valid() {
        let devices = available_devices(&TwoGpus);
        for tool in basic_tools().iter().chain(advanced_tools(&devices).iter()) {
            tool.config_schema
                .validate()
                .unwrap_or_else(|e| panic!("{}: {e}", tool.name));
        }
    }

    #[test]
    fn shift_extends_set_time() {
        let tools = basic_tools();
        let keys = |t: &ToolConfig| -> Vec<String> {
            t.config_schema.fields().iter().map(|f| f.key.clone()).collect()
        };
        assert_eq!(keys(&tools[0]), ["h", "m", "s", "ms"]);
        assert_eq!(keys(&tools[1]), ["h", "m", "s", "ms", "frames", "fps"]);
    }

    #[test]
    fn translation_device_options_follow_device_list() {
        let devices = available_devices(&TwoGpus);
        let tools = advanced_tools(&devices);
        let translation = tools.iter().find(|t| t.name == "Translation").unwrap();
        let device = translation.config_schema.get("device").unwrap();
        assert_eq!(
            device.options.as_deref().unwrap(),
            ["auto", "cpu", "cuda:0", "cuda:1"]
        );
        assert_eq!(device.default.as_ref().unwrap(), "auto");
    }

    #[test]
    fn ffsubsync_defaults() {
        let devices = available_devices(&TwoGpus);
        let tools = advanced_tools(&devices);
        let d = tools[0].config_schema.defaults();
        assert_eq!(d["vad"], "subs_then_webrtc");
        assert_eq!(d["frame-rate"], 48000);
        assert!(d["suppress-output-if-offset-less-than"].is_null());
        assert_eq!(d["gss"], false);
    }
}
