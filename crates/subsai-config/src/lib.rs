//! subsai-config
//!
//! Static configuration for the subsai toolkit:
//! - typed tool/model config schemas with validated defaults,
//! - `load_config` defaulting for model configs,
//! - translation models and subtitle formats,
//! - the faster-whisper runtime entry point.

pub mod errors;
pub mod formats;
pub mod models;
pub mod schema;
pub mod tools;

pub use errors::{ConfigError, Result};
pub use formats::{available_subs_formats, available_translation_models};
pub use models::{
    available_models, faster_whisper_runtime, faster_whisper_runtime_for, faster_whisper_schema,
    ModelEntry,
};
pub use schema::{load_config, ConfigField, ConfigSchema, FieldKind};
pub use tools::{advanced_tools, basic_tools, ToolConfig};
