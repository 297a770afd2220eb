use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ConfigError, Result};

/// Value kind of a config field, as rendered by a UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Float,
    Int,
    Str,
    Bool,
    /// One of `options`.
    Choice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    pub key: String,
    pub kind: FieldKind,
    pub description: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub default: Option<Value>, // None = no default (null)
}

impl ConfigField {
    fn new(key: &str, kind: FieldKind, description: &str, default: Option<Value>) -> Self {
        Self {
            key: key.to_string(),
            kind,
            description: description.to_string(),
            options: None,
            default,
        }
    }

    pub fn float(key: &str, description: &str, default: Option<f64>) -> Self {
        Self::new(key, FieldKind::Float, description, default.map(Value::from))
    }

    pub fn int(key: &str, description: &str, default: Option<i64>) -> Self {
        Self::new(key, FieldKind::Int, description, default.map(Value::from))
    }

    pub fn string(key: &str, description: &str, default: Option<&str>) -> Self {
        Self::new(key, FieldKind::Str, description, default.map(Value::from))
    }

    pub fn boolean(key: &str, description: &str, default: bool) -> Self {
        Self::new(key, FieldKind::Bool, description, Some(Value::Bool(default)))
    }

    pub fn choice<S: AsRef<str>>(key: &str, description: &str, options: &[S], default: &str) -> Self {
        let mut f = Self::new(key, FieldKind::Choice, description, Some(Value::from(default)));
        f.options = Some(options.iter().map(|o| o.as_ref().to_string()).collect());
        f
    }

    /// Checks that the default (if any) fits the field kind.
    pub fn validate(&self) -> Result<()> {
        let Some(default) = &self.default else {
            return Ok(());
        };
        let ok = match self.kind {
            FieldKind::Float => default.is_number(),
            FieldKind::Int => default.is_i64() || default.is_u64(),
            FieldKind::Str => default.is_string(),
            FieldKind::Bool => default.is_boolean(),
            FieldKind::Choice => {
                let opts = self.options.as_deref().unwrap_or_default();
                if opts.is_empty() {
                    return Err(self.invalid("choice field has no options"));
                }
                match default.as_str() {
                    Some(d) => opts.iter().any(|o| o == d),
                    None => false,
                }
            }
        };
        if ok {
            Ok(())
        } else {
            Err(self.invalid(&format!("{default} does not fit {:?}", self.kind)))
        }
    }

    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidDefault {
            key: self.key.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Ordered set of fields; order is the UI order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSchema(Vec<ConfigField>);

impl ConfigSchema {
    pub fn new(fields: Vec<ConfigField>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigField> {
        self.0.iter().find(|f| f.key == key)
    }

    pub fn fields(&self) -> &[ConfigField] {
        &self.0
    }

    pub fn validate(&self) -> Result<()> {
        self.0.iter().try_for_each(ConfigField::validate)
    }

    /// Every field with its default, as a config map.
    pub fn defaults(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|f| (f.key.clone(), f.default.clone().unwrap_or(Value::Null)))
            .collect()
    }
}

/// Value of `name` from `model_config`, falling back to the schema default.
pub fn load_config(name: &str, model_config: &Map<String, Value>, schema: &ConfigSchema) -> Result<Value> {
    if let Some(v) = model_config.get(name) {
        return Ok(v.clone());
    }
    let field = schema
        .get(name)
        .ok_or_else(|| ConfigError::UnknownField(name.to_string()))?;
    let value = field.default.clone().unwrap_or(Value::Null);
    log::debug!("config `{name}` not set, using default {value}");
    Ok(value)
}

/// `load_config` for string-valued fields.
pub fn load_str(name: &str, model_config: &Map<String, Value>, schema: &ConfigSchema) -> Result<String> {
    match load_config(name, model_config, schema)? {
        Value::String(s) => Ok(s),
        _ => Err(ConfigError::InvalidValue {
            key: name.to_string(),
            expected: "a string",
        }),
    }
}
