use serde::Deserialize;

use intake_api::config::{ConfigValues, ParamValue};
use intake_api::schema::Field;

use crate::error::EngineError;

/// Root configuration — parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Ingest job definitions.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// One ingest job: a source file read through a named reader component into
/// the declared schema.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub name: String,
    /// Registered reader component name (e.g. `"ascii"`).
    pub reader: String,
    /// Source file path.
    pub path: String,
    /// Declared schema, in output-position order.
    pub fields: Vec<Field>,
    /// Reader-specific parameters, passed to the component factory.
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

impl IntakeConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))
    }
}

/// Convert a reader's raw config object into typed `ConfigValues`.
///
/// `None` means no parameters. Only scalar JSON values are accepted —
/// nested objects, arrays, and nulls are config errors.
pub fn parse_config_values(
    config: Option<&serde_json::Value>,
) -> Result<ConfigValues, EngineError> {
    let obj = match config {
        Some(serde_json::Value::Object(map)) => map,
        Some(_) => {
            return Err(EngineError::Config(
                "reader config must be an object".into(),
            ));
        }
        None => return Ok(ConfigValues::new()),
    };

    let mut values = ConfigValues::new();
    for (key, val) in obj {
        let pv = match val {
            serde_json::Value::Bool(b) => ParamValue::Bool(*b),
            serde_json::Value::String(s) => ParamValue::Str(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    ParamValue::U64(u)
                } else if let Some(i) = n.as_i64() {
                    ParamValue::I64(i)
                } else if let Some(f) = n.as_f64() {
                    ParamValue::F64(f)
                } else {
                    return Err(EngineError::Config(format!(
                        "parameter '{key}': unsupported number"
                    )));
                }
            }
            other => {
                return Err(EngineError::Config(format!(
                    "parameter '{key}': expected scalar, got {other}"
                )));
            }
        };
        values.set(key, pv);
    }

    Ok(values)
}
