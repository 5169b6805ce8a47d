//! Config loading from YAML/JSON text, files, and environment overrides.
//!
//! Priority, lowest first: built-in defaults, config file, `LINEAGE_*`
//! environment variables.

use std::path::Path;

use super::schema::LineageConfig;
use crate::error::{LineageError, Result};

pub const ENV_GENERATION_CAP: &str = "LINEAGE_GENERATION_CAP";
pub const ENV_FOCUS_PADDING: &str = "LINEAGE_FOCUS_PADDING";
pub const ENV_DIM_UNRELATED: &str = "LINEAGE_DIM_UNRELATED";

impl LineageConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides_from<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = get(ENV_GENERATION_CAP) {
            self.generation_cap = raw.trim().parse::<u8>().map_err(|e| LineageError::InvalidConfig {
                reason: format!("{ENV_GENERATION_CAP}={raw}: {e}"),
            })?;
        }
        if let Some(raw) = get(ENV_FOCUS_PADDING) {
            self.focus_padding = raw.trim().parse::<f64>().map_err(|e| LineageError::InvalidConfig {
                reason: format!("{ENV_FOCUS_PADDING}={raw}: {e}"),
            })?;
        }
        if let Some(raw) = get(ENV_DIM_UNRELATED) {
            self.dim_unrelated = parse_flag(&raw).ok_or_else(|| LineageError::InvalidConfig {
                reason: format!("{ENV_DIM_UNRELATED}={raw}: expected true or false"),
            })?;
        }
        self.validate()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn yaml_invalid_value_is_rejected() {
        let err = LineageConfig::from_yaml_str("focus_padding: -5").unwrap_err();
        assert!(matches!(err, LineageError::InvalidConfig { .. }));
    }

    #[test]
    fn yaml_syntax_error_surfaces() {
        let err = LineageConfig::from_yaml_str("generation_cap: [").unwrap_err();
        assert!(matches!(err, LineageError::Yaml(_)));
    }

    #[test]
    fn json_loading() {
        let config = LineageConfig::from_json_str(r#"{"generation_cap": 5}"#).unwrap();
        assert_eq!(config.generation_cap, 5);
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let tmp = TempDir::new().unwrap();
        let yaml = tmp.path().join("lineage.yaml");
        std::fs::write(&yaml, "default_generations: 6\n").unwrap();
        let json = tmp.path().join("lineage.json");
        std::fs::write(&json, r#"{"dim_unrelated": true}"#).unwrap();

        assert_eq!(LineageConfig::load_file(&yaml).unwrap().default_generations, 6);
        assert!(LineageConfig::load_file(&json).unwrap().dim_unrelated);
    }

    #[test]
    fn load_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = LineageConfig::load_file(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, LineageError::Io(_)));
    }

    #[test]
    fn overrides_apply_on_top_of_file_values() {
        let mut config = LineageConfig::from_yaml_str("generation_cap: 4").unwrap();
        config
            .apply_overrides_from(vars(&[
                (ENV_GENERATION_CAP, "6"),
                (ENV_FOCUS_PADDING, "12.5"),
                (ENV_DIM_UNRELATED, "yes"),
            ]))
            .unwrap();
        assert_eq!(config.generation_cap, 6);
        assert_eq!(config.focus_padding, 12.5);
        assert!(config.dim_unrelated);
    }

    #[test]
    fn overrides_absent_leave_config_alone() {
        let mut config = LineageConfig::default();
        config.apply_overrides_from(vars(&[])).unwrap();
        assert_eq!(config, LineageConfig::default());
    }

    #[test]
    fn overrides_reject_garbage() {
        let mut config = LineageConfig::default();
        assert!(config
            .apply_overrides_from(vars(&[(ENV_GENERATION_CAP, "lots")]))
            .is_err());
        let mut config = LineageConfig::default();
        assert!(config
            .apply_overrides_from(vars(&[(ENV_DIM_UNRELATED, "maybe")]))
            .is_err());
        let mut config = LineageConfig::default();
        assert!(config
            .apply_overrides_from(vars(&[(ENV_FOCUS_PADDING, "-3")]))
            .is_err());
    }
}
