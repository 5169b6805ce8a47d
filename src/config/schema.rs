//! Configuration data structures for lineage highlighting.
//!
//! Every field has a default, so an empty YAML document is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{LineageError, Result};
use crate::graph::traversal::DEFAULT_GENERATION_CAP;

// ---------------------------------------------------------------------------
// LineageConfig
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageConfig {
    /// Generation indices saturate at this value.
    #[serde(default = "default_generation_cap")]
    pub generation_cap: u8,

    /// Margin requested around focused elements.
    #[serde(default = "default_focus_padding")]
    pub focus_padding: f64,

    /// Multiplier the renderer applies to raw layout coordinates.
    #[serde(default = "default_position_scale")]
    pub position_scale: f64,

    /// Tag everything outside the highlighted neighborhood as `dimmed`.
    #[serde(default)]
    pub dim_unrelated: bool,

    /// Position-lock the focal node and highlighted nodes until reset.
    #[serde(default)]
    pub lock_highlighted: bool,

    /// Generation bound used when none is given.
    #[serde(default = "default_generations")]
    pub default_generations: u32,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            generation_cap: default_generation_cap(),
            focus_padding: default_focus_padding(),
            position_scale: default_position_scale(),
            dim_unrelated: false,
            lock_highlighted: false,
            default_generations: default_generations(),
        }
    }
}

impl LineageConfig {
    /// Reject values no renderer could use.
    pub fn validate(&self) -> Result<()> {
        if !self.focus_padding.is_finite() || self.focus_padding < 0.0 {
            return Err(LineageError::InvalidConfig {
                reason: format!(
                    "focus_padding must be a finite non-negative number, got {}",
                    self.focus_padding
                ),
            });
        }
        if !self.position_scale.is_finite() || self.position_scale <= 0.0 {
            return Err(LineageError::InvalidConfig {
                reason: format!(
                    "position_scale must be a finite positive number, got {}",
                    self.position_scale
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_generation_cap() -> u8 {
    DEFAULT_GENERATION_CAP
}

fn default_focus_padding() -> f64 {
    30.0
}

fn default_position_scale() -> f64 {
    200.0
}

fn default_generations() -> u32 {
    3
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LineageConfig::default();
        assert_eq!(config.generation_cap, 9);
        assert_eq!(config.focus_padding, 30.0);
        assert_eq!(config.position_scale, 200.0);
        assert!(!config.dim_unrelated);
        assert!(!config.lock_highlighted);
        assert_eq!(config.default_generations, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: LineageConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, LineageConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "generation_cap: 4\ndim_unrelated: true\n";
        let config: LineageConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.generation_cap, 4);
        assert!(config.dim_unrelated);
        assert_eq!(config.focus_padding, 30.0); // default
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let config = LineageConfig {
            lock_highlighted: true,
            default_generations: 7,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: LineageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_bad_padding() {
        let config = LineageConfig {
            focus_padding: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LineageError::InvalidConfig { .. })
        ));
        let config = LineageConfig {
            focus_padding: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let config = LineageConfig {
            position_scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cap_is_allowed() {
        let config = LineageConfig {
            generation_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
