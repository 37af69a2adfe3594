//! Engine configuration.
//!
//! Settings can come from a JSON file, from `setoption` commands at runtime,
//! or from defaults. Every field is optional in the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::PLAYER_COUNT;
use crate::narrate::Palette;
use crate::turn::diff::DiceLogOrder;

/// Option name for the dice-log ordering.
pub const OPT_DICE_LOG_ORDER: &str = "DiceLogOrder";

/// Option name for the fallback palette (comma-separated, four colours).
pub const OPT_FALLBACK_COLORS: &str = "FallbackColors";

/// Errors raised while loading or changing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Tunable engine behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Which end of the dice log holds the newest roll.
    pub dice_log_order: DiceLogOrder,
    /// Colours used when neither the dice log nor the seating table has one.
    pub fallback_colors: Palette,
}

impl EngineConfig {
    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        EngineConfig::from_json_str(&data)
    }

    /// Applies a named option. A missing value resets the option to its default.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.unwrap_or_default().to_string(),
        };
        match name {
            OPT_DICE_LOG_ORDER => {
                self.dice_log_order = match value {
                    Some(v) => DiceLogOrder::from_name(v).ok_or_else(invalid)?,
                    None => DiceLogOrder::default(),
                };
            }
            OPT_FALLBACK_COLORS => {
                self.fallback_colors = match value {
                    Some(v) => {
                        let colors: Vec<String> = v
                            .split(',')
                            .map(|c| c.trim().to_string())
                            .filter(|c| !c.is_empty())
                            .collect();
                        let colors: [String; PLAYER_COUNT] =
                            colors.try_into().map_err(|_| invalid())?;
                        Palette(colors)
                    }
                    None => Palette::default(),
                };
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}
