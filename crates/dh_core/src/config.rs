//! Tunable rule constants.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// Rule constants a table may house-rule.
///
/// # Example RON
///
/// ```ron
/// RulesConfig(
///     level_up_points: 2,
///     unarmored_major_base: 1,
///     unarmored_severe_base: 2,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Points a character spends on each level-up.
    #[serde(default = "default_level_up_points")]
    pub level_up_points: u32,

    /// Major threshold of an unarmored character before level is added.
    #[serde(default = "default_unarmored_major_base")]
    pub unarmored_major_base: i32,

    /// Severe threshold of an unarmored character before level is added.
    #[serde(default = "default_unarmored_severe_base")]
    pub unarmored_severe_base: i32,
}

/// Default level-up budget.
const fn default_level_up_points() -> u32 {
    2
}

const fn default_unarmored_major_base() -> i32 {
    1
}

const fn default_unarmored_severe_base() -> i32 {
    2
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            level_up_points: default_level_up_points(),
            unarmored_major_base: default_unarmored_major_base(),
            unarmored_severe_base: default_unarmored_severe_base(),
        }
    }
}

impl RulesConfig {
    /// Parse a config from RON text. `label` names the source in errors.
    pub fn from_ron_str(text: &str, label: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| RulesError::DataParseError {
            path: label.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the constants are usable.
    pub fn validate(&self) -> Result<()> {
        if self.level_up_points == 0 {
            return Err(RulesError::InvalidData(
                "level_up_points must be at least 1".to_string(),
            ));
        }
        if self.unarmored_severe_base < self.unarmored_major_base {
            return Err(RulesError::InvalidData(format!(
                "unarmored severe base {} is below major base {}",
                self.unarmored_severe_base, self.unarmored_major_base
            )));
        }
        Ok(())
    }
}
