use crate::error::{Result, SheepifyError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ShepherdConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShepherdConfig {
    pub name: String,
    #[serde(default = "default_sleep_goal")]
    pub sleep_goal_hours: f64,
    /// Preferred bedtime as "HH:MM", used only for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_bedtime: Option<String>,
}

fn default_sleep_goal() -> f64 {
    8.0
}

// ---------------------------------------------------------------------------
// RewardConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Durations below this classify as poor.
    #[serde(default = "default_poor_below")]
    pub poor_below_hours: f64,
    /// Durations at or above this classify as perfect.
    #[serde(default = "default_perfect_from")]
    pub perfect_from_hours: f64,
    /// Sanity bound above which the reward range no longer applies.
    #[serde(default = "default_reward_cap")]
    pub reward_cap_hours: f64,
    /// Anti-cheat: durations above this are capped before scoring.
    #[serde(default = "default_max_plausible")]
    pub max_plausible_hours: f64,
    /// Anti-cheat: sessions shorter than this earn nothing.
    #[serde(default = "default_min_session")]
    pub min_session_hours: f64,
    #[serde(default = "default_wool_per_hour")]
    pub wool_per_hour: u64,
    /// Quality score below which no wool is awarded.
    #[serde(default = "default_min_score_for_wool")]
    pub min_score_for_wool: u32,
    /// A shepherd token is granted at each streak multiple of this.
    #[serde(default = "default_token_interval")]
    pub streak_token_interval: u32,
    /// Consecutive poor nights before the lamb chop penalty fires.
    #[serde(default = "default_penalty_nights")]
    pub penalty_bad_nights: u32,
    /// Good nights needed to revive a chopped sheep. Configured for a future
    /// revival flow; no transition consumes it yet.
    #[serde(default = "default_revival_nights")]
    pub lamb_chop_revival_nights: u32,
}

fn default_poor_below() -> f64 {
    6.0
}

fn default_perfect_from() -> f64 {
    8.0
}

fn default_reward_cap() -> f64 {
    10.0
}

fn default_max_plausible() -> f64 {
    16.0
}

fn default_min_session() -> f64 {
    1.0
}

fn default_wool_per_hour() -> u64 {
    50
}

fn default_min_score_for_wool() -> u32 {
    50
}

fn default_token_interval() -> u32 {
    10
}

fn default_penalty_nights() -> u32 {
    3
}

fn default_revival_nights() -> u32 {
    2
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            poor_below_hours: default_poor_below(),
            perfect_from_hours: default_perfect_from(),
            reward_cap_hours: default_reward_cap(),
            max_plausible_hours: default_max_plausible(),
            min_session_hours: default_min_session(),
            wool_per_hour: default_wool_per_hour(),
            min_score_for_wool: default_min_score_for_wool(),
            streak_token_interval: default_token_interval(),
            penalty_bad_nights: default_penalty_nights(),
            lamb_chop_revival_nights: default_revival_nights(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub shepherd: ShepherdConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(shepherd_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            shepherd: ShepherdConfig {
                name: shepherd_name.into(),
                sleep_goal_hours: default_sleep_goal(),
                target_bedtime: None,
            },
            rewards: RewardConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(SheepifyError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Sanity-check the configured thresholds without rejecting the file.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let r = &self.rewards;

        if r.poor_below_hours >= r.perfect_from_hours {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "poor_below_hours ({}) must be below perfect_from_hours ({})",
                    r.poor_below_hours, r.perfect_from_hours
                ),
            });
        }
        if r.reward_cap_hours < r.perfect_from_hours {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "reward_cap_hours ({}) is below perfect_from_hours ({}); no night can hit the reward range",
                    r.reward_cap_hours, r.perfect_from_hours
                ),
            });
        }
        if r.streak_token_interval == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "streak_token_interval must be at least 1".to_string(),
            });
        }
        if r.penalty_bad_nights == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "penalty_bad_nights must be at least 1".to_string(),
            });
        }
        if r.min_session_hours >= r.poor_below_hours {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "min_session_hours ({}) at or above poor_below_hours ({}) makes every countable night non-poor",
                    r.min_session_hours, r.poor_below_hours
                ),
            });
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
