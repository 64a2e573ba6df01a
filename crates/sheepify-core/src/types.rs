use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// The poor/good/perfect bucket derived from sleep duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Poor,
    Good,
    Perfect,
}

impl Quality {
    pub fn all() -> &'static [Quality] {
        &[Quality::Poor, Quality::Good, Quality::Perfect]
    }

    /// A Good-or-better night keeps the streak alive.
    pub fn is_qualifying(self) -> bool {
        !matches!(self, Quality::Poor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Poor => "poor",
            Quality::Good => "good",
            Quality::Perfect => "perfect",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Quality {
    type Err = crate::error::SheepifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poor" => Ok(Quality::Poor),
            "good" => Ok(Quality::Good),
            "perfect" => Ok(Quality::Perfect),
            _ => Err(crate::error::SheepifyError::InvalidDuration(format!(
                "unknown quality: {s}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// WoolSource
// ---------------------------------------------------------------------------

/// Why wool moved: credits from sleep or daily generation, debits from the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoolSource {
    SleepReward,
    Generation,
    ShopPurchase,
}

impl WoolSource {
    pub fn as_str(self) -> &'static str {
        match self {
            WoolSource::SleepReward => "sleep_reward",
            WoolSource::Generation => "generation",
            WoolSource::ShopPurchase => "shop_purchase",
        }
    }
}

impl fmt::Display for WoolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
