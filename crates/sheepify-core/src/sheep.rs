use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Every farm starts with Fluffy.
pub const STARTER_NAME: &str = "Fluffy";

/// Fixed pool for naming awarded sheep, cycled by award count so reruns of
/// the same history produce the same names.
const NAME_POOL: &[&str] = &[
    "Baarbara",
    "Woolliam",
    "Shaun",
    "Dolly",
    "Ewegene",
    "Lambert",
    "Merino",
    "Nibbles",
    "Clover",
    "Pastures",
    "Baaxter",
    "Fleecewick",
];

/// Deterministic name for the nth awarded sheep (zero-based).
pub fn award_name(award_index: u32) -> &'static str {
    NAME_POOL[award_index as usize % NAME_POOL.len()]
}

// ---------------------------------------------------------------------------
// Sheep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheep {
    pub id: Uuid,
    pub name: String,
    pub earned: DateTime<Utc>,
    /// Wool produced per day while alive. Fixed at 1 in the shipped config.
    #[serde(default = "default_wool_per_day")]
    pub wool_per_day: u32,
    pub alive: bool,
    /// Cosmetic outfit identifier, if dressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

fn default_wool_per_day() -> u32 {
    1
}

impl Sheep {
    pub fn new(name: impl Into<String>, earned: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            earned,
            wool_per_day: default_wool_per_day(),
            alive: true,
            outfit: None,
            favorite: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
