use crate::error::{Result, SheepifyError};
use crate::paths;
use crate::session::{ActiveSession, SleepSession};
use crate::sheep::{Sheep, STARTER_NAME};
use crate::types::WoolSource;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Ledger entries kept in state before the oldest are dropped.
const LEDGER_CAP: usize = 500;

// ---------------------------------------------------------------------------
// PenaltyState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PenaltyState {
    /// Consecutive poor nights, saturating at the penalty threshold.
    pub bad_nights: u32,
    pub in_penalty: bool,
}

impl PenaltyState {
    /// Re-derive the flag from the counter. Invariant:
    /// `in_penalty == (bad_nights >= threshold)`. A threshold of zero
    /// (flagged by `Config::validate`, but loadable) disables the penalty.
    pub fn recompute(&mut self, threshold: u32) {
        self.in_penalty = threshold > 0 && self.bad_nights >= threshold;
    }
}

// ---------------------------------------------------------------------------
// WoolEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WoolEntry {
    /// Signed amount: credits positive, debits negative.
    pub amount: i64,
    pub balance_after: u64,
    pub source: WoolSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// UserState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default = "default_version")]
    pub version: u32,
    pub id: Uuid,
    pub shepherd_name: String,
    pub flock: Vec<Sheep>,
    pub wool_balance: u64,
    pub shepherd_tokens: u32,
    #[serde(default)]
    pub prank_tokens: u32,
    pub streak: u32,
    /// Monotonic count of sheep earned from perfect nights.
    pub total_sheep_earned: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sleep: Option<DateTime<Utc>>,
    #[serde(default)]
    pub penalty: PenaltyState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_session: Option<ActiveSession>,
    /// Finalized nights, most recent first.
    pub history: Vec<SleepSession>,
    #[serde(default)]
    pub ledger: Vec<WoolEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl UserState {
    pub fn new(shepherd_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            id: Uuid::new_v4(),
            shepherd_name: shepherd_name.into(),
            // Every new farm gets a starter sheep; it does not count as earned.
            flock: vec![Sheep::new(STARTER_NAME, now)],
            wool_balance: 0,
            shepherd_tokens: 0,
            prank_tokens: 0,
            streak: 0,
            total_sheep_earned: 0,
            last_sleep: None,
            penalty: PenaltyState::default(),
            active_session: None,
            history: Vec::new(),
            ledger: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::state_path(root);
        if !path.exists() {
            return Err(SheepifyError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let state: UserState = serde_yaml::from_str(&data)?;
        Ok(state)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // ---------------------------------------------------------------------------
    // Sleep session tracking
    // ---------------------------------------------------------------------------

    pub fn start_session(&mut self, bed: DateTime<Utc>) -> Result<&ActiveSession> {
        if let Some(active) = &self.active_session {
            return Err(SheepifyError::SessionActive(active.bed.to_rfc3339()));
        }
        self.touch();
        Ok(self.active_session.insert(ActiveSession::new(bed)))
    }

    /// Bedtime hours of completed nights from the past week, for the
    /// consistency component of the quality score.
    pub fn recent_bed_hours(&self, now: DateTime<Utc>) -> Vec<f64> {
        let cutoff = now - Duration::days(7);
        self.history
            .iter()
            .filter(|s| s.wake >= cutoff)
            .map(|s| s.bed_hour())
            .collect()
    }

    // ---------------------------------------------------------------------------
    // Wool economy
    // ---------------------------------------------------------------------------

    /// Credit wool and record a ledger entry. Returns the new balance.
    pub fn add_wool(&mut self, amount: u64, source: WoolSource, reference: Option<String>) -> u64 {
        self.wool_balance += amount;
        self.push_ledger(amount as i64, source, reference);
        self.wool_balance
    }

    /// Debit wool for a shop purchase. Returns the new balance.
    pub fn spend_wool(&mut self, amount: u64, item: impl Into<String>) -> Result<u64> {
        if self.wool_balance < amount {
            return Err(SheepifyError::InsufficientWool {
                has: self.wool_balance,
                needs: amount,
            });
        }
        self.wool_balance -= amount;
        self.push_ledger(-(amount as i64), WoolSource::ShopPurchase, Some(item.into()));
        Ok(self.wool_balance)
    }

    fn push_ledger(&mut self, amount: i64, source: WoolSource, reference: Option<String>) {
        self.ledger.push(WoolEntry {
            amount,
            balance_after: self.wool_balance,
            source,
            reference,
            at: Utc::now(),
        });
        if self.ledger.len() > LEDGER_CAP {
            self.ledger.drain(..self.ledger.len() - LEDGER_CAP);
        }
        self.touch();
    }

    /// Wool produced per day across the living flock.
    pub fn generation_rate(&self) -> u32 {
        self.flock
            .iter()
            .filter(|s| s.alive)
            .map(|s| s.wool_per_day)
            .sum()
    }

    // ---------------------------------------------------------------------------
    // Flock management
    // ---------------------------------------------------------------------------

    pub fn living_count(&self) -> usize {
        self.flock.iter().filter(|s| s.alive).count()
    }

    pub fn find_sheep(&self, id: Uuid) -> Result<&Sheep> {
        self.flock
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SheepifyError::SheepNotFound(id.to_string()))
    }

    pub fn rename_sheep(&mut self, id: Uuid, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        paths::validate_name(&name)?;
        let sheep = self.find_sheep_mut(id)?;
        sheep.name = name;
        self.touch();
        Ok(())
    }

    pub fn dress_sheep(&mut self, id: Uuid, outfit: Option<String>) -> Result<()> {
        let sheep = self.find_sheep_mut(id)?;
        sheep.outfit = outfit;
        self.touch();
        Ok(())
    }

    /// Mark one sheep as the favorite, clearing any previous favorite.
    pub fn favorite_sheep(&mut self, id: Uuid) -> Result<()> {
        self.find_sheep(id)?;
        for sheep in &mut self.flock {
            sheep.favorite = sheep.id == id;
        }
        self.touch();
        Ok(())
    }

    /// Remove every sheep, dead or alive. The only operation that physically
    /// deletes sheep; `total_sheep_earned` is untouched.
    pub fn clear_flock(&mut self) -> usize {
        let removed = self.flock.len();
        self.flock.clear();
        self.touch();
        removed
    }

    // ---------------------------------------------------------------------------
    // Penalty
    // ---------------------------------------------------------------------------

    /// Explicitly zero the bad-night counter and clear the penalty flag.
    pub fn reset_penalty(&mut self) {
        self.penalty.bad_nights = 0;
        self.penalty.in_penalty = false;
        self.touch();
    }

    fn find_sheep_mut(&mut self, id: Uuid) -> Result<&mut Sheep> {
        self.flock
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SheepifyError::SheepNotFound(id.to_string()))
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_starter_sheep() {
        let state = UserState::new("Bo Peep");
        assert_eq!(state.flock.len(), 1);
        assert_eq!(state.flock[0].name, STARTER_NAME);
        assert_eq!(state.total_sheep_earned, 0);
        assert_eq!(state.wool_balance, 0);
    }

    #[test]
    fn state_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = UserState::new("Heidi");
        state.add_wool(120, WoolSource::SleepReward, None);
        state.streak = 4;
        state.save(dir.path()).unwrap();

        let loaded = UserState::load(dir.path()).unwrap();
        assert_eq!(loaded.id, state.id);
        assert_eq!(loaded.shepherd_name, "Heidi");
        assert_eq!(loaded.wool_balance, 120);
        assert_eq!(loaded.streak, 4);
        assert_eq!(loaded.ledger.len(), 1);
        assert_eq!(loaded.flock.len(), 1);
    }

    #[test]
    fn state_not_initialized() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            UserState::load(dir.path()),
            Err(SheepifyError::NotInitialized)
        ));
    }

    #[test]
    fn double_start_rejected() {
        let mut state = UserState::new("x");
        state.start_session(Utc::now()).unwrap();
        assert!(matches!(
            state.start_session(Utc::now()),
            Err(SheepifyError::SessionActive(_))
        ));
    }

    #[test]
    fn spend_wool_checks_balance() {
        let mut state = UserState::new("x");
        state.add_wool(100, WoolSource::SleepReward, None);
        assert!(matches!(
            state.spend_wool(150, "straw-hat"),
            Err(SheepifyError::InsufficientWool {
                has: 100,
                needs: 150
            })
        ));
        assert_eq!(state.spend_wool(60, "straw-hat").unwrap(), 40);
        assert_eq!(state.ledger.len(), 2);
        assert_eq!(state.ledger[1].amount, -60);
        assert_eq!(state.ledger[1].balance_after, 40);
    }

    #[test]
    fn generation_rate_counts_living_only() {
        let mut state = UserState::new("x");
        state.flock.push(Sheep::new("Shaun", Utc::now()));
        state.flock[0].alive = false;
        assert_eq!(state.generation_rate(), 1);
    }

    #[test]
    fn favorite_is_exclusive() {
        let mut state = UserState::new("x");
        state.flock.push(Sheep::new("Shaun", Utc::now()));
        let first = state.flock[0].id;
        let second = state.flock[1].id;
        state.favorite_sheep(first).unwrap();
        state.favorite_sheep(second).unwrap();
        assert!(!state.flock[0].favorite);
        assert!(state.flock[1].favorite);
    }

    #[test]
    fn rename_validates() {
        let mut state = UserState::new("x");
        let id = state.flock[0].id;
        assert!(state.rename_sheep(id, "").is_err());
        state.rename_sheep(id, "Sir Baa-baa").unwrap();
        assert_eq!(state.flock[0].name, "Sir Baa-baa");
    }

    #[test]
    fn clear_flock_removes_everything() {
        let mut state = UserState::new("x");
        state.flock.push(Sheep::new("Shaun", Utc::now()));
        assert_eq!(state.clear_flock(), 2);
        assert!(state.flock.is_empty());
    }

    #[test]
    fn reset_penalty_clears_counter_and_flag() {
        let mut state = UserState::new("x");
        state.penalty.bad_nights = 3;
        state.penalty.in_penalty = true;
        state.reset_penalty();
        assert_eq!(state.penalty.bad_nights, 0);
        assert!(!state.penalty.in_penalty);
    }
}
