//! The sleep evaluator and reward engine.
//!
//! `complete_night` is the single entry point: it validates the interval,
//! classifies the night, runs the streak/penalty transition, issues rewards,
//! and appends the finalized session to history — all in memory, as one
//! logical unit. Validation failures return before any mutation, so a caller
//! that saves only on `Ok` never persists a partially-applied state.

use crate::config::Config;
use crate::error::Result;
use crate::quality;
use crate::session::SleepSession;
use crate::sheep::{award_name, Sheep};
use crate::state::UserState;
use crate::types::{Quality, WoolSource};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Everything that happened when a night was finalized.
#[derive(Debug, Clone)]
pub struct Completion {
    pub session: SleepSession,
    pub quality: Quality,
    pub score: u32,
    pub wool_awarded: u64,
    /// The sheep earned this night, if the night was perfect.
    pub sheep_awarded: Option<Sheep>,
    pub token_granted: bool,
    /// Name of the sheep lost to the lamb chop penalty, if it fired.
    pub sheep_lost: Option<String>,
    pub entered_penalty: bool,
    pub left_penalty: bool,
    /// True when the night was below the countable minimum and earned nothing.
    pub too_short: bool,
}

// ---------------------------------------------------------------------------
// Session completion
// ---------------------------------------------------------------------------

/// Finalize the night recorded by `start_session`, using its bed time.
///
/// The active session is cleared only after the completion succeeds, so a
/// rejected wake time leaves it in place.
pub fn complete_active(
    state: &mut UserState,
    wake: DateTime<Utc>,
    config: &Config,
) -> Result<Completion> {
    let bed = match &state.active_session {
        Some(active) => active.bed,
        None => return Err(crate::error::SheepifyError::NoActiveSession),
    };
    let completion = complete_night(state, bed, wake, config)?;
    state.active_session = None;
    Ok(completion)
}

/// Finalize a night from raw bed/wake timestamps.
pub fn complete_night(
    state: &mut UserState,
    bed: DateTime<Utc>,
    wake: DateTime<Utc>,
    config: &Config,
) -> Result<Completion> {
    // Validate before touching anything; an error here must leave the prior
    // state observable.
    let duration_hours = quality::checked_duration(bed, wake, &config.rewards)?;

    // Anti-cheat: a nap below the countable minimum is recorded but earns
    // nothing and does not move the streak or penalty counters.
    if duration_hours < config.rewards.min_session_hours {
        let session = finalize_session(bed, wake, duration_hours, Quality::Poor, 0);
        state.history.insert(0, session.clone());
        state.last_sleep = Some(wake);
        state.touch();
        return Ok(Completion {
            session,
            quality: Quality::Poor,
            score: 0,
            wool_awarded: 0,
            sheep_awarded: None,
            token_granted: false,
            sheep_lost: None,
            entered_penalty: false,
            left_penalty: false,
            too_short: true,
        });
    }

    let night_quality = quality::classify(duration_hours, &config.rewards);
    let score = quality::score(duration_hours, bed, &state.recent_bed_hours(wake));
    let mut session = finalize_session(bed, wake, duration_hours, night_quality, score);

    let transition = transition(state, night_quality.is_qualifying(), config);
    let sheep_lost = match transition.chopped {
        Some(id) => {
            let name = state.find_sheep(id)?.name.clone();
            Some(name)
        }
        None => None,
    };

    // Wool reward, gated on the quality score.
    let wool_awarded = if score >= config.rewards.min_score_for_wool {
        let base = (duration_hours * config.rewards.wool_per_hour as f64) as u64;
        let wool = base * score as u64 / 100;
        state.add_wool(
            wool,
            WoolSource::SleepReward,
            Some(session.id.to_string()),
        );
        wool
    } else {
        0
    };
    session.wool_awarded = wool_awarded;

    // Sheep award: deterministic, perfect nights only.
    let sheep_awarded = if night_quality == Quality::Perfect {
        let sheep = Sheep::new(award_name(state.total_sheep_earned), wake);
        session.sheep_awarded = Some(sheep.id);
        state.flock.push(sheep.clone());
        state.total_sheep_earned += 1;
        Some(sheep)
    } else {
        None
    };

    state.history.insert(0, session.clone());
    state.last_sleep = Some(wake);
    state.touch();

    Ok(Completion {
        session,
        quality: night_quality,
        score,
        wool_awarded,
        sheep_awarded,
        token_granted: transition.token_granted,
        sheep_lost,
        entered_penalty: transition.entered_penalty,
        left_penalty: transition.left_penalty,
        too_short: false,
    })
}

fn finalize_session(
    bed: DateTime<Utc>,
    wake: DateTime<Utc>,
    duration_hours: f64,
    night_quality: Quality,
    score: u32,
) -> SleepSession {
    SleepSession {
        id: Uuid::new_v4(),
        date: wake.date_naive(),
        bed,
        wake,
        duration_hours,
        quality: night_quality,
        score,
        wool_awarded: 0,
        sheep_awarded: None,
    }
}

// ---------------------------------------------------------------------------
// Streak & penalty transition
// ---------------------------------------------------------------------------

struct Transition {
    token_granted: bool,
    entered_penalty: bool,
    left_penalty: bool,
    /// Id of the sheep marked dead by the lamb chop, if it fired.
    chopped: Option<Uuid>,
}

/// Apply one night to the streak and penalty counters.
///
/// Qualifying: streak up, bad-night counter down one (floored at zero).
/// Poor: streak zeroed, bad-night counter up one (capped at the threshold);
/// the lamb chop fires only on the transition that first reaches it.
fn transition(state: &mut UserState, qualifying: bool, config: &Config) -> Transition {
    let threshold = config.rewards.penalty_bad_nights;
    let was_in_penalty = state.penalty.in_penalty;

    if qualifying {
        state.streak += 1;
        state.penalty.bad_nights = state.penalty.bad_nights.saturating_sub(1);
        state.penalty.recompute(threshold);

        // Token check is on the post-increment streak: token 1 at 10,
        // token 2 at 20, no partial-progress carry. An interval of zero
        // (flagged by Config::validate, but loadable) disables tokens.
        let interval = config.rewards.streak_token_interval;
        let token_granted = interval > 0 && state.streak % interval == 0;
        if token_granted {
            state.shepherd_tokens += 1;
        }

        Transition {
            token_granted,
            entered_penalty: false,
            left_penalty: was_in_penalty && !state.penalty.in_penalty,
            chopped: None,
        }
    } else {
        state.streak = 0;
        let crossed = state.penalty.bad_nights < threshold && state.penalty.bad_nights + 1 >= threshold;
        state.penalty.bad_nights = (state.penalty.bad_nights + 1).min(threshold);
        state.penalty.recompute(threshold);

        let chopped = if crossed { lamb_chop(state) } else { None };

        Transition {
            token_granted: false,
            entered_penalty: crossed,
            left_penalty: false,
            chopped,
        }
    }
}

/// Mark the first living sheep dead. The sheep keeps its slot in the flock;
/// an empty or fully-dead flock makes this a no-op.
fn lamb_chop(state: &mut UserState) -> Option<Uuid> {
    let sheep = state.flock.iter_mut().find(|s| s.alive)?;
    sheep.alive = false;
    Some(sheep.id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> Config {
        Config::new("tester")
    }

    fn night(hours_slept: f64) -> (DateTime<Utc>, DateTime<Utc>) {
        let bed = Utc.with_ymd_and_hms(2026, 3, 14, 22, 0, 0).unwrap();
        let wake = bed + chrono::Duration::seconds((hours_slept * 3600.0) as i64);
        (bed, wake)
    }

    fn sleep(state: &mut UserState, hours: f64) -> Completion {
        let (bed, wake) = night(hours);
        complete_night(state, bed, wake, &config()).unwrap()
    }

    #[test]
    fn perfect_night_awards_one_sheep() {
        // Scenario A: fresh farm, 9h night.
        let mut state = UserState::new("x");
        let completion = sleep(&mut state, 9.0);

        assert_eq!(completion.quality, Quality::Perfect);
        assert_eq!(state.streak, 1);
        assert_eq!(state.total_sheep_earned, 1);
        assert_eq!(state.flock.len(), 2);
        assert!(completion.sheep_awarded.is_some());
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].sheep_awarded.map(|_| ()), Some(()));
    }

    #[test]
    fn token_granted_at_streak_ten() {
        // Scenario B: streak 9 → 10.
        let mut state = UserState::new("x");
        state.streak = 9;
        let completion = sleep(&mut state, 8.5);

        assert_eq!(state.streak, 10);
        assert!(completion.token_granted);
        assert_eq!(state.shepherd_tokens, 1);
    }

    #[test]
    fn exactly_one_token_over_ten_nights() {
        let mut state = UserState::new("x");
        for _ in 0..10 {
            sleep(&mut state, 7.0);
        }
        assert_eq!(state.streak, 10);
        assert_eq!(state.shepherd_tokens, 1);
    }

    #[test]
    fn zero_token_interval_disables_tokens() {
        // Validation flags this config, but a hand-edited file still loads.
        let mut config = config();
        config.rewards.streak_token_interval = 0;

        let mut state = UserState::new("x");
        for _ in 0..12 {
            let (bed, wake) = night(7.0);
            let completion = complete_night(&mut state, bed, wake, &config).unwrap();
            assert!(!completion.token_granted);
        }
        assert_eq!(state.shepherd_tokens, 0);
    }

    #[test]
    fn zero_penalty_threshold_disables_penalty() {
        let mut config = config();
        config.rewards.penalty_bad_nights = 0;

        let mut state = UserState::new("x");
        let (bed, wake) = night(4.0);
        let completion = complete_night(&mut state, bed, wake, &config).unwrap();

        assert!(!completion.entered_penalty);
        assert!(!state.penalty.in_penalty);
        assert_eq!(state.penalty.bad_nights, 0);
        assert!(state.flock.iter().all(|s| s.alive));

        // A qualifying night must not flip the flag on either.
        let (bed, wake) = night(7.0);
        complete_night(&mut state, bed, wake, &config).unwrap();
        assert!(!state.penalty.in_penalty);
    }

    #[test]
    fn good_night_awards_no_sheep() {
        let mut state = UserState::new("x");
        let completion = sleep(&mut state, 7.0);
        assert_eq!(completion.quality, Quality::Good);
        assert!(completion.sheep_awarded.is_none());
        assert_eq!(state.total_sheep_earned, 0);
        assert_eq!(state.flock.len(), 1);
    }

    #[test]
    fn third_poor_night_chops_one_sheep() {
        // Scenario C: two bad nights on the books, then a 4h night.
        let mut state = UserState::new("x");
        state.penalty.bad_nights = 2;
        state.streak = 5;
        let completion = sleep(&mut state, 4.0);

        assert_eq!(completion.quality, Quality::Poor);
        assert_eq!(state.streak, 0);
        assert_eq!(state.penalty.bad_nights, 3);
        assert!(state.penalty.in_penalty);
        assert!(completion.entered_penalty);
        assert_eq!(completion.sheep_lost.as_deref(), Some("Fluffy"));
        assert_eq!(state.living_count(), 0);
        assert_eq!(state.flock.len(), 1, "dead sheep keeps its slot");
    }

    #[test]
    fn fourth_poor_night_chops_no_second_sheep() {
        let mut state = UserState::new("x");
        state.flock.push(Sheep::new("Shaun", Utc::now()));
        for _ in 0..4 {
            sleep(&mut state, 3.0);
        }
        assert_eq!(state.penalty.bad_nights, 3);
        assert_eq!(state.living_count(), 1, "only the first crossing chops");
    }

    #[test]
    fn penalty_retriggers_after_recovery() {
        let mut state = UserState::new("x");
        state.flock.push(Sheep::new("Shaun", Utc::now()));
        state.flock.push(Sheep::new("Dolly", Utc::now()));
        for _ in 0..3 {
            sleep(&mut state, 3.0);
        }
        assert_eq!(state.living_count(), 2);

        // Climb back out, then fall back in.
        sleep(&mut state, 7.0);
        assert!(!state.penalty.in_penalty);
        sleep(&mut state, 3.0);
        assert_eq!(state.penalty.bad_nights, 3);
        assert_eq!(state.living_count(), 1);
    }

    #[test]
    fn perfect_night_in_penalty_recovers_and_still_rewards() {
        // Scenario D: in penalty, 9h night.
        let mut state = UserState::new("x");
        state.penalty.bad_nights = 3;
        state.penalty.in_penalty = true;
        let completion = sleep(&mut state, 9.0);

        assert_eq!(completion.quality, Quality::Perfect);
        assert_eq!(state.penalty.bad_nights, 2);
        assert!(!state.penalty.in_penalty);
        assert!(completion.left_penalty);
        assert!(completion.sheep_awarded.is_some());
    }

    #[test]
    fn chop_on_empty_flock_is_noop() {
        // Scenario E: no sheep at all.
        let mut state = UserState::new("x");
        state.clear_flock();
        state.penalty.bad_nights = 2;
        let completion = sleep(&mut state, 4.0);

        assert!(completion.sheep_lost.is_none());
        assert_eq!(state.penalty.bad_nights, 3);
        assert!(state.penalty.in_penalty);
    }

    #[test]
    fn streak_and_bad_counter_never_both_climb() {
        let mut state = UserState::new("x");
        sleep(&mut state, 3.0);
        assert_eq!((state.streak, state.penalty.bad_nights), (0, 1));
        sleep(&mut state, 7.0);
        assert_eq!((state.streak, state.penalty.bad_nights), (1, 0));
    }

    #[test]
    fn wool_reward_follows_score() {
        let mut state = UserState::new("x");
        let completion = sleep(&mut state, 9.0);
        // 22:00 bedtime, 9h, no history: 40 + 30 + 15 = 85 → 450 * 85 / 100.
        assert_eq!(completion.score, 85);
        assert_eq!(completion.wool_awarded, 382);
        assert_eq!(state.wool_balance, 382);
        assert_eq!(state.ledger.len(), 1);
        assert_eq!(state.history[0].wool_awarded, 382);
    }

    #[test]
    fn low_score_awards_no_wool() {
        // 4h from a 04:00 bedtime: 10 + 10 + 15 = 35, below the wool bar.
        let mut state = UserState::new("x");
        let bed = Utc.with_ymd_and_hms(2026, 3, 14, 4, 0, 0).unwrap();
        let wake = bed + chrono::Duration::hours(4);
        let completion = complete_night(&mut state, bed, wake, &config()).unwrap();
        assert!(completion.score < 50);
        assert_eq!(completion.wool_awarded, 0);
        assert_eq!(state.wool_balance, 0);
    }

    #[test]
    fn too_short_night_earns_nothing_and_moves_nothing() {
        let mut state = UserState::new("x");
        state.streak = 6;
        let completion = sleep(&mut state, 0.5);

        assert!(completion.too_short);
        assert_eq!(state.streak, 6);
        assert_eq!(state.penalty.bad_nights, 0);
        assert_eq!(state.wool_balance, 0);
        assert_eq!(state.history.len(), 1);
        assert!(state.last_sleep.is_some());
    }

    #[test]
    fn invalid_interval_leaves_state_untouched() {
        let mut state = UserState::new("x");
        state.streak = 3;
        let before = serde_yaml::to_string(&state).unwrap();

        let bed = Utc.with_ymd_and_hms(2026, 3, 14, 22, 0, 0).unwrap();
        let wake = bed - chrono::Duration::hours(1);
        assert!(complete_night(&mut state, bed, wake, &config()).is_err());

        let after = serde_yaml::to_string(&state).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut state = UserState::new("x");
        let (bed1, wake1) = night(7.0);
        complete_night(&mut state, bed1, wake1, &config()).unwrap();
        let bed2 = bed1 + chrono::Duration::days(1);
        let wake2 = wake1 + chrono::Duration::days(1);
        complete_night(&mut state, bed2, wake2, &config()).unwrap();

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].bed, bed2);
        assert_eq!(state.history[1].bed, bed1);
    }

    #[test]
    fn complete_active_uses_recorded_bed_time() {
        let mut state = UserState::new("x");
        let (bed, wake) = night(8.0);
        state.start_session(bed).unwrap();
        let completion = complete_active(&mut state, wake, &config()).unwrap();

        assert_eq!(completion.session.bed, bed);
        assert!(state.active_session.is_none());
    }

    #[test]
    fn failed_completion_keeps_active_session() {
        let mut state = UserState::new("x");
        let (bed, _) = night(8.0);
        state.start_session(bed).unwrap();
        assert!(complete_active(&mut state, bed - chrono::Duration::hours(1), &config()).is_err());
        assert!(state.active_session.is_some());
    }

    #[test]
    fn complete_active_without_start_errors() {
        let mut state = UserState::new("x");
        let (_, wake) = night(8.0);
        assert!(matches!(
            complete_active(&mut state, wake, &config()),
            Err(crate::error::SheepifyError::NoActiveSession)
        ));
    }

    #[test]
    fn last_sleep_set_unconditionally() {
        let mut state = UserState::new("x");
        let (_, wake) = night(3.0);
        sleep(&mut state, 3.0);
        assert_eq!(state.last_sleep, Some(wake));
    }
}
