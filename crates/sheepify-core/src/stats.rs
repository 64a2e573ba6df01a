use crate::quality;
use crate::state::UserState;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WeeklyStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub total_sessions: usize,
    pub total_hours: f64,
    pub average_score: f64,
    pub total_wool_earned: u64,
    /// Date of the highest-scoring night, if any night was logged.
    pub best_night: Option<NaiveDate>,
    /// Bedtime consistency in [0.25, 1.0].
    pub consistency: f64,
}

/// Summarize the last 7 days of history.
pub fn weekly(state: &UserState, now: DateTime<Utc>) -> WeeklyStats {
    let cutoff = now - Duration::days(7);
    let recent: Vec<_> = state.history.iter().filter(|s| s.wake >= cutoff).collect();

    if recent.is_empty() {
        return WeeklyStats {
            total_sessions: 0,
            total_hours: 0.0,
            average_score: 0.0,
            total_wool_earned: 0,
            best_night: None,
            consistency: quality::consistency(&[]),
        };
    }

    let total_hours: f64 = recent.iter().map(|s| s.duration_hours).sum();
    let average_score =
        recent.iter().map(|s| s.score as f64).sum::<f64>() / recent.len() as f64;
    let total_wool_earned: u64 = recent.iter().map(|s| s.wool_awarded).sum();
    let best_night = recent
        .iter()
        .max_by_key(|s| s.score)
        .map(|s| s.date);
    let bed_hours: Vec<f64> = recent.iter().map(|s| s.bed_hour()).collect();

    WeeklyStats {
        total_sessions: recent.len(),
        total_hours: (total_hours * 100.0).round() / 100.0,
        average_score: (average_score * 100.0).round() / 100.0,
        total_wool_earned,
        best_night,
        consistency: quality::consistency(&bed_hours),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::complete_night;
    use chrono::TimeZone;

    fn log_night(state: &mut UserState, day: u32, hours: f64) {
        let bed = Utc.with_ymd_and_hms(2026, 3, day, 22, 0, 0).unwrap();
        let wake = bed + Duration::seconds((hours * 3600.0) as i64);
        complete_night(state, bed, wake, &Config::new("t")).unwrap();
    }

    #[test]
    fn empty_history_yields_zeroes() {
        let state = UserState::new("x");
        let stats = weekly(&state, Utc::now());
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert!(stats.best_night.is_none());
        assert_eq!(stats.consistency, 0.5);
    }

    #[test]
    fn aggregates_recent_week() {
        let mut state = UserState::new("x");
        log_night(&mut state, 10, 7.0);
        log_night(&mut state, 11, 9.0);
        log_night(&mut state, 12, 4.0);

        let now = Utc.with_ymd_and_hms(2026, 3, 13, 12, 0, 0).unwrap();
        let stats = weekly(&state, now);
        assert_eq!(stats.total_sessions, 3);
        assert!((stats.total_hours - 20.0).abs() < 1e-9);
        // Best night is the 9h one (wakes on the 12th).
        assert_eq!(
            stats.best_night,
            Some(NaiveDate::from_ymd_opt(2026, 3, 12).unwrap())
        );
        assert_eq!(stats.consistency, 1.0);
        assert!(stats.total_wool_earned > 0);
    }

    #[test]
    fn older_sessions_excluded() {
        let mut state = UserState::new("x");
        log_night(&mut state, 1, 8.0);
        log_night(&mut state, 12, 7.0);

        let now = Utc.with_ymd_and_hms(2026, 3, 13, 12, 0, 0).unwrap();
        let stats = weekly(&state, now);
        assert_eq!(stats.total_sessions, 1);
    }
}
