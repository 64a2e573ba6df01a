use crate::config::RewardConfig;
use crate::error::{Result, SheepifyError};
use crate::types::Quality;
use chrono::{DateTime, Timelike, Utc};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a night by duration alone. Pure and total over non-negative
/// finite input; validation happens before this is called.
pub fn classify(duration_hours: f64, rewards: &RewardConfig) -> Quality {
    if duration_hours < rewards.poor_below_hours {
        Quality::Poor
    } else if duration_hours < rewards.perfect_from_hours {
        Quality::Good
    } else {
        Quality::Perfect
    }
}

// ---------------------------------------------------------------------------
// Duration validation
// ---------------------------------------------------------------------------

/// Compute the duration of a night in hours, rejecting implausible input.
///
/// Wake must be after bed. Durations above `max_plausible_hours` are capped
/// rather than rejected (anti-cheat: a forgotten-open session should not mint
/// a week of wool).
pub fn checked_duration(
    bed: DateTime<Utc>,
    wake: DateTime<Utc>,
    rewards: &RewardConfig,
) -> Result<f64> {
    if wake <= bed {
        return Err(SheepifyError::WakeBeforeBed {
            bed: bed.to_rfc3339(),
            wake: wake.to_rfc3339(),
        });
    }
    let hours = (wake - bed).num_seconds() as f64 / 3600.0;
    if !hours.is_finite() || hours < 0.0 {
        return Err(SheepifyError::InvalidDuration(format!("{hours}")));
    }
    Ok(hours.min(rewards.max_plausible_hours))
}

// ---------------------------------------------------------------------------
// Quality score (0-100)
// ---------------------------------------------------------------------------

/// Score a night 0-100: duration (max 40) + bedtime timing (max 30) +
/// bedtime consistency over the last week (max 30).
pub fn score(duration_hours: f64, bed: DateTime<Utc>, recent_bed_hours: &[f64]) -> u32 {
    let duration_score: f64 = if (8.0..=10.0).contains(&duration_hours) {
        40.0
    } else if (7.0..8.0).contains(&duration_hours) {
        30.0
    } else if (6.0..7.0).contains(&duration_hours) {
        20.0
    } else if duration_hours > 10.0 {
        25.0
    } else {
        10.0
    };

    // Ideal bedtime window is 21:00-23:00.
    let hour = bed.hour();
    let timing_score: f64 = match hour {
        21..=23 => 30.0,
        20 | 0 => 25.0,
        1..=3 => 15.0,
        _ => 10.0,
    };

    let consistency_score = consistency(recent_bed_hours) * 30.0;

    (duration_score + timing_score + consistency_score).min(100.0) as u32
}

/// Bedtime consistency in [0.25, 1.0] from the standard deviation of recent
/// bedtime hours. Fewer than 3 data points is treated as neutral (0.5).
pub fn consistency(recent_bed_hours: &[f64]) -> f64 {
    if recent_bed_hours.len() < 3 {
        return 0.5;
    }
    let n = recent_bed_hours.len() as f64;
    let mean = recent_bed_hours.iter().sum::<f64>() / n;
    let variance = recent_bed_hours
        .iter()
        .map(|h| (h - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev < 0.5 {
        1.0
    } else if std_dev < 1.0 {
        0.75
    } else if std_dev < 2.0 {
        0.5
    } else {
        0.25
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
