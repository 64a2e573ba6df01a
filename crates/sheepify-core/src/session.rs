use crate::types::Quality;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ActiveSession
// ---------------------------------------------------------------------------

/// An in-progress night: bed time recorded, wake time pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    pub id: Uuid,
    pub bed: DateTime<Utc>,
}

impl ActiveSession {
    pub fn new(bed: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bed,
        }
    }
}

// ---------------------------------------------------------------------------
// SleepSession
// ---------------------------------------------------------------------------

/// A finalized night. Immutable once appended to history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepSession {
    pub id: Uuid,
    /// Calendar date of the wake-up.
    pub date: NaiveDate,
    pub bed: DateTime<Utc>,
    pub wake: DateTime<Utc>,
    pub duration_hours: f64,
    pub quality: Quality,
    /// 0-100 quality score (duration + timing + consistency).
    pub score: u32,
    #[serde(default)]
    pub wool_awarded: u64,
    /// Id of the sheep earned this night, if the night was perfect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheep_awarded: Option<Uuid>,
}

impl SleepSession {
    /// Bedtime hour-of-day as a fraction, for consistency scoring.
    pub fn bed_hour(&self) -> f64 {
        use chrono::Timelike;
        self.bed.hour() as f64 + self.bed.minute() as f64 / 60.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bed_hour_fraction() {
        let session = SleepSession {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            bed: Utc.with_ymd_and_hms(2026, 3, 14, 22, 30, 0).unwrap(),
            wake: Utc.with_ymd_and_hms(2026, 3, 15, 7, 0, 0).unwrap(),
            duration_hours: 8.5,
            quality: Quality::Perfect,
            score: 100,
            wool_awarded: 425,
            sheep_awarded: None,
        };
        assert!((session.bed_hour() - 22.5).abs() < 1e-9);
    }

    #[test]
    fn session_yaml_roundtrip() {
        let session = SleepSession {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            bed: Utc.with_ymd_and_hms(2026, 3, 14, 23, 0, 0).unwrap(),
            wake: Utc.with_ymd_and_hms(2026, 3, 15, 6, 0, 0).unwrap(),
            duration_hours: 7.0,
            quality: Quality::Good,
            score: 80,
            wool_awarded: 280,
            sheep_awarded: None,
        };
        let yaml = serde_yaml::to_string(&session).unwrap();
        let parsed: SleepSession = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.id, session.id);
        assert_eq!(parsed.quality, Quality::Good);
        assert_eq!(parsed.score, 80);
    }
}
