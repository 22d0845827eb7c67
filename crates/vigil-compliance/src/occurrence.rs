//! Initiative occurrences.
//!
//! An occurrence is one scheduled checkpoint of a recurring initiative for
//! a specific period. Occurrences are derived artifacts: regenerated from
//! the catalog whenever the reference year changes, never persisted.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_core::{InitiativeId, OccurrenceId};

use crate::period::Period;

/// Status of an occurrence, relative to a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    /// Period has not started yet.
    Upcoming,
    /// Period is open and awaiting delivery.
    Pending,
    /// Period closed without delivery.
    Missed,
    /// An accepted ticket marked the checkpoint delivered. Sticky:
    /// regeneration never reverts it to a time-derived status.
    Delivered,
    /// Suppressed because a broader-scope initiative covers the period.
    /// Non-interactive.
    Na,
}

impl OccurrenceStatus {
    /// Whether a ticket may be submitted against the occurrence.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::Na | Self::Delivered)
    }

    /// Whether the occurrence counts in progress aggregation. Suppressed
    /// checkpoints never count; checkpoints not yet due count neither for
    /// nor against.
    #[must_use]
    pub fn counts_toward_progress(&self) -> bool {
        !matches!(self, Self::Na | Self::Upcoming)
    }

    /// String form used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Pending => "pending",
            Self::Missed => "missed",
            Self::Delivered => "delivered",
            Self::Na => "na",
        }
    }
}

impl std::fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time remaining until an upcoming occurrence opens.
///
/// Both components are floor-truncated, never rounded, so a checkpoint
/// 47h59m away reads "1 day, 23 hours".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Whole days remaining.
    pub days: i64,
    /// Whole hours remaining beyond the days.
    pub hours: i64,
}

/// One scheduled checkpoint of an initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Deterministic composite of initiative slug and period key.
    pub id: OccurrenceId,
    /// Owning initiative.
    pub initiative_id: InitiativeId,
    /// Period the checkpoint covers.
    pub period: Period,
    /// First calendar day of the period.
    pub start_date: NaiveDate,
    /// Status relative to the generation reference time.
    pub status: OccurrenceStatus,
    /// When an accepted ticket delivered the checkpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Occurrence {
    /// The period start as an instant (midnight UTC).
    #[must_use]
    pub fn start_datetime(&self) -> DateTime<Utc> {
        self.start_date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Time remaining until the period opens. `Some` only while the
    /// occurrence is upcoming.
    #[must_use]
    pub fn countdown(&self, now: DateTime<Utc>) -> Option<Countdown> {
        if self.status != OccurrenceStatus::Upcoming {
            return None;
        }
        let remaining = self.start_datetime() - now;
        if remaining < Duration::zero() {
            return None;
        }
        let days = remaining.num_days();
        let hours = (remaining - Duration::days(days)).num_hours();
        Some(Countdown { days, hours })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn upcoming_occurrence(start: NaiveDate) -> Occurrence {
        let initiative = InitiativeId::from("missing-logs");
        let period = Period::month(2025, 6).unwrap();
        Occurrence {
            id: OccurrenceId::compose(&initiative, &period.to_string()),
            initiative_id: initiative,
            period,
            start_date: start,
            status: OccurrenceStatus::Upcoming,
            delivered_at: None,
        }
    }

    #[test]
    fn test_actionability() {
        assert!(OccurrenceStatus::Upcoming.is_actionable());
        assert!(OccurrenceStatus::Pending.is_actionable());
        assert!(OccurrenceStatus::Missed.is_actionable());
        assert!(!OccurrenceStatus::Delivered.is_actionable());
        assert!(!OccurrenceStatus::Na.is_actionable());
    }

    #[test]
    fn test_progress_counting() {
        assert!(OccurrenceStatus::Pending.counts_toward_progress());
        assert!(OccurrenceStatus::Missed.counts_toward_progress());
        assert!(OccurrenceStatus::Delivered.counts_toward_progress());
        assert!(!OccurrenceStatus::Upcoming.counts_toward_progress());
        assert!(!OccurrenceStatus::Na.counts_toward_progress());
    }

    #[test]
    fn test_countdown_floor_truncates() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let occurrence = upcoming_occurrence(start);

        // 47h59m before the start: 1 day and 23 hours, never 2 days.
        let now = Utc.with_ymd_and_hms(2025, 5, 30, 0, 1, 0).unwrap();
        let countdown = occurrence.countdown(now).unwrap();
        assert_eq!(countdown.days, 1);
        assert_eq!(countdown.hours, 23);
    }

    #[test]
    fn test_countdown_only_for_upcoming() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut occurrence = upcoming_occurrence(start);
        occurrence.status = OccurrenceStatus::Pending;

        let now = Utc.with_ymd_and_hms(2025, 5, 30, 0, 0, 0).unwrap();
        assert!(occurrence.countdown(now).is_none());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OccurrenceStatus::Na).unwrap();
        assert_eq!(json, "\"na\"");
        let json = serde_json::to_string(&OccurrenceStatus::Upcoming).unwrap();
        assert_eq!(json, "\"upcoming\"");
    }
}
