//! Progress aggregation over occurrence schedules.
//!
//! Drives the per-initiative completion meters and the year-to-date
//! summary tiles. Suppressed checkpoints never count; upcoming ones are
//! excluded from the global summary so work not yet due counts neither
//! for nor against the client.

use serde::{Deserialize, Serialize};
use vigil_core::InitiativeId;

use crate::occurrence::{Occurrence, OccurrenceStatus};

/// Completion state of one initiative's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeProgress {
    /// The initiative measured.
    pub initiative_id: InitiativeId,
    /// Delivered occurrences.
    pub delivered: u32,
    /// Occurrences in scope (everything but suppressed ones).
    pub total: u32,
    /// Completion percentage, rounded to the nearest integer; 0 when
    /// nothing is in scope.
    pub percent: u8,
}

/// Year-to-date counts over due occurrences, excluding suppressed and
/// upcoming checkpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Checkpoints delivered.
    pub delivered: u32,
    /// Checkpoints open and awaiting delivery.
    pub pending: u32,
    /// Checkpoints whose period closed undelivered.
    pub missed: u32,
}

impl ComplianceSummary {
    /// Total occurrences counted in the summary.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.delivered + self.pending + self.missed
    }
}

/// Measure one initiative's completion over a generated schedule.
#[must_use]
pub fn initiative_progress(
    occurrences: &[Occurrence],
    initiative_id: &InitiativeId,
) -> InitiativeProgress {
    let mut delivered = 0u32;
    let mut total = 0u32;

    for occurrence in occurrences
        .iter()
        .filter(|o| &o.initiative_id == initiative_id)
    {
        if occurrence.status == OccurrenceStatus::Na {
            continue;
        }
        total += 1;
        if occurrence.status == OccurrenceStatus::Delivered {
            delivered += 1;
        }
    }

    let percent = if total == 0 {
        0
    } else {
        (f64::from(delivered) * 100.0 / f64::from(total)).round() as u8
    };

    InitiativeProgress {
        initiative_id: initiative_id.clone(),
        delivered,
        total,
        percent,
    }
}

/// Summarize delivery state over every due occurrence in the schedule.
#[must_use]
pub fn summarize_year(occurrences: &[Occurrence]) -> ComplianceSummary {
    let mut summary = ComplianceSummary::default();

    for occurrence in occurrences {
        if !occurrence.status.counts_toward_progress() {
            continue;
        }
        match occurrence.status {
            OccurrenceStatus::Delivered => summary.delivered += 1,
            OccurrenceStatus::Pending => summary.pending += 1,
            OccurrenceStatus::Missed => summary.missed += 1,
            // Filtered out above.
            OccurrenceStatus::Upcoming | OccurrenceStatus::Na => {}
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initiative::{builtin_initiatives, ASSET_LIST_REVIEW, MISSING_LOGS};
    use crate::scheduler::OccurrenceScheduler;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;
    use vigil_core::OccurrenceId;

    fn mid_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn deliveries(ids: &[&str]) -> BTreeMap<OccurrenceId, DateTime<Utc>> {
        ids.iter()
            .map(|id| (OccurrenceId::from(*id), mid_year()))
            .collect()
    }

    #[test]
    fn test_progress_excludes_suppressed_occurrences() {
        let schedule = OccurrenceScheduler::generate_with_deliveries(
            &builtin_initiatives(),
            2025,
            mid_year(),
            &deliveries(&["asset-list-review:2025-02", "asset-list-review:2025-03"]),
        );
        let progress =
            initiative_progress(&schedule, &InitiativeId::from(ASSET_LIST_REVIEW));

        // Four of twelve months are suppressed by the quarterly cleanup.
        assert_eq!(progress.total, 8);
        assert_eq!(progress.delivered, 2);
        assert_eq!(progress.percent, 25);
    }

    #[test]
    fn test_progress_rounds_to_nearest() {
        let schedule = OccurrenceScheduler::generate_with_deliveries(
            &builtin_initiatives(),
            2025,
            mid_year(),
            &deliveries(&["missing-logs:2025-01"]),
        );
        let progress = initiative_progress(&schedule, &InitiativeId::from(MISSING_LOGS));

        // 1/12 = 8.33..% rounds to 8.
        assert_eq!(progress.total, 12);
        assert_eq!(progress.percent, 8);
    }

    #[test]
    fn test_progress_of_absent_initiative_is_zero() {
        let progress = initiative_progress(&[], &InitiativeId::from(MISSING_LOGS));
        assert_eq!(progress.total, 0);
        assert_eq!(progress.delivered, 0);
        assert_eq!(progress.percent, 0);
    }

    #[test]
    fn test_summary_excludes_upcoming_and_suppressed() {
        let schedule = OccurrenceScheduler::generate_with_deliveries(
            &builtin_initiatives(),
            2025,
            mid_year(),
            &deliveries(&["missing-logs:2025-01", "assets-cleanup:2025-Q1"]),
        );
        let summary = summarize_year(&schedule);

        // Due by mid-June: 5 months of each monthly initiative minus the
        // suppressed Jan/Apr reviews, plus Q1/Q2 of the cleanup, plus the
        // pending June checkpoints and Q2.
        let due = schedule
            .iter()
            .filter(|o| o.status.counts_toward_progress())
            .count() as u32;
        assert_eq!(summary.total(), due);
        assert_eq!(summary.delivered, 2);

        // June is open, so each unsuppressed monthly initiative and Q2
        // contribute a pending checkpoint.
        assert_eq!(summary.pending, 4);
        assert_eq!(summary.missed, due - 2 - 4);
    }
}
