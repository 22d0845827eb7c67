//! Occurrence scheduling.
//!
//! Materializes the year's checkpoints for a set of initiatives and
//! derives each one's status against an explicit reference time. The
//! clock is always a parameter so generation is deterministic and
//! testable.

use chrono::{DateTime, NaiveTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;
use vigil_core::OccurrenceId;

use crate::initiative::{Cadence, InitiativeDefinition, ASSETS_CLEANUP, ASSET_LIST_REVIEW};
use crate::occurrence::{Occurrence, OccurrenceStatus};
use crate::period::Period;

/// Scheduler materializing initiative occurrences for a calendar year.
#[derive(Debug, Default)]
pub struct OccurrenceScheduler;

impl OccurrenceScheduler {
    /// Generate the year's occurrences with time-derived statuses.
    ///
    /// Monthly initiatives emit twelve `YYYY-MM` occurrences, quarterly
    /// ones four `YYYY-Qn` occurrences anchored at Jan/Apr/Jul/Oct. The
    /// monthly asset list review is suppressed to `na` in quarter-start
    /// months whenever the quarterly assets cleanup is part of the
    /// generated set; a narrower catalog never invents suppression.
    #[must_use]
    pub fn generate(
        initiatives: &[InitiativeDefinition],
        year: i32,
        now: DateTime<Utc>,
    ) -> Vec<Occurrence> {
        let has_suppressor = initiatives
            .iter()
            .any(|i| i.id.as_str() == ASSETS_CLEANUP && i.cadence == Cadence::Quarterly);

        let mut occurrences = Vec::new();
        for initiative in initiatives {
            for period in periods_for(initiative.cadence, year) {
                let suppressed = has_suppressor
                    && initiative.id.as_str() == ASSET_LIST_REVIEW
                    && quarter_start_month(period);
                let status = if suppressed {
                    OccurrenceStatus::Na
                } else {
                    time_derived_status(period, now)
                };

                occurrences.push(Occurrence {
                    id: OccurrenceId::compose(&initiative.id, &period.to_string()),
                    initiative_id: initiative.id.clone(),
                    period,
                    start_date: period.start_date(),
                    status,
                    delivered_at: None,
                });
            }
        }

        debug!(
            initiatives = initiatives.len(),
            year,
            occurrences = occurrences.len(),
            "Generated occurrence schedule"
        );

        occurrences
    }

    /// Generate the year's occurrences, then overlay recorded deliveries.
    ///
    /// A delivered checkpoint stays delivered across regeneration; the
    /// time-derived status never wins it back. Suppressed (`na`)
    /// checkpoints are non-interactive, so a delivery recorded against
    /// one is ignored.
    #[must_use]
    pub fn generate_with_deliveries(
        initiatives: &[InitiativeDefinition],
        year: i32,
        now: DateTime<Utc>,
        deliveries: &BTreeMap<OccurrenceId, DateTime<Utc>>,
    ) -> Vec<Occurrence> {
        let mut occurrences = Self::generate(initiatives, year, now);
        for occurrence in &mut occurrences {
            if occurrence.status == OccurrenceStatus::Na {
                continue;
            }
            if let Some(delivered_at) = deliveries.get(&occurrence.id) {
                occurrence.status = OccurrenceStatus::Delivered;
                occurrence.delivered_at = Some(*delivered_at);
            }
        }
        occurrences
    }
}

/// The year's periods for a cadence, in calendar order.
fn periods_for(cadence: Cadence, year: i32) -> Vec<Period> {
    match cadence {
        // Ranges stay inside the validated bounds, so the constructors
        // cannot fail here.
        Cadence::Monthly => (1..=12).filter_map(|m| Period::month(year, m).ok()).collect(),
        Cadence::Quarterly => (1..=4).filter_map(|q| Period::quarter(year, q).ok()).collect(),
    }
}

/// Whether a monthly period falls on a quarter anchor month.
fn quarter_start_month(period: Period) -> bool {
    matches!(period, Period::Month { month, .. } if matches!(month, 1 | 4 | 7 | 10))
}

/// Status purely from the clock: upcoming before the period opens, missed
/// once it has closed, pending in between.
fn time_derived_status(period: Period, now: DateTime<Utc>) -> OccurrenceStatus {
    let start = period.start_date().and_time(NaiveTime::MIN).and_utc();
    let end = period.end_exclusive().and_time(NaiveTime::MIN).and_utc();

    if start > now {
        OccurrenceStatus::Upcoming
    } else if now >= end {
        OccurrenceStatus::Missed
    } else {
        OccurrenceStatus::Pending
    }
}
