//! Progress tickets.
//!
//! A ticket records the outcome of one occurrence: delivered, or not
//! delivered with a reason and a replanned date. Drafts hold the raw form
//! snapshot; accepted tickets are the validated records callers persist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use vigil_core::{InitiativeId, OccurrenceId, TicketId};

use crate::period::Period;

/// Progress state reported when a checkpoint was not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentStatus {
    /// Work has not started.
    Pending,
    /// Work is blocked on the client or a third party.
    Blocked,
    /// Work is underway.
    InProgress,
    /// Work was consciously pushed out.
    Deferred,
}

impl CurrentStatus {
    /// String form used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Blocked => "blocked",
            Self::InProgress => "in_progress",
            Self::Deferred => "deferred",
        }
    }
}

impl std::fmt::Display for CurrentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The validated numeric metric pair of an accepted ticket.
///
/// Meaning follows the initiative's metric shape: before/after remediation
/// counts, or updated/not-updated counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPair {
    /// First value of the pair (before, or updated).
    pub first: u32,
    /// Second value of the pair (after, or not updated).
    pub second: u32,
}

/// An accepted progress record, one-to-one with its occurrence.
///
/// When `delivered` is true the conditional fields are omitted entirely;
/// [`crate::validator::TicketValidationService::accept`] enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Record identifier, assigned at acceptance.
    pub id: TicketId,
    /// Owning occurrence, fixed at creation.
    pub occurrence_id: OccurrenceId,
    /// Owning initiative, denormalized from the occurrence.
    pub initiative_id: InitiativeId,
    /// Covered period, denormalized from the occurrence.
    pub period: Period,
    /// Whether the checkpoint was delivered.
    pub delivered: bool,
    /// Why the checkpoint was not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Reported progress state when not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<CurrentStatus>,
    /// Replanned delivery date when not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_date: Option<NaiveDate>,
    /// Initiative-specific metric pair.
    pub metrics: MetricPair,
    /// Acceptance time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated form snapshot of a ticket submission.
///
/// Numeric fields stay wide and optional so missing and negative inputs
/// are representable; validation narrows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    /// Occurrence the submission targets.
    pub occurrence_id: OccurrenceId,
    /// Initiative, denormalized from the occurrence.
    pub initiative_id: InitiativeId,
    /// Period, denormalized from the occurrence.
    pub period: Period,
    /// Whether the checkpoint was delivered.
    pub delivered: bool,
    /// Why the checkpoint was not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Reported progress state when not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<CurrentStatus>,
    /// Replanned delivery date when not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_date: Option<NaiveDate>,
    /// First metric value as submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_first: Option<i64>,
    /// Second metric value as submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_second: Option<i64>,
}

impl TicketDraft {
    /// Create a draft for an occurrence with only the gate set.
    #[must_use]
    pub fn new(
        occurrence_id: OccurrenceId,
        initiative_id: InitiativeId,
        period: Period,
        delivered: bool,
    ) -> Self {
        Self {
            occurrence_id,
            initiative_id,
            period,
            delivered,
            reason: None,
            current_status: None,
            new_date: None,
            metric_first: None,
            metric_second: None,
        }
    }

    /// Set the not-delivered reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the reported progress state.
    #[must_use]
    pub fn with_current_status(mut self, status: CurrentStatus) -> Self {
        self.current_status = Some(status);
        self
    }

    /// Set the replanned delivery date.
    #[must_use]
    pub fn with_new_date(mut self, date: NaiveDate) -> Self {
        self.new_date = Some(date);
        self
    }

    /// Set the metric pair as submitted.
    #[must_use]
    pub fn with_metrics(mut self, first: i64, second: i64) -> Self {
        self.metric_first = Some(first);
        self.metric_second = Some(second);
        self
    }
}
