//! Compliance initiative definitions.
//!
//! Initiatives are static configuration: the managed service runs a fixed
//! catalog of recurring review checkpoints per client, not user-editable
//! at runtime.

use serde::{Deserialize, Serialize};
use vigil_core::{InitiativeId, Result, VigilError};

/// Slug of the monthly asset list review (suppressed in quarter-start
/// months by [`ASSETS_CLEANUP`]).
pub const ASSET_LIST_REVIEW: &str = "asset-list-review";
/// Slug of the monthly missing-logs remediation review.
pub const MISSING_LOGS: &str = "missing-logs";
/// Slug of the monthly manual agent health check.
pub const MANUAL_HEALTH_CHECK: &str = "manual-health-check";
/// Slug of the quarterly assets cleanup, whose scope subsumes the monthly
/// asset list review.
pub const ASSETS_CLEANUP: &str = "assets-cleanup";

/// Recurrence frequency of an initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// One occurrence per calendar month.
    Monthly,
    /// One occurrence per quarter, anchored at Jan/Apr/Jul/Oct.
    Quarterly,
}

impl Cadence {
    /// Number of occurrences an initiative materializes per year.
    #[must_use]
    pub fn occurrences_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
        }
    }

    /// String form used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which numeric metric pair an initiative's tickets carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricShape {
    /// Remediation counts: the `after` value must not exceed `before`.
    BeforeAfter,
    /// Updated / not-updated counts with no ordering constraint.
    UpdatedCounts,
}

impl MetricShape {
    /// Form field names for the pair, in submission order.
    #[must_use]
    pub fn field_labels(&self) -> (&'static str, &'static str) {
        match self {
            Self::BeforeAfter => ("before", "after"),
            Self::UpdatedCounts => ("updated", "not_updated"),
        }
    }

    /// Whether the second value is bounded by the first.
    #[must_use]
    pub fn enforces_ordering(&self) -> bool {
        matches!(self, Self::BeforeAfter)
    }
}

/// A recurring compliance initiative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeDefinition {
    /// Stable slug identifier.
    pub id: InitiativeId,
    /// Display name.
    pub name: String,
    /// Recurrence frequency.
    pub cadence: Cadence,
    /// Metric pair shape for progress tickets.
    pub metric: MetricShape,
}

impl InitiativeDefinition {
    /// Create an initiative definition.
    #[must_use]
    pub fn new(
        id: impl Into<InitiativeId>,
        name: impl Into<String>,
        cadence: Cadence,
        metric: MetricShape,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cadence,
            metric,
        }
    }
}

/// The fixed catalog the reference service runs: three monthly
/// initiatives and the quarterly cleanup that subsumes the monthly asset
/// list review.
#[must_use]
pub fn builtin_initiatives() -> Vec<InitiativeDefinition> {
    vec![
        InitiativeDefinition::new(
            ASSET_LIST_REVIEW,
            "Asset List Review",
            Cadence::Monthly,
            MetricShape::BeforeAfter,
        ),
        InitiativeDefinition::new(
            MISSING_LOGS,
            "Missing Logs Remediation",
            Cadence::Monthly,
            MetricShape::BeforeAfter,
        ),
        InitiativeDefinition::new(
            MANUAL_HEALTH_CHECK,
            "Manual Agent Health Check",
            Cadence::Monthly,
            MetricShape::UpdatedCounts,
        ),
        InitiativeDefinition::new(
            ASSETS_CLEANUP,
            "Assets Cleanup",
            Cadence::Quarterly,
            MetricShape::BeforeAfter,
        ),
    ]
}

/// Resolve an initiative slug against a catalog.
pub fn lookup_initiative<'a>(
    initiatives: &'a [InitiativeDefinition],
    id: &InitiativeId,
) -> Result<&'a InitiativeDefinition> {
    initiatives
        .iter()
        .find(|i| &i.id == id)
        .ok_or_else(|| VigilError::UnknownInitiative {
            id: id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = builtin_initiatives();
        assert_eq!(catalog.len(), 4);

        let monthly = catalog
            .iter()
            .filter(|i| i.cadence == Cadence::Monthly)
            .count();
        let quarterly = catalog
            .iter()
            .filter(|i| i.cadence == Cadence::Quarterly)
            .count();
        assert_eq!(monthly, 3);
        assert_eq!(quarterly, 1);
    }

    #[test]
    fn test_health_check_uses_updated_counts() {
        let catalog = builtin_initiatives();
        let health = lookup_initiative(&catalog, &InitiativeId::from(MANUAL_HEALTH_CHECK)).unwrap();
        assert_eq!(health.metric, MetricShape::UpdatedCounts);
        assert!(!health.metric.enforces_ordering());
        assert_eq!(health.metric.field_labels(), ("updated", "not_updated"));
    }

    #[test]
    fn test_lookup_rejects_unknown_slug() {
        let catalog = builtin_initiatives();
        let err = lookup_initiative(&catalog, &InitiativeId::from("patching")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown initiative: patching");
    }

    #[test]
    fn test_cadence_occurrence_counts() {
        assert_eq!(Cadence::Monthly.occurrences_per_year(), 12);
        assert_eq!(Cadence::Quarterly.occurrences_per_year(), 4);
    }
}
