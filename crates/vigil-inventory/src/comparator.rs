//! Asset comparator.
//!
//! Matches the questionnaire inventory against the CMDB inventory and
//! classifies every record into exactly one comparison row. The scan is a
//! plain first-match-wins double loop; dashboard-scale inventories stay in
//! the tens to low hundreds of records, so no candidate index is built.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset::{AssetKind, AssetRecord};
use crate::normalize::{normalize_environment, normalize_name};

/// Classification of a comparison row.
///
/// Mutually exclusive and exhaustive over both inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Matched with no field disagreements.
    Match,
    /// Matched, but at least one field disagrees after normalization.
    Conflict,
    /// Reported in the questionnaire, absent from the CMDB.
    MissingInCmdb,
    /// Present in the CMDB, not reported in the questionnaire.
    MissingInQuestionnaire,
}

impl RowStatus {
    /// String form used in summaries and exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Conflict => "conflict",
            Self::MissingInCmdb => "missing_in_cmdb",
            Self::MissingInQuestionnaire => "missing_in_questionnaire",
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field a matched pair can disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffField {
    /// Display name (flagged only on an IP-confirmed identity).
    Name,
    /// Environment tag after normalization.
    Environment,
    /// Ownership attribution.
    Owner,
}

impl DiffField {
    /// String form used in summaries and exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Environment => "environment",
            Self::Owner => "owner",
        }
    }
}

impl std::fmt::Display for DiffField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field disagreement on a conflict row.
///
/// Carries the raw values each source reported, not the normalized forms,
/// so reviewers see the originals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Which field disagreed.
    pub field: DiffField,
    /// Value reported by the questionnaire side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<String>,
    /// Value recorded in the CMDB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdb: Option<String>,
}

/// Flattened display view of a row.
///
/// Taken from the questionnaire side when both sides are present; the
/// intake side is the fixed tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedView {
    /// Identity key the row matched (or would match) on: IP, else
    /// lowercased FQDN, else normalized name.
    pub key: String,
    /// Display name.
    pub name: String,
    /// FQDN, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    /// IP address, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Environment tag, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl NormalizedView {
    fn from_record(record: &AssetRecord) -> Self {
        let key = record.ip.clone().unwrap_or_else(|| {
            record
                .fqdn
                .as_ref()
                .map(|f| f.to_lowercase())
                .unwrap_or_else(|| normalize_name(&record.name))
        });
        Self {
            key,
            name: record.name.clone(),
            fqdn: record.fqdn.clone(),
            ip: record.ip.clone(),
            environment: record.environment.clone(),
        }
    }
}

/// One classified comparison row.
///
/// Rows are derived, ephemeral artifacts: recomputed on every
/// reconciliation run, never persisted. At most one of
/// `questionnaire`/`cmdb` is absent; `diffs` is present exactly when the
/// status is [`RowStatus::Conflict`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorRow {
    /// Row classification.
    pub status: RowStatus,
    /// Kind carried from whichever side is present.
    pub kind: AssetKind,
    /// The questionnaire record, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<AssetRecord>,
    /// The CMDB record, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdb: Option<AssetRecord>,
    /// Flattened display view.
    pub normalized: NormalizedView,
    /// Field disagreements, on conflict rows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffs: Option<Vec<FieldDiff>>,
}

/// Comparator matching two asset inventories into classified rows.
///
/// Stateless; `reconcile` is pure and total. Malformed optional fields
/// degrade matching (fewer keys available) rather than erroring.
#[derive(Debug, Default)]
pub struct AssetComparator;

impl AssetComparator {
    /// Create a new comparator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Match the questionnaire inventory against the CMDB inventory.
    ///
    /// Every input record lands in exactly one output row. Questionnaire
    /// rows come first in input order, then unmatched CMDB leftovers in
    /// input order.
    #[must_use]
    pub fn reconcile(
        &self,
        questionnaire: &[AssetRecord],
        cmdb: &[AssetRecord],
    ) -> Vec<ComparatorRow> {
        let mut consumed = vec![false; cmdb.len()];
        let mut rows = Vec::with_capacity(questionnaire.len() + cmdb.len());
        let mut matched_pairs = 0usize;

        for q in questionnaire {
            let candidate = cmdb
                .iter()
                .enumerate()
                .find(|(i, c)| !consumed[*i] && records_match(q, c));

            match candidate {
                Some((i, c)) => {
                    // First match consumes the CMDB record; later
                    // questionnaire records fall through to missing.
                    consumed[i] = true;
                    matched_pairs += 1;
                    rows.push(matched_row(q, c));
                }
                None => rows.push(ComparatorRow {
                    status: RowStatus::MissingInCmdb,
                    kind: q.kind,
                    questionnaire: Some(q.clone()),
                    cmdb: None,
                    normalized: NormalizedView::from_record(q),
                    diffs: None,
                }),
            }
        }

        for (i, c) in cmdb.iter().enumerate() {
            if !consumed[i] {
                rows.push(ComparatorRow {
                    status: RowStatus::MissingInQuestionnaire,
                    kind: c.kind,
                    questionnaire: None,
                    cmdb: Some(c.clone()),
                    normalized: NormalizedView::from_record(c),
                    diffs: None,
                });
            }
        }

        debug!(
            questionnaire = questionnaire.len(),
            cmdb = cmdb.len(),
            matched_pairs,
            rows = rows.len(),
            "Reconciled asset inventories"
        );

        rows
    }
}

/// Matching predicate: same kind, then any of exact IP equality,
/// case-insensitive FQDN equality, or normalized-name equality. The three
/// keys are alternatives, not a confidence ranking.
fn records_match(q: &AssetRecord, c: &AssetRecord) -> bool {
    if q.kind != c.kind {
        return false;
    }
    if let (Some(q_ip), Some(c_ip)) = (&q.ip, &c.ip) {
        if q_ip == c_ip {
            return true;
        }
    }
    if let (Some(q_fqdn), Some(c_fqdn)) = (&q.fqdn, &c.fqdn) {
        if q_fqdn.eq_ignore_ascii_case(c_fqdn) {
            return true;
        }
    }
    normalize_name(&q.name) == normalize_name(&c.name)
}

fn matched_row(q: &AssetRecord, c: &AssetRecord) -> ComparatorRow {
    let diffs = compute_diffs(q, c);
    let status = if diffs.is_empty() {
        RowStatus::Match
    } else {
        RowStatus::Conflict
    };
    ComparatorRow {
        status,
        kind: q.kind,
        questionnaire: Some(q.clone()),
        cmdb: Some(c.clone()),
        normalized: NormalizedView::from_record(q),
        diffs: if status == RowStatus::Conflict {
            Some(diffs)
        } else {
            None
        },
    }
}

fn compute_diffs(q: &AssetRecord, c: &AssetRecord) -> Vec<FieldDiff> {
    let mut diffs = Vec::new();

    // A name disagreement only counts on an IP-confirmed identity: same
    // device, different naming. Matches found via FQDN or name keys carry
    // no such signal.
    let ip_confirmed = matches!((&q.ip, &c.ip), (Some(a), Some(b)) if a == b);
    if ip_confirmed && normalize_name(&q.name) != normalize_name(&c.name) {
        diffs.push(FieldDiff {
            field: DiffField::Name,
            questionnaire: Some(q.name.clone()),
            cmdb: Some(c.name.clone()),
        });
    }

    // Absent tags compare as empty, so one-sided values surface as diffs.
    let q_env = normalize_environment(q.environment.as_deref().unwrap_or(""));
    let c_env = normalize_environment(c.environment.as_deref().unwrap_or(""));
    if q_env != c_env {
        diffs.push(FieldDiff {
            field: DiffField::Environment,
            questionnaire: q.environment.clone(),
            cmdb: c.environment.clone(),
        });
    }

    let q_owner = q.owner.as_deref().unwrap_or("");
    let c_owner = c.owner.as_deref().unwrap_or("");
    if !q_owner.eq_ignore_ascii_case(c_owner) {
        diffs.push(FieldDiff {
            field: DiffField::Owner,
            questionnaire: q.owner.clone(),
            cmdb: c.owner.clone(),
        });
    }

    diffs
}
