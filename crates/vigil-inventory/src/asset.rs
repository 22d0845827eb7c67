//! Asset inventory model.
//!
//! Records arrive from two independent origins: client-submitted
//! questionnaire intake and the managed CMDB. Both reduce to the same
//! record shape here; origin-specific metadata is carried for display and
//! never participates in matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification axis for assets.
///
/// Records only compare within the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Database server.
    Database,
    /// Active Directory domain controller.
    DomainController,
    /// Web/application server.
    WebServer,
    /// File server.
    FileServer,
    /// Network firewall.
    Firewall,
}

impl AssetKind {
    /// String form used in row keys and exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::DomainController => "domain_controller",
            Self::WebServer => "web_server",
            Self::FileServer => "file_server",
            Self::Firewall => "firewall",
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "database" => Ok(Self::Database),
            "domain_controller" => Ok(Self::DomainController),
            "web_server" => Ok(Self::WebServer),
            "file_server" => Ok(Self::FileServer),
            "firewall" => Ok(Self::Firewall),
            _ => Err(format!("Invalid asset kind: {s}")),
        }
    }
}

/// Which inventory a record was ingested from.
///
/// A record belongs to exactly one origin; the comparator never moves or
/// mutates source records, it only derives comparison rows from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetOrigin {
    /// Self-reported via the onboarding questionnaire.
    Questionnaire,
    /// Pulled from the managed CMDB.
    Cmdb,
}

impl AssetOrigin {
    /// String form used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Questionnaire => "questionnaire",
            Self::Cmdb => "cmdb",
        }
    }
}

impl std::fmt::Display for AssetOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single inventory record from either origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Classification of the asset.
    pub kind: AssetKind,
    /// Display label, free text.
    pub name: String,
    /// Fully qualified domain name, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    /// IP address, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Free-text environment tag ("prod", "production", "dev", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Free-text ownership attribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Origin the record was ingested from.
    pub origin: AssetOrigin,
    /// Submission time for questionnaire records, last-seen time for CMDB
    /// records. Display-only; never matched on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl AssetRecord {
    /// Create a record with only the required fields set.
    #[must_use]
    pub fn new(kind: AssetKind, name: impl Into<String>, origin: AssetOrigin) -> Self {
        Self {
            kind,
            name: name.into(),
            fqdn: None,
            ip: None,
            environment: None,
            owner: None,
            origin,
            observed_at: None,
        }
    }

    /// Set the FQDN.
    #[must_use]
    pub fn with_fqdn(mut self, fqdn: impl Into<String>) -> Self {
        self.fqdn = Some(fqdn.into());
        self
    }

    /// Set the IP address.
    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Set the environment tag.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the owner attribution.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the origin timestamp.
    #[must_use]
    pub fn with_observed_at(mut self, observed_at: DateTime<Utc>) -> Self {
        self.observed_at = Some(observed_at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_round_trip() {
        for kind in [
            AssetKind::Database,
            AssetKind::DomainController,
            AssetKind::WebServer,
            AssetKind::FileServer,
            AssetKind::Firewall,
        ] {
            let parsed: AssetKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_asset_kind_rejects_unknown() {
        let result: Result<AssetKind, _> = "mainframe".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_sets_optional_fields() {
        let record = AssetRecord::new(AssetKind::Database, "Trading-DB", AssetOrigin::Questionnaire)
            .with_ip("10.0.0.1")
            .with_environment("production")
            .with_owner("DB Team");

        assert_eq!(record.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(record.environment.as_deref(), Some("production"));
        assert_eq!(record.owner.as_deref(), Some("DB Team"));
        assert_eq!(record.fqdn, None);
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let record = AssetRecord::new(AssetKind::Firewall, "fw-01", AssetOrigin::Cmdb);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "firewall");
        assert_eq!(json["origin"], "cmdb");
        assert!(json.get("ip").is_none());
        assert!(json.get("fqdn").is_none());
    }
}
