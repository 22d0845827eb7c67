//! # Asset Inventory Reconciliation
//!
//! Matching and diffing of the two asset inventories a managed client
//! presents: self-reported questionnaire intake and the authoritative CMDB.
//!
//! ## Overview
//!
//! The reconciliation engine provides:
//! - Multi-key matching (exact IP, case-insensitive FQDN, normalized name)
//!   scoped to same-kind records, first match wins
//! - Field-level diffing of matched pairs (name on IP-confirmed identity,
//!   normalized environment, owner)
//! - Classification of every record into exactly one row
//!   (match / conflict / missing on either side)
//! - Summary aggregation for dashboard headers and exports
//!
//! ## Architecture
//!
//! ```text
//! questionnaire ──┐
//!                 ├──► AssetComparator ──► Vec<ComparatorRow> ──► summarize
//! cmdb ───────────┘        (normalize)
//! ```
//!
//! ## Usage
//!
//! ```
//! use vigil_inventory::{AssetComparator, AssetKind, AssetOrigin, AssetRecord, RowStatus};
//!
//! let questionnaire = vec![
//!     AssetRecord::new(AssetKind::Database, "Trading-DB", AssetOrigin::Questionnaire)
//!         .with_ip("10.0.0.1"),
//! ];
//! let cmdb = vec![
//!     AssetRecord::new(AssetKind::Database, "Trading-System", AssetOrigin::Cmdb)
//!         .with_ip("10.0.0.1"),
//! ];
//!
//! let rows = AssetComparator::new().reconcile(&questionnaire, &cmdb);
//! assert_eq!(rows[0].status, RowStatus::Conflict);
//! ```

pub mod asset;
pub mod comparator;
pub mod normalize;
pub mod report;

// Re-export main types
pub use asset::{AssetKind, AssetOrigin, AssetRecord};
pub use comparator::{AssetComparator, ComparatorRow, DiffField, FieldDiff, NormalizedView, RowStatus};
pub use normalize::{normalize_environment, normalize_name};
pub use report::{summarize, ComparisonSummary};
