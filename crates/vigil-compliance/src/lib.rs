//! # Compliance Initiative Scheduling
//!
//! Recurring compliance checkpoints for managed clients: a fixed catalog
//! of monthly and quarterly initiatives, materialized into time-boxed
//! occurrences, progressed by validated tickets.
//!
//! ## Overview
//!
//! This crate provides:
//! - The built-in initiative catalog (three monthly reviews, one
//!   quarterly cleanup)
//! - Occurrence generation per calendar year with time-derived statuses,
//!   cross-initiative suppression, and a sticky delivered overlay
//! - Countdown and progress aggregation for dashboard affordances
//! - Field-collecting validation of ticket drafts and their conversion
//!   into accepted tickets
//!
//! ## Architecture
//!
//! ```text
//! catalog ──► OccurrenceScheduler ──► Vec<Occurrence> ──► progress
//!                                          │
//!                           TicketDraft ───┤
//!                                          ▼
//!                             TicketValidationService ──► Ticket
//! ```
//!
//! ## Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use vigil_compliance::{builtin_initiatives, OccurrenceScheduler, OccurrenceStatus};
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
//! let occurrences = OccurrenceScheduler::generate(&builtin_initiatives(), 2025, now);
//!
//! // January's asset list review is covered by the quarterly cleanup.
//! let january = occurrences
//!     .iter()
//!     .find(|o| o.id.as_str() == "asset-list-review:2025-01")
//!     .unwrap();
//! assert_eq!(january.status, OccurrenceStatus::Na);
//! ```

pub mod initiative;
pub mod occurrence;
pub mod period;
pub mod progress;
pub mod scheduler;
pub mod ticket;
pub mod validator;

// Re-export main types
pub use initiative::{
    builtin_initiatives, lookup_initiative, Cadence, InitiativeDefinition, MetricShape,
    ASSETS_CLEANUP, ASSET_LIST_REVIEW, MANUAL_HEALTH_CHECK, MISSING_LOGS,
};
pub use occurrence::{Countdown, Occurrence, OccurrenceStatus};
pub use period::Period;
pub use progress::{initiative_progress, summarize_year, ComplianceSummary, InitiativeProgress};
pub use scheduler::OccurrenceScheduler;
pub use ticket::{CurrentStatus, MetricPair, Ticket, TicketDraft};
pub use validator::{
    DeliveryFieldsValidator, MetricPairValidator, OccurrenceLinkValidator, TicketValidationService,
    TicketValidator, ValidationError, ValidationResult,
};
