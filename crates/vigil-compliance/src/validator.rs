//! Ticket validation service.
//!
//! This module provides pluggable validators for checking ticket drafts
//! against their occurrence before acceptance. Validation failures are
//! data, not errors: every rule runs, all failures are collected, and
//! callers render them next to the originating form fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::initiative::InitiativeDefinition;
use crate::occurrence::Occurrence;
use crate::ticket::{MetricPair, Ticket, TicketDraft};
use vigil_core::TicketId;

// ============================================================================
// Types
// ============================================================================

/// Result of a validation check.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Whether the validation passed.
    pub is_valid: bool,
    /// Validation errors (if any).
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a successful validation result.
    #[must_use]
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// Create a failed validation result with a single error.
    #[must_use]
    pub fn failure(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
        }
    }

    /// Create a result from a list of errors; valid when the list is empty.
    #[must_use]
    pub fn failures(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Field-to-message view for inline form rendering. Errors without a
    /// field are keyed by their code; the first message per key wins.
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            let key = error.field.clone().unwrap_or_else(|| error.code.clone());
            map.entry(key).or_insert_with(|| error.message.clone());
        }
        map
    }
}

/// A validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Field that caused the error (optional).
    pub field: Option<String>,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with a field.
    pub fn with_field(
        code: impl Into<String>,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

// ============================================================================
// Validator Trait
// ============================================================================

/// Trait for pluggable ticket validators.
pub trait TicketValidator: Send + Sync {
    /// Validate a draft against its occurrence and initiative.
    fn validate(
        &self,
        draft: &TicketDraft,
        occurrence: &Occurrence,
        initiative: &InitiativeDefinition,
    ) -> ValidationResult;
}

// ============================================================================
// Built-in Validators
// ============================================================================

/// Validates the conditionally-required fields of a not-delivered ticket.
///
/// A delivered ticket has no requirements here; the conditional fields are
/// dropped from the accepted payload entirely.
#[derive(Debug, Default)]
pub struct DeliveryFieldsValidator;

impl TicketValidator for DeliveryFieldsValidator {
    fn validate(
        &self,
        draft: &TicketDraft,
        occurrence: &Occurrence,
        _initiative: &InitiativeDefinition,
    ) -> ValidationResult {
        if draft.delivered {
            return ValidationResult::success();
        }

        let mut errors = vec![];

        match &draft.reason {
            Some(reason) if !reason.trim().is_empty() => {}
            _ => errors.push(ValidationError::with_field(
                "REASON_REQUIRED",
                "A reason is required when the checkpoint was not delivered",
                "reason",
            )),
        }

        if draft.current_status.is_none() {
            errors.push(ValidationError::with_field(
                "CURRENT_STATUS_REQUIRED",
                "A current status is required when the checkpoint was not delivered",
                "current_status",
            ));
        }

        if let Some(new_date) = draft.new_date {
            // Strictly after the period start; a same-day replan is
            // rejected.
            if new_date <= occurrence.start_date {
                errors.push(ValidationError::with_field(
                    "NEW_DATE_TOO_EARLY",
                    "New date must be after the checkpoint start date",
                    "new_date",
                ));
            }
        }

        ValidationResult::failures(errors)
    }
}

/// Validates the initiative-specific numeric metric pair.
///
/// Both values are required for every submission regardless of delivery
/// status; before/after initiatives additionally bound `after` by
/// `before`.
#[derive(Debug, Default)]
pub struct MetricPairValidator;

impl TicketValidator for MetricPairValidator {
    fn validate(
        &self,
        draft: &TicketDraft,
        _occurrence: &Occurrence,
        initiative: &InitiativeDefinition,
    ) -> ValidationResult {
        let (first_field, second_field) = initiative.metric.field_labels();
        let mut errors = vec![];

        for (value, field) in [
            (draft.metric_first, first_field),
            (draft.metric_second, second_field),
        ] {
            match value {
                None => errors.push(ValidationError::with_field(
                    "METRIC_REQUIRED",
                    format!("A value for '{field}' is required"),
                    field,
                )),
                Some(v) if v < 0 => errors.push(ValidationError::with_field(
                    "METRIC_NEGATIVE",
                    format!("'{field}' must be a non-negative integer"),
                    field,
                )),
                Some(_) => {}
            }
        }

        if initiative.metric.enforces_ordering() {
            if let (Some(before), Some(after)) = (draft.metric_first, draft.metric_second) {
                // Equal counts are a valid "nothing remediated" report.
                if after > before {
                    errors.push(ValidationError::with_field(
                        "METRIC_AFTER_EXCEEDS_BEFORE",
                        "After cannot exceed Before",
                        second_field,
                    ));
                }
            }
        }

        ValidationResult::failures(errors)
    }
}

/// Validates the draft's linkage to the occurrence it is submitted
/// against.
///
/// The denormalized keys must agree, and the occurrence must accept
/// submissions: a suppressed checkpoint is non-interactive, and a
/// delivered one already has its ticket.
#[derive(Debug, Default)]
pub struct OccurrenceLinkValidator;

impl TicketValidator for OccurrenceLinkValidator {
    fn validate(
        &self,
        draft: &TicketDraft,
        occurrence: &Occurrence,
        _initiative: &InitiativeDefinition,
    ) -> ValidationResult {
        let mut errors = vec![];

        if draft.occurrence_id != occurrence.id {
            errors.push(ValidationError::with_field(
                "OCCURRENCE_MISMATCH",
                format!(
                    "Draft references occurrence {}, submitted against {}",
                    draft.occurrence_id, occurrence.id
                ),
                "occurrence_id",
            ));
        } else if draft.initiative_id != occurrence.initiative_id
            || draft.period != occurrence.period
        {
            errors.push(ValidationError::with_field(
                "OCCURRENCE_MISMATCH",
                "Draft keys disagree with the occurrence they denormalize",
                "occurrence_id",
            ));
        }

        if !occurrence.status.is_actionable() {
            errors.push(ValidationError::new(
                "OCCURRENCE_NOT_ACTIONABLE",
                format!(
                    "Occurrence {} is {} and does not accept submissions",
                    occurrence.id, occurrence.status
                ),
            ));
        }

        ValidationResult::failures(errors)
    }
}

// ============================================================================
// Validation Service
// ============================================================================

/// Service validating and accepting ticket drafts.
pub struct TicketValidationService {
    validators: Vec<Box<dyn TicketValidator>>,
}

impl Default for TicketValidationService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TicketValidationService {
    /// Create a service with no validators.
    #[must_use]
    pub fn new() -> Self {
        Self { validators: vec![] }
    }

    /// Add a validator.
    pub fn add_validator(&mut self, validator: Box<dyn TicketValidator>) {
        self.validators.push(validator);
    }

    /// Create with the built-in validators.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut service = Self::new();
        service.add_validator(Box::new(OccurrenceLinkValidator));
        service.add_validator(Box::new(DeliveryFieldsValidator));
        service.add_validator(Box::new(MetricPairValidator));
        service
    }

    /// Validate a draft, collecting every failure.
    #[must_use]
    pub fn validate(
        &self,
        draft: &TicketDraft,
        occurrence: &Occurrence,
        initiative: &InitiativeDefinition,
    ) -> ValidationResult {
        let mut result = ValidationResult::success();

        for validator in &self.validators {
            let validator_result = validator.validate(draft, occurrence, initiative);
            result.merge(validator_result);
        }

        debug!(
            occurrence = %occurrence.id,
            valid = result.is_valid,
            errors = result.errors.len(),
            "Validated ticket draft"
        );

        result
    }

    /// Validate a draft and, if it passes, convert it into an accepted
    /// ticket.
    ///
    /// Acceptance drops the conditional fields of a delivered ticket so
    /// the persisted payload carries no stale reason or replan date.
    /// Flipping the occurrence to delivered is the caller's job.
    pub fn accept(
        &self,
        draft: TicketDraft,
        occurrence: &Occurrence,
        initiative: &InitiativeDefinition,
        now: DateTime<Utc>,
    ) -> Result<Ticket, ValidationResult> {
        let result = self.validate(&draft, occurrence, initiative);
        if !result.is_valid {
            return Err(result);
        }

        // Validated above: both values are present and non-negative.
        let metrics = MetricPair {
            first: draft
                .metric_first
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or_default(),
            second: draft
                .metric_second
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or_default(),
        };

        let (reason, current_status, new_date) = if draft.delivered {
            (None, None, None)
        } else {
            (draft.reason, draft.current_status, draft.new_date)
        };

        Ok(Ticket {
            id: TicketId::new(),
            occurrence_id: draft.occurrence_id,
            initiative_id: draft.initiative_id,
            period: draft.period,
            delivered: draft.delivered,
            reason,
            current_status,
            new_date,
            metrics,
            created_at: now,
            updated_at: now,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
