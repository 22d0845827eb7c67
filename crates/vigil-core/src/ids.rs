//! Strongly Typed Identifiers
//!
//! This module provides type-safe identifier types for vigil.
//! Using the newtype pattern, these types prevent accidental misuse of
//! different ID types at compile time.
//!
//! Opaque record identifiers ([`TicketId`]) wrap a UUID. Domain keys that
//! carry meaning for operators ([`InitiativeId`], [`OccurrenceId`]) wrap the
//! slug strings they are displayed and exported as.
//!
//! # Example
//!
//! ```
//! use vigil_core::{TicketId, InitiativeId};
//!
//! let ticket = TicketId::new();
//!
//! // Type safety: cannot pass an InitiativeId where a TicketId is expected
//! fn requires_ticket(id: TicketId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_ticket(ticket);
//! // requires_ticket(InitiativeId::from("missing-logs")); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed UUID-backed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for progress tickets.
    ///
    /// Assigned when a validated ticket draft is accepted.
    ///
    /// # Example
    ///
    /// ```
    /// use vigil_core::TicketId;
    /// use uuid::Uuid;
    ///
    /// // Create a new random TicketId
    /// let ticket_id = TicketId::new();
    /// println!("Ticket: {}", ticket_id);
    ///
    /// // Create from existing UUID
    /// let uuid = Uuid::new_v4();
    /// let ticket_id = TicketId::from_uuid(uuid);
    /// assert_eq!(ticket_id.as_uuid(), &uuid);
    ///
    /// // Parse from string
    /// let ticket_id: TicketId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
    /// ```
    TicketId
);

/// Strongly typed identifier for compliance initiatives.
///
/// Initiative IDs are fixed human-readable slugs (`assets-cleanup`,
/// `missing-logs`, ...) rather than opaque UUIDs, so this newtype wraps the
/// slug string directly.
///
/// # Example
///
/// ```
/// use vigil_core::InitiativeId;
///
/// let id = InitiativeId::from("missing-logs");
/// assert_eq!(id.as_str(), "missing-logs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InitiativeId(String);

impl InitiativeId {
    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InitiativeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for InitiativeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for InitiativeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed identifier for initiative occurrences.
///
/// An occurrence ID is the deterministic composite of its initiative slug
/// and period key, `"<initiative>:<period>"`, so regenerating occurrences
/// for the same year always yields the same IDs.
///
/// # Example
///
/// ```
/// use vigil_core::{InitiativeId, OccurrenceId};
///
/// let initiative = InitiativeId::from("assets-cleanup");
/// let id = OccurrenceId::compose(&initiative, "2025-Q1");
/// assert_eq!(id.as_str(), "assets-cleanup:2025-Q1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(String);

impl OccurrenceId {
    /// Composes an occurrence ID from its initiative and rendered period key.
    #[must_use]
    pub fn compose(initiative: &InitiativeId, period: &str) -> Self {
        Self(format!("{initiative}:{period}"))
    }

    /// Returns the composite key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OccurrenceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OccurrenceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OccurrenceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
