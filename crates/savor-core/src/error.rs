//! # Error Types
//!
//! Domain-specific error types for savor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  SelectionError   - the customer's picks don't fit the item            │
//! │                     (expected, user-recoverable: fix and retry)        │
//! │                                                                         │
//! │  ScheduleError    - a BusinessHours record is malformed                │
//! │                     (rejected at load time, that record only)          │
//! │                                                                         │
//! │  ValidationError  - a menu/discount record breaks its invariants       │
//! │                     (contract violation by the data layer upstream)    │
//! │                                                                         │
//! │  CoreError        - umbrella for callers that handle all of the above  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (group name, times)
//! 3. Errors are enum variants, never String
//! 4. Expected outcomes are returned, never panicked

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Selection Error
// =============================================================================

/// Why a customer's selection was rejected.
///
/// Only the first violation is reported; the caller re-prices after the
/// customer corrects it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionError {
    /// The item is not published or has been marked unavailable.
    #[error("Item {item_id} is not available for ordering")]
    ItemUnavailable { item_id: String },

    /// A required customization group is unsatisfied or has a foreign value.
    ///
    /// ## User Workflow
    /// ```text
    /// "Size" (choose 1)  ── nothing picked ──► InvalidCustomization
    ///                                          UI: "Please choose a Size"
    /// ```
    #[error("Invalid choice for {group}: {reason}")]
    InvalidCustomization { group: String, reason: String },

    /// An optional add-on group has too many picks or a foreign value.
    #[error("Invalid choice for {group}: {reason}")]
    InvalidOption { group: String, reason: String },

    /// The selection names a group that is not on the item.
    #[error("{group} is not offered on this item")]
    UnknownSelection { group: String },
}

impl SelectionError {
    /// Name of the offending group (or item id for `ItemUnavailable`).
    pub fn subject(&self) -> &str {
        match self {
            SelectionError::ItemUnavailable { item_id } => item_id,
            SelectionError::InvalidCustomization { group, .. }
            | SelectionError::InvalidOption { group, .. }
            | SelectionError::UnknownSelection { group } => group,
        }
    }
}

// =============================================================================
// Schedule Error
// =============================================================================

/// Malformed opening-hours input.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A time string is not a valid `HH:MM` between 00:00 and 23:59.
    #[error("Invalid time of day: {value}")]
    InvalidTimeOfDay { value: String },

    /// A range does not satisfy `open < close`.
    #[error("Invalid time range {open}-{close}: open must be before close")]
    InvalidRange { open: String, close: String },

    /// A range on a specific day does not satisfy `open < close`.
    #[error("Invalid time range on {day}: {open}-{close}")]
    InvalidDayRange {
        day: String,
        open: String,
        close: String,
    },

    /// Two ranges on the same day overlap.
    #[error("Overlapping ranges on {day}: {first} and {second}")]
    OverlappingRanges {
        day: String,
        first: String,
        second: String,
    },

    /// The JSON document could not be decoded.
    #[error("Malformed business hours: {0}")]
    Malformed(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Record invariant violations.
///
/// These indicate the data layer handed the engine a record it should never
/// have produced. They are checked once, when records are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A group has nothing the customer could pick.
    #[error("{field} must offer at least one value")]
    Empty { field: String },

    /// Time window is empty or inverted.
    #[error("{field} must start before it ends")]
    InvalidWindow { field: String },

    /// Duplicate name within one item or group.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for callers that load records and price in one flow.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Validation error (a contract violation upstream).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
