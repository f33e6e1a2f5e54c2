//! # savor-core: Menu Pricing & Opening Hours for Savor
//!
//! The restaurant-discovery client is mostly platform glue (sign-in, maps,
//! document store). This crate is the part with real rules: what a customer
//! may pick for a menu item, what it costs, and whether the restaurant is
//! open. Everything here is a pure function over plain records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Savor Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Mobile client (screens, auth, map, store SDK)         │   │
//! │  │    fetch MenuItem / BusinessHours / Discounts as snapshots      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain records + "now"                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ savor-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  money    │  │ schedule  │  │  pricing  │  │ validation│  │   │
//! │  │   │  time     │  │ is_open_at│  │ price_    │  │ load-time │  │   │
//! │  │   │           │  │           │  │ selection │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money and DiscountRate with integer arithmetic (no floats!)
//! - [`time`] - TimeOfDay and TimeRange
//! - [`types`] - MenuItem, option groups, Discount
//! - [`schedule`] - BusinessHours and the open/closed resolver
//! - [`pricing`] - Selection validation and pricing
//! - [`menu`] - Sorting and filtering menu lists
//! - [`validation`] - Load-time record checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use savor_core::{is_open_at, BusinessHours, TimeRange};
//!
//! let hours = BusinessHours::every_day(vec![TimeRange::parse("11:00", "22:00").unwrap()]);
//! let now = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap().and_hms_opt(21, 59, 0).unwrap();
//! assert!(is_open_at(&hours, now));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod menu;
pub mod money;
pub mod pricing;
pub mod schedule;
pub mod time;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ScheduleError, SelectionError, ValidationError};
pub use money::{DiscountRate, Money};
pub use pricing::{
    active_discounts, best_discount, price_selection, AppliedDiscount, PickedValue,
    PricedSelection, Selection,
};
pub use schedule::{effective_ranges, is_open_at, next_opening, BusinessHours, SpecialHours};
pub use time::{TimeOfDay, TimeRange};
pub use types::*;
