//! # Selection & Pricing Resolver
//!
//! Validates what a customer picked for a menu item and prices it.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price_selection(item, selection, discounts, now)                       │
//! │                                                                         │
//! │  1. item orderable?            no ──► ItemUnavailable                   │
//! │  2. required groups 1..=max?   no ──► InvalidCustomization { group }    │
//! │  3. option groups <= max?      no ──► InvalidOption { group }           │
//! │  4. every named group exists?  no ──► UnknownSelection { group }        │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  subtotal = base + Σ picked additional_price                            │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  best active discount (largest reduction wins)                          │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  total = max(subtotal - reduction, 0)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation is fail-fast: the first violation is returned and nothing is
//! priced. Pure function; the evaluation instant is always supplied.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::SelectionError;
use crate::money::Money;
use crate::types::{Discount, DiscountType, MenuItem, OptionValue};

// =============================================================================
// Selection (input)
// =============================================================================

/// What the customer picked, keyed by group name.
///
/// Values are sets, so picking the same value twice counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection {
    /// Add-on groups (`MenuOption`) → picked value names.
    #[serde(default)]
    pub options: BTreeMap<String, BTreeSet<String>>,
    /// Required groups (`RequiredCustomization`) → picked value names.
    #[serde(default)]
    pub customizations: BTreeMap<String, BTreeSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn with_option<I, S>(mut self, group: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .entry(group.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_customization<I, S>(mut self, group: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customizations
            .entry(group.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }
}

// =============================================================================
// Priced Selection (output)
// =============================================================================

/// One value the customer picked, echoed back with its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PickedValue {
    pub group: String,
    pub name: String,
    pub additional_price: Money,
}

/// The discount that was applied and what it took off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    #[serde(rename = "discountID")]
    pub discount_id: String,
    pub discount_type: DiscountType,
    pub reduction: Money,
}

/// A validated, priced selection.
///
/// ## Invariants
/// - `total >= 0`
/// - `total <= subtotal`
/// - `total == subtotal` when `applied_discount` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedSelection {
    #[serde(rename = "itemID")]
    pub item_id: String,
    /// Picks from required groups, in the item's group and value order.
    pub customizations: Vec<PickedValue>,
    /// Picks from add-on groups, in the item's group and value order.
    pub options: Vec<PickedValue>,
    pub base_price: Money,
    pub subtotal: Money,
    pub applied_discount: Option<AppliedDiscount>,
    pub total: Money,
}

// =============================================================================
// Resolver
// =============================================================================

/// Validates `selection` against `item` and prices it at `evaluation_instant`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use savor_core::money::Money;
/// use savor_core::pricing::{price_selection, Selection};
/// use savor_core::types::{MenuItem, MenuOption, OptionValue, RequiredCustomization};
///
/// let item = MenuItem::new("burger", "lunch", "Burger", Money::from_cents(1200))
///     .with_option(MenuOption::new(
///         "Toppings",
///         0,
///         vec![OptionValue::new("Extra Cheese", Money::from_cents(150))],
///     ))
///     .with_customization(RequiredCustomization::new(
///         "Size",
///         1,
///         vec![OptionValue::free("Regular")],
///     ));
///
/// let selection = Selection::new()
///     .with_option("Toppings", ["Extra Cheese"])
///     .with_customization("Size", ["Regular"]);
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let priced = price_selection(&item, &selection, &[], now).unwrap();
/// assert_eq!(priced.total.cents(), 1350);
/// ```
pub fn price_selection(
    item: &MenuItem,
    selection: &Selection,
    discounts: &[Discount],
    evaluation_instant: NaiveDateTime,
) -> Result<PricedSelection, SelectionError> {
    let (customizations, options) = validate_selection(item, selection)?;

    let subtotal = customizations
        .iter()
        .chain(options.iter())
        .fold(item.base_price, |acc, p| acc.saturating_add(p.additional_price));

    let applied_discount = best_discount(discounts, subtotal, evaluation_instant);
    let total = match &applied_discount {
        Some(applied) => subtotal.minus_floor_zero(applied.reduction),
        None => subtotal,
    };

    debug!(
        item_id = %item.item_id,
        subtotal = %subtotal,
        discount_id = applied_discount.as_ref().map(|d| d.discount_id.as_str()),
        total = %total,
        "Priced selection"
    );

    Ok(PricedSelection {
        item_id: item.item_id.clone(),
        customizations,
        options,
        base_price: item.base_price,
        subtotal,
        applied_discount,
        total,
    })
}

/// Runs the four validation steps in order and returns the echoed picks
/// (required groups first, then add-on groups).
fn validate_selection(
    item: &MenuItem,
    selection: &Selection,
) -> Result<(Vec<PickedValue>, Vec<PickedValue>), SelectionError> {
    if !item.is_orderable() {
        debug!(item_id = %item.item_id, status = ?item.status, availability = item.availability, "Item not orderable");
        return Err(SelectionError::ItemUnavailable {
            item_id: item.item_id.clone(),
        });
    }

    let empty = BTreeSet::new();

    let mut customizations = Vec::new();
    for group in &item.required_customizations {
        let picked = selection.customizations.get(&group.name).unwrap_or(&empty);
        let count = picked.len();
        if count < 1 || count > group.max_selection as usize {
            return Err(SelectionError::InvalidCustomization {
                group: group.name.clone(),
                reason: format!(
                    "choose between 1 and {} values, got {}",
                    group.max_selection, count
                ),
            });
        }
        if let Some(foreign) = first_foreign(picked, &group.values) {
            return Err(SelectionError::InvalidCustomization {
                group: group.name.clone(),
                reason: format!("'{}' is not one of the choices", foreign),
            });
        }
        customizations.extend(echo(&group.name, picked, &group.values));
    }

    let mut options = Vec::new();
    for option in &item.options {
        let picked = selection.options.get(&option.name).unwrap_or(&empty);
        if let Some(limit) = option.limit() {
            if picked.len() > limit as usize {
                return Err(SelectionError::InvalidOption {
                    group: option.name.clone(),
                    reason: format!("choose at most {} values, got {}", limit, picked.len()),
                });
            }
        }
        if let Some(foreign) = first_foreign(picked, &option.values) {
            return Err(SelectionError::InvalidOption {
                group: option.name.clone(),
                reason: format!("'{}' is not one of the choices", foreign),
            });
        }
        options.extend(echo(&option.name, picked, &option.values));
    }

    let unknown = selection
        .customizations
        .keys()
        .find(|name| item.customization(name).is_none())
        .or_else(|| {
            selection
                .options
                .keys()
                .find(|name| item.option(name).is_none())
        });
    if let Some(group) = unknown {
        return Err(SelectionError::UnknownSelection {
            group: group.clone(),
        });
    }

    Ok((customizations, options))
}

fn first_foreign<'a>(picked: &'a BTreeSet<String>, values: &[OptionValue]) -> Option<&'a String> {
    picked
        .iter()
        .find(|name| !values.iter().any(|v| &v.name == *name))
}

/// Picked values in the group's declared order.
fn echo(group: &str, picked: &BTreeSet<String>, values: &[OptionValue]) -> Vec<PickedValue> {
    values
        .iter()
        .filter(|v| picked.contains(&v.name))
        .map(|v| PickedValue {
            group: group.to_string(),
            name: v.name.clone(),
            additional_price: v.additional_price,
        })
        .collect()
}

// =============================================================================
// Discounts
// =============================================================================

/// Discounts whose `[start_time, end_time)` window contains `instant`.
pub fn active_discounts(discounts: &[Discount], instant: NaiveDateTime) -> Vec<&Discount> {
    discounts.iter().filter(|d| d.is_active_at(instant)).collect()
}

/// Picks the single active discount that takes the most off `subtotal`.
///
/// Discounts never stack. Ties go to Percentage over Flat, then to the
/// smallest `discount_id`, so the choice is deterministic.
///
/// ## Example
/// ```text
/// subtotal $40.00
///   10% off  → reduction $4.00
///   $5 off   → reduction $5.00  ◄── wins, total $35.00
/// ```
pub fn best_discount(
    discounts: &[Discount],
    subtotal: Money,
    instant: NaiveDateTime,
) -> Option<AppliedDiscount> {
    active_discounts(discounts, instant)
        .into_iter()
        .map(|d| (d, d.reduction_for(subtotal)))
        .min_by(|(a, a_off), (b, b_off)| {
            b_off
                .cmp(a_off)
                // DiscountType orders Percentage before Flat
                .then(a.discount_type.cmp(&b.discount_type))
                .then_with(|| a.discount_id.cmp(&b.discount_id))
        })
        .map(|(d, reduction)| AppliedDiscount {
            discount_id: d.discount_id.clone(),
            discount_type: d.discount_type,
            reduction,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
