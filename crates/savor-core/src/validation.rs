//! # Validation Module
//!
//! Load-time checks for records coming out of the document store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      When Each Check Runs                               │
//! │                                                                         │
//! │  Load time (THIS MODULE)                                               │
//! │  ├── validate_menu_item   record invariants, once per snapshot         │
//! │  ├── validate_discount    value range and window                       │
//! │  └── BusinessHours::validate (schedule module)                         │
//! │           │                                                             │
//! │           ▼  failures are ValidationError: a bug in the data layer     │
//! │                                                                         │
//! │  Order time (pricing module)                                           │
//! │  └── price_selection      the customer's picks                         │
//! │           │                                                             │
//! │           ▼  failures are SelectionError: the customer fixes and retries│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use savor_core::money::Money;
//! use savor_core::types::MenuItem;
//! use savor_core::validation::validate_menu_item;
//!
//! let item = MenuItem::new("burger", "lunch", "Burger", Money::from_cents(1200));
//! assert!(validate_menu_item(&item).is_ok());
//! ```

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Discount, DiscountType, MenuItem, OptionValue, MAX_DISCOUNT_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest display name accepted for items, groups and values.
pub const MAX_NAME_LEN: usize = 200;

/// Largest price accepted for a base price, add-on or flat discount ($10M).
/// Keeps every subtotal well inside `i64` cents.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an identifier (`itemID`, `discountID`, ...): must not be blank.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use savor_core::validation::validate_name;
///
/// assert!(validate_name("name", "Extra Cheese").is_ok());
/// assert!(validate_name("name", "  ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free add-ons)
/// - At most [`MAX_PRICE_CENTS`]
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if Money::from_cents(cents).is_negative() || cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a menu item snapshot.
///
/// ## Rules
/// - `itemID`, `menuID` present; `name` valid
/// - `basePrice` and every `additionalPrice` within `0..=MAX_PRICE_CENTS`
/// - group names unique within the item, value names unique within a group
/// - every required customization offers at least one value and allows at
///   least one pick
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    validate_id("itemID", &item.item_id)?;
    validate_id("menuID", &item.menu_id)?;
    validate_name("name", &item.name)?;
    validate_price_cents("basePrice", item.base_price.cents())?;

    let mut option_names = BTreeSet::new();
    for option in &item.options {
        let field = format!("options[{}]", option.name);
        validate_name("options.name", &option.name)?;
        if !option_names.insert(option.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "options.name".to_string(),
                value: option.name.clone(),
            });
        }
        validate_values(&field, &option.values)?;
    }

    let mut group_names = BTreeSet::new();
    for group in &item.required_customizations {
        let field = format!("requiredCustomizations[{}]", group.name);
        validate_name("requiredCustomizations.name", &group.name)?;
        if !group_names.insert(group.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "requiredCustomizations.name".to_string(),
                value: group.name.clone(),
            });
        }
        if group.values.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if group.max_selection < 1 {
            return Err(ValidationError::OutOfRange {
                field: format!("{}.maxSelection", field),
                min: 1,
                max: u32::MAX as i64,
            });
        }
        validate_values(&field, &group.values)?;
    }

    Ok(())
}

fn validate_values(field: &str, values: &[OptionValue]) -> ValidationResult<()> {
    let mut seen = BTreeSet::new();
    for value in values {
        validate_name(&format!("{}.values.name", field), &value.name)?;
        validate_price_cents(
            &format!("{}.values[{}].additionalPrice", field, value.name),
            value.additional_price.cents(),
        )?;
        if !seen.insert(value.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: format!("{}.values", field),
                value: value.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validates a discount record.
///
/// ## Rules
/// - `discountID` present
/// - Percentage: whole percent, 0..=100
/// - Flat: non-negative cents, at most [`MAX_PRICE_CENTS`]
/// - `startTime < endTime`
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    validate_id("discountID", &discount.discount_id)?;

    match discount.discount_type {
        DiscountType::Percentage => {
            if !(0..=MAX_DISCOUNT_PERCENT).contains(&discount.discount_value) {
                return Err(ValidationError::OutOfRange {
                    field: "discountValue".to_string(),
                    min: 0,
                    max: MAX_DISCOUNT_PERCENT,
                });
            }
        }
        DiscountType::Flat => validate_price_cents("discountValue", discount.discount_value)?,
    }

    if discount.start_time >= discount.end_time {
        return Err(ValidationError::InvalidWindow {
            field: "discount window".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MenuOption, RequiredCustomization};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn burger() -> MenuItem {
        MenuItem::new("burger", "lunch", "Burger", Money::from_cents(1200)).with_customization(
            RequiredCustomization::new("Size", 1, vec![OptionValue::free("Regular")]),
        )
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Burger").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents("price", 0).is_ok());
        assert!(validate_price_cents("price", 1350).is_ok());
        assert!(validate_price_cents("price", -1).is_err());
        assert!(validate_price_cents("price", MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents("price", MAX_PRICE_CENTS + 1).is_err());
    }

    #[test]
    fn test_overflowing_prices_rejected() {
        let mut item = burger().with_option(MenuOption::new(
            "Toppings",
            0,
            vec![OptionValue::new("Cheese", Money::from_cents(1))],
        ));
        item.base_price = Money::from_cents(i64::MAX);
        assert!(matches!(
            validate_menu_item(&item),
            Err(ValidationError::OutOfRange { ref field, max, .. })
                if field == "basePrice" && max == MAX_PRICE_CENTS
        ));

        let huge = Discount::flat("f", Money::from_cents(i64::MAX), at(1), at(2));
        assert!(validate_discount(&huge).is_err());
    }

    #[test]
    fn test_valid_item() {
        assert!(validate_menu_item(&burger()).is_ok());
    }

    #[test]
    fn test_negative_prices_rejected() {
        let mut item = burger();
        item.base_price = Money::from_cents(-1);
        assert!(matches!(
            validate_menu_item(&item),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "basePrice"
        ));

        let item = burger().with_option(MenuOption::new(
            "Toppings",
            0,
            vec![OptionValue::new("Coupon", Money::from_cents(-100))],
        ));
        assert!(validate_menu_item(&item).is_err());
    }

    #[test]
    fn test_unsatisfiable_required_group_rejected() {
        let item = burger().with_customization(RequiredCustomization::new("Bread", 1, vec![]));
        assert!(matches!(
            validate_menu_item(&item),
            Err(ValidationError::Empty { .. })
        ));

        let item = burger().with_customization(RequiredCustomization::new(
            "Bread",
            0,
            vec![OptionValue::free("Rye")],
        ));
        assert!(matches!(
            validate_menu_item(&item),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let item = burger().with_customization(RequiredCustomization::new(
            "Size",
            1,
            vec![OptionValue::free("Large")],
        ));
        assert!(matches!(
            validate_menu_item(&item),
            Err(ValidationError::Duplicate { ref value, .. }) if value == "Size"
        ));

        let item = burger().with_option(MenuOption::new(
            "Sauce",
            1,
            vec![OptionValue::free("Mayo"), OptionValue::free("Mayo")],
        ));
        assert!(matches!(
            validate_menu_item(&item),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(&Discount::percentage("p", 100, at(1), at(2))).is_ok());
        assert!(validate_discount(&Discount::percentage("p", 101, at(1), at(2))).is_err());
        assert!(matches!(
            validate_discount(&Discount {
                discount_value: 1000,
                ..Discount::percentage("p", 10, at(1), at(2))
            }),
            Err(ValidationError::OutOfRange { max: 100, .. })
        ));
        assert!(validate_discount(&Discount::flat("f", Money::from_cents(-5), at(1), at(2))).is_err());
        assert!(validate_discount(&Discount::flat("", Money::from_cents(5), at(1), at(2))).is_err());
        assert!(matches!(
            validate_discount(&Discount::flat("f", Money::from_cents(5), at(2), at(2))),
            Err(ValidationError::InvalidWindow { .. })
        ));
    }
}
