//! # Domain Types
//!
//! Menu and discount records as the document store hands them over.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌─────────────────────┐               │
//! │  │      MenuItem        │        │      Discount       │               │
//! │  │  ──────────────────  │        │  ─────────────────  │               │
//! │  │  itemID / menuID     │        │  discountID         │               │
//! │  │  basePrice           │        │  Percentage | Flat  │               │
//! │  │  status, availability│        │  [startTime,endTime)│               │
//! │  │  options ────────────┼──┐     └─────────────────────┘               │
//! │  │  requiredCustom... ──┼─┐│                                            │
//! │  └──────────────────────┘ ││     ┌─────────────────────┐               │
//! │                           │└────►│     MenuOption      │ 0..n picks    │
//! │                           │      │  values: OptionValue│               │
//! │                           │      └─────────────────────┘               │
//! │                           │      ┌─────────────────────┐               │
//! │                           └─────►│RequiredCustomization│ 1..max picks  │
//! │                                  │  values: OptionValue│               │
//! │                                  └─────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records are immutable snapshots. The engine reads them and derives
//! results; it never writes back.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{DiscountRate, Money};

// =============================================================================
// Item Status
// =============================================================================

/// Lifecycle tag of a menu item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Being edited by the restaurant, not visible to customers.
    #[default]
    Draft,
    /// Live on the menu.
    Published,
    /// Retired; kept for order history.
    Archived,
}

// =============================================================================
// Option Values & Groups
// =============================================================================

/// One pickable value, e.g. "Extra Cheese" (+$1.50) or "Large".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    pub name: String,
    /// Surcharge in cents. Zero for free choices.
    #[serde(default)]
    pub additional_price: Money,
}

impl OptionValue {
    pub fn new(name: impl Into<String>, additional_price: Money) -> Self {
        OptionValue {
            name: name.into(),
            additional_price,
        }
    }

    /// A zero-cost value.
    pub fn free(name: impl Into<String>) -> Self {
        OptionValue::new(name, Money::zero())
    }
}

/// An optional add-on group ("Toppings").
///
/// `max_selection == 0` means the customer may pick any number of the listed
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    pub name: String,
    #[serde(default)]
    pub max_selection: u32,
    #[serde(default)]
    pub values: Vec<OptionValue>,
}

impl MenuOption {
    pub fn new(name: impl Into<String>, max_selection: u32, values: Vec<OptionValue>) -> Self {
        MenuOption {
            name: name.into(),
            max_selection,
            values,
        }
    }

    /// Looks up a value by exact name.
    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// `None` when the option is unlimited.
    #[inline]
    pub fn limit(&self) -> Option<u32> {
        (self.max_selection > 0).then_some(self.max_selection)
    }
}

/// A group the customer must answer ("Size": choose 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RequiredCustomization {
    pub name: String,
    #[serde(default)]
    pub values: Vec<OptionValue>,
    /// Upper bound of picks; the lower bound is always 1.
    pub max_selection: u32,
}

impl RequiredCustomization {
    pub fn new(name: impl Into<String>, max_selection: u32, values: Vec<OptionValue>) -> Self {
        RequiredCustomization {
            name: name.into(),
            values,
            max_selection,
        }
    }

    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "itemID")]
    pub item_id: String,

    #[serde(rename = "menuID")]
    pub menu_id: String,

    /// Display name shown in the menu list.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Price before any add-ons, in cents.
    pub base_price: Money,

    #[serde(default)]
    pub status: ItemStatus,

    /// Whether the kitchen can currently make it (sold out = false).
    #[serde(default)]
    pub availability: bool,

    /// Allergen tags, e.g. "gluten", "peanuts".
    #[serde(default)]
    pub allergens: BTreeSet<String>,

    #[serde(default)]
    pub is_special_offer: bool,

    /// Sort key within the menu; ties broken by name.
    #[serde(default)]
    pub order_index: i32,

    #[serde(default)]
    pub options: Vec<MenuOption>,

    #[serde(default)]
    pub required_customizations: Vec<RequiredCustomization>,
}

impl MenuItem {
    /// Creates a published, available item with no groups.
    ///
    /// Mostly useful for tests and seed data; real items come from the store.
    pub fn new(
        item_id: impl Into<String>,
        menu_id: impl Into<String>,
        name: impl Into<String>,
        base_price: Money,
    ) -> Self {
        MenuItem {
            item_id: item_id.into(),
            menu_id: menu_id.into(),
            name: name.into(),
            description: None,
            image_url: None,
            category: None,
            base_price,
            status: ItemStatus::Published,
            availability: true,
            allergens: BTreeSet::new(),
            is_special_offer: false,
            order_index: 0,
            options: Vec::new(),
            required_customizations: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: MenuOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_customization(mut self, group: RequiredCustomization) -> Self {
        self.required_customizations.push(group);
        self
    }

    /// Can a customer order this right now?
    #[inline]
    pub fn is_orderable(&self) -> bool {
        self.availability && self.status == ItemStatus::Published
    }

    pub fn option(&self, name: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn customization(&self, name: &str) -> Option<&RequiredCustomization> {
        self.required_customizations.iter().find(|g| g.name == name)
    }

    /// Case-insensitive allergen check.
    pub fn contains_allergen(&self, tag: &str) -> bool {
        self.allergens.iter().any(|a| a.eq_ignore_ascii_case(tag))
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Largest meaningful Percentage `discount_value` (100% off).
pub const MAX_DISCOUNT_PERCENT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a whole percent off the subtotal.
    Percentage,
    /// `discount_value` is cents off the subtotal.
    Flat,
}

/// A time-boxed price reduction attached to a menu item.
///
/// ## Value Encoding
/// | type       | `discount_value`          | example          |
/// |------------|---------------------------|------------------|
/// | Percentage | whole percent (0..=100)   | 10 = 10% off     |
/// | Flat       | cents (>= 0)              | 500 = $5.00 off  |
///
/// The validity window is half-open: active at `start_time`, no longer active
/// at `end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(rename = "discountID")]
    pub discount_id: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    #[ts(as = "String")]
    pub start_time: NaiveDateTime,
    #[ts(as = "String")]
    pub end_time: NaiveDateTime,
}

impl Discount {
    /// A whole-percent discount (`percent = 10` → 10% off).
    pub fn percentage(
        discount_id: impl Into<String>,
        percent: u32,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Discount {
            discount_id: discount_id.into(),
            discount_type: DiscountType::Percentage,
            discount_value: percent as i64,
            start_time,
            end_time,
        }
    }

    /// A fixed amount off.
    pub fn flat(
        discount_id: impl Into<String>,
        amount: Money,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Discount {
            discount_id: discount_id.into(),
            discount_type: DiscountType::Flat,
            discount_value: amount.cents(),
            start_time,
            end_time,
        }
    }

    /// `start_time <= instant < end_time`.
    #[inline]
    pub fn is_active_at(&self, instant: NaiveDateTime) -> bool {
        self.start_time <= instant && instant < self.end_time
    }

    /// How much this discount takes off `subtotal`.
    ///
    /// Never negative and never more than `subtotal`, so
    /// `subtotal - reduction` is always a legal total.
    pub fn reduction_for(&self, subtotal: Money) -> Money {
        let raw = match self.discount_type {
            DiscountType::Percentage => {
                let percent = self.discount_value.clamp(0, MAX_DISCOUNT_PERCENT) as u32;
                subtotal.percentage_of(DiscountRate::from_percent(percent))
            }
            DiscountType::Flat => Money::from_cents(self.discount_value.max(0)),
        };
        raw.min(subtotal).max(Money::zero())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_item_status_default() {
        assert_eq!(ItemStatus::default(), ItemStatus::Draft);
    }

    #[test]
    fn test_is_orderable() {
        let mut item = MenuItem::new("burger", "lunch", "Burger", Money::from_cents(1200));
        assert!(item.is_orderable());

        item.availability = false;
        assert!(!item.is_orderable());

        item.availability = true;
        item.status = ItemStatus::Archived;
        assert!(!item.is_orderable());
    }

    #[test]
    fn test_allergen_lookup_ignores_case() {
        let mut item = MenuItem::new("pad-thai", "dinner", "Pad Thai", Money::from_cents(1400));
        item.allergens.insert("Peanuts".to_string());
        assert!(item.contains_allergen("peanuts"));
        assert!(!item.contains_allergen("gluten"));
    }

    #[test]
    fn test_discount_window_is_half_open() {
        let d = Discount::flat("d1", Money::from_cents(500), at(1, 9, 0), at(1, 17, 0));
        assert!(!d.is_active_at(at(1, 8, 59)));
        assert!(d.is_active_at(at(1, 9, 0)));
        assert!(d.is_active_at(at(1, 16, 59)));
        assert!(!d.is_active_at(at(1, 17, 0)));
    }

    #[test]
    fn test_reduction_is_capped_at_subtotal() {
        let d = Discount::flat("d1", Money::from_cents(500), at(1, 0, 0), at(2, 0, 0));
        assert_eq!(d.reduction_for(Money::from_cents(4000)).cents(), 500);
        assert_eq!(d.reduction_for(Money::from_cents(300)).cents(), 300);

        let p = Discount::percentage("d2", 10, at(1, 0, 0), at(2, 0, 0));
        assert_eq!(p.discount_value, 10);
        assert_eq!(p.reduction_for(Money::from_cents(4000)).cents(), 400);
    }

    #[test]
    fn test_percentage_discount_from_document_json() {
        let json = r#"{
            "discountID": "lunch-10",
            "discountType": "percentage",
            "discountValue": 10,
            "startTime": "2024-03-01T00:00:00",
            "endTime": "2024-04-01T00:00:00"
        }"#;
        let d: Discount = serde_json::from_str(json).unwrap();
        assert_eq!(d.discount_type, DiscountType::Percentage);
        // 10% of $40.00
        assert_eq!(d.reduction_for(Money::from_cents(4000)).cents(), 400);
    }

    #[test]
    fn test_out_of_range_percentage_is_capped() {
        let mut d = Discount::percentage("d", 10, at(1, 0, 0), at(2, 0, 0));
        d.discount_value = 150;
        assert_eq!(d.reduction_for(Money::from_cents(4000)).cents(), 4000);
        d.discount_value = i64::MAX;
        assert_eq!(d.reduction_for(Money::from_cents(4000)).cents(), 4000);
    }

    #[test]
    fn test_menu_item_from_document_json() {
        let json = r#"{
            "itemID": "burger",
            "menuID": "lunch",
            "name": "Burger",
            "imageURL": "https://img.example/burger.png",
            "basePrice": 1200,
            "status": "published",
            "availability": true,
            "allergens": ["gluten"],
            "orderIndex": 2,
            "options": [
                {"name": "Toppings", "maxSelection": 0,
                 "values": [{"name": "Extra Cheese", "additionalPrice": 150}]}
            ],
            "requiredCustomizations": [
                {"name": "Size", "maxSelection": 1, "values": [{"name": "Regular"}]}
            ]
        }"#;

        let item: MenuItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_id, "burger");
        assert_eq!(item.image_url.as_deref(), Some("https://img.example/burger.png"));
        assert!(item.is_orderable());
        assert_eq!(item.option("Toppings").unwrap().limit(), None);
        assert_eq!(
            item.customization("Size").unwrap().value("Regular").unwrap().additional_price,
            Money::zero()
        );
    }
}
