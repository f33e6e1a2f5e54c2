//! # Quote
//!
//! Glue between a JSON snapshot and the two resolvers.
//!
//! ## Flow
//! ```text
//! Snapshot ──► validate records (contract) ──► is_open_at / next_opening
//!                     │                                  │
//!                     ▼                                  ▼
//!               CoreError (exit 1)               price_selection
//!                                                        │
//!                                     Ok ──► quote.priced │ Err ──► quote.rejection
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use savor_core::validation::{validate_discount, validate_menu_item};
use savor_core::{
    is_open_at, next_opening, price_selection, BusinessHours, CoreResult, Discount, MenuItem,
    PricedSelection, Selection, SelectionError,
};

/// One pricing request as the client would assemble it from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub item: MenuItem,
    /// Owning restaurant's hours. Absent = treat as always closed.
    #[serde(default)]
    pub hours: BusinessHours,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub selection: Selection,
    /// Local evaluation instant; the CLI falls back to the local clock.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// The CLI's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "itemID")]
    pub item_id: String,
    pub at: NaiveDateTime,
    pub open: bool,
    pub next_opening: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priced: Option<PricedSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<SelectionError>,
}

/// Validates the snapshot's records, then resolves hours and price at `at`.
pub fn build_quote(snapshot: &Snapshot, at: NaiveDateTime) -> CoreResult<Quote> {
    validate_menu_item(&snapshot.item)?;
    for discount in &snapshot.discounts {
        validate_discount(discount)?;
    }
    snapshot.hours.validate()?;

    let open = is_open_at(&snapshot.hours, at);
    let next = next_opening(&snapshot.hours, at);

    let (priced, rejection) =
        match price_selection(&snapshot.item, &snapshot.selection, &snapshot.discounts, at) {
            Ok(priced) => {
                info!(item_id = %priced.item_id, total = %priced.total, open, "Quote ready");
                (Some(priced), None)
            }
            Err(err) => {
                warn!(item_id = %snapshot.item.item_id, error = %err, "Selection rejected");
                (None, Some(err))
            }
        };

    Ok(Quote {
        item_id: snapshot.item.item_id.clone(),
        at,
        open,
        next_opening: next,
        priced,
        rejection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use savor_core::CoreError;

    const SNAPSHOT: &str = r#"{
        "item": {
            "itemID": "burger",
            "menuID": "lunch",
            "name": "Burger",
            "basePrice": 1200,
            "status": "published",
            "availability": true,
            "options": [
                {"name": "Toppings", "maxSelection": 0,
                 "values": [{"name": "Extra Cheese", "additionalPrice": 150}]}
            ],
            "requiredCustomizations": [
                {"name": "Size", "maxSelection": 1, "values": [{"name": "Regular"}]}
            ]
        },
        "hours": {"monday": [{"open": "11:00", "close": "22:00"}]},
        "discounts": [],
        "selection": {
            "options": {"Toppings": ["Extra Cheese"]},
            "customizations": {"Size": ["Regular"]}
        },
        "at": "2024-03-04T12:30:00"
    }"#;

    fn snapshot() -> Snapshot {
        serde_json::from_str(SNAPSHOT).unwrap()
    }

    fn monday(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_quote_priced_and_open() {
        let snapshot = snapshot();
        let at = snapshot.at.unwrap();
        let quote = build_quote(&snapshot, at).unwrap();

        assert!(quote.open);
        assert_eq!(quote.next_opening, Some(at));
        assert_eq!(quote.priced.unwrap().total.cents(), 1350);
        assert!(quote.rejection.is_none());
    }

    #[test]
    fn test_rejected_selection_is_part_of_quote() {
        let mut snapshot = snapshot();
        snapshot.selection.customizations.clear();

        let quote = build_quote(&snapshot, monday(9)).unwrap();
        assert!(!quote.open);
        assert_eq!(quote.next_opening, Some(monday(11)));
        assert!(matches!(
            quote.rejection,
            Some(SelectionError::InvalidCustomization { .. })
        ));

        let json = serde_json::to_value(&quote).unwrap();
        assert!(json.get("priced").is_none());
        assert_eq!(json["rejection"]["kind"], "invalidCustomization");
    }

    #[test]
    fn test_malformed_records_fail_the_quote() {
        let mut snapshot = snapshot();
        snapshot.item.required_customizations[0].values.clear();
        assert!(matches!(
            build_quote(&snapshot, monday(12)),
            Err(CoreError::Validation(_))
        ));

        let mut snapshot = self::snapshot();
        snapshot.hours.monday[0] = savor_core::TimeRange {
            open: "22:00".parse().unwrap(),
            close: "11:00".parse().unwrap(),
        };
        assert!(matches!(
            build_quote(&snapshot, monday(12)),
            Err(CoreError::Schedule(_))
        ));
    }
}
