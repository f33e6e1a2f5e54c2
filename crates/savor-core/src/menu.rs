//! # Menu Module
//!
//! Ordering and filtering helpers for a restaurant's list of menu items.

use crate::types::MenuItem;

/// Sorts items for display: ascending `order_index`, ties broken by name.
///
/// ## Example
/// ```rust
/// use savor_core::menu::sort_menu;
/// use savor_core::money::Money;
/// use savor_core::types::MenuItem;
///
/// let mut items = vec![
///     MenuItem::new("2", "m", "Tacos", Money::zero()),
///     MenuItem::new("1", "m", "Nachos", Money::zero()),
/// ];
/// sort_menu(&mut items);
/// assert_eq!(items[0].name, "Nachos");
/// ```
pub fn sort_menu(items: &mut [MenuItem]) {
    items.sort_by(|a, b| {
        a.order_index
            .cmp(&b.order_index)
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Items a customer can order right now (published and available).
pub fn orderable_items(items: &[MenuItem]) -> Vec<&MenuItem> {
    items.iter().filter(|i| i.is_orderable()).collect()
}

/// Items flagged as special offers.
pub fn special_offers(items: &[MenuItem]) -> Vec<&MenuItem> {
    items.iter().filter(|i| i.is_special_offer).collect()
}

/// Items that contain none of the given allergen tags (case-insensitive).
pub fn allergen_free<'a, S: AsRef<str>>(items: &'a [MenuItem], tags: &[S]) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| !tags.iter().any(|t| item.contains_allergen(t.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ItemStatus;

    fn item(id: &str, name: &str, order_index: i32) -> MenuItem {
        let mut item = MenuItem::new(id, "menu", name, Money::from_cents(500));
        item.order_index = order_index;
        item
    }

    #[test]
    fn test_sort_by_index_then_name() {
        let mut items = vec![
            item("a", "Wings", 2),
            item("b", "Fries", 1),
            item("c", "Burger", 2),
            item("d", "Salad", 0),
        ];
        sort_menu(&mut items);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Salad", "Fries", "Burger", "Wings"]);
    }

    #[test]
    fn test_orderable_and_special() {
        let mut sold_out = item("a", "Wings", 0);
        sold_out.availability = false;
        let mut draft = item("b", "Fries", 0);
        draft.status = ItemStatus::Draft;
        let mut deal = item("c", "Combo", 0);
        deal.is_special_offer = true;

        let items = vec![sold_out, draft, deal];
        let orderable = orderable_items(&items);
        assert_eq!(orderable.len(), 1);
        assert_eq!(orderable[0].item_id, "c");
        assert_eq!(special_offers(&items)[0].name, "Combo");
    }

    #[test]
    fn test_allergen_free() {
        let mut satay = item("a", "Satay", 0);
        satay.allergens.insert("peanuts".to_string());
        let mut bread = item("b", "Bread", 0);
        bread.allergens.insert("gluten".to_string());
        let rice = item("c", "Rice", 0);

        let items = vec![satay, bread, rice];
        let safe = allergen_free(&items, &["Peanuts", "GLUTEN"]);
        assert_eq!(safe.len(), 1);
        assert_eq!(safe[0].name, "Rice");
    }
}
