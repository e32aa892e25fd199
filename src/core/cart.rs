//! Cart lines and the in-memory cart ledger.
//!
//! The cart is a plain ordered list of lines, unique by id. It knows nothing
//! about storage; `ops::ledger` wraps it and persists every mutation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::category::Category;
use crate::core::line::{LineError, OrderLine};
use crate::core::money::Money;

/// One row of the cart. `price` is the unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCartLine")]
pub struct CartLine {
    pub id: String,
    pub price: Money,
    #[serde(rename = "itemType")]
    pub item_type: Category,
    pub data: OrderLine,
}

#[derive(Deserialize)]
struct RawCartLine {
    id: String,
    price: Money,
    #[serde(rename = "itemType")]
    item_type: Category,
    data: Value,
}

impl TryFrom<RawCartLine> for CartLine {
    type Error = LineError;

    fn try_from(raw: RawCartLine) -> Result<Self, Self::Error> {
        Ok(CartLine {
            data: OrderLine::from_json(raw.item_type, raw.data)?,
            id: raw.id,
            price: raw.price,
            item_type: raw.item_type,
        })
    }
}

impl CartLine {
    pub fn quantity(&self) -> u32 {
        self.data.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.times(self.data.quantity)
    }

    pub fn display_name(&self) -> String {
        self.data.display_name()
    }
}

/// What `Cart::add` did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Merged { quantity: u32 },
}

/// What a quantity change did to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated { quantity: u32 },
    Removed,
    NotFound,
}

/// Ordered cart lines, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Add a line. Adding an id that is already present bumps its quantity
    /// by one instead of inserting a second row.
    pub fn add(&mut self, line: CartLine) -> AddOutcome {
        match self.lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => {
                existing.data.quantity = existing.data.quantity.saturating_add(1);
                AddOutcome::Merged {
                    quantity: existing.data.quantity,
                }
            }
            None => {
                self.lines.push(line);
                AddOutcome::Inserted
            }
        }
    }

    /// Adjust a line's quantity; a result of zero or less removes it.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return QuantityChange::NotFound;
        };

        let next = i64::from(self.lines[index].data.quantity).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.lines[index].data.quantity = quantity;
        QuantityChange::Updated { quantity }
    }

    /// Remove one unit of a line.
    pub fn remove(&mut self, id: &str) -> QuantityChange {
        self.update_quantity(id, -1)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Fold rows that share an id into the first one, summing quantities.
    /// Returns how many rows were folded away.
    pub fn merge_duplicates(&mut self) -> usize {
        let before = self.lines.len();
        let mut merged: Vec<CartLine> = Vec::with_capacity(before);
        for line in self.lines.drain(..) {
            match merged.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.data.quantity =
                        existing.data.quantity.saturating_add(line.data.quantity);
                }
                None => merged.push(line),
            }
        }
        self.lines = merged;
        before - self.lines.len()
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total plus a percentage fee, as charged for card payments.
    pub fn subtotal_with_fee(&self, percent: u32) -> Money {
        let total = self.total();
        total + total.percent(percent)
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::line::{HotdogLine, LineDetails};
    use serde_json::json;

    fn line(id: &str, cents: u64, quantity: u32) -> CartLine {
        CartLine {
            id: id.to_string(),
            price: Money::from_cents(cents),
            item_type: Category::Hotdog,
            data: OrderLine::new(LineDetails::Hotdog(HotdogLine {
                dog_type: format!("Dog {}", id),
                toppings: None,
            }))
            .with_quantity(quantity),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    #[test]
    fn test_add_merges_identical_ids() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(line("item_a", 500, 1)), AddOutcome::Inserted);
        assert_eq!(
            cart.add(line("item_a", 500, 1)),
            AddOutcome::Merged { quantity: 2 }
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_merge_increments_by_one_regardless_of_incoming_quantity() {
        let mut cart = Cart::new();
        cart.add(line("item_a", 500, 1));
        cart.add(line("item_a", 500, 4));
        assert_eq!(cart.get("item_a").unwrap().quantity(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(line("item_b", 100, 1));
        cart.add(line("item_a", 100, 1));
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["item_b", "item_a"]);
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(line("item_a", 500, 2));
        assert_eq!(
            cart.update_quantity("item_a", 3),
            QuantityChange::Updated { quantity: 5 }
        );
        assert_eq!(cart.update_quantity("item_a", -9), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_only_decrements() {
        let mut cart = Cart::new();
        cart.add(line("item_a", 500, 2));
        cart.add(line("item_b", 800, 1));

        assert_eq!(cart.remove("item_a"), QuantityChange::Updated { quantity: 1 });
        assert_eq!(cart.len(), 2);

        assert_eq!(cart.remove("item_b"), QuantityChange::Removed);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_merge_duplicates_sums_quantities() {
        let mut cart = Cart {
            lines: vec![
                line("item_a", 500, 2),
                line("item_b", 800, 1),
                line("item_a", 500, 3),
            ],
        };

        assert_eq!(cart.merge_duplicates(), 1);
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["item_a", "item_b"]);
        assert_eq!(cart.get("item_a").unwrap().quantity(), 5);
        assert_eq!(cart.merge_duplicates(), 0);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("item_a", 500, 1));
        assert_eq!(cart.remove("item_zzz"), QuantityChange::NotFound);
        assert_eq!(cart.len(), 1);
    }

    // =========================================================================
    // Totals
    // =========================================================================

    #[test]
    fn test_total_multiplies_quantity() {
        let mut cart = Cart::new();
        cart.add(line("item_a", 500, 2));
        cart.add(line("item_b", 800, 1));
        assert_eq!(cart.total(), Money::from_cents(1800));
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert_eq!(cart.total(), Money::ZERO);
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn test_subtotal_with_card_fee() {
        let mut cart = Cart::new();
        cart.add(line("a", 500, 1));
        cart.add(line("b", 800, 1));
        assert_eq!(cart.subtotal_with_fee(4), Money::from_cents(1352));
        assert_eq!(cart.subtotal_with_fee(0), cart.total());
    }

    #[test]
    fn test_cart_serializes_as_array_of_lines() {
        let mut cart = Cart::new();
        cart.add(line("item_a", 500, 2));
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            json!([{
                "id": "item_a",
                "price": 5.0,
                "itemType": "Hotdog",
                "data": {"quantity": 2, "dog_type": "Dog item_a"}
            }])
        );

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_cart_line_with_bad_data_fails_to_decode() {
        let raw = json!([{"id": "x", "price": 1.0, "itemType": "Drink", "data": {"quantity": 1}}]);
        assert!(serde_json::from_value::<Cart>(raw).is_err());
    }
}
