//! Cart
//!
//! The in-memory collection of configured drinks a customer intends to buy. Every mutation is
//! total: unknown ids are ignored rather than reported.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::pricing::Price;

mod line_item;

pub use line_item::{ConfiguredItem, LineItem, LineItemId, Toppings};

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Appends a new line with quantity one and a fresh id.
    ///
    /// Identical configurations are never merged; every call creates a distinct line.
    pub fn add(&mut self, item: ConfiguredItem) -> LineItem {
        let line = LineItem::new(LineItemId::generate(), item);

        debug!(
            id = %line.id(),
            item = line.menu_item().name(),
            unit_price = %line.unit_price(),
            "added line to cart"
        );

        self.items.push(line.clone());

        line
    }

    /// Sets the quantity of a line. A quantity of zero or below removes the line.
    pub fn update_quantity(&mut self, id: LineItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);

        if let Some(line) = self.items.iter_mut().find(|line| line.id() == id) {
            line.set_quantity(quantity);

            debug!(%id, quantity = quantity.get(), "updated line quantity");
        }
    }

    /// Removes a line, if present.
    pub fn remove(&mut self, id: LineItemId) {
        let before = self.items.len();

        self.items.retain(|line| line.id() != id);

        if self.items.len() != before {
            debug!(%id, "removed line from cart");
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cleared cart");
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total_price(&self) -> Price {
        let minor_units = self
            .items
            .iter()
            .map(|line| line.line_total().to_minor_units())
            .fold(0_i64, i64::saturating_add);

        Money::from_minor(minor_units, self.currency)
    }

    /// Looks up a line by id.
    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rusty_money::{Money, iso::THB};

    use crate::{
        catalog::MenuItem,
        pricing::{PricedOption, unit_price},
    };

    use super::{ConfiguredItem, Toppings};

    /// Builds a configured item without going through a catalog.
    pub(crate) fn configured(name: &str, drink_type_minor: i64, topping_minors: &[i64]) -> ConfiguredItem {
        let drink_type = PricedOption::new("ร้อน", Money::from_minor(drink_type_minor, THB));
        let toppings: Toppings = topping_minors
            .iter()
            .enumerate()
            .map(|(idx, minor)| PricedOption::new(format!("topping-{idx}"), Money::from_minor(*minor, THB)))
            .collect();

        let price = unit_price(&drink_type, &toppings).unwrap_or_else(|_| Money::from_minor(0, THB));

        ConfiguredItem {
            menu_item: MenuItem::new(name, name),
            category: "ชา".to_string(),
            drink_type,
            toppings,
            sweetness: None,
            strength: None,
            note: String::new(),
            unit_price: price,
        }
    }
}
