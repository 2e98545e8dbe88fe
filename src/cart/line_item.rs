//! Line items

use std::{
    fmt::{self, Display, Formatter},
    num::NonZeroU32,
};

use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    catalog::MenuItem,
    pricing::{Price, PricedOption, line_total},
};

/// Opaque identifier of a cart line, unique within a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineItemId(Uuid);

impl LineItemId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for LineItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Toppings chosen for a drink, in the order they were picked.
pub type Toppings = SmallVec<[PricedOption; 4]>;

/// A fully configured drink, ready to be added to a cart.
///
/// Produced by [`Selection::confirm`](crate::selection::Selection::confirm), which fixes the
/// unit price at configuration time.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfiguredItem {
    pub(crate) menu_item: MenuItem,
    pub(crate) category: String,
    pub(crate) drink_type: PricedOption,
    pub(crate) toppings: Toppings,
    pub(crate) sweetness: Option<PricedOption>,
    pub(crate) strength: Option<PricedOption>,
    pub(crate) note: String,
    pub(crate) unit_price: Price,
}

impl ConfiguredItem {
    /// The chosen menu item
    pub fn menu_item(&self) -> &MenuItem {
        &self.menu_item
    }

    /// Unit price frozen at configuration time
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }
}

/// One configured, priced and quantified cart entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    id: LineItemId,
    item: ConfiguredItem,
    quantity: NonZeroU32,
}

impl LineItem {
    pub(super) fn new(id: LineItemId, item: ConfiguredItem) -> Self {
        Self {
            id,
            item,
            quantity: NonZeroU32::MIN,
        }
    }

    pub(super) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Line id
    pub fn id(&self) -> LineItemId {
        self.id
    }

    /// The chosen menu item
    pub fn menu_item(&self) -> &MenuItem {
        &self.item.menu_item
    }

    /// The category the item was chosen from
    pub fn category(&self) -> &str {
        &self.item.category
    }

    /// Chosen drink type
    pub fn drink_type(&self) -> &PricedOption {
        &self.item.drink_type
    }

    /// Chosen toppings
    pub fn toppings(&self) -> &[PricedOption] {
        &self.item.toppings
    }

    /// Chosen sweetness level, if any. Never affects the price.
    pub fn sweetness(&self) -> Option<&PricedOption> {
        self.item.sweetness.as_ref()
    }

    /// Chosen strength, present only for coffee categories
    pub fn strength(&self) -> Option<&PricedOption> {
        self.item.strength.as_ref()
    }

    /// Free-text note
    pub fn note(&self) -> &str {
        &self.item.note
    }

    /// Unit price frozen when the item was configured
    pub fn unit_price(&self) -> &Price {
        &self.item.unit_price
    }

    /// Quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> Price {
        line_total(&self.item.unit_price, self.quantity())
    }
}
