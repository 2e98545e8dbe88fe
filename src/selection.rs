//! Selection
//!
//! Transient configuration of one menu item before it is added to the cart.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    cart::{ConfiguredItem, Toppings},
    catalog::{Catalog, MenuItem},
    pricing::{Price, PricedOption, unit_price},
};

/// Errors raised while configuring an item.
#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    /// The category does not exist in the catalog.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The item does not exist in the category.
    #[error("unknown item {item} in category {category}")]
    UnknownItem {
        /// Category name
        category: String,
        /// Item name
        item: String,
    },

    /// The category has no drink types to choose from.
    #[error("category {0} offers no drink types")]
    NoDrinkTypes(String),

    /// The option is not offered for this item.
    #[error("{kind} option {name} is not available")]
    UnknownOption {
        /// Option set, e.g. "topping"
        kind: &'static str,
        /// Option name
        name: String,
    },

    /// Strength was chosen for a category that does not offer it.
    #[error("strength is not offered for category {0}")]
    StrengthNotOffered(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// In-progress configuration of one menu item.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    menu_item: MenuItem,
    category: String,
    drink_type: PricedOption,
    toppings: Toppings,
    sweetness: Option<PricedOption>,
    strength: Option<PricedOption>,
    note: String,
}

impl Selection {
    /// Starts configuring `item` from `category` with default choices: the first drink type,
    /// no toppings, no sweetness, the first strength for coffee categories and an empty note.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the category or item is unknown, or the category has
    /// no drink types.
    pub fn begin(catalog: &Catalog, category: &str, item: &str) -> Result<Self, SelectionError> {
        if catalog.category(category).is_none() {
            return Err(SelectionError::UnknownCategory(category.to_string()));
        }

        let menu_item = catalog
            .find_item(category, item)
            .ok_or_else(|| SelectionError::UnknownItem {
                category: category.to_string(),
                item: item.to_string(),
            })?
            .clone();

        let drink_type = catalog
            .drink_types_for(category)
            .first()
            .cloned()
            .ok_or_else(|| SelectionError::NoDrinkTypes(category.to_string()))?;

        let strength = catalog
            .strength_options_for(category)
            .and_then(<[PricedOption]>::first)
            .cloned();

        Ok(Self {
            menu_item,
            category: category.to_string(),
            drink_type,
            toppings: Toppings::new(),
            sweetness: None,
            strength,
            note: String::new(),
        })
    }

    /// Chooses the drink type by name.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownOption`] if the category does not offer it.
    pub fn choose_drink_type(&mut self, catalog: &Catalog, name: &str) -> Result<(), SelectionError> {
        self.drink_type = find_option(catalog.drink_types_for(&self.category), "drink type", name)?;

        Ok(())
    }

    /// Adds the topping if absent, removes it if present. Returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownOption`] if the topping is not in the catalog.
    pub fn toggle_topping(&mut self, catalog: &Catalog, name: &str) -> Result<bool, SelectionError> {
        if let Some(position) = self.toppings.iter().position(|topping| topping.name() == name) {
            self.toppings.remove(position);
            return Ok(false);
        }

        let topping = find_option(catalog.toppings(), "topping", name)?;
        self.toppings.push(topping);

        Ok(true)
    }

    /// Chooses the sweetness level by name. Sweetness never changes the price.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownOption`] if the level is not in the catalog.
    pub fn choose_sweetness(&mut self, catalog: &Catalog, name: &str) -> Result<(), SelectionError> {
        self.sweetness = Some(find_option(catalog.sweetness(), "sweetness", name)?);

        Ok(())
    }

    /// Chooses the strength by name.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::StrengthNotOffered`]: the category is not a coffee category.
    /// - [`SelectionError::UnknownOption`]: the strength is not in the catalog.
    pub fn choose_strength(&mut self, catalog: &Catalog, name: &str) -> Result<(), SelectionError> {
        let options = catalog
            .strength_options_for(&self.category)
            .ok_or_else(|| SelectionError::StrengthNotOffered(self.category.clone()))?;

        self.strength = Some(find_option(options, "strength", name)?);

        Ok(())
    }

    /// Replaces the free-text note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Price of one unit with the current choices.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if options are priced in different currencies.
    pub fn unit_price(&self) -> Result<Price, MoneyError> {
        unit_price(&self.drink_type, &self.toppings)
    }

    /// Freezes the current choices, including the unit price, into a cart-ready item.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Money`] if the unit price cannot be computed.
    pub fn confirm(self) -> Result<ConfiguredItem, SelectionError> {
        let unit_price = self.unit_price()?;

        Ok(ConfiguredItem {
            menu_item: self.menu_item,
            category: self.category,
            drink_type: self.drink_type,
            toppings: self.toppings,
            sweetness: self.sweetness,
            strength: self.strength,
            note: self.note,
            unit_price,
        })
    }

    /// The item being configured
    pub fn menu_item(&self) -> &MenuItem {
        &self.menu_item
    }

    /// The category the item was chosen from
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Current drink type
    pub fn drink_type(&self) -> &PricedOption {
        &self.drink_type
    }

    /// Current toppings
    pub fn toppings(&self) -> &[PricedOption] {
        &self.toppings
    }

    /// Current sweetness
    pub fn sweetness(&self) -> Option<&PricedOption> {
        self.sweetness.as_ref()
    }

    /// Current strength
    pub fn strength(&self) -> Option<&PricedOption> {
        self.strength.as_ref()
    }

    /// Current note
    pub fn note(&self) -> &str {
        &self.note
    }
}

fn find_option(
    options: &[PricedOption],
    kind: &'static str,
    name: &str,
) -> Result<PricedOption, SelectionError> {
    options
        .iter()
        .find(|option| option.name() == name)
        .cloned()
        .ok_or_else(|| SelectionError::UnknownOption {
            kind,
            name: name.to_string(),
        })
}
