//! Catalog
//!
//! The read-only menu and option sets a storefront sells from, built from the two catalog
//! documents.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::pricing::{PriceError, PricedOption};

pub mod documents;
pub mod loader;
pub mod source;

pub use documents::{MenuDocument, OptionsDocument};
pub use loader::{CatalogLoader, CatalogState, CatalogUnavailable};
pub use source::DocumentSource;

/// Category name fragments that select the soda drink types.
pub const SODA_TOKENS: [&str; 2] = ["โซดา", "soda"];

/// Category name fragments that enable the strength options.
pub const COFFEE_TOKENS: [&str; 2] = ["กาแฟ", "coffee"];

/// Catalog loading and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A document file could not be read.
    #[error("failed to read {document}: {source}")]
    Io {
        /// Document location
        document: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A document request failed.
    #[error("failed to fetch catalog document: {0}")]
    Http(#[from] reqwest::Error),

    /// A document server answered with a non-success status.
    #[error("failed to fetch {document}: HTTP {status}")]
    HttpStatus {
        /// Document location
        document: String,
        /// Response status code
        status: u16,
    },

    /// A document was not valid JSON of the expected shape.
    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// An option price could not be used.
    #[error("option {option}: {source}")]
    Price {
        /// Option name
        option: String,
        /// Underlying price error
        source: PriceError,
    },

    /// Two categories share the same name.
    #[error("duplicate category: {0}")]
    DuplicateCategory(String),
}

/// A purchasable drink within a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    name: String,
    english_name: String,
}

impl MenuItem {
    /// Creates a new menu item.
    pub fn new(name: impl Into<String>, english_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            english_name: english_name.into(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// English name
    pub fn english_name(&self) -> &str {
        &self.english_name
    }
}

/// A named group of menu items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuCategory {
    name: String,
    items: Vec<MenuItem>,
}

impl MenuCategory {
    /// Category name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in display order
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Whether this category offers the soda drink types.
    pub fn is_soda(&self) -> bool {
        is_soda_category(&self.name)
    }

    /// Whether this category offers strength options.
    pub fn is_coffee(&self) -> bool {
        is_coffee_category(&self.name)
    }
}

/// Selectable option sets.
#[derive(Clone, Debug, PartialEq)]
pub struct DrinkOptions {
    regular: Vec<PricedOption>,
    soda: Vec<PricedOption>,
    sweetness: Vec<PricedOption>,
    toppings: Vec<PricedOption>,
    coffee_strength: Vec<PricedOption>,
}

impl DrinkOptions {
    fn from_document(
        document: OptionsDocument,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            regular: convert(document.drink_types.regular, currency)?,
            soda: convert(document.drink_types.soda, currency)?,
            sweetness: convert(document.sweetness, currency)?,
            toppings: convert(document.toppings, currency)?,
            coffee_strength: convert(document.coffee_strength, currency)?,
        })
    }
}

fn convert(
    records: Vec<documents::PricedOptionRecord>,
    currency: &'static Currency,
) -> Result<Vec<PricedOption>, CatalogError> {
    records
        .into_iter()
        .map(|record| {
            let option = record.name.clone();

            record
                .into_option(currency)
                .map_err(|source| CatalogError::Price { option, source })
        })
        .collect()
}

/// Returns whether a category name selects the soda drink types.
pub fn is_soda_category(category: &str) -> bool {
    contains_token(category, &SODA_TOKENS)
}

/// Returns whether a category name enables the strength options.
pub fn is_coffee_category(category: &str) -> bool {
    contains_token(category, &COFFEE_TOKENS)
}

fn contains_token(category: &str, tokens: &[&str]) -> bool {
    let lowered = category.to_lowercase();

    tokens.iter().any(|token| lowered.contains(token))
}

/// The loaded menu and options, priced in a single currency.
#[derive(Clone, Debug)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
    category_index: FxHashMap<String, usize>,
    options: DrinkOptions,
    currency: &'static Currency,
}

impl Catalog {
    /// Builds a catalog from parsed documents.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for duplicate categories or invalid option prices.
    pub fn from_documents(
        menu: MenuDocument,
        options: OptionsDocument,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut categories = Vec::with_capacity(menu.categories.len());
        let mut category_index = FxHashMap::default();

        for record in menu.categories {
            if category_index.contains_key(&record.category) {
                return Err(CatalogError::DuplicateCategory(record.category));
            }

            category_index.insert(record.category.clone(), categories.len());

            categories.push(MenuCategory {
                name: record.category,
                items: record
                    .items
                    .into_iter()
                    .map(|item| MenuItem::new(item.name, item.english_name))
                    .collect(),
            });
        }

        Ok(Self {
            categories,
            category_index,
            options: DrinkOptions::from_document(options, currency)?,
            currency,
        })
    }

    /// Builds a catalog from the raw JSON text of both documents.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if either document is malformed or fails validation.
    pub fn from_json(
        menu: &str,
        options: &str,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let menu: MenuDocument = serde_json::from_str(menu)?;
        let options: OptionsDocument = serde_json::from_str(options)?;

        Self::from_documents(menu, options, currency)
    }

    /// Categories in menu order.
    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&MenuCategory> {
        self.category_index
            .get(name)
            .and_then(|idx| self.categories.get(*idx))
    }

    /// Looks up an item by category and item name.
    pub fn find_item(&self, category: &str, item: &str) -> Option<&MenuItem> {
        self.category(category)?
            .items()
            .iter()
            .find(|candidate| candidate.name() == item)
    }

    /// Drink types offered for a category.
    pub fn drink_types_for(&self, category: &str) -> &[PricedOption] {
        if is_soda_category(category) {
            &self.options.soda
        } else {
            &self.options.regular
        }
    }

    /// Strength options offered for a category, if any.
    pub fn strength_options_for(&self, category: &str) -> Option<&[PricedOption]> {
        is_coffee_category(category).then_some(self.options.coffee_strength.as_slice())
    }

    /// Sweetness levels
    pub fn sweetness(&self) -> &[PricedOption] {
        &self.options.sweetness
    }

    /// Toppings
    pub fn toppings(&self) -> &[PricedOption] {
        &self.options.toppings
    }

    /// Catalog currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
