//! Catalog document records, as published in `menu.json` and `menu-options.json`.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::Deserialize;
use serde_json::Number;

use crate::pricing::{PriceError, PricedOption, price_from_major};

/// The menu document: an ordered list of categories.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct MenuDocument {
    /// Categories in display order.
    pub categories: Vec<MenuCategoryRecord>,
}

/// One category of the menu document.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuCategoryRecord {
    /// Category name
    pub category: String,

    /// Items in display order
    pub items: Vec<MenuItemRecord>,
}

/// One purchasable drink in the menu document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRecord {
    /// Display name
    pub name: String,

    /// English name
    pub english_name: String,
}

/// The options document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsDocument {
    /// Drink-type variants, split by regular and soda categories.
    pub drink_types: DrinkTypesRecord,

    /// Sweetness levels
    pub sweetness: Vec<PricedOptionRecord>,

    /// Toppings
    pub toppings: Vec<PricedOptionRecord>,

    /// Strength levels for coffee categories
    pub coffee_strength: Vec<PricedOptionRecord>,
}

/// Drink-type variants of the options document.
#[derive(Debug, Clone, Deserialize)]
pub struct DrinkTypesRecord {
    /// Variants offered for regular categories
    pub regular: Vec<PricedOptionRecord>,

    /// Variants offered for soda categories
    pub soda: Vec<PricedOptionRecord>,
}

/// A named option with a price in major units.
#[derive(Debug, Clone, Deserialize)]
pub struct PricedOptionRecord {
    /// Option name
    pub name: String,

    /// Price in major units, e.g. `35` or `10.5`
    pub price: Number,
}

impl PricedOptionRecord {
    /// Converts the record into a [`PricedOption`] priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the price is negative or not a representable decimal.
    pub fn into_option(self, currency: &'static Currency) -> Result<PricedOption, PriceError> {
        let raw = self.price.to_string();
        let amount = Decimal::from_str(&raw)
            .or_else(|_err| Decimal::from_scientific(&raw))
            .map_err(|_err| PriceError::Invalid(raw.clone()))?;

        let price = price_from_major(amount, currency)?;

        Ok(PricedOption::new(self.name, price))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::THB};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn options_document_uses_camel_case_fields() -> TestResult {
        let json = r#"{
            "drinkTypes": {
                "regular": [{ "name": "Hot", "price": 35 }],
                "soda": [{ "name": "Sparkling", "price": 40 }]
            },
            "sweetness": [{ "name": "50%", "price": 0 }],
            "toppings": [{ "name": "Pearls", "price": 10 }],
            "coffeeStrength": [{ "name": "Double shot", "price": 0 }]
        }"#;

        let document: OptionsDocument = serde_json::from_str(json)?;

        assert_eq!(document.drink_types.regular.len(), 1);
        assert_eq!(document.drink_types.soda.len(), 1);
        assert_eq!(document.coffee_strength.len(), 1);

        Ok(())
    }

    #[test]
    fn menu_document_is_a_plain_array() -> TestResult {
        let json = r#"[
            { "category": "Coffee", "items": [{ "name": "Latte", "englishName": "Latte" }] }
        ]"#;

        let document: MenuDocument = serde_json::from_str(json)?;

        assert_eq!(document.categories.len(), 1);
        assert_eq!(
            document
                .categories
                .first()
                .map(|category| category.items.len()),
            Some(1)
        );

        Ok(())
    }

    #[test]
    fn record_converts_fractional_prices() -> TestResult {
        let record: PricedOptionRecord = serde_json::from_str(r#"{ "name": "Jelly", "price": 7.5 }"#)?;

        let option = record.into_option(THB)?;

        assert_eq!(option.name(), "Jelly");
        assert_eq!(option.price(), &Money::from_minor(750, THB));

        Ok(())
    }

    #[test]
    fn record_rejects_negative_prices() -> TestResult {
        let record: PricedOptionRecord = serde_json::from_str(r#"{ "name": "Refund", "price": -1 }"#)?;

        assert!(matches!(
            record.into_option(THB),
            Err(PriceError::Negative(_))
        ));

        Ok(())
    }
}
