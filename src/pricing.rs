//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

/// A monetary amount in the catalog currency.
pub type Price = Money<'static, Currency>;

/// Errors that can occur while converting catalog amounts into prices.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount could not be represented in minor units.
    #[error("invalid price: {0}")]
    Invalid(String),

    /// The amount was below zero.
    #[error("negative price: {0}")]
    Negative(String),

    /// The currency code is not one the storefront trades in.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A named option carrying a non-negative base price or surcharge.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedOption {
    name: String,
    price: Price,
}

impl PricedOption {
    /// Creates a new priced option.
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Returns the option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the option price.
    pub fn price(&self) -> &Price {
        &self.price
    }
}

/// Resolves a currency code to one of the supported currencies.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes other than THB, GBP, USD and EUR.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "THB" => Ok(iso::THB),
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        _ => Err(PriceError::UnknownCurrency(code.to_string())),
    }
}

/// Converts a major-unit decimal amount (e.g. `35` or `10.5`) into a price.
///
/// # Errors
///
/// - [`PriceError::Invalid`]: the amount cannot be represented in minor units.
/// - [`PriceError::Negative`]: the amount is below zero.
pub fn price_from_major(amount: Decimal, currency: &'static Currency) -> Result<Price, PriceError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::Invalid(amount.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Calculates the unit price of a drink: the drink type price plus every topping surcharge.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the options are priced in different currencies.
pub fn unit_price(drink_type: &PricedOption, toppings: &[PricedOption]) -> Result<Price, MoneyError> {
    toppings
        .iter()
        .try_fold(*drink_type.price(), |acc, topping| acc.add(*topping.price()))
}

/// Calculates the total for `quantity` units at `unit_price`.
pub fn line_total(unit_price: &Price, quantity: u32) -> Price {
    Money::from_minor(
        unit_price
            .to_minor_units()
            .saturating_mul(i64::from(quantity)),
        unit_price.currency(),
    )
}
