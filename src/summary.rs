//! Summaries
//!
//! Plain-text tables for the menu, the item being configured, the cart and the checkout.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem},
    catalog::Catalog,
    checkout::{CheckoutSession, CheckoutStage},
    pricing::PricedOption,
    selection::Selection,
};

/// Errors that can occur while writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error("failed to write summary: {0}")]
    Io(#[from] io::Error),

    /// The unit price of a selection could not be computed.
    #[error(transparent)]
    Money(#[from] rusty_money::MoneyError),
}

/// Writes the numbered menu.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] if the output cannot be written.
pub fn write_menu(out: &mut impl io::Write, catalog: &Catalog) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Category", "Item", "English name"]);

    for (category_idx, category) in catalog.categories().iter().enumerate() {
        for (item_idx, item) in category.items().iter().enumerate() {
            builder.push_record([
                format!("{}.{}", category_idx + 1, item_idx + 1),
                category.name().to_string(),
                item.name().to_string(),
                item.english_name().to_string(),
            ]);
        }
    }

    write_table(out, builder, &[])
}

/// Writes the item being configured and the options it can choose from.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written or the price cannot be computed.
pub fn write_selection(
    out: &mut impl io::Write,
    selection: &Selection,
    catalog: &Catalog,
) -> Result<(), SummaryError> {
    writeln!(
        out,
        "\n{} ({}) - {}",
        selection.menu_item().name(),
        selection.menu_item().english_name(),
        selection.category()
    )?;

    let mut builder = Builder::default();
    builder.push_record(["Option", "#", "Choice", "Price", ""]);

    push_option_rows(
        &mut builder,
        "type",
        catalog.drink_types_for(selection.category()),
        |option| selection.drink_type().name() == option.name(),
    );

    push_option_rows(&mut builder, "topping", catalog.toppings(), |option| {
        selection
            .toppings()
            .iter()
            .any(|chosen| chosen.name() == option.name())
    });

    push_option_rows(&mut builder, "sweet", catalog.sweetness(), |option| {
        selection
            .sweetness()
            .is_some_and(|chosen| chosen.name() == option.name())
    });

    if let Some(strengths) = catalog.strength_options_for(selection.category()) {
        push_option_rows(&mut builder, "strength", strengths, |option| {
            selection
                .strength()
                .is_some_and(|chosen| chosen.name() == option.name())
        });
    }

    write_table(out, builder, &[3])?;

    if !selection.note().is_empty() {
        writeln!(out, " Note: {}", selection.note())?;
    }

    writeln!(out, " Unit price: {}", selection.unit_price()?)?;

    Ok(())
}

fn push_option_rows(
    builder: &mut Builder,
    label: &str,
    options: &[PricedOption],
    is_chosen: impl Fn(&PricedOption) -> bool,
) {
    for (idx, option) in options.iter().enumerate() {
        builder.push_record([
            if idx == 0 { label.to_string() } else { String::new() },
            (idx + 1).to_string(),
            option.name().to_string(),
            format!("+{}", option.price()),
            if is_chosen(option) { "*".to_string() } else { String::new() },
        ]);
    }
}

/// Writes the cart lines and totals.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] if the output cannot be written.
pub fn write_cart(out: &mut impl io::Write, cart: &Cart) -> Result<(), SummaryError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Item", "Details", "Unit", "Qty", "Total"]);

    for (idx, line) in cart.iter().enumerate() {
        builder.push_record([
            format!("{}", idx + 1),
            format!("{} ({})", line.menu_item().name(), line.drink_type().name()),
            line_details(line),
            format!("{}", line.unit_price()),
            line.quantity().to_string(),
            format!("{}", line.line_total()),
        ]);
    }

    write_table(out, builder, &[3, 4, 5])?;

    writeln!(
        out,
        " Items: {}    Total: {}",
        cart.total_item_count(),
        cart.total_price()
    )?;

    Ok(())
}

fn line_details(line: &LineItem) -> String {
    let mut details = Vec::new();

    if !line.toppings().is_empty() {
        let toppings: Vec<&str> = line.toppings().iter().map(PricedOption::name).collect();
        details.push(format!("toppings: {}", toppings.join(", ")));
    }

    if let Some(sweetness) = line.sweetness() {
        details.push(format!("sweetness: {}", sweetness.name()));
    }

    if let Some(strength) = line.strength() {
        details.push(format!("strength: {}", strength.name()));
    }

    if !line.note().is_empty() {
        details.push(format!("note: {}", line.note()));
    }

    details.join("\n")
}

/// Writes the current checkout stage.
///
/// # Errors
///
/// Returns [`SummaryError::Io`] if the output cannot be written.
pub fn write_checkout(
    out: &mut impl io::Write,
    session: &CheckoutSession,
    cart: &Cart,
) -> Result<(), SummaryError> {
    match session.stage() {
        CheckoutStage::Info => {
            writeln!(out, "\nCheckout - your details")?;
            writeln!(out, " Order total: {}", cart.total_price())?;
            writeln!(out, " Name:  {}", session.customer_name())?;

            if let Some(err) = session.errors().name {
                writeln!(out, "        ! {err}")?;
            }

            writeln!(out, " Phone: {}", session.customer_phone())?;

            if let Some(err) = session.errors().phone {
                writeln!(out, "        ! {err}")?;
            }

            writeln!(out, " (name <text>, phone <number>, submit, close)")?;
        }
        CheckoutStage::Payment { amount_due } => {
            writeln!(out, "\nCheckout - payment")?;
            writeln!(out, " Amount due: {amount_due}")?;
            writeln!(out, " (paid, back, close)")?;
        }
        CheckoutStage::Processing => {
            writeln!(out, "\nVerifying payment, please wait...")?;
        }
        CheckoutStage::Success { reference } => {
            writeln!(out, "\nPayment successful. Thank you for your order!")?;
            writeln!(out, " Reference: {reference}")?;
            writeln!(out, " (done)")?;
        }
    }

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: &[usize],
) -> Result<(), SummaryError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());

    for &column in right_aligned {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}
