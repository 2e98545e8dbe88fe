//! Property-based tests for cart invariants

use proptest::{prelude::*, test_runner::TestCaseError};
use rusty_money::{Money, iso::THB};

use barista::{
    cart::{Cart, ConfiguredItem, LineItem},
    catalog::Catalog,
    pricing::line_total,
    selection::Selection,
};

const MENU: &str = include_str!("../fixtures/menu.json");
const OPTIONS: &str = include_str!("../fixtures/menu-options.json");

/// Indices into the fixture catalog, wrapped to whatever is available.
#[derive(Clone, Copy, Debug)]
struct Pick {
    category: usize,
    item: usize,
    drink_type: usize,
    toppings: u8,
}

fn pick() -> impl Strategy<Value = Pick> {
    (0usize..16, 0usize..16, 0usize..8, any::<u8>()).prop_map(
        |(category, item, drink_type, toppings)| Pick {
            category,
            item,
            drink_type,
            toppings,
        },
    )
}

fn fail(err: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(err.to_string())
}

fn catalog() -> Result<Catalog, TestCaseError> {
    Catalog::from_json(MENU, OPTIONS, THB).map_err(fail)
}

fn wrapped<T>(items: &[T], idx: usize) -> Result<&T, TestCaseError> {
    items
        .get(idx % items.len().max(1))
        .ok_or_else(|| fail("empty option set"))
}

fn configure(catalog: &Catalog, pick: Pick) -> Result<ConfiguredItem, TestCaseError> {
    let category = wrapped(catalog.categories(), pick.category)?;
    let item = wrapped(category.items(), pick.item)?;

    let mut selection = Selection::begin(catalog, category.name(), item.name()).map_err(fail)?;

    let drink_type = wrapped(catalog.drink_types_for(category.name()), pick.drink_type)?
        .name()
        .to_string();
    selection
        .choose_drink_type(catalog, &drink_type)
        .map_err(fail)?;

    let toppings: Vec<String> = catalog
        .toppings()
        .iter()
        .enumerate()
        .filter(|(idx, _)| pick.toppings & (1 << (idx % 8)) != 0)
        .map(|(_, topping)| topping.name().to_string())
        .collect();

    for topping in &toppings {
        selection.toggle_topping(catalog, topping).map_err(fail)?;
    }

    selection.confirm().map_err(fail)
}

fn filled_cart(catalog: &Catalog, lines: &[(Pick, i64)]) -> Result<Cart, TestCaseError> {
    let mut cart = Cart::new(THB);

    for &(pick, quantity) in lines {
        let line = cart.add(configure(catalog, pick)?);
        cart.update_quantity(line.id(), quantity);
    }

    Ok(cart)
}

fn lines_of(cart: &Cart) -> Vec<LineItem> {
    cart.iter().cloned().collect()
}

proptest! {
    /// The item count is the sum of line quantities
    #[test]
    fn item_count_is_sum_of_quantities(lines in prop::collection::vec((pick(), 1i64..50), 0..12)) {
        let catalog = catalog()?;
        let cart = filled_cart(&catalog, &lines)?;

        let expected: i64 = lines.iter().map(|(_, quantity)| quantity).sum();

        prop_assert_eq!(cart.total_item_count(), u64::try_from(expected).map_err(fail)?);
        prop_assert_eq!(cart.len(), lines.len());
    }

    /// Setting a quantity at or below zero behaves exactly like remove
    #[test]
    fn non_positive_quantity_is_remove(
        lines in prop::collection::vec((pick(), 1i64..10), 1..8),
        target in any::<prop::sample::Index>(),
        quantity in i64::MIN..=0,
    ) {
        let catalog = catalog()?;
        let mut updated = filled_cart(&catalog, &lines)?;
        let mut removed = updated.clone();

        let ids: Vec<_> = updated.iter().map(|line| line.id()).collect();
        let id = *target.get(&ids);

        updated.update_quantity(id, quantity);
        removed.remove(id);

        prop_assert_eq!(lines_of(&updated), lines_of(&removed));
    }

    /// Unknown ids leave the cart untouched
    #[test]
    fn unknown_ids_are_ignored(
        lines in prop::collection::vec((pick(), 1i64..10), 0..8),
        quantity in any::<i64>(),
    ) {
        let catalog = catalog()?;
        let mut cart = filled_cart(&catalog, &lines)?;
        let before = lines_of(&cart);

        let mut other = Cart::new(THB);
        let stranger = other.add(configure(
            &catalog,
            Pick { category: 0, item: 0, drink_type: 0, toppings: 0 },
        )?);

        cart.update_quantity(stranger.id(), quantity);
        cart.remove(stranger.id());

        prop_assert_eq!(lines_of(&cart), before);
    }

    /// Clearing always empties the cart
    #[test]
    fn clear_zeroes_totals(lines in prop::collection::vec((pick(), 1i64..10), 0..8)) {
        let catalog = catalog()?;
        let mut cart = filled_cart(&catalog, &lines)?;

        cart.clear();

        prop_assert_eq!(cart.total_item_count(), 0);
        prop_assert_eq!(cart.total_price(), Money::from_minor(0, THB));
    }

    /// The total is the sum of unit price times quantity, whatever the order of adds
    #[test]
    fn total_is_order_independent(lines in prop::collection::vec((pick(), 1i64..20), 0..10)) {
        let catalog = catalog()?;
        let cart = filled_cart(&catalog, &lines)?;

        let mut reversed_lines = lines.clone();
        reversed_lines.reverse();
        let reversed = filled_cart(&catalog, &reversed_lines)?;

        let expected: i64 = cart
            .iter()
            .map(|line| line_total(line.unit_price(), line.quantity()).to_minor_units())
            .sum();

        prop_assert_eq!(cart.total_price(), Money::from_minor(expected, THB));
        prop_assert_eq!(cart.total_price(), reversed.total_price());
    }
}
