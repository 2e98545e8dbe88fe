//! Storefront
//!
//! The single owned session aggregate: catalog state, cart, the item being configured and the
//! active checkout. Views receive it by reference; the cart is only ever changed through its
//! own operations.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, LineItem},
    catalog::{Catalog, CatalogState, CatalogUnavailable},
    checkout::{CheckoutError, CheckoutFlow, CheckoutTimings, FlowEvent},
    selection::{Selection, SelectionError},
};

/// Storefront errors.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The catalog has not loaded.
    #[error(transparent)]
    CatalogUnavailable(#[from] CatalogUnavailable),

    /// No item is being configured.
    #[error("no item is being configured")]
    NoSelection,

    /// Item configuration failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Checkout needs at least one line in the cart.
    #[error("the cart is empty")]
    EmptyCart,

    /// No checkout is active.
    #[error("no checkout in progress")]
    NoCheckout,

    /// A checkout is active; the cart is frozen until it closes.
    #[error("a checkout is in progress")]
    CheckoutInProgress,

    /// The checkout cannot be closed in its current stage.
    #[error("the checkout cannot be closed during the {0} stage")]
    CannotClose(crate::checkout::StageKind),

    /// A checkout action was rejected.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Confirmation produced when a line is added.
#[derive(Clone, Debug, PartialEq)]
pub struct AddedToCart {
    /// The new line
    pub line: LineItem,

    /// Human-readable notification
    pub message: String,
}

/// One customer's storefront session.
#[derive(Debug)]
pub struct Storefront {
    catalog: CatalogState,
    cart: Cart,
    selection: Option<Selection>,
    checkout: Option<CheckoutFlow>,
    timings: CheckoutTimings,
}

impl Storefront {
    /// Creates a session with an empty cart priced in `currency`.
    pub fn new(catalog: CatalogState, currency: &'static Currency, timings: CheckoutTimings) -> Self {
        Self {
            catalog,
            cart: Cart::new(currency),
            selection: None,
            checkout: None,
            timings,
        }
    }

    /// Catalog loading state
    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    /// The loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::CatalogUnavailable`] while loading or after a failed load.
    pub fn catalog(&self) -> Result<&Catalog, StorefrontError> {
        Ok(self.catalog.require()?)
    }

    /// The cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart, for quantity changes and removals.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::CheckoutInProgress`] while a checkout is open.
    pub fn cart_mut(&mut self) -> Result<&mut Cart, StorefrontError> {
        self.ensure_no_checkout()?;

        Ok(&mut self.cart)
    }

    fn ensure_no_checkout(&self) -> Result<(), StorefrontError> {
        if self.checkout.is_some() {
            return Err(StorefrontError::CheckoutInProgress);
        }

        Ok(())
    }

    /// The item being configured, if any
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The active checkout, if any
    pub fn checkout(&self) -> Option<&CheckoutFlow> {
        self.checkout.as_ref()
    }

    /// Starts configuring an item, replacing any unfinished configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if the catalog is unavailable or the item is unknown.
    pub fn select_item(&mut self, category: &str, item: &str) -> Result<&Selection, StorefrontError> {
        let selection = Selection::begin(self.catalog.require()?, category, item)?;

        Ok(self.selection.insert(selection))
    }

    /// Applies `change` to the item being configured.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if nothing is being configured, the catalog is unavailable,
    /// or `change` fails.
    pub fn configure<T>(
        &mut self,
        change: impl FnOnce(&mut Selection, &Catalog) -> Result<T, SelectionError>,
    ) -> Result<T, StorefrontError> {
        let catalog = self.catalog.require()?;
        let selection = self.selection.as_mut().ok_or(StorefrontError::NoSelection)?;

        Ok(change(selection, catalog)?)
    }

    /// Abandons the item being configured.
    pub fn discard_selection(&mut self) {
        self.selection = None;
    }

    /// Adds the configured item to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if a checkout is open, nothing is being configured or its
    /// price cannot be computed. The configuration is kept on failure.
    pub fn add_selection_to_cart(&mut self) -> Result<AddedToCart, StorefrontError> {
        self.ensure_no_checkout()?;

        let selection = self.selection.take().ok_or(StorefrontError::NoSelection)?;

        let item = match selection.clone().confirm() {
            Ok(item) => item,
            Err(err) => {
                self.selection = Some(selection);
                return Err(err.into());
            }
        };

        let line = self.cart.add(item);
        let message = format!("added {} to cart", line.menu_item().name());

        info!(item = line.menu_item().name(), "{message}");

        Ok(AddedToCart { line, message })
    }

    /// Opens a checkout for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::EmptyCart`] or [`StorefrontError::CheckoutInProgress`].
    pub fn begin_checkout(&mut self) -> Result<&mut CheckoutFlow, StorefrontError> {
        self.ensure_no_checkout()?;

        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        info!(
            lines = self.cart.len(),
            total = %self.cart.total_price(),
            "checkout started"
        );

        Ok(self.checkout.insert(CheckoutFlow::new(self.timings)))
    }

    /// Runs a checkout step that needs the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NoCheckout`] or the step's own error.
    pub fn with_checkout<T>(
        &mut self,
        step: impl FnOnce(&mut CheckoutFlow, &mut Cart) -> Result<T, CheckoutError>,
    ) -> Result<T, StorefrontError> {
        let flow = self.checkout.as_mut().ok_or(StorefrontError::NoCheckout)?;

        Ok(step(flow, &mut self.cart)?)
    }

    /// Closes the checkout, cancelling any pending timer.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::CannotClose`] while processing or after success; use the done
    /// action there instead.
    pub fn close_checkout(&mut self) -> Result<(), StorefrontError> {
        let flow = self.checkout.as_ref().ok_or(StorefrontError::NoCheckout)?;

        if !flow.session().can_close() {
            return Err(StorefrontError::CannotClose(flow.stage()));
        }

        self.checkout = None;

        info!("checkout closed");

        Ok(())
    }

    /// Whether a checkout timer is waiting to fire.
    pub fn has_pending_timer(&self) -> bool {
        self.checkout
            .as_ref()
            .is_some_and(CheckoutFlow::has_pending_timer)
    }

    /// Waits for the active checkout's next timer. A dismissed checkout is discarded.
    ///
    /// Never resolves while no timer is pending.
    pub async fn next_checkout_event(&mut self) -> FlowEvent {
        let Some(flow) = self.checkout.as_mut() else {
            return std::future::pending().await;
        };

        let event = flow.tick().await;

        if event == FlowEvent::Dismissed {
            self.checkout = None;
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rusty_money::{Money, iso::THB};
    use testresult::TestResult;

    use crate::{
        catalog::test_support::catalog,
        checkout::StageKind,
    };

    use super::*;

    fn storefront() -> Result<Storefront, crate::catalog::CatalogError> {
        Ok(Storefront::new(
            CatalogState::Ready(catalog()?),
            THB,
            CheckoutTimings::default(),
        ))
    }

    #[test]
    fn configuration_is_blocked_until_catalog_loads() {
        let mut storefront = Storefront::new(CatalogState::Loading, THB, CheckoutTimings::default());

        let result = storefront.select_item("ชา", "ชาไทย");

        assert!(matches!(
            result,
            Err(StorefrontError::CatalogUnavailable(CatalogUnavailable::Loading))
        ));
    }

    #[test]
    fn add_selection_moves_item_into_cart() -> TestResult {
        let mut storefront = storefront()?;

        storefront.select_item("ชา", "ชาไทย")?;
        storefront.configure(|selection, catalog| selection.toggle_topping(catalog, "วิปครีม"))?;

        let added = storefront.add_selection_to_cart()?;

        assert_eq!(added.message, "added ชาไทย to cart");
        assert_eq!(added.line.unit_price(), &Money::from_minor(4500, THB));
        assert!(storefront.selection().is_none());
        assert_eq!(storefront.cart().total_item_count(), 1);

        Ok(())
    }

    #[test]
    fn adding_without_selection_fails() -> TestResult {
        let mut storefront = storefront()?;

        assert!(matches!(
            storefront.add_selection_to_cart(),
            Err(StorefrontError::NoSelection)
        ));

        Ok(())
    }

    #[test]
    fn checkout_requires_items() -> TestResult {
        let mut storefront = storefront()?;

        assert!(matches!(
            storefront.begin_checkout(),
            Err(StorefrontError::EmptyCart)
        ));

        Ok(())
    }

    #[test]
    fn only_one_checkout_at_a_time() -> TestResult {
        let mut storefront = storefront()?;
        storefront.select_item("ชา", "ชาไทย")?;
        storefront.add_selection_to_cart()?;

        storefront.begin_checkout()?;

        assert!(matches!(
            storefront.begin_checkout(),
            Err(StorefrontError::CheckoutInProgress)
        ));

        storefront.close_checkout()?;
        assert!(storefront.checkout().is_none());

        Ok(())
    }

    #[test]
    fn cart_is_frozen_while_checkout_is_open() -> TestResult {
        let mut storefront = storefront()?;
        storefront.select_item("ชา", "ชาไทย")?;
        storefront.add_selection_to_cart()?;
        storefront.begin_checkout()?;

        assert!(matches!(
            storefront.cart_mut(),
            Err(StorefrontError::CheckoutInProgress)
        ));

        storefront.select_item("ชา", "ชาไทย")?;
        assert!(matches!(
            storefront.add_selection_to_cart(),
            Err(StorefrontError::CheckoutInProgress)
        ));
        assert!(storefront.selection().is_some());
        assert_eq!(storefront.cart().len(), 1);

        storefront.close_checkout()?;
        storefront.cart_mut()?.clear();
        assert!(storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn processing_checkout_cannot_be_closed() -> TestResult {
        let mut storefront = storefront()?;
        storefront.select_item("กาแฟ", "ลาเต้")?;
        storefront.add_selection_to_cart()?;
        storefront.begin_checkout()?;

        storefront.with_checkout(|flow, cart| {
            flow.set_customer_name("Somchai")?;
            flow.set_customer_phone("0812345678")?;
            flow.submit(cart)?;
            flow.confirm_payment()
        })?;

        assert!(matches!(
            storefront.close_checkout(),
            Err(StorefrontError::CannotClose(StageKind::Processing))
        ));
        assert!(storefront.has_pending_timer());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn dismissal_discards_checkout() -> TestResult {
        let mut storefront = storefront()?;
        storefront.select_item("กาแฟ", "ลาเต้")?;
        storefront.add_selection_to_cart()?;
        storefront.begin_checkout()?;

        storefront.with_checkout(|flow, cart| {
            flow.set_customer_name("Somchai")?;
            flow.set_customer_phone("0812345678")?;
            flow.submit(cart)?;
            flow.confirm_payment()
        })?;

        let processed = storefront.next_checkout_event().await;
        assert!(matches!(processed, FlowEvent::ProcessingFinished(_)));

        storefront.with_checkout(CheckoutFlow::done)?;
        assert!(storefront.cart().is_empty());

        let dismissed = tokio::time::timeout(Duration::from_secs(5), storefront.next_checkout_event()).await?;

        assert_eq!(dismissed, FlowEvent::Dismissed);
        assert!(storefront.checkout().is_none());

        Ok(())
    }
}
