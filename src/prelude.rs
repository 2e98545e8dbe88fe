//! Barista prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, ConfiguredItem, LineItem, LineItemId},
    catalog::{
        Catalog, CatalogError, CatalogLoader, CatalogState, CatalogUnavailable, DocumentSource,
        MenuCategory, MenuItem,
    },
    checkout::{
        CheckoutAction, CheckoutError, CheckoutFlow, CheckoutSession, CheckoutStage,
        CheckoutTimings, CustomerDetails, FlowEvent, ReferenceCode, StageKind, Transition,
        ValidationErrors,
    },
    pricing::{Price, PriceError, PricedOption},
    selection::{Selection, SelectionError},
    shell::{Shell, ShellError},
    storefront::{AddedToCart, Storefront, StorefrontError},
};
