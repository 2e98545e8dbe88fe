//! Barista
//!
//! A café ordering storefront: a menu catalog loaded from JSON documents, a drink
//! configurator with priced options, a cart, and a simulated four-stage checkout with
//! cancellable timers. The `barista` binary drives it from a terminal shell.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod selection;
pub mod shell;
pub mod storefront;
pub mod summary;
