//! Terminal shell
//!
//! Reads commands line by line and drives a [`Storefront`]. Checkout timers fire between
//! commands; the `wait` command blocks on them explicitly so piped scripts can reach the end
//! of a checkout.

use std::{io, num::NonZeroUsize};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::{
    cart::{LineItem, LineItemId},
    catalog::{Catalog, CatalogState},
    checkout::{CheckoutFlow, FlowEvent},
    pricing::PricedOption,
    selection::{Selection, SelectionError},
    storefront::{Storefront, StorefrontError},
    summary::{self, SummaryError},
};

pub mod commands;

pub use commands::Command;

use commands::{OptionArgs, index};

const PROMPT: &str = "barista> ";

/// Shell errors.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A summary could not be rendered.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// The storefront rejected the command.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// No category or item has that number.
    #[error("no menu entry {category}.{item}")]
    NoSuchMenuEntry {
        /// Category number
        category: NonZeroUsize,
        /// Item number
        item: NonZeroUsize,
    },

    /// No option of that kind has that number.
    #[error("no {kind} option {number}")]
    NoSuchOption {
        /// Option set
        kind: &'static str,
        /// Requested number
        number: NonZeroUsize,
    },

    /// No cart line has that number.
    #[error("no cart line {0}")]
    NoSuchLine(NonZeroUsize),
}

impl ShellError {
    /// Whether the shell must stop. Everything else is reported and the shell carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Summary(_))
    }
}

/// What the shell does after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Read the next command.
    Continue,

    /// Stop reading.
    Quit,
}

#[derive(Clone, Copy, Debug)]
enum OptionKind {
    DrinkType,
    Topping,
    Sweetness,
    Strength,
}

impl OptionKind {
    fn label(self) -> &'static str {
        match self {
            Self::DrinkType => "drink type",
            Self::Topping => "topping",
            Self::Sweetness => "sweetness",
            Self::Strength => "strength",
        }
    }

    fn options<'c>(
        self,
        catalog: &'c Catalog,
        selection: &Selection,
    ) -> Result<&'c [PricedOption], SelectionError> {
        match self {
            Self::DrinkType => Ok(catalog.drink_types_for(selection.category())),
            Self::Topping => Ok(catalog.toppings()),
            Self::Sweetness => Ok(catalog.sweetness()),
            Self::Strength => catalog
                .strength_options_for(selection.category())
                .ok_or_else(|| SelectionError::StrengthNotOffered(selection.category().to_string())),
        }
    }
}

/// Interactive front end over one storefront session.
#[derive(Debug)]
pub struct Shell<W> {
    storefront: Storefront,
    out: W,
}

impl<W: io::Write> Shell<W> {
    /// Creates a shell writing to `out`.
    pub fn new(storefront: Storefront, out: W) -> Self {
        Self { storefront, out }
    }

    /// The session being driven
    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    /// Consumes the shell, returning the session and the output.
    pub fn into_parts(self) -> (Storefront, W) {
        (self.storefront, self.out)
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ShellError`] if input cannot be read or output cannot be written.
    /// Rejected commands are reported to the output instead.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        self.greet()?;
        self.prompt()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };

                    if self.execute_line(&line).await? == Step::Quit {
                        break;
                    }

                    self.prompt()?;
                }
                event = self.storefront.next_checkout_event(), if self.storefront.has_pending_timer() => {
                    writeln!(self.out)?;
                    self.report_event(&event)?;
                    self.prompt()?;
                }
            }
        }

        writeln!(self.out, "\nGoodbye!")?;
        self.out.flush()?;

        Ok(())
    }

    /// Parses and executes one line of input.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ShellError`]; rejected commands are written to the output.
    pub async fn execute_line(&mut self, line: &str) -> Result<Step, ShellError> {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Step::Continue),
            Err(err) => {
                write!(self.out, "{}", err.render())?;
                return Ok(Step::Continue);
            }
        };

        match self.execute(command).await {
            Ok(step) => Ok(step),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                debug!("command rejected: {err}");
                writeln!(self.out, "error: {err}")?;

                Ok(Step::Continue)
            }
        }
    }

    /// Executes one command.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] when the command is rejected or output fails.
    pub async fn execute(&mut self, command: Command) -> Result<Step, ShellError> {
        debug!(?command, "executing command");

        match command {
            Command::Menu => summary::write_menu(&mut self.out, self.storefront.catalog()?)?,

            Command::Pick { category, item } => self.pick(category, item)?,

            Command::Show => self.show_selection()?,

            Command::Type(args) => {
                let name = self.option_name(OptionKind::DrinkType, &args)?;
                self.storefront
                    .configure(|selection, catalog| selection.choose_drink_type(catalog, &name))?;
                self.show_selection()?;
            }

            Command::Topping(args) => {
                let name = self.option_name(OptionKind::Topping, &args)?;
                self.storefront
                    .configure(|selection, catalog| selection.toggle_topping(catalog, &name))?;
                self.show_selection()?;
            }

            Command::Sweet(args) => {
                let name = self.option_name(OptionKind::Sweetness, &args)?;
                self.storefront
                    .configure(|selection, catalog| selection.choose_sweetness(catalog, &name))?;
                self.show_selection()?;
            }

            Command::Strength(args) => {
                let name = self.option_name(OptionKind::Strength, &args)?;
                self.storefront
                    .configure(|selection, catalog| selection.choose_strength(catalog, &name))?;
                self.show_selection()?;
            }

            Command::Note(args) => {
                let note = args.text();
                self.storefront.configure(|selection, _| {
                    selection.set_note(note);
                    Ok(())
                })?;
                self.show_selection()?;
            }

            Command::Add => {
                let added = self.storefront.add_selection_to_cart()?;
                writeln!(self.out, "{}", added.message)?;
            }

            Command::Discard => {
                self.storefront.discard_selection();
                writeln!(self.out, "selection discarded")?;
            }

            Command::Cart => summary::write_cart(&mut self.out, self.storefront.cart())?,

            Command::Qty { line, quantity } => {
                let id = self.line_id(line)?;
                self.storefront.cart_mut()?.update_quantity(id, quantity);
                summary::write_cart(&mut self.out, self.storefront.cart())?;
            }

            Command::Inc(args) => self.adjust_quantity(args.line, 1)?,

            Command::Dec(args) => self.adjust_quantity(args.line, -1)?,

            Command::Remove(args) => {
                let id = self.line_id(args.line)?;
                self.storefront.cart_mut()?.remove(id);
                summary::write_cart(&mut self.out, self.storefront.cart())?;
            }

            Command::Clear => {
                self.storefront.cart_mut()?.clear();
                summary::write_cart(&mut self.out, self.storefront.cart())?;
            }

            Command::Checkout => {
                self.storefront.begin_checkout()?;
                self.show_checkout()?;
            }

            Command::Name(args) => {
                self.storefront
                    .with_checkout(|flow, _| flow.set_customer_name(args.text()))?;
            }

            Command::Phone(args) => {
                self.storefront
                    .with_checkout(|flow, _| flow.set_customer_phone(args.text()))?;
            }

            Command::Submit => {
                self.storefront.with_checkout(|flow, cart| flow.submit(cart))?;
                self.show_checkout()?;
            }

            Command::Back => {
                self.storefront.with_checkout(|flow, _| flow.back())?;
                self.show_checkout()?;
            }

            Command::Paid => {
                self.storefront
                    .with_checkout(|flow, _| flow.confirm_payment())?;
                self.show_checkout()?;
            }

            Command::Wait => {
                if self.storefront.has_pending_timer() {
                    let event = self.storefront.next_checkout_event().await;
                    self.report_event(&event)?;
                } else {
                    writeln!(self.out, "nothing to wait for")?;
                }
            }

            Command::Done => {
                self.storefront.with_checkout(CheckoutFlow::done)?;
                writeln!(self.out, "order complete, your cart is now empty")?;
            }

            Command::Close => {
                self.storefront.close_checkout()?;
                writeln!(self.out, "checkout closed")?;
            }

            Command::Quit => return Ok(Step::Quit),
        }

        Ok(Step::Continue)
    }

    fn greet(&mut self) -> Result<(), ShellError> {
        writeln!(self.out, "Welcome to the café! Type `help` for commands.")?;

        match self.storefront.catalog_state() {
            CatalogState::Ready(catalog) => summary::write_menu(&mut self.out, catalog)?,
            CatalogState::Loading => writeln!(self.out, "The menu is still loading.")?,
            CatalogState::Failed(err) => writeln!(self.out, "The menu is unavailable: {err}")?,
        }

        Ok(())
    }

    fn prompt(&mut self) -> Result<(), ShellError> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;

        Ok(())
    }

    fn pick(&mut self, category: NonZeroUsize, item: NonZeroUsize) -> Result<(), ShellError> {
        let catalog = self.storefront.catalog()?;

        let (category_name, item_name) = catalog
            .categories()
            .get(index(category))
            .and_then(|entry| {
                entry
                    .items()
                    .get(index(item))
                    .map(|menu_item| (entry.name().to_string(), menu_item.name().to_string()))
            })
            .ok_or(ShellError::NoSuchMenuEntry { category, item })?;

        self.storefront.select_item(&category_name, &item_name)?;

        self.show_selection()
    }

    fn option_name(&self, kind: OptionKind, args: &OptionArgs) -> Result<String, ShellError> {
        let catalog = self.storefront.catalog()?;
        let selection = self
            .storefront
            .selection()
            .ok_or(StorefrontError::NoSelection)?;

        let options = kind
            .options(catalog, selection)
            .map_err(StorefrontError::from)?;

        options
            .get(index(args.number))
            .map(|option| option.name().to_string())
            .ok_or(ShellError::NoSuchOption {
                kind: kind.label(),
                number: args.number,
            })
    }

    fn line_id(&self, line: NonZeroUsize) -> Result<LineItemId, ShellError> {
        self.storefront
            .cart()
            .iter()
            .nth(index(line))
            .map(LineItem::id)
            .ok_or(ShellError::NoSuchLine(line))
    }

    fn adjust_quantity(&mut self, line: NonZeroUsize, delta: i64) -> Result<(), ShellError> {
        let id = self.line_id(line)?;
        let current = self
            .storefront
            .cart()
            .get(id)
            .map_or(0, |line_item| i64::from(line_item.quantity()));

        self.storefront
            .cart_mut()?
            .update_quantity(id, current.saturating_add(delta));

        summary::write_cart(&mut self.out, self.storefront.cart())?;

        Ok(())
    }

    fn show_selection(&mut self) -> Result<(), ShellError> {
        let catalog = self.storefront.catalog()?;

        match self.storefront.selection() {
            Some(selection) => summary::write_selection(&mut self.out, selection, catalog)?,
            None => writeln!(self.out, "no item is being configured")?,
        }

        Ok(())
    }

    fn show_checkout(&mut self) -> Result<(), ShellError> {
        match self.storefront.checkout() {
            Some(flow) => {
                summary::write_checkout(&mut self.out, flow.session(), self.storefront.cart())?;
            }
            None => writeln!(self.out, "no checkout in progress")?,
        }

        Ok(())
    }

    fn report_event(&mut self, event: &FlowEvent) -> Result<(), ShellError> {
        match event {
            FlowEvent::ProcessingFinished(_) => self.show_checkout(),
            FlowEvent::Dismissed => {
                writeln!(self.out, "checkout closed")?;

                Ok(())
            }
        }
    }
}
