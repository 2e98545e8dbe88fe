//! Shell command grammar.

use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand};

/// One line of shell input.
#[derive(Debug, Parser)]
#[command(
    name = "barista",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// Shell commands. Categories, items, options and cart lines are numbered from 1.
#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the menu
    Menu,

    /// Start configuring an item: pick <category> <item>
    Pick {
        /// Category number
        category: NonZeroUsize,

        /// Item number within the category
        item: NonZeroUsize,
    },

    /// Show the item being configured
    Show,

    /// Choose the drink type
    Type(OptionArgs),

    /// Add or remove a topping
    Topping(OptionArgs),

    /// Choose the sweetness level
    Sweet(OptionArgs),

    /// Choose the coffee strength
    Strength(OptionArgs),

    /// Set a note for the item being configured
    Note(TextArgs),

    /// Add the configured item to the cart
    Add,

    /// Abandon the item being configured
    Discard,

    /// Show the cart
    Cart,

    /// Set the quantity of a cart line; zero or less removes it
    Qty {
        /// Cart line number
        line: NonZeroUsize,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Increase a cart line by one
    Inc(LineArgs),

    /// Decrease a cart line by one
    Dec(LineArgs),

    /// Remove a cart line
    Remove(LineArgs),

    /// Empty the cart
    Clear,

    /// Start checking out
    Checkout,

    /// Enter your name
    Name(TextArgs),

    /// Enter your phone number
    Phone(TextArgs),

    /// Submit your details
    Submit,

    /// Go back to your details
    Back,

    /// Confirm you have paid
    Paid,

    /// Wait for the pending checkout step
    Wait,

    /// Acknowledge the completed order
    Done,

    /// Close the checkout
    Close,

    /// Leave the shop
    #[command(alias = "exit")]
    Quit,
}

/// A numbered option.
#[derive(Debug, PartialEq, Eq, Args)]
pub struct OptionArgs {
    /// Option number
    pub number: NonZeroUsize,
}

/// A numbered cart line.
#[derive(Debug, PartialEq, Eq, Args)]
pub struct LineArgs {
    /// Cart line number
    pub line: NonZeroUsize,
}

/// Free text, possibly several words.
#[derive(Debug, PartialEq, Eq, Args)]
pub struct TextArgs {
    /// Text
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl TextArgs {
    /// The words joined by single spaces.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Parses one line of input. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns the [`clap::Error`] for unknown commands or bad arguments, including help requests.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();

    if words.is_empty() {
        return Ok(None);
    }

    let parsed = CommandLine::try_parse_from(words)?;

    Ok(Some(parsed.command))
}

/// Converts a 1-based number to an index.
pub(crate) fn index(number: NonZeroUsize) -> usize {
    number.get() - 1
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn nz(n: usize) -> Result<NonZeroUsize, Box<dyn std::error::Error>> {
        NonZeroUsize::new(n).ok_or_else(|| "zero".into())
    }

    #[test]
    fn blank_line_is_no_command() -> TestResult {
        assert_eq!(parse("   ")?, None);

        Ok(())
    }

    #[test]
    fn pick_takes_two_numbers() -> TestResult {
        assert_eq!(
            parse("pick 1 2")?,
            Some(Command::Pick {
                category: nz(1)?,
                item: nz(2)?
            })
        );

        Ok(())
    }

    #[test]
    fn zero_is_not_a_valid_number() {
        assert!(parse("topping 0").is_err());
    }

    #[test]
    fn qty_accepts_negative_quantities() -> TestResult {
        assert_eq!(
            parse("qty 1 -3")?,
            Some(Command::Qty {
                line: nz(1)?,
                quantity: -3
            })
        );

        Ok(())
    }

    #[test]
    fn text_keeps_every_word() -> TestResult {
        let Some(Command::Name(args)) = parse("name Somchai  Jaidee")? else {
            return Err("expected name command".into());
        };

        assert_eq!(args.text(), "Somchai Jaidee");

        Ok(())
    }

    #[test]
    fn phone_with_hyphens_is_text() -> TestResult {
        let Some(Command::Phone(args)) = parse("phone 081-234-5678")? else {
            return Err("expected phone command".into());
        };

        assert_eq!(args.text(), "081-234-5678");

        Ok(())
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse("espresso").is_err());
    }
}
