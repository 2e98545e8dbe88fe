//! Checkout
//!
//! A linear four-stage wizard: `Info -> Payment -> Processing -> Success`. `Info` loops on
//! itself when validation fails and `Payment` can step back to `Info`. Every stage change
//! goes through [`CheckoutSession::apply`], which rejects actions that do not belong to the
//! current stage.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::{cart::Cart, pricing::Price};

pub mod flow;
pub mod reference;
pub mod validation;

pub use flow::{CheckoutFlow, CheckoutTimings, FlowEvent};
pub use reference::ReferenceCode;
pub use validation::{CustomerDetails, NameError, PhoneError, ValidationErrors};

/// Checkout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The action does not belong to the current stage.
    #[error("cannot {action} during the {stage} stage")]
    InvalidTransition {
        /// Current stage
        stage: StageKind,
        /// Attempted action
        action: &'static str,
    },
}

/// The four checkout stages, without their data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Capturing customer contact details
    Info,
    /// Showing the amount due
    Payment,
    /// Simulating payment verification
    Processing,
    /// Showing the reference code
    Success,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Payment => "payment",
            Self::Processing => "processing",
            Self::Success => "success",
        })
    }
}

/// The current checkout stage and the data that belongs to it.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutStage {
    /// Capturing customer contact details
    Info,

    /// Showing the amount due, fixed when the stage was entered
    Payment {
        /// Cart total at entry time
        amount_due: Price,
    },

    /// Simulating payment verification
    Processing,

    /// Terminal stage showing the reference code
    Success {
        /// Mock payment reference
        reference: ReferenceCode,
    },
}

impl CheckoutStage {
    /// The stage without its data.
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Info => StageKind::Info,
            Self::Payment { .. } => StageKind::Payment,
            Self::Processing => StageKind::Processing,
            Self::Success { .. } => StageKind::Success,
        }
    }
}

/// Everything a customer or timer can do to a checkout.
#[derive(Debug)]
pub enum CheckoutAction<'c> {
    /// Submit the contact details (Info)
    Submit(&'c Cart),

    /// Return to the contact details (Payment)
    Back,

    /// "I have paid" (Payment)
    ConfirmPayment,

    /// The simulated verification finished (Processing)
    FinishProcessing(ReferenceCode),

    /// Acknowledge the order; clears the cart (Success)
    Done(&'c mut Cart),
}

impl CheckoutAction<'_> {
    /// Short action name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submit(_) => "submit details",
            Self::Back => "go back",
            Self::ConfirmPayment => "confirm payment",
            Self::FinishProcessing(_) => "finish processing",
            Self::Done(_) => "complete the order",
        }
    }
}

/// Result of a successful [`CheckoutSession::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The stage did not change (e.g. validation failed).
    Stayed(StageKind),

    /// The stage changed.
    Moved {
        /// Previous stage
        from: StageKind,
        /// New stage
        to: StageKind,
    },

    /// The order was acknowledged and the cart cleared.
    Completed,
}

/// Transient state of one checkout.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutSession {
    stage: CheckoutStage,
    customer_name: String,
    customer_phone: String,
    errors: ValidationErrors,
    customer: Option<CustomerDetails>,
    completed: bool,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    /// Starts a checkout in the info stage with empty fields.
    pub fn new() -> Self {
        Self {
            stage: CheckoutStage::Info,
            customer_name: String::new(),
            customer_phone: String::new(),
            errors: ValidationErrors::default(),
            customer: None,
            completed: false,
        }
    }

    /// Current stage
    pub fn stage(&self) -> &CheckoutStage {
        &self.stage
    }

    /// Entered name, as typed
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Entered phone number, as typed
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// Field errors from the last submit
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validated contact details, once submitted successfully
    pub fn customer(&self) -> Option<&CustomerDetails> {
        self.customer.as_ref()
    }

    /// Amount due, while in the payment stage
    pub fn amount_due(&self) -> Option<&Price> {
        match &self.stage {
            CheckoutStage::Payment { amount_due } => Some(amount_due),
            _ => None,
        }
    }

    /// Reference code, once produced
    pub fn reference(&self) -> Option<&ReferenceCode> {
        match &self.stage {
            CheckoutStage::Success { reference } => Some(reference),
            _ => None,
        }
    }

    /// Whether the order has been acknowledged.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the customer may close the checkout. Closing is hidden while processing and
    /// after success.
    pub fn can_close(&self) -> bool {
        matches!(
            self.stage.kind(),
            StageKind::Info | StageKind::Payment
        )
    }

    /// Replaces the entered name.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the info stage.
    pub fn set_customer_name(&mut self, name: impl Into<String>) -> Result<(), CheckoutError> {
        self.require_info("edit the name")?;
        self.customer_name = name.into();

        Ok(())
    }

    /// Replaces the entered phone number.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the info stage.
    pub fn set_customer_phone(&mut self, phone: impl Into<String>) -> Result<(), CheckoutError> {
        self.require_info("edit the phone number")?;
        self.customer_phone = phone.into();

        Ok(())
    }

    fn require_info(&self, action: &'static str) -> Result<(), CheckoutError> {
        match self.stage {
            CheckoutStage::Info => Ok(()),
            _ => Err(CheckoutError::InvalidTransition {
                stage: self.stage.kind(),
                action,
            }),
        }
    }

    /// Applies an action, moving to the next stage when it is legal.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] when the action does not belong to the
    /// current stage; the session is left unchanged.
    pub fn apply(&mut self, action: CheckoutAction<'_>) -> Result<Transition, CheckoutError> {
        let from = self.stage.kind();

        let transition = match (from, action) {
            (StageKind::Info, CheckoutAction::Submit(cart)) => self.submit(cart),

            (StageKind::Payment, CheckoutAction::Back) => self.enter(CheckoutStage::Info),

            (StageKind::Payment, CheckoutAction::ConfirmPayment) => {
                self.enter(CheckoutStage::Processing)
            }

            (StageKind::Processing, CheckoutAction::FinishProcessing(reference)) => {
                info!(%reference, "payment processed");

                self.enter(CheckoutStage::Success { reference })
            }

            (StageKind::Success, CheckoutAction::Done(cart)) if !self.completed => {
                cart.clear();
                self.completed = true;

                info!("order completed");

                Transition::Completed
            }

            (_, action) => {
                return Err(CheckoutError::InvalidTransition {
                    stage: from,
                    action: action.name(),
                });
            }
        };

        Ok(transition)
    }

    fn submit(&mut self, cart: &Cart) -> Transition {
        match validation::validate_customer(&self.customer_name, &self.customer_phone) {
            Ok(customer) => {
                self.errors = ValidationErrors::default();
                self.customer = Some(customer);

                self.enter(CheckoutStage::Payment {
                    amount_due: cart.total_price(),
                })
            }
            Err(errors) => {
                debug!(?errors, "customer details rejected");

                self.errors = errors;
                self.customer = None;

                Transition::Stayed(StageKind::Info)
            }
        }
    }

    fn enter(&mut self, stage: CheckoutStage) -> Transition {
        let from = self.stage.kind();
        let to = stage.kind();

        self.stage = stage;

        debug!(%from, %to, "checkout stage changed");

        Transition::Moved { from, to }
    }
}
