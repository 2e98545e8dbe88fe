//! Timed checkout flow
//!
//! Wraps a [`CheckoutSession`] with the two fixed delays of the wizard: the simulated
//! verification before a reference code is issued, and the display delay after the order is
//! acknowledged. Timers are plain [`Sleep`] futures owned by the flow, so dropping or
//! cancelling the flow guarantees nothing fires for a discarded session.

use std::{pin::Pin, time::Duration};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::time::{Sleep, sleep};
use tracing::{debug, info};

use crate::cart::Cart;

use super::{
    CheckoutAction, CheckoutError, CheckoutSession, ReferenceCode, StageKind, Transition,
};

/// Default delay before a reference code is issued.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Default delay between completing an order and dismissing the checkout.
pub const DEFAULT_DISMISS_DELAY: Duration = Duration::from_millis(3000);

/// Fixed delays of the checkout wizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckoutTimings {
    /// Time spent in the processing stage
    pub processing_delay: Duration,

    /// Time the success stage stays up after the order is acknowledged
    pub dismiss_delay: Duration,
}

impl Default for CheckoutTimings {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
            dismiss_delay: DEFAULT_DISMISS_DELAY,
        }
    }
}

/// What a fired timer did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    /// Processing finished and the flow entered the success stage.
    ProcessingFinished(ReferenceCode),

    /// The display delay elapsed; the caller should discard the flow.
    Dismissed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    Processing,
    Dismiss,
}

#[derive(Debug)]
struct StageTimer {
    kind: TimerKind,
    sleep: Pin<Box<Sleep>>,
}

impl StageTimer {
    fn new(kind: TimerKind, delay: Duration) -> Self {
        Self {
            kind,
            sleep: Box::pin(sleep(delay)),
        }
    }
}

/// A checkout session driven by cancellable timers.
#[derive(Debug)]
pub struct CheckoutFlow<R = StdRng> {
    session: CheckoutSession,
    timings: CheckoutTimings,
    rng: R,
    timer: Option<StageTimer>,
}

impl CheckoutFlow<StdRng> {
    /// Starts a checkout whose reference codes come from an entropy-seeded generator.
    pub fn new(timings: CheckoutTimings) -> Self {
        Self::with_rng(timings, StdRng::from_entropy())
    }
}

impl<R: Rng> CheckoutFlow<R> {
    /// Starts a checkout with an explicit random source.
    pub fn with_rng(timings: CheckoutTimings, rng: R) -> Self {
        Self {
            session: CheckoutSession::new(),
            timings,
            rng,
            timer: None,
        }
    }

    /// The underlying session
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Current stage
    pub fn stage(&self) -> StageKind {
        self.session.stage().kind()
    }

    /// Configured delays
    pub fn timings(&self) -> CheckoutTimings {
        self.timings
    }

    /// Whether a timer is waiting to fire.
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Replaces the entered name.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the info stage.
    pub fn set_customer_name(&mut self, name: impl Into<String>) -> Result<(), CheckoutError> {
        self.session.set_customer_name(name)
    }

    /// Replaces the entered phone number.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the info stage.
    pub fn set_customer_phone(&mut self, phone: impl Into<String>) -> Result<(), CheckoutError> {
        self.session.set_customer_phone(phone)
    }

    /// Submits the contact details.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the info stage.
    pub fn submit(&mut self, cart: &Cart) -> Result<Transition, CheckoutError> {
        self.session.apply(CheckoutAction::Submit(cart))
    }

    /// Steps back from payment to info.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the payment stage.
    pub fn back(&mut self) -> Result<Transition, CheckoutError> {
        self.session.apply(CheckoutAction::Back)
    }

    /// Confirms payment and arms the processing timer.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the payment stage.
    pub fn confirm_payment(&mut self) -> Result<Transition, CheckoutError> {
        let transition = self.session.apply(CheckoutAction::ConfirmPayment)?;

        debug!(delay = ?self.timings.processing_delay, "processing timer armed");
        self.timer = Some(StageTimer::new(
            TimerKind::Processing,
            self.timings.processing_delay,
        ));

        Ok(transition)
    }

    /// Acknowledges the order, clears the cart and arms the dismiss timer.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the success stage or when the order
    /// was already acknowledged.
    pub fn done(&mut self, cart: &mut Cart) -> Result<Transition, CheckoutError> {
        let transition = self.session.apply(CheckoutAction::Done(cart))?;

        debug!(delay = ?self.timings.dismiss_delay, "dismiss timer armed");
        self.timer = Some(StageTimer::new(TimerKind::Dismiss, self.timings.dismiss_delay));

        Ok(transition)
    }

    /// Cancels any pending timer.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(kind = ?timer.kind, "checkout timer cancelled");
        }
    }

    /// Waits for the pending timer and applies its effect.
    ///
    /// Never resolves while no timer is pending, so it can sit in a `tokio::select!` next to
    /// user input.
    pub async fn tick(&mut self) -> FlowEvent {
        let Some(timer) = self.timer.as_mut() else {
            return std::future::pending().await;
        };

        timer.sleep.as_mut().await;

        let kind = timer.kind;
        self.timer = None;

        match kind {
            TimerKind::Processing => {
                let reference = ReferenceCode::generate(&mut self.rng);

                // Only the processing timer can be pending while processing.
                if let Err(err) = self
                    .session
                    .apply(CheckoutAction::FinishProcessing(reference.clone()))
                {
                    debug!("processing timer fired outside processing: {err}");
                }

                FlowEvent::ProcessingFinished(reference)
            }
            TimerKind::Dismiss => {
                info!("checkout dismissed");

                FlowEvent::Dismissed
            }
        }
    }
}
