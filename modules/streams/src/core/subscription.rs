//! Subscriber-facing subscription handle.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};
use core::fmt;

use crate::core::{
  demand::Demand, emitter::Emitter, emitter_config::EmitterConfig, producer::Producer, subscriber::Subscriber,
  subscription_control::SubscriptionControl,
};

/// Handle through which a subscriber requests values or cancels.
///
/// Cloning the handle shares the same underlying subscription.
#[derive(Clone)]
pub struct Subscription {
  control: Arc<dyn SubscriptionControl>,
}

impl Subscription {
  /// Wraps a control implementation.
  #[must_use]
  pub fn new<C>(control: C) -> Self
  where
    C: SubscriptionControl + 'static, {
    Self { control: Arc::new(control) }
  }

  /// Wraps an already shared control implementation.
  #[must_use]
  pub fn from_shared(control: Arc<dyn SubscriptionControl>) -> Self {
    Self { control }
  }

  /// Subscribes `subscriber` to a demand-tracking subscription driven by `producer`.
  ///
  /// This is the building block for custom sources: the producer receives an [`Emitter`] and is
  /// polled whenever demand changes.
  #[must_use]
  pub fn for_producer<T>(
    subscriber: Box<dyn Subscriber<T>>,
    producer: Box<dyn Producer<T>>,
    config: EmitterConfig,
  ) -> Self
  where
    T: Send + 'static, {
    Emitter::attach(subscriber, producer, config).start()
  }

  /// Adds demand. `u64::MAX` requests unbounded demand; zero is a protocol violation.
  pub fn request(&self, amount: u64) {
    self.control.request(amount);
  }

  /// Requests unbounded demand.
  pub fn request_unbounded(&self) {
    self.control.request(Demand::UNBOUNDED_REQUEST);
  }

  /// Cancels the subscription.
  pub fn cancel(&self) {
    self.control.cancel();
  }

  /// Returns `true` once cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.control.is_cancelled()
  }

  /// Returns `true` once completed, failed or cancelled.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.control.is_terminated()
  }

  /// Returns the outstanding demand.
  #[must_use]
  pub fn demand(&self) -> Demand {
    self.control.demand()
  }

  /// Returns the number of values that were produced but never delivered.
  #[must_use]
  pub fn dropped_count(&self) -> u64 {
    self.control.dropped_count()
  }
}

impl fmt::Debug for Subscription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription")
      .field("demand", &self.demand())
      .field("cancelled", &self.is_cancelled())
      .field("terminated", &self.is_terminated())
      .field("dropped", &self.dropped_count())
      .finish()
  }
}
