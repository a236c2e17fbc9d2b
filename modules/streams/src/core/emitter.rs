//! Producer-side handle of a demand-tracking subscription.


use alloc::{boxed::Box, sync::Arc};
use core::fmt;

use crate::core::{
  demand::Demand, emitter_config::EmitterConfig, producer::Producer, stream_error::StreamError,
  subscriber::Subscriber, subscription::Subscription, subscription_control::SubscriptionControl,
  subscription_core::SubscriptionCore, subscription_state::SubscriptionState,
};

/// Pushes signals into a subscription while honouring the subscriber's demand.
///
/// Values emitted without outstanding demand are dropped and counted, or fail the subscription
/// with a demand-exceeded violation when the subscription is strict. Anything emitted after a
/// terminal signal or a cancellation is dropped.
pub struct Emitter<T> {
  core: Arc<SubscriptionCore<T>>,
}

impl<T> Emitter<T>
where
  T: Send + 'static,
{
  /// Creates the subscription without notifying the subscriber yet.
  pub(crate) fn attach(
    subscriber: Box<dyn Subscriber<T>>,
    producer: Box<dyn Producer<T>>,
    config: EmitterConfig,
  ) -> Self {
    Self { core: Arc::new(SubscriptionCore::new(subscriber, producer, config)) }
  }

  pub(crate) const fn from_core(core: Arc<SubscriptionCore<T>>) -> Self {
    Self { core }
  }

  /// Calls `on_subscribe` and runs the producer for the first time.
  pub(crate) fn start(self) -> Subscription {
    let subscription = self.subscription();
    self.core.start(&subscription);
    subscription
  }

  /// Emits a value.
  pub fn next(&self, value: T) {
    self.core.emit_next(value);
  }

  /// Completes the stream.
  pub fn complete(&self) {
    self.core.emit_complete();
  }

  /// Fails the stream.
  pub fn error(&self, error: StreamError) {
    self.core.emit_error(error);
  }

  /// Returns the outstanding demand.
  #[must_use]
  pub fn requested(&self) -> Demand {
    self.core.demand()
  }

  /// Returns `true` once the subscriber cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.core.state() == SubscriptionState::Cancelled
  }

  /// Returns `true` once the subscription completed, failed or was cancelled.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.core.state().is_terminated()
  }

  /// Returns the number of values that were emitted but never delivered.
  #[must_use]
  pub fn dropped_count(&self) -> u64 {
    self.core.dropped_count()
  }

  /// Returns `true` once the subscriber requested at least once.
  #[must_use]
  pub fn was_requested(&self) -> bool {
    self.core.was_requested()
  }

  /// Returns a subscriber-side handle for this subscription.
  #[must_use]
  pub fn subscription(&self) -> Subscription {
    Subscription::new(self.clone())
  }
}

impl<T> Clone for Emitter<T> {
  fn clone(&self) -> Self {
    Self { core: self.core.clone() }
  }
}

impl<T> SubscriptionControl for Emitter<T>
where
  T: Send + 'static,
{
  fn request(&self, amount: u64) {
    self.core.request(amount);
  }

  fn cancel(&self) {
    self.core.cancel();
  }

  fn is_cancelled(&self) -> bool {
    Emitter::is_cancelled(self)
  }

  fn is_terminated(&self) -> bool {
    Emitter::is_terminated(self)
  }

  fn demand(&self) -> Demand {
    self.core.demand()
  }

  fn dropped_count(&self) -> u64 {
    self.core.dropped_count()
  }
}

impl<T> fmt::Debug for Emitter<T>
where
  T: Send + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Emitter")
      .field("requested", &self.requested())
      .field("terminated", &self.is_terminated())
      .field("dropped", &self.dropped_count())
      .finish()
  }
}
