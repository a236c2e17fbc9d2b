//! Manually driven publisher for tests.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::fmt;

use spin::Mutex;

use super::TestPublisherConfig;
use crate::core::{
  Emitter, EmitterConfig, Flux, Mono, Producer, ProtocolViolation, Publisher, StreamError, Subscriber, Subscription,
};

/// Terminal signal remembered for late subscribers.
#[derive(Clone)]
enum Terminal {
  Complete,
  Error(StreamError),
}

struct TestPublisherState<T> {
  emitters:   Vec<Emitter<T>>,
  subscribed: usize,
  null_seen:  bool,
  terminal:   Option<Terminal>,
}

/// Hot publisher whose signals are pushed by the test.
///
/// Every live subscription receives every emission. Values emitted without demand fail the
/// subscription unless the publisher was created with a lenient [`TestPublisherConfig`], in which
/// case they are dropped and counted. Emissions after a terminal signal reach the terminated
/// subscriptions only to be counted as dropped.
pub struct TestPublisher<T> {
  state:  Arc<Mutex<TestPublisherState<T>>>,
  config: TestPublisherConfig,
}

impl<T> TestPublisher<T>
where
  T: Clone + Send + 'static,
{
  /// Creates a publisher that enforces the protocol.
  #[must_use]
  pub fn create() -> Self {
    Self::create_noncompliant(TestPublisherConfig::default())
  }

  /// Creates a publisher that tolerates the deviations enabled in `config`.
  #[must_use]
  pub fn create_noncompliant(config: TestPublisherConfig) -> Self {
    let state = TestPublisherState { emitters: Vec::new(), subscribed: 0, null_seen: false, terminal: None };
    Self { state: Arc::new(Mutex::new(state)), config }
  }

  /// Returns the configuration.
  #[must_use]
  pub const fn config(&self) -> TestPublisherConfig {
    self.config
  }

  /// Emits `value` to every subscription.
  pub fn next(&self, value: T) -> &Self {
    for emitter in self.emitters() {
      emitter.next(value.clone());
    }
    self
  }

  /// Emits every value in order.
  pub fn next_all<I>(&self, values: I) -> &Self
  where
    I: IntoIterator<Item = T>, {
    for value in values {
      self.next(value);
    }
    self
  }

  /// Emits a possibly null value.
  ///
  /// A null terminates every subscription with [`ProtocolViolation::NullValue`]. When nulls are
  /// allowed it is skipped instead, and the next completion turns into that error.
  pub fn next_nullable(&self, value: Option<T>) -> &Self {
    match value {
      | Some(value) => self.next(value),
      | None if self.config.allow_null() => {
        tracing::trace!("null value deferred until completion");
        self.state.lock().null_seen = true;
        self
      },
      | None => self.error(ProtocolViolation::NullValue.into()),
    }
  }

  /// Emits `values`, then completes.
  pub fn emit<I>(&self, values: I) -> &Self
  where
    I: IntoIterator<Item = T>, {
    self.next_all(values).complete()
  }

  /// Emits possibly null `values`, then completes.
  pub fn emit_nullable<I>(&self, values: I) -> &Self
  where
    I: IntoIterator<Item = Option<T>>, {
    for value in values {
      self.next_nullable(value);
    }
    self.complete()
  }

  /// Completes every subscription, or fails them if a null was skipped.
  pub fn complete(&self) -> &Self {
    let null_seen = self.state.lock().null_seen;
    if null_seen {
      return self.terminate(Terminal::Error(ProtocolViolation::NullValue.into()));
    }
    self.terminate(Terminal::Complete)
  }

  /// Fails every subscription.
  pub fn error(&self, error: StreamError) -> &Self {
    self.terminate(Terminal::Error(error))
  }

  /// Returns this publisher as a [`Flux`].
  #[must_use]
  pub fn flux(&self) -> Flux<T> {
    Flux::from_publisher(self.clone())
  }

  /// Returns this publisher as a [`Mono`] of its first value.
  #[must_use]
  pub fn mono(&self) -> Mono<T> {
    Mono::from_flux(self.flux())
  }

  /// Returns the number of subscriptions that are neither cancelled nor terminated.
  #[must_use]
  pub fn subscriber_count(&self) -> usize {
    self.state.lock().emitters.iter().filter(|emitter| !emitter.is_terminated()).count()
  }

  /// Returns `true` once anything subscribed.
  #[must_use]
  pub fn was_subscribed(&self) -> bool {
    self.state.lock().subscribed > 0
  }

  /// Returns `true` once any subscription was cancelled.
  #[must_use]
  pub fn was_cancelled(&self) -> bool {
    self.state.lock().emitters.iter().any(Emitter::is_cancelled)
  }

  /// Returns `true` once any subscriber requested.
  #[must_use]
  pub fn was_requested(&self) -> bool {
    self.state.lock().emitters.iter().any(Emitter::was_requested)
  }

  fn emitters(&self) -> Vec<Emitter<T>> {
    self.state.lock().emitters.clone()
  }

  fn terminate(&self, terminal: Terminal) -> &Self {
    {
      let mut state = self.state.lock();
      if state.terminal.is_some() {
        tracing::warn!("terminal signal after the test publisher already terminated");
      } else {
        state.terminal = Some(terminal.clone());
      }
    }
    for emitter in self.emitters() {
      signal_terminal(&emitter, terminal.clone());
    }
    self
  }
}

fn signal_terminal<T>(emitter: &Emitter<T>, terminal: Terminal)
where
  T: Send + 'static, {
  match terminal {
    | Terminal::Complete => emitter.complete(),
    | Terminal::Error(error) => emitter.error(error),
  }
}

impl<T> Clone for TestPublisher<T> {
  fn clone(&self) -> Self {
    Self { state: self.state.clone(), config: self.config }
  }
}

impl<T> Publisher<T> for TestPublisher<T>
where
  T: Clone + Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    let config = EmitterConfig::new(self.config.strict_on_overflow_demand());
    let emitter = Emitter::attach(subscriber, Box::new(Idle), config);
    let terminal = {
      let mut state = self.state.lock();
      state.subscribed += 1;
      state.emitters.push(emitter.clone());
      state.terminal.clone()
    };
    let subscription = emitter.clone().start();
    if let Some(terminal) = terminal {
      signal_terminal(&emitter, terminal);
    }
    subscription
  }
}

impl<T> fmt::Debug for TestPublisher<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.lock();
    f.debug_struct("TestPublisher")
      .field("config", &self.config)
      .field("subscriptions", &state.emitters.len())
      .field("terminated", &state.terminal.is_some())
      .finish()
  }
}

/// Producer that leaves all emissions to the test.
struct Idle;

impl<T> Producer<T> for Idle {
  fn produce(&mut self, _emitter: &Emitter<T>) {}
}
