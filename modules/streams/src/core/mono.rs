//! Single-value publisher.


use alloc::boxed::Box;
use core::{fmt, time::Duration};

use crate::core::{
  flux::Flux, publisher::Publisher, scheduler::VirtualScheduler, stream_error::StreamError, subscriber::Subscriber,
  subscription::Subscription,
};

/// Publisher of at most one value followed by a terminal signal.
///
/// Every constructor and operator preserves the at-most-one guarantee; [`Mono::flux`] widens the
/// type when multi-value operators are needed.
pub struct Mono<T> {
  inner: Flux<T>,
}

impl<T> Mono<T>
where
  T: Send + 'static,
{
  /// Emits `value`, then completes.
  #[must_use]
  pub fn just(value: T) -> Self
  where
    T: Clone + Sync, {
    Self { inner: Flux::from_iterable(core::iter::once(value)) }
  }

  /// Completes without a value.
  #[must_use]
  pub fn empty() -> Self {
    Self { inner: Flux::empty() }
  }

  /// Fails with `error`.
  #[must_use]
  pub fn error(error: StreamError) -> Self {
    Self { inner: Flux::error(error) }
  }

  /// Emits the value if present, then completes.
  #[must_use]
  pub fn from_option(value: Option<T>) -> Self
  where
    T: Clone + Sync, {
    Self { inner: Flux::from_iterable(value) }
  }

  /// Keeps only the first value of `flux`.
  #[must_use]
  pub fn from_flux(flux: Flux<T>) -> Self {
    Self { inner: flux.take(1) }
  }

  /// Never signals anything.
  #[must_use]
  pub fn never() -> Self {
    Self { inner: Flux::never() }
  }

  /// Transforms the value.
  #[must_use]
  pub fn map<U, F>(self, func: F) -> Mono<U>
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static, {
    Mono { inner: self.inner.map(func) }
  }

  /// Transforms the value with a fallible function.
  #[must_use]
  pub fn try_map<U, F>(self, func: F) -> Mono<U>
  where
    U: Send + 'static,
    F: Fn(T) -> Result<U, StreamError> + Send + Sync + 'static, {
    Mono { inner: self.inner.try_map(func) }
  }

  /// Completes empty when `predicate` rejects the value.
  #[must_use]
  pub fn filter<P>(self, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static, {
    Self { inner: self.inner.filter(predicate) }
  }

  /// Shifts the value and the terminal signal by `delay` on `scheduler`.
  #[must_use]
  pub fn delay_element(self, delay: Duration, scheduler: &VirtualScheduler) -> Self {
    Self { inner: self.inner.delay_sequence(delay, scheduler) }
  }

  /// Emits this value, then `other`'s values.
  #[must_use]
  pub fn concat_with(self, other: Flux<T>) -> Flux<T> {
    self.inner.concat_with(other)
  }

  /// Widens into a [`Flux`].
  #[must_use]
  pub fn flux(self) -> Flux<T> {
    self.inner
  }

  /// Starts a new subscription delivering to `subscriber`.
  pub fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    self.inner.subscribe(subscriber)
  }

  /// Subscribes with callbacks and unbounded demand.
  pub fn subscribe_with<N, E, C>(&self, on_next: N, on_error: E, on_complete: C) -> Subscription
  where
    N: FnMut(T) + Send + 'static,
    E: FnMut(StreamError) + Send + 'static,
    C: FnMut() + Send + 'static, {
    self.inner.subscribe_with(on_next, on_error, on_complete)
  }

  /// Returns the value if the stream terminates without time passing.
  ///
  /// # Errors
  ///
  /// Returns the stream's error, or [`StreamError::NotTerminated`] when it is still running.
  pub fn collect_value(&self) -> Result<Option<T>, StreamError> {
    Ok(self.inner.collect_values()?.into_iter().next())
  }
}

impl Mono<u64> {
  /// Emits `0` after `delay` on `scheduler`, then completes.
  #[must_use]
  pub fn delay(delay: Duration, scheduler: &VirtualScheduler) -> Self {
    Self { inner: Flux::interval(delay, scheduler).take(1) }
  }
}

impl<T> Clone for Mono<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> From<Mono<T>> for Flux<T> {
  fn from(mono: Mono<T>) -> Self {
    mono.inner
  }
}

impl<T> Publisher<T> for Mono<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    self.inner.subscribe(subscriber)
  }
}

impl<T> fmt::Debug for Mono<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Mono").finish_non_exhaustive()
  }
}
