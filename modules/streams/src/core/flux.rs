//! Multi-value publisher.


use alloc::{boxed::Box, sync::Arc, vec, vec::Vec};
use core::{fmt, time::Duration};

use spin::Mutex;

use crate::core::{
  emitter::Emitter,
  emitter_config::EmitterConfig,
  lambda_subscriber::LambdaSubscriber,
  operator::{
    ConcatPublisher, DelayElementsPublisher, DelaySequencePublisher, FilterPublisher, MapPublisher, TakePublisher,
  },
  publisher::Publisher,
  scheduler::VirtualScheduler,
  source::{CreateSource, FailedSource, IntervalSource, IteratorSource, NeverSource},
  stream_error::StreamError,
  subscriber::Subscriber,
  subscription::Subscription,
};

/// Publisher of zero or more values followed by at most one terminal signal.
///
/// A `Flux` is a description: nothing happens until [`subscribe`](Self::subscribe) is called, and
/// every subscription runs independently. Cloning is cheap.
pub struct Flux<T> {
  inner: Arc<dyn Publisher<T>>,
}

impl<T> Flux<T>
where
  T: Send + 'static,
{
  /// Wraps a custom publisher.
  #[must_use]
  pub fn from_publisher<P>(publisher: P) -> Self
  where
    P: Publisher<T> + 'static, {
    Self { inner: Arc::new(publisher) }
  }

  /// Emits `values` in order, then completes.
  #[must_use]
  pub fn just<I>(values: I) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: Clone + Send + Sync + 'static, {
    Self::from_iterable(values)
  }

  /// Emits the items of `iterable` in order, then completes.
  ///
  /// Each subscription iterates over its own clone of the iterator.
  #[must_use]
  pub fn from_iterable<I>(iterable: I) -> Self
  where
    I: IntoIterator<Item = T>,
    I::IntoIter: Clone + Send + Sync + 'static, {
    Self::from_publisher(IteratorSource::new(iterable.into_iter()))
  }

  /// Completes without emitting.
  #[must_use]
  pub fn empty() -> Self {
    Self::from_publisher(IteratorSource::new(core::iter::empty::<T>()))
  }

  /// Fails with `error` without emitting.
  #[must_use]
  pub fn error(error: StreamError) -> Self {
    Self::from_publisher(FailedSource::new(error))
  }

  /// Never signals anything.
  #[must_use]
  pub fn never() -> Self {
    Self::from_publisher(NeverSource)
  }

  /// Hands each subscription's [`Emitter`] to `generator`, failing on overflow.
  #[must_use]
  pub fn create<F>(generator: F) -> Self
  where
    F: Fn(&Emitter<T>) + Send + Sync + 'static, {
    Self::create_with_config(EmitterConfig::default(), generator)
  }

  /// Hands each subscription's [`Emitter`] to `generator` with an explicit overflow policy.
  #[must_use]
  pub fn create_with_config<F>(config: EmitterConfig, generator: F) -> Self
  where
    F: Fn(&Emitter<T>) + Send + Sync + 'static, {
    Self::from_publisher(CreateSource::new(config, generator))
  }

  /// Emits every source's values in turn. A source is subscribed only after the previous one
  /// completed; the first error ends the sequence.
  #[must_use]
  pub fn concat<I>(sources: I) -> Self
  where
    I: IntoIterator<Item = Flux<T>>, {
    Self::from_publisher(ConcatPublisher::new(sources.into_iter().collect()))
  }

  /// Transforms every value.
  #[must_use]
  pub fn map<U, F>(self, func: F) -> Flux<U>
  where
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static, {
    Flux::from_publisher(MapPublisher::new(self, move |value| Ok(func(value))))
  }

  /// Transforms every value with a fallible function; the first `Err` terminates the stream.
  #[must_use]
  pub fn try_map<U, F>(self, func: F) -> Flux<U>
  where
    U: Send + 'static,
    F: Fn(T) -> Result<U, StreamError> + Send + Sync + 'static, {
    Flux::from_publisher(MapPublisher::new(self, func))
  }

  /// Keeps the values accepted by `predicate`.
  #[must_use]
  pub fn filter<P>(self, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static, {
    Self::from_publisher(FilterPublisher::new(self, predicate))
  }

  /// Emits the first `limit` values, then completes and cancels the upstream.
  #[must_use]
  pub fn take(self, limit: u64) -> Self {
    Self::from_publisher(TakePublisher::new(self, limit))
  }

  /// Emits this flux's values, then `other`'s.
  #[must_use]
  pub fn concat_with(self, other: Flux<T>) -> Self {
    Self::from_publisher(ConcatPublisher::new(vec![self, other]))
  }

  /// Spaces values by `delay` on `scheduler`.
  #[must_use]
  pub fn delay_elements(self, delay: Duration, scheduler: &VirtualScheduler) -> Self {
    Self::from_publisher(DelayElementsPublisher::new(self, delay, scheduler.clone()))
  }

  /// Shifts every signal, terminal ones included, by `delay` on `scheduler`.
  #[must_use]
  pub fn delay_sequence(self, delay: Duration, scheduler: &VirtualScheduler) -> Self {
    Self::from_publisher(DelaySequencePublisher::new(self, delay, scheduler.clone()))
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
    self.subscribe(Box::new(LambdaSubscriber::new(on_next, on_error, on_complete)))
  }

  /// Subscribes with unbounded demand and returns the values if the stream terminates without
  /// time passing.
  ///
  /// # Errors
  ///
  /// Returns the stream's error, or [`StreamError::NotTerminated`] when the stream is still
  /// running once the subscription call returned (the subscription is cancelled in that case).
  pub fn collect_values(&self) -> Result<Vec<T>, StreamError> {
    let outcome = Arc::new(Mutex::new(Collected { values: Vec::new(), terminal: None }));
    let subscription = self.subscribe(Box::new(CollectSubscriber { outcome: outcome.clone() }));
    let terminal = outcome.lock().terminal.take();
    match terminal {
      | Some(Ok(())) => Ok(core::mem::take(&mut outcome.lock().values)),
      | Some(Err(error)) => Err(error),
      | None => {
        subscription.cancel();
        Err(StreamError::NotTerminated)
      },
    }
  }
}

impl Flux<u64> {
  /// Emits `count` consecutive integers starting at `start`.
  #[must_use]
  pub fn range(start: u64, count: u64) -> Self {
    Self::from_iterable(start..start.saturating_add(count))
  }

  /// Emits `0, 1, 2, ...` at `period`, `2 * period`, ... on `scheduler`. Never completes.
  #[must_use]
  pub fn interval(period: Duration, scheduler: &VirtualScheduler) -> Self {
    Self::from_publisher(IntervalSource::new(period, scheduler.clone()))
  }
}

impl<T> Clone for Flux<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> Publisher<T> for Flux<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    self.inner.subscribe(subscriber)
  }
}

impl<T> fmt::Debug for Flux<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Flux").finish_non_exhaustive()
  }
}

struct Collected<T> {
  values:   Vec<T>,
  terminal: Option<Result<(), StreamError>>,
}

struct CollectSubscriber<T> {
  outcome: Arc<Mutex<Collected<T>>>,
}

impl<T> Subscriber<T> for CollectSubscriber<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    subscription.request_unbounded();
  }

  fn on_next(&mut self, value: T) {
    self.outcome.lock().values.push(value);
  }

  fn on_error(&mut self, error: StreamError) {
    self.outcome.lock().terminal = Some(Err(error));
  }

  fn on_complete(&mut self) {
    self.outcome.lock().terminal = Some(Ok(()));
  }
}
