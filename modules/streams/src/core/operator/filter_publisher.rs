//! Predicate filtering.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};

use crate::core::{
  flux::Flux, publisher::Publisher, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Forwards the values accepted by a predicate.
///
/// A rejected value used up one unit of upstream demand; under bounded demand that unit is
/// requested again so the subscriber still receives everything it asked for.
pub(crate) struct FilterPublisher<T> {
  upstream:  Flux<T>,
  predicate: Predicate<T>,
}

impl<T> FilterPublisher<T> {
  pub(crate) fn new<P>(upstream: Flux<T>, predicate: P) -> Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static, {
    Self { upstream, predicate: Arc::new(predicate) }
  }
}

impl<T> Publisher<T> for FilterPublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, downstream: Box<dyn Subscriber<T>>) -> Subscription {
    let filter = FilterSubscriber { downstream, predicate: self.predicate.clone(), upstream: None };
    self.upstream.subscribe(Box::new(filter))
  }
}

struct FilterSubscriber<T> {
  downstream: Box<dyn Subscriber<T>>,
  predicate:  Predicate<T>,
  upstream:   Option<Subscription>,
}

impl<T> Subscriber<T> for FilterSubscriber<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    self.upstream = Some(subscription.clone());
    self.downstream.on_subscribe(subscription);
  }

  fn on_next(&mut self, value: T) {
    if (self.predicate)(&value) {
      self.downstream.on_next(value);
      return;
    }
    if let Some(upstream) = &self.upstream
      && !upstream.demand().is_unbounded()
    {
      upstream.request(1);
    }
  }

  fn on_error(&mut self, error: StreamError) {
    self.downstream.on_error(error);
  }

  fn on_complete(&mut self) {
    self.downstream.on_complete();
  }
}
