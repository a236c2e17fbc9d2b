//! Prefix limiting.


use alloc::boxed::Box;

use crate::core::{
  flux::Flux, publisher::Publisher, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

/// Forwards the first `limit` values, then completes and cancels the upstream.
pub(crate) struct TakePublisher<T> {
  upstream: Flux<T>,
  limit:    u64,
}

impl<T> TakePublisher<T> {
  pub(crate) const fn new(upstream: Flux<T>, limit: u64) -> Self {
    Self { upstream, limit }
  }
}

impl<T> Publisher<T> for TakePublisher<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, downstream: Box<dyn Subscriber<T>>) -> Subscription {
    self.upstream.subscribe(Box::new(TakeSubscriber {
      downstream,
      remaining: self.limit,
      upstream: None,
      done: false,
    }))
  }
}

struct TakeSubscriber<T> {
  downstream: Box<dyn Subscriber<T>>,
  remaining:  u64,
  upstream:   Option<Subscription>,
  done:       bool,
}

impl<T> TakeSubscriber<T> {
  fn finish(&mut self) {
    self.done = true;
    let cancelled_downstream = self.upstream.as_ref().is_some_and(Subscription::is_cancelled);
    if let Some(upstream) = &self.upstream {
      upstream.cancel();
    }
    if !cancelled_downstream {
      self.downstream.on_complete();
    }
  }
}

impl<T> Subscriber<T> for TakeSubscriber<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    self.upstream = Some(subscription.clone());
    self.downstream.on_subscribe(subscription);
    if self.remaining == 0 && !self.done {
      self.finish();
    }
  }

  fn on_next(&mut self, value: T) {
    if self.done {
      return;
    }
    self.remaining -= 1;
    self.downstream.on_next(value);
    if self.remaining == 0 {
      self.finish();
    }
  }

  fn on_error(&mut self, error: StreamError) {
    if !self.done {
      self.done = true;
      self.downstream.on_error(error);
    }
  }

  fn on_complete(&mut self) {
    if !self.done {
      self.done = true;
      self.downstream.on_complete();
    }
  }
}
