//! Value transformation.

#[cfg(test)]
mod tests;

use alloc::{boxed::Box, sync::Arc};

use crate::core::{
  flux::Flux, publisher::Publisher, stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

type Mapper<T, U> = Arc<dyn Fn(T) -> Result<U, StreamError> + Send + Sync>;

/// Applies a fallible function to every value.
///
/// A failing call cancels the upstream and terminates the downstream with the returned error.
pub(crate) struct MapPublisher<T, U> {
  upstream: Flux<T>,
  mapper:   Mapper<T, U>,
}

impl<T, U> MapPublisher<T, U> {
  pub(crate) fn new<F>(upstream: Flux<T>, mapper: F) -> Self
  where
    F: Fn(T) -> Result<U, StreamError> + Send + Sync + 'static, {
    Self { upstream, mapper: Arc::new(mapper) }
  }
}

impl<T, U> Publisher<U> for MapPublisher<T, U>
where
  T: Send + 'static,
  U: Send + 'static,
{
  fn subscribe(&self, downstream: Box<dyn Subscriber<U>>) -> Subscription {
    self.upstream.subscribe(Box::new(MapSubscriber {
      downstream,
      mapper: self.mapper.clone(),
      upstream: None,
      done: false,
    }))
  }
}

struct MapSubscriber<T, U> {
  downstream: Box<dyn Subscriber<U>>,
  mapper:     Mapper<T, U>,
  upstream:   Option<Subscription>,
  done:       bool,
}

impl<T, U> Subscriber<T> for MapSubscriber<T, U>
where
  T: Send + 'static,
  U: Send + 'static,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    self.upstream = Some(subscription.clone());
    self.downstream.on_subscribe(subscription);
  }

  fn on_next(&mut self, value: T) {
    if self.done {
      return;
    }
    match (self.mapper)(value) {
      | Ok(mapped) => self.downstream.on_next(mapped),
      | Err(error) => {
        self.done = true;
        tracing::debug!(%error, "mapping function failed");
        if let Some(upstream) = &self.upstream {
          upstream.cancel();
        }
        self.downstream.on_error(error);
      },
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
