//! Callback-based subscriber.

use crate::core::{stream_error::StreamError, subscriber::Subscriber, subscription::Subscription};

/// Forwards signals to closures and requests unbounded demand on subscribe.
pub(crate) struct LambdaSubscriber<N, E, C> {
  on_next:     N,
  on_error:    E,
  on_complete: C,
}

impl<N, E, C> LambdaSubscriber<N, E, C> {
  pub(crate) const fn new(on_next: N, on_error: E, on_complete: C) -> Self {
    Self { on_next, on_error, on_complete }
  }
}

impl<T, N, E, C> Subscriber<T> for LambdaSubscriber<N, E, C>
where
  N: FnMut(T) + Send,
  E: FnMut(StreamError) + Send,
  C: FnMut() + Send,
{
  fn on_subscribe(&mut self, subscription: &Subscription) {
    subscription.request_unbounded();
  }

  fn on_next(&mut self, value: T) {
    (self.on_next)(value);
  }

  fn on_error(&mut self, error: StreamError) {
    (self.on_error)(error);
  }

  fn on_complete(&mut self) {
    (self.on_complete)();
  }
}
