//! Source that fails immediately.

use alloc::boxed::Box;

use crate::core::{
  emitter::Emitter, emitter_config::EmitterConfig, producer::Producer, publisher::Publisher,
  stream_error::StreamError, subscriber::Subscriber, subscription::Subscription,
};

/// Signals `error` to every subscriber without emitting values.
pub(crate) struct FailedSource {
  error: StreamError,
}

impl FailedSource {
  pub(crate) const fn new(error: StreamError) -> Self {
    Self { error }
  }
}

impl<T> Publisher<T> for FailedSource
where
  T: Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    let producer = FailedProducer { error: Some(self.error.clone()) };
    Subscription::for_producer(subscriber, Box::new(producer), EmitterConfig::default())
  }
}

struct FailedProducer {
  error: Option<StreamError>,
}

impl<T> Producer<T> for FailedProducer
where
  T: Send + 'static,
{
  fn produce(&mut self, emitter: &Emitter<T>) {
    if let Some(error) = self.error.take() {
      emitter.error(error);
    }
  }
}
