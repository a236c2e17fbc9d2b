//! Source that never signals.

use alloc::boxed::Box;

use crate::core::{
  emitter::Emitter, emitter_config::EmitterConfig, producer::Producer, publisher::Publisher, subscriber::Subscriber,
  subscription::Subscription,
};

/// Keeps every subscription open without emitting anything.
pub(crate) struct NeverSource;

impl<T> Publisher<T> for NeverSource
where
  T: Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    Subscription::for_producer(subscriber, Box::new(Silent), EmitterConfig::default())
  }
}

struct Silent;

impl<T> Producer<T> for Silent {
  fn produce(&mut self, _emitter: &Emitter<T>) {}
}
