//! Callback-driven source.


use alloc::{boxed::Box, sync::Arc};

use crate::core::{
  emitter::Emitter, emitter_config::EmitterConfig, producer::Producer, publisher::Publisher, subscriber::Subscriber,
  subscription::Subscription,
};

type Generator<T> = Arc<dyn Fn(&Emitter<T>) + Send + Sync>;

/// Hands every new subscription's [`Emitter`] to a user callback.
///
/// The callback runs once per subscription, right after the subscriber received its handle. It
/// may emit synchronously or keep a clone of the emitter and emit later.
pub(crate) struct CreateSource<T> {
  generator: Generator<T>,
  config:    EmitterConfig,
}

impl<T> CreateSource<T> {
  pub(crate) fn new<F>(config: EmitterConfig, generator: F) -> Self
  where
    F: Fn(&Emitter<T>) + Send + Sync + 'static, {
    Self { generator: Arc::new(generator), config }
  }
}

impl<T> Publisher<T> for CreateSource<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<T>>) -> Subscription {
    let producer = CreateProducer { generator: Some(self.generator.clone()) };
    Subscription::for_producer(subscriber, Box::new(producer), self.config)
  }
}

struct CreateProducer<T> {
  generator: Option<Generator<T>>,
}

impl<T> Producer<T> for CreateProducer<T>
where
  T: Send + 'static,
{
  fn produce(&mut self, emitter: &Emitter<T>) {
    if let Some(generator) = self.generator.take() {
      generator(emitter);
    }
  }
}
