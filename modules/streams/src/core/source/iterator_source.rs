//! Iterator-backed source.


use alloc::boxed::Box;
use core::iter::Peekable;

use crate::core::{
  emitter::Emitter, emitter_config::EmitterConfig, producer::Producer, publisher::Publisher, subscriber::Subscriber,
  subscription::Subscription,
};

/// Emits the items of a fresh clone of `iter` for every subscriber, then completes.
pub(crate) struct IteratorSource<I> {
  iter: I,
}

impl<I> IteratorSource<I> {
  pub(crate) const fn new(iter: I) -> Self {
    Self { iter }
  }
}

impl<I> Publisher<I::Item> for IteratorSource<I>
where
  I: Iterator + Clone + Send + Sync + 'static,
  I::Item: Send + 'static,
{
  fn subscribe(&self, subscriber: Box<dyn Subscriber<I::Item>>) -> Subscription {
    let producer = IteratorProducer { iter: self.iter.clone().peekable() };
    Subscription::for_producer(subscriber, Box::new(producer), EmitterConfig::default())
  }
}

struct IteratorProducer<I: Iterator> {
  iter: Peekable<I>,
}

impl<I> Producer<I::Item> for IteratorProducer<I>
where
  I: Iterator + Send,
  I::Item: Send + 'static,
{
  fn produce(&mut self, emitter: &Emitter<I::Item>) {
    while !emitter.is_terminated() && emitter.requested().has_demand() {
      match self.iter.next() {
        | Some(item) => emitter.next(item),
        | None => break,
      }
    }
    // Exhaustion completes without waiting for further demand.
    if !emitter.is_terminated() && self.iter.peek().is_none() {
      emitter.complete();
    }
  }
}
