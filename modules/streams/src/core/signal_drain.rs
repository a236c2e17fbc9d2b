//! Serialised, re-entrancy safe delivery of signals to one subscriber.


use alloc::{boxed::Box, collections::VecDeque};

use portable_atomic::{AtomicU64, AtomicUsize, Ordering};
use spin::Mutex;

use crate::core::{signal::Signal, subscriber::Subscriber, subscription::Subscription};

/// Queue in front of a subscriber.
///
/// Only the thread that wins the work-in-progress counter calls the subscriber. Signals pushed
/// while a callback runs, including from inside that callback, are delivered by the running loop
/// once the callback returns. The subscriber is released after a terminal signal, or as soon as
/// the `halted` check reports a cancellation. Values that are cleared from the queue instead of
/// delivered are counted.
pub(crate) struct SignalDrain<T> {
  queue:     Mutex<VecDeque<Signal<T>>>,
  consumer:  Mutex<Option<Box<dyn Subscriber<T>>>>,
  wip:       AtomicUsize,
  discarded: AtomicU64,
}

impl<T> SignalDrain<T> {
  pub(crate) fn new(consumer: Box<dyn Subscriber<T>>) -> Self {
    Self {
      queue:     Mutex::new(VecDeque::new()),
      consumer:  Mutex::new(Some(consumer)),
      wip:       AtomicUsize::new(0),
      discarded: AtomicU64::new(0),
    }
  }

  /// Delivers `on_subscribe`, then everything queued meanwhile.
  pub(crate) fn start<H>(&self, subscription: &Subscription, halted: H)
  where
    H: Fn() -> bool, {
    self.start_after(|| {}, subscription, halted);
  }

  /// Runs `prepare` with deliveries held back, then behaves like [`start`](Self::start).
  ///
  /// Signals pushed by `prepare` reach the subscriber only after its `on_subscribe`.
  pub(crate) fn start_after<P, H>(&self, prepare: P, subscription: &Subscription, halted: H)
  where
    P: FnOnce(),
    H: Fn() -> bool, {
    self.wip.fetch_add(1, Ordering::AcqRel);
    prepare();
    if let Some(consumer) = self.consumer.lock().as_mut() {
      consumer.on_subscribe(subscription);
    }
    self.drain_loop(&halted);
  }

  pub(crate) fn push(&self, signal: Signal<T>) {
    self.queue.lock().push_back(signal);
  }

  /// Drops queued signals and returns how many values were among them.
  pub(crate) fn discard(&self) -> u64 {
    let values = {
      let mut queue = self.queue.lock();
      let values = queue.iter().filter(|signal| signal.is_value()).count() as u64;
      queue.clear();
      values
    };
    if values > 0 {
      self.discarded.fetch_add(values, Ordering::AcqRel);
    }
    values
  }

  /// Returns the number of values discarded over the drain's lifetime.
  pub(crate) fn discarded_count(&self) -> u64 {
    self.discarded.load(Ordering::Acquire)
  }

  /// Returns `true` while signals wait for delivery.
  pub(crate) fn has_pending(&self) -> bool {
    !self.queue.lock().is_empty()
  }

  pub(crate) fn drain<H>(&self, halted: H)
  where
    H: Fn() -> bool, {
    if self.wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    self.drain_loop(&halted);
  }

  fn drain_loop<H>(&self, halted: &H)
  where
    H: Fn() -> bool, {
    let mut missed = 1;
    loop {
      self.deliver_pending(halted);
      let previous = self.wip.fetch_sub(missed, Ordering::AcqRel);
      missed = previous - missed;
      if missed == 0 {
        break;
      }
    }
  }

  fn deliver_pending<H>(&self, halted: &H)
  where
    H: Fn() -> bool, {
    loop {
      if halted() {
        self.consumer.lock().take();
        return;
      }
      let Some(signal) = self.queue.lock().pop_front() else {
        return;
      };
      let mut consumer = self.consumer.lock();
      let Some(subscriber) = consumer.as_mut() else {
        drop(consumer);
        if signal.is_value() {
          self.discarded.fetch_add(1, Ordering::AcqRel);
        }
        self.discard();
        return;
      };
      let terminal = signal.is_terminal();
      match signal {
        | Signal::Value(value) => subscriber.on_next(value),
        | Signal::Complete => subscriber.on_complete(),
        | Signal::Error(error) => subscriber.on_error(error),
      }
      if terminal {
        consumer.take();
      }
    }
  }
}
